use std::ops::Index;

use tracing::debug;

use crate::error::{LinextError, Result};

/// Symmetric comparability matrix over seed positions `1..=n`.
///
/// `grid[(a, b)]` is `true` iff `a` and `b` appear together in some
/// constraint pair. Column `n + 1` is an always-true sentinel on every row,
/// so a lookup one past the end of an ordering never needs a bounds check.
/// Row and column `0` are unused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparabilityGrid {
    n: usize,
    cells: Vec<bool>,
}

impl ComparabilityGrid {
    /// Build the grid for `n` items from precedence pairs `(i, j)`, each
    /// meaning "seed position `i` must precede seed position `j`".
    ///
    /// Every pair must satisfy `1 <= i < j <= n`. A pair with `i >= j` means
    /// the seed the pairs were indexed against is not itself a valid
    /// ordering, and construction fails with
    /// [`LinextError::SeedOrderingInvalid`]. Duplicate pairs are harmless.
    pub fn from_pairs<I>(n: usize, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let dim = n + 2;
        let mut grid = Self { n, cells: vec![false; dim * dim] };
        let mut constraints = 0usize;
        for (i, j) in pairs {
            if i == 0 || j == 0 || i > n || j > n {
                return Err(LinextError::PairOutOfRange { before: i, after: j, n });
            }
            if i >= j {
                return Err(LinextError::SeedOrderingInvalid { before: i, after: j });
            }
            grid.set(i, j);
            grid.set(j, i);
            constraints += 1;
        }
        for a in 0..dim {
            grid.set(a, n + 1);
        }
        debug!(n, constraints, "built comparability grid");
        Ok(grid)
    }

    /// Number of items the grid was built for.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Whether a direct constraint ties `a` and `b` together, in either
    /// direction. Always `true` when `b` is the sentinel `n + 1`.
    #[inline]
    pub fn comparable(&self, a: usize, b: usize) -> bool {
        self.cells[a * self.dim() + b]
    }

    #[inline]
    fn dim(&self) -> usize {
        self.n + 2
    }

    fn set(&mut self, a: usize, b: usize) {
        let dim = self.dim();
        self.cells[a * dim + b] = true;
    }
}

impl Index<(usize, usize)> for ComparabilityGrid {
    type Output = bool;

    fn index(&self, (a, b): (usize, usize)) -> &Self::Output {
        &self.cells[a * self.dim() + b]
    }
}
