//! Varol-Rotem enumeration of linear extensions.
//!
//! Yaakov L. Varol and Doron Rotem, "An Algorithm to Generate All
//! Topological Sorting Arrangements", Computer J. 24 (1981), pp. 83-84.
//!
//! The walk starts from the seed `[1, 2, ..., n]` and moves from one
//! extension to the next with adjacent transpositions, carrying a value back
//! to its home position with a rotation once it cannot move further right.

use std::iter::FusedIterator;

use tracing::{debug, trace};

use crate::error::{LinextError, Result};
use crate::grid::ComparabilityGrid;

/// Private state of one enumeration run. All arrays are 1-indexed.
#[derive(Debug, Clone)]
struct Walk {
    n: usize,
    /// `order[1..=n]` is the current extension; `order[n + 1]` holds the
    /// sentinel value `n + 1`.
    order: Vec<usize>,
    /// `bound[i]` is the position value `i` has been walked to.
    bound: Vec<usize>,
    /// Lowest value not yet confirmed stable.
    active: usize,
}

impl Walk {
    fn new(n: usize) -> Self {
        Self { n, order: (0..n + 2).collect(), bound: (0..n + 1).collect(), active: 1 }
    }

    fn current(&self) -> &[usize] {
        &self.order[1..=self.n]
    }

    /// Step to the next extension. Returns `false` once none remain.
    fn advance(&mut self, grid: &ComparabilityGrid) -> bool {
        while self.active < self.n {
            let i = self.active;
            let k = self.bound[i];
            let next = k + 1;
            if grid.comparable(i, self.order[next]) {
                // `i` sits at `k` and is blocked: carry it home.
                self.order[i..=k].rotate_right(1);
                self.bound[i] = i;
                self.active += 1;
                trace!(value = i, from = k, "carry");
            } else {
                self.order.swap(k, next);
                self.bound[i] = next;
                self.active = 1;
                trace!(value = i, to = next, "swap");
                return true;
            }
        }
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Seed,
    Walking,
    Exhausted,
}

/// Lazy generator of every linear extension encoded by a
/// [`ComparabilityGrid`], each exactly once.
///
/// The first extension is always the seed `[1, 2, ..., n]`. Each later one
/// is reached from its predecessor by carrying some blocked values back to
/// their seed positions and then one adjacent transposition.
///
/// The enumerator trusts the grid: it must come unmodified from
/// [`ComparabilityGrid::from_pairs`] for the same `n`. Nothing is
/// re-validated while walking.
///
/// The grid is only read and can be shared by any number of runs. Each
/// `LinearExtensions` owns its own walk state; stopping early is always
/// fine.
///
/// ```
/// use linext::{ComparabilityGrid, LinearExtensions};
///
/// let grid = ComparabilityGrid::from_pairs(3, [(1, 2)]).unwrap();
/// let all: Vec<_> = LinearExtensions::new(&grid).collect();
/// assert_eq!(all, vec![vec![1, 2, 3], vec![1, 3, 2], vec![3, 1, 2]]);
/// ```
#[derive(Debug, Clone)]
pub struct LinearExtensions<'g> {
    grid: &'g ComparabilityGrid,
    walk: Walk,
    phase: Phase,
    produced: usize,
}

impl<'g> LinearExtensions<'g> {
    pub fn new(grid: &'g ComparabilityGrid) -> Self {
        Self { grid, walk: Walk::new(grid.len()), phase: Phase::Seed, produced: 0 }
    }

    /// Pull the next extension without allocating.
    ///
    /// Returns [`LinextError::EnumerationExhausted`] once every extension
    /// has been produced, and keeps returning it on later calls.
    pub fn next_extension(&mut self) -> Result<&[usize]> {
        match self.phase {
            Phase::Seed => self.phase = Phase::Walking,
            Phase::Walking => {
                if !self.walk.advance(self.grid) {
                    self.phase = Phase::Exhausted;
                    debug!(n = self.walk.n, produced = self.produced, "enumeration exhausted");
                    return Err(LinextError::EnumerationExhausted);
                }
            }
            Phase::Exhausted => return Err(LinextError::EnumerationExhausted),
        }
        self.produced += 1;
        Ok(self.walk.current())
    }

    /// Number of extensions produced so far.
    pub fn produced(&self) -> usize {
        self.produced
    }
}

impl Iterator for LinearExtensions<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_extension().ok().map(<[usize]>::to_vec)
    }
}

impl FusedIterator for LinearExtensions<'_> {}
