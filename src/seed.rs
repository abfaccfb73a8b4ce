use std::fmt::Debug;
use std::hash::Hash;

use ordermap::OrderMap;

use crate::error::{LinextError, Result};
use crate::extensions::LinearExtensions;
use crate::grid::ComparabilityGrid;

/// A partial order re-indexed against one known-valid ordering of its
/// items.
///
/// Item `items[p - 1]` is known as position `p`, and every precedence pair
/// becomes a pair of positions `(i, j)` with `i < j`.
#[derive(Debug, Clone)]
pub struct Seeding<K> {
    items: Vec<K>,
    pairs: Vec<(usize, usize)>,
    grid: ComparabilityGrid,
}

impl<K: Hash + Eq + Clone + Debug> Seeding<K> {
    /// Index `partial_order` (pairs `(before, after)`) against the seed
    /// ordering `items`.
    ///
    /// Fails with [`LinextError::SeedMismatch`] if `items` repeats an item,
    /// [`LinextError::UnknownItem`] if a pair mentions an item not in
    /// `items`, and [`LinextError::SeedOrderingInvalid`] if `items` does
    /// not respect the partial order.
    pub fn new<'a, I>(items: Vec<K>, partial_order: I) -> Result<Self>
    where
        K: 'a,
        I: IntoIterator<Item = (&'a K, &'a K)>,
    {
        let pos: OrderMap<&K, usize> = items.iter().enumerate().map(|(p, k)| (k, p + 1)).collect();
        if pos.len() != items.len() {
            return Err(LinextError::SeedMismatch { expected: items.len(), found: pos.len() });
        }
        let lookup = |k: &K| {
            pos.get(k).copied().ok_or_else(|| LinextError::UnknownItem(format!("{k:?}")))
        };
        let pairs = partial_order
            .into_iter()
            .map(|(before, after)| Ok((lookup(before)?, lookup(after)?)))
            .collect::<Result<Vec<_>>>()?;
        let grid = ComparabilityGrid::from_pairs(items.len(), pairs.iter().copied())?;
        Ok(Self { items, pairs, grid })
    }
}

impl<K> Seeding<K> {
    /// The seed ordering.
    pub fn items(&self) -> &[K] {
        &self.items
    }

    /// Precedence pairs as 1-based seed positions.
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    pub fn grid(&self) -> &ComparabilityGrid {
        &self.grid
    }

    /// Every linear extension as seed positions, starting with the seed.
    pub fn positions(&self) -> LinearExtensions<'_> {
        LinearExtensions::new(&self.grid)
    }

    /// Every linear extension mapped back to items, starting with the seed.
    pub fn linear_extensions(&self) -> impl Iterator<Item = Vec<K>> + '_
    where
        K: Clone,
    {
        self.positions()
            .map(move |ext| ext.into_iter().map(|p| self.items[p - 1].clone()).collect())
    }
}
