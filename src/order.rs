//! Conversions between dependency edges and precedence pairs, and checking
//! an ordering against a partial order.
//!
//! A dependency edge `(a, b)` reads "a depends on b". The matching
//! precedence pair is `(b, a)`: `b` must come first.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{LinextError, Result};

/// Turn precedence pairs into dependency edges by swapping each pair.
pub fn from_partial_order<K, I>(pairs: I) -> Vec<(K, K)>
where
    I: IntoIterator<Item = (K, K)>,
{
    pairs.into_iter().map(|(a, b)| (b, a)).collect()
}

/// Turn dependency edges into precedence pairs. The same swap as
/// [`from_partial_order`].
pub fn to_partial_order<K, I>(edges: I) -> Vec<(K, K)>
where
    I: IntoIterator<Item = (K, K)>,
{
    from_partial_order(edges)
}

/// Check that `items` respects every precedence pair `(a, b)` in
/// `partial_order`, i.e. `a` is placed strictly before `b`.
///
/// Fails with [`LinextError::OrderViolation`] on the first pair placed the
/// wrong way round, or [`LinextError::UnknownItem`] if a pair mentions an
/// item missing from `items`.
pub fn verify_partial_order<'a, K, I>(partial_order: I, items: &'a [K]) -> Result<()>
where
    K: Hash + Eq + Debug + 'a,
    I: IntoIterator<Item = (&'a K, &'a K)>,
{
    let pos: HashMap<&K, usize> = items.iter().enumerate().map(|(p, k)| (k, p)).collect();
    let lookup = |k: &K| {
        pos.get(k).copied().ok_or_else(|| LinextError::UnknownItem(format!("{k:?}")))
    };
    for (a, b) in partial_order {
        if lookup(a)? >= lookup(b)? {
            return Err(LinextError::OrderViolation {
                item: format!("{b:?}"),
                dependency: format!("{a:?}"),
            });
        }
    }
    Ok(())
}
