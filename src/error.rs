//! Error types for linext

use thiserror::Error;

/// Errors raised while building constraint grids, seeding graphs and
/// checking orderings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinextError {
    /// A constraint pair runs backwards against the seed ordering.
    #[error("seed ordering invalid: constraint ({before}, {after}) runs backwards")]
    SeedOrderingInvalid { before: usize, after: usize },

    /// A constraint pair names a position outside `1..=n`.
    #[error("constraint ({before}, {after}) is outside 1..={n}")]
    PairOutOfRange { before: usize, after: usize, n: usize },

    /// The enumerator has no further extensions.
    #[error("enumeration exhausted")]
    EnumerationExhausted,

    /// An item sits before one of its dependencies.
    #[error("item {item} is in the order before its dependency {dependency}")]
    OrderViolation { item: String, dependency: String },

    /// An ordering or seed refers to an item that is not present.
    #[error("item {0} is not part of the ordering")]
    UnknownItem(String),

    /// The graph is not acyclic.
    #[error("graph has a cycle through {0}")]
    Cycle(String),

    /// A caller-supplied seed is not a permutation of the graph's nodes.
    #[error("seed lists {found} distinct items but the graph has {expected}")]
    SeedMismatch { expected: usize, found: usize },
}

/// Result type alias for linext operations
pub type Result<T> = std::result::Result<T, LinextError>;
