//! # linext
//!
//! Enumerate every linear extension of a finite partial order.
//!
//! Items are identified by their position `1..=n` in one known-valid
//! ordering (the seed). Precedence pairs over those positions go into a
//! [`ComparabilityGrid`], and [`LinearExtensions`] walks every ordering
//! consistent with them using the Varol-Rotem algorithm, one extension per
//! pull and each exactly once.
//!
//! [`Digraph`] is a small dependency-graph adapter that computes a seed and
//! re-indexes its edges, so callers can enumerate in terms of their own
//! items:
//!
//! ```
//! use linext::Digraph;
//!
//! // "b depends on a", "c depends on a"
//! let g = Digraph::from_edges([("b", "a"), ("c", "a")]);
//! let seeding = g.seed().unwrap();
//! let all: Vec<Vec<&str>> = seeding.linear_extensions().collect();
//! assert_eq!(all.len(), 2);
//! assert!(all.iter().all(|ext| ext[0] == "a"));
//! ```
mod digraph;
mod error;
mod extensions;
mod grid;
pub mod order;
mod seed;

pub use digraph::{DfsEdges, DfsPaths, Digraph, Postorder};
pub use error::{LinextError, Result};
pub use extensions::LinearExtensions;
pub use grid::ComparabilityGrid;
pub use order::verify_partial_order;
pub use seed::Seeding;
