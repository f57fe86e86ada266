#![cfg_attr(docsrs, feature(doc_cfg))]
//! # tree-traversal
//!
//! tree-traversal walks trees that are never materialized. A tree is given by
//! a set of roots and a children function mapping a node to its (possibly
//! absent) children; the library produces the nodes lazily, in one of several
//! orders, fetching each visited node's children at most once.
//!
//! ## Features
//! - Pre-order, post-order and leaves-only depth-first iterators
//! - Plain, leaves-only and parent-tracing breadth-first iterators
//! - Guided traversal: a user callback decides expansion, ordering and output
//! - Parent and backtrace queries on depth-first and tracing iterators
//! - Restartable [`Traversal`](traversal::Traversal) sequences: every iteration starts fresh
//!
//! ## Usage
//!
//! ```
//! use std::collections::HashMap;
//! use tree_traversal::prelude::*;
//!
//! let tree: HashMap<u32, Vec<u32>> = HashMap::from([(1, vec![2, 3]), (3, vec![4])]);
//! let children = |n: &u32| tree.get(n).cloned();
//!
//! let post: Vec<u32> = TreeTraversal::PostOrderDfs.traversal([1], children).iter().collect();
//! assert_eq!(post, vec![2, 4, 3, 1]);
//!
//! let mut it = TracingBfsIter::new([1u32], children);
//! while let Some(n) = it.next() {
//!     if n == 4 {
//!         let path: Vec<u32> = it.backtrace().unwrap().copied().collect();
//!         assert_eq!(path, vec![4, 3, 1]);
//!     }
//! }
//! ```
//!
//! ## Identity
//!
//! Only breadth-first tracing cares about node identity. `TracingBfsIter::new`
//! and [`Traversal::deduplicated`](traversal::Traversal::deduplicated)
//! deduplicate by [`Identity`](identity::Identity): references and `Rc`/`Arc`
//! handles by pointer, scalar values by value. Every other strategy accepts
//! any `Clone` node type.
//!
//! ## Logging
//!
//! Iterator creation and exhaustion are reported through the `log` facade at
//! `trace` level; polling a guided traversal with no guide logs at `debug`.

pub mod debug_invariants;
pub mod identity;
pub mod traversal;
pub mod traversal_error;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::identity::{ById, Identity};
    pub use crate::traversal::bfs::{LeavesBfsIter, PlainBfsIter, TracingBfsIter};
    pub use crate::traversal::dfs::{LeavesDfsIter, PostOrderIter, PreOrderIter};
    pub use crate::traversal::guided::{Guide, GuidedContext, GuidedIter};
    pub use crate::traversal::tracing::{Backtrace, Tracing};
    pub use crate::traversal::{Traversal, TreeIter, TreeTraversal};
    pub use crate::traversal_error::TraversalError;
}
