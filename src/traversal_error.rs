//! TraversalError: Unified error type for tree-traversal public APIs
//!
//! Traversal itself never fails; errors only arise from state queries made at
//! the wrong time, from parsing strategy names, and from invariant checks.

use thiserror::Error;

/// Unified error type for traversal operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TraversalError {
    /// `parent()`/`backtrace()` was called before the first element was produced
    /// or after the traversal was exhausted.
    #[error("No current element: traversal has not produced a node yet or is exhausted")]
    NoCurrentElement,
    /// A strategy name did not match any known traversal.
    #[error("Unknown traversal strategy `{0}`")]
    UnknownStrategy(String),
    /// The frame stack of a depth-first or guided iterator is inconsistent.
    #[error("Stack invariant violated: {0}")]
    StackInvariant(&'static str),
    /// The queue or parent map of a breadth-first iterator is inconsistent.
    #[error("Queue invariant violated: {0}")]
    QueueInvariant(&'static str),
}
