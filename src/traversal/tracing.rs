//! Parent and ancestry queries on a running traversal.

use crate::traversal_error::TraversalError;

/// Path from the current node back to its root, current node first.
pub type Backtrace<'s, T> = Box<dyn Iterator<Item = &'s T> + 's>;

/// Iterators that can report where the most recently produced node hangs.
///
/// Both queries read the iterator's own stack or parent map and never advance
/// the traversal. They fail with [`TraversalError::NoCurrentElement`] before
/// the first node is produced and after the traversal is exhausted.
pub trait Tracing<T> {
    /// Parent of the current node, `None` when the current node is a root.
    fn parent(&self) -> Result<Option<&T>, TraversalError>;

    /// Lazily walks from the current node up to its root.
    fn backtrace(&self) -> Result<Backtrace<'_, T>, TraversalError>;
}
