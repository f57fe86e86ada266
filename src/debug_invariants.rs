//! Debug-time consistency checks for iterator stacks and queues.
//!
//! Implemented by the depth-first iterators (no root-list frame above the
//! bottom of the stack), the guided iterator (at most one root-list frame) and
//! the tracing breadth-first iterator (every recorded parent was discovered
//! before its child). Iterators check themselves after each pull through
//! [`debug_invariants!`](crate::debug_invariants) in debug builds, or in any
//! build with the `strict-invariants` or `check-invariants` feature.

use crate::traversal_error::TraversalError;

/// Trait for validating iterator state invariants.
pub trait DebugInvariants {
    /// Assert invariants in debug builds or when invariant checking is enabled.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), TraversalError>;

    /// `true` when [`DebugInvariants::validate_invariants`] finds nothing.
    fn is_consistent(&self) -> bool {
        self.validate_invariants().is_ok()
    }
}

/// Run a fallible check and panic with `[invariants] <context>: <error>` when
/// invariant checking is enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
