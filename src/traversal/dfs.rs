//! Depth-first traversal iterators over implicit trees.
//!
//! All three variants keep a stack of [`Frame`]s whose depth equals the depth
//! of the node being expanded, and share parent/backtrace queries through
//! [`DfsStack`]. Children are fetched lazily, at most once per node.

use crate::debug_invariants::DebugInvariants;
use crate::traversal_error::TraversalError;

use super::frame::{Expand, Frame, Nodes, expand_fn, roots_of};
use super::tracing::{Backtrace, Tracing};

/// Stack of frames shared by the depth-first iterators.
pub(crate) struct DfsStack<'a, T> {
    expand: Expand<'a, T>,
    stack: Vec<Frame<'a, T>>,
    /// Node produced by popping its frame; it is current but off the stack.
    popped: Option<T>,
    started: bool,
}

impl<'a, T> DfsStack<'a, T> {
    fn new(expand: Expand<'a, T>, stack: Vec<Frame<'a, T>>) -> Self {
        Self {
            expand,
            stack,
            popped: None,
            started: false,
        }
    }

    #[inline]
    fn begin_pull(&mut self) {
        self.started = true;
        self.popped = None;
    }

    fn ensure_current(&self) -> Result<(), TraversalError> {
        if !self.started || (self.popped.is_none() && self.stack.is_empty()) {
            return Err(TraversalError::NoCurrentElement);
        }
        Ok(())
    }

    pub(crate) fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl<T> Tracing<T> for DfsStack<'_, T> {
    fn parent(&self) -> Result<Option<&T>, TraversalError> {
        self.ensure_current()?;
        let mut frames = self.stack.iter().rev();
        if self.popped.is_none() {
            // top frame is the current node itself
            frames.next();
        }
        Ok(frames.next().and_then(Frame::node))
    }

    fn backtrace(&self) -> Result<Backtrace<'_, T>, TraversalError> {
        self.ensure_current()?;
        Ok(Box::new(
            self.popped
                .iter()
                .chain(self.stack.iter().rev().filter_map(Frame::node)),
        ))
    }
}

impl<T> DebugInvariants for DfsStack<'_, T> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "depth-first stack");
    }

    fn validate_invariants(&self) -> Result<(), TraversalError> {
        if self.stack.iter().skip(1).any(|f| f.node().is_none()) {
            return Err(TraversalError::StackInvariant(
                "root-list frame above the bottom of the stack",
            ));
        }
        Ok(())
    }
}

macro_rules! dfs_iter_common {
    ($name:ident) => {
        impl<'a, T: Clone + 'a> $name<'a, T> {
            /// Creates the iterator from roots and a children function.
            pub fn new<R, F, I>(roots: R, children: F) -> Self
            where
                R: IntoIterator<Item = T>,
                R::IntoIter: 'a,
                F: Fn(&T) -> Option<I> + 'a,
                I: IntoIterator<Item = T>,
                I::IntoIter: 'a,
            {
                Self::with_expand(roots_of(roots), expand_fn(children))
            }

            /// Depth of the frame stack (the synthetic root-list frame included).
            pub fn depth(&self) -> usize {
                self.dfs.depth()
            }
        }

        impl<T> Tracing<T> for $name<'_, T> {
            fn parent(&self) -> Result<Option<&T>, TraversalError> {
                self.dfs.parent()
            }

            fn backtrace(&self) -> Result<Backtrace<'_, T>, TraversalError> {
                self.dfs.backtrace()
            }
        }

        impl<T> DebugInvariants for $name<'_, T> {
            fn debug_assert_invariants(&self) {
                self.dfs.debug_assert_invariants();
            }

            fn validate_invariants(&self) -> Result<(), TraversalError> {
                self.dfs.validate_invariants()
            }
        }
    };
}

// -----------------------------------------------------------------------------
// Pre-order
// -----------------------------------------------------------------------------

/// Pre-order iterator: each node is produced before its subtree.
pub struct PreOrderIter<'a, T> {
    dfs: DfsStack<'a, T>,
}

dfs_iter_common!(PreOrderIter);

impl<'a, T: Clone + 'a> PreOrderIter<'a, T> {
    pub(crate) fn with_expand(roots: Nodes<'a, T>, expand: Expand<'a, T>) -> Self {
        log::trace!("creating pre-order depth-first iterator");
        Self {
            dfs: DfsStack::new(expand, vec![Frame::of_roots(roots)]),
        }
    }
}

impl<'a, T: Clone + 'a> Iterator for PreOrderIter<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.dfs.begin_pull();
        let DfsStack { expand, stack, .. } = &mut self.dfs;
        while let Some(top) = stack.last_mut() {
            if let Some(child) = top.next_child(expand) {
                stack.push(Frame::of_node(child.clone()));
                self.dfs.debug_assert_invariants();
                return Some(child);
            }
            stack.pop();
        }
        log::trace!("pre-order traversal exhausted");
        None
    }
}

// -----------------------------------------------------------------------------
// Post-order
// -----------------------------------------------------------------------------

/// Post-order iterator: each node is produced after its whole subtree.
pub struct PostOrderIter<'a, T> {
    dfs: DfsStack<'a, T>,
}

dfs_iter_common!(PostOrderIter);

impl<'a, T: Clone + 'a> PostOrderIter<'a, T> {
    pub(crate) fn with_expand(roots: Nodes<'a, T>, expand: Expand<'a, T>) -> Self {
        log::trace!("creating post-order depth-first iterator");
        Self {
            dfs: DfsStack::new(expand, vec![Frame::of_roots(roots)]),
        }
    }
}

impl<'a, T: Clone + 'a> Iterator for PostOrderIter<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.dfs.begin_pull();
        let DfsStack {
            expand,
            stack,
            popped,
            ..
        } = &mut self.dfs;
        while let Some(top) = stack.last_mut() {
            if let Some(child) = top.next_child(expand) {
                stack.push(Frame::of_node(child));
                continue;
            }
            // the root-list frame pops without a node and emits nothing
            if let Some(node) = stack.pop().and_then(Frame::into_node) {
                *popped = Some(node.clone());
                self.dfs.debug_assert_invariants();
                return Some(node);
            }
        }
        log::trace!("post-order traversal exhausted");
        None
    }
}

// -----------------------------------------------------------------------------
// Leaves only
// -----------------------------------------------------------------------------

/// Depth-first iterator producing only leaves, in discovery order.
pub struct LeavesDfsIter<'a, T> {
    dfs: DfsStack<'a, T>,
}

dfs_iter_common!(LeavesDfsIter);

impl<'a, T: Clone + 'a> LeavesDfsIter<'a, T> {
    pub(crate) fn with_expand(roots: Nodes<'a, T>, expand: Expand<'a, T>) -> Self {
        log::trace!("creating leaves-only depth-first iterator");
        Self {
            dfs: DfsStack::new(expand, vec![Frame::of_roots(roots)]),
        }
    }
}

impl<'a, T: Clone + 'a> Iterator for LeavesDfsIter<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.dfs.begin_pull();
        let DfsStack {
            expand,
            stack,
            popped,
            ..
        } = &mut self.dfs;
        while let Some(top) = stack.last_mut() {
            if let Some(child) = top.next_child(expand) {
                stack.push(Frame::of_node(child));
                continue;
            }
            let Some(frame) = stack.pop() else { break };
            // leaf-ness is the emptiness recorded when the children were fetched
            if !frame.was_empty() || stack.is_empty() {
                continue;
            }
            if let Some(node) = frame.into_node() {
                *popped = Some(node.clone());
                self.dfs.debug_assert_invariants();
                return Some(node);
            }
        }
        log::trace!("leaves-only depth-first traversal exhausted");
        None
    }
}
