//! Guided traversal: a frame-stack walk whose every decision is delegated.
//!
//! On each step the engine takes the top frame, pulls its next child (if any)
//! and hands the situation to a [`Guide`] through a [`GuidedContext`]. The
//! guide decides which nodes get frames (`queue_next` puts them on top of the
//! stack, `queue_last` at the bottom; a child never queued prunes its subtree)
//! and what, if anything, to produce for this step (`result`).
//!
//! A frame whose children are exhausted is still presented once more with no
//! child, so guides can act on a node after its subtree (post-order style).
//!
//! ```
//! use tree_traversal::traversal::guided::GuidedIter;
//!
//! let children = |n: &u32| (*n < 4).then(|| vec![n * 2, n * 2 + 1]);
//! // pre-order, skipping the subtree under 2
//! let it = GuidedIter::new([1u32], children).with_guide(|cx| {
//!     if let Some(child) = cx.take_child() {
//!         if child != 2 {
//!             cx.queue_next(child);
//!         }
//!         cx.result(child);
//!     }
//! });
//! assert_eq!(it.collect::<Vec<_>>(), vec![1, 2, 3, 6, 7]);
//! ```

use std::collections::VecDeque;
use std::iter::Peekable;

use crate::debug_invariants::DebugInvariants;
use crate::traversal_error::TraversalError;

use super::frame::{Expand, Frame, Nodes, expand_fn, roots_of};

/// Decision point of a guided traversal, invoked once per step.
pub trait Guide<'a, T> {
    fn advance(&mut self, cx: &mut GuidedContext<'_, 'a, T>);
}

struct FnGuide<F>(F);

impl<'a, T, F> Guide<'a, T> for FnGuide<F>
where
    F: FnMut(&mut GuidedContext<'_, 'a, T>),
{
    fn advance(&mut self, cx: &mut GuidedContext<'_, 'a, T>) {
        (self.0)(cx)
    }
}

/// The guide's view of one step. It borrows engine state and lives only for
/// the duration of a single [`Guide::advance`] call.
pub struct GuidedContext<'g, 'a, T> {
    child: Option<T>,
    parent: Option<&'g T>,
    children: Option<&'g mut Peekable<Nodes<'a, T>>>,
    no_children: bool,
    result: Option<T>,
    stack: &'g mut VecDeque<Frame<'a, T>>,
    queued_last: usize,
}

impl<'g, 'a, T> GuidedContext<'g, 'a, T> {
    /// Child pulled from the current frame in this step, if any.
    pub fn child(&self) -> Option<&T> {
        self.child.as_ref()
    }

    pub fn take_child(&mut self) -> Option<T> {
        self.child.take()
    }

    /// Node owning the current frame; `None` for the root-list frame.
    pub fn parent(&self) -> Option<&'g T> {
        self.parent
    }

    /// Remaining, not yet pulled children of the current frame.
    pub fn children(&mut self) -> Option<&mut Peekable<Nodes<'a, T>>> {
        self.children.as_deref_mut()
    }

    /// Whether the current frame's children source was absent or empty.
    pub fn no_children(&self) -> bool {
        self.no_children
    }

    /// Push a frame on top of the stack; it is expanded next.
    pub fn queue_next(&mut self, node: T) -> &mut Self {
        self.stack.push_back(Frame::of_node(node));
        self
    }

    /// Push a frame at the bottom of the stack; it is expanded last.
    pub fn queue_last(&mut self, node: T) -> &mut Self {
        self.stack.push_front(Frame::of_node(node));
        self.queued_last += 1;
        self
    }

    /// Produce `node` from the current pull.
    pub fn result(&mut self, node: T) -> &mut Self {
        self.result = Some(node);
        self
    }

    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }
}

/// Stack-of-frames iterator driven by a [`Guide`].
///
/// Without a guide the iterator is empty.
pub struct GuidedIter<'a, T> {
    expand: Expand<'a, T>,
    stack: VecDeque<Frame<'a, T>>,
    guide: Option<Box<dyn Guide<'a, T> + 'a>>,
}

impl<'a, T: 'a> GuidedIter<'a, T> {
    /// Creates an unguided iterator from roots and a children function.
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

    pub(crate) fn with_expand(roots: Nodes<'a, T>, expand: Expand<'a, T>) -> Self {
        log::trace!("creating guided iterator");
        let mut stack = VecDeque::new();
        stack.push_back(Frame::of_roots(roots));
        Self {
            expand,
            stack,
            guide: None,
        }
    }

    /// Attach (or replace) the guide.
    pub fn set_guide<G>(&mut self, guide: G) -> &mut Self
    where
        G: Guide<'a, T> + 'a,
    {
        self.guide = Some(Box::new(guide));
        self
    }

    /// Builder form of [`GuidedIter::set_guide`] taking a closure.
    pub fn with_guide<F>(mut self, guide: F) -> Self
    where
        F: FnMut(&mut GuidedContext<'_, 'a, T>) + 'a,
    {
        self.set_guide(FnGuide(guide));
        self
    }

    pub fn has_guide(&self) -> bool {
        self.guide.is_some()
    }

    /// Number of frames waiting on the stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl<'a, T: 'a> Iterator for GuidedIter<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let Some(guide) = self.guide.as_mut() else {
            log::debug!("guided traversal polled without a guide; producing nothing");
            return None;
        };
        while let Some(mut frame) = self.stack.pop_back() {
            let child = frame.next_child(&self.expand);
            let has_next = child.is_some();
            let base = self.stack.len();
            let mut queued_last = 0;
            let mut result = None;
            if frame.node().is_some() || has_next {
                let no_children = frame.was_empty();
                let (parent, children) = frame.parts();
                let mut cx = GuidedContext {
                    child,
                    parent,
                    children,
                    no_children,
                    result: None,
                    stack: &mut self.stack,
                    queued_last: 0,
                };
                guide.advance(&mut cx);
                queued_last = cx.queued_last;
                result = cx.result;
            }
            if has_next {
                // back under whatever the guide queued next
                self.stack.insert(base + queued_last, frame);
            }
            if result.is_some() {
                self.debug_assert_invariants();
                return result;
            }
        }
        log::trace!("guided traversal exhausted");
        None
    }
}

impl<T> DebugInvariants for GuidedIter<'_, T> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "guided stack");
    }

    fn validate_invariants(&self) -> Result<(), TraversalError> {
        if self.stack.iter().filter(|f| f.node().is_none()).count() > 1 {
            return Err(TraversalError::StackInvariant(
                "more than one root-list frame on the guided stack",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary(n: &u32) -> Option<Vec<u32>> {
        (*n < 4).then(|| vec![n * 2, n * 2 + 1])
    }

    #[test]
    fn unguided_is_empty() {
        let mut it = GuidedIter::new([1u32], binary);
        assert!(!it.has_guide());
        assert_eq!(it.next(), None);
    }

    #[test]
    fn post_visit_sees_parent_without_child() {
        // emit each node once its subtree is done
        let it = GuidedIter::new([1u32], binary).with_guide(|cx| {
            match cx.take_child() {
                Some(child) => {
                    cx.queue_next(child);
                }
                None => {
                    if let Some(&parent) = cx.parent() {
                        cx.result(parent);
                    }
                }
            }
        });
        assert_eq!(it.collect::<Vec<_>>(), vec![4, 5, 2, 6, 7, 3, 1]);
    }

    #[test]
    fn queue_last_yields_level_order() {
        let it = GuidedIter::new([1u32], binary).with_guide(|cx| {
            if let Some(child) = cx.take_child() {
                cx.queue_last(child);
                cx.result(child);
            }
        });
        assert_eq!(it.collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn draining_siblings_ends_the_frame() {
        let drained = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let sink = std::rc::Rc::clone(&drained);
        let it = GuidedIter::new([1u32, 2, 3], binary).with_guide(move |cx| {
            if let Some(child) = cx.take_child() {
                if let Some(rest) = cx.children() {
                    sink.borrow_mut().extend(rest);
                }
                cx.result(child);
            }
        });
        assert_eq!(it.collect::<Vec<_>>(), vec![1]);
        assert_eq!(*drained.borrow(), vec![2, 3]);
    }

    #[test]
    fn no_children_flag_reflects_leaves() {
        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let sink = std::rc::Rc::clone(&seen);
        let it = GuidedIter::new([1u32], binary).with_guide(move |cx| {
            if let Some(child) = cx.take_child() {
                cx.queue_next(child);
            } else if cx.no_children() {
                if let Some(&p) = cx.parent() {
                    sink.borrow_mut().push(p);
                    cx.result(p);
                }
            }
        });
        assert_eq!(it.collect::<Vec<_>>(), vec![4, 5, 6, 7]);
        assert_eq!(*seen.borrow(), vec![4, 5, 6, 7]);
    }
}
