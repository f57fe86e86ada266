//! Breadth-first traversal iterators over implicit trees.
//!
//! Nodes wait in a FIFO queue. The plain and tracing variants expand the node
//! produced by the previous pull only when the next pull arrives, so children
//! are never fetched for a node the caller did not consume past.
//!
//! Only [`TracingBfsIter::new`] needs [`Identity`]; the other constructors
//! work for any `Clone` node type.

use std::collections::VecDeque;
use std::hash::Hash;

use hashbrown::HashSet;

use crate::debug_invariants::DebugInvariants;
use crate::identity::Identity;
use crate::traversal_error::TraversalError;

use super::frame::{Expand, Nodes, expand_fn, roots_of};
use super::tracing::{Backtrace, Tracing};

macro_rules! bfs_new {
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

            /// Number of discovered nodes not yet produced.
            pub fn pending(&self) -> usize {
                self.queue.len()
            }
        }
    };
}

// -----------------------------------------------------------------------------
// Plain
// -----------------------------------------------------------------------------

/// Level-order iterator: all roots, then all depth-1 nodes, and so on.
pub struct PlainBfsIter<'a, T> {
    expand: Expand<'a, T>,
    queue: VecDeque<T>,
    /// Node produced by the last pull, expanded on the next one.
    top: Option<T>,
}

bfs_new!(PlainBfsIter);

impl<'a, T: Clone + 'a> PlainBfsIter<'a, T> {
    pub(crate) fn with_expand(roots: Nodes<'a, T>, expand: Expand<'a, T>) -> Self {
        log::trace!("creating plain breadth-first iterator");
        Self {
            expand,
            queue: roots.collect(),
            top: None,
        }
    }
}

impl<T: Clone> Iterator for PlainBfsIter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some(top) = self.top.take()
            && let Some(children) = (*self.expand)(&top)
        {
            self.queue.extend(children);
        }
        let Some(node) = self.queue.pop_front() else {
            log::trace!("plain breadth-first traversal exhausted");
            return None;
        };
        self.top = Some(node.clone());
        Some(node)
    }
}

// -----------------------------------------------------------------------------
// Leaves only
// -----------------------------------------------------------------------------

/// Breadth-first iterator producing only leaves, in level order of discovery.
pub struct LeavesBfsIter<'a, T> {
    expand: Expand<'a, T>,
    queue: VecDeque<T>,
}

bfs_new!(LeavesBfsIter);

impl<'a, T: Clone + 'a> LeavesBfsIter<'a, T> {
    pub(crate) fn with_expand(roots: Nodes<'a, T>, expand: Expand<'a, T>) -> Self {
        log::trace!("creating leaves-only breadth-first iterator");
        Self {
            expand,
            queue: roots.collect(),
        }
    }
}

impl<T: Clone> Iterator for LeavesBfsIter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        while let Some(node) = self.queue.pop_front() {
            let mut children = match (*self.expand)(&node) {
                Some(children) => children.peekable(),
                None => return Some(node),
            };
            if children.peek().is_none() {
                return Some(node);
            }
            self.queue.extend(children);
        }
        log::trace!("leaves-only breadth-first traversal exhausted");
        None
    }
}

// -----------------------------------------------------------------------------
// Tracing
// -----------------------------------------------------------------------------

/// Per-run "first sight" filter: `true` the first time a node is offered.
pub(crate) type FirstSight<'a, T> = Box<dyn FnMut(&T) -> bool + 'a>;

/// First-sight filter keyed by [`Identity`].
pub(crate) fn identity_filter<'a, T>() -> FirstSight<'a, T>
where
    T: Identity + 'a,
    T::Id: 'a,
{
    key_filter(T::identity)
}

/// First-sight filter keyed by a caller-supplied identity function.
pub(crate) fn key_filter<'a, T, K, F>(key: F) -> FirstSight<'a, T>
where
    T: 'a,
    K: Hash + Eq + 'a,
    F: Fn(&T) -> K + 'a,
{
    let mut seen = HashSet::new();
    Box::new(move |node: &T| seen.insert(key(node)))
}

/// Level-order iterator that remembers, for every discovered node, the node
/// that discovered it.
///
/// Built with [`TracingBfsIter::new`], nodes are deduplicated by
/// [`Identity`]: a node reachable through several parents is queued and
/// produced once, and its recorded parent is the one dequeued first. Roots are
/// deduplicated the same way and have no parent, so shared or cyclic
/// structures terminate and every backtrace ends at a root.
/// [`TracingBfsIter::by_key`] takes the identity function explicitly. Without
/// deduplication (the facade's default) each discovery is a new node, which is
/// exact for trees.
pub struct TracingBfsIter<'a, T> {
    expand: Expand<'a, T>,
    /// Every discovered node with the slot of the node that discovered it.
    discovered: Vec<(T, Option<usize>)>,
    queue: VecDeque<usize>,
    first_sight: Option<FirstSight<'a, T>>,
    /// Slot of the node produced by the last pull.
    top: Option<usize>,
}

impl<'a, T: Clone + 'a> TracingBfsIter<'a, T> {
    /// Creates the iterator, deduplicating nodes by [`Identity`].
    pub fn new<R, F, I>(roots: R, children: F) -> Self
    where
        T: Identity,
        T::Id: 'a,
        R: IntoIterator<Item = T>,
        R::IntoIter: 'a,
        F: Fn(&T) -> Option<I> + 'a,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        Self::with_expand(roots_of(roots), expand_fn(children), Some(identity_filter()))
    }

    /// Creates the iterator, deduplicating nodes by `key`.
    pub fn by_key<R, F, I, K, G>(roots: R, children: F, key: G) -> Self
    where
        R: IntoIterator<Item = T>,
        R::IntoIter: 'a,
        F: Fn(&T) -> Option<I> + 'a,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
        K: Hash + Eq + 'a,
        G: Fn(&T) -> K + 'a,
    {
        Self::with_expand(roots_of(roots), expand_fn(children), Some(key_filter(key)))
    }

    pub(crate) fn with_expand(
        roots: Nodes<'a, T>,
        expand: Expand<'a, T>,
        first_sight: Option<FirstSight<'a, T>>,
    ) -> Self {
        log::trace!(
            "creating tracing breadth-first iterator (dedup: {})",
            first_sight.is_some()
        );
        let mut it = Self {
            expand,
            discovered: Vec::new(),
            queue: VecDeque::new(),
            first_sight,
            top: None,
        };
        for root in roots {
            it.discover(root, None);
        }
        it
    }
}

impl<T> TracingBfsIter<'_, T> {
    fn discover(&mut self, node: T, parent: Option<usize>) {
        if let Some(first_sight) = self.first_sight.as_mut()
            && !first_sight(&node)
        {
            return;
        }
        self.queue.push_back(self.discovered.len());
        self.discovered.push((node, parent));
    }

    /// Number of distinct nodes discovered so far, roots included.
    pub fn discovered(&self) -> usize {
        self.discovered.len()
    }

    /// Number of discovered nodes not yet produced.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Slots `from..` must name earlier parents; queued slots must exist.
    fn validate_slots(&self, from: usize) -> Result<(), TraversalError> {
        for (slot, (_, parent)) in self.discovered.iter().enumerate().skip(from) {
            if parent.is_some_and(|p| p >= slot) {
                return Err(TraversalError::QueueInvariant(
                    "node recorded before the parent that discovered it",
                ));
            }
        }
        if self.queue.back().is_some_and(|&s| s >= self.discovered.len()) {
            return Err(TraversalError::QueueInvariant(
                "queued slot past the end of the discovered nodes",
            ));
        }
        Ok(())
    }
}

impl<T: Clone> Iterator for TracingBfsIter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some(top) = self.top
            && let Some(children) = (*self.expand)(&self.discovered[top].0)
        {
            let from = self.discovered.len();
            for child in children {
                self.discover(child, Some(top));
            }
            // only the batch just discovered
            crate::debug_invariants!(self.validate_slots(from), "tracing breadth-first queue");
        }
        let Some(slot) = self.queue.pop_front() else {
            self.top = None;
            log::trace!("tracing breadth-first traversal exhausted");
            return None;
        };
        self.top = Some(slot);
        Some(self.discovered[slot].0.clone())
    }
}

impl<T> Tracing<T> for TracingBfsIter<'_, T> {
    fn parent(&self) -> Result<Option<&T>, TraversalError> {
        let top = self.top.ok_or(TraversalError::NoCurrentElement)?;
        Ok(self.discovered[top].1.map(|p| &self.discovered[p].0))
    }

    fn backtrace(&self) -> Result<Backtrace<'_, T>, TraversalError> {
        let top = self.top.ok_or(TraversalError::NoCurrentElement)?;
        Ok(Box::new(
            std::iter::successors(Some(top), move |&slot| self.discovered[slot].1)
                .map(move |slot| &self.discovered[slot].0),
        ))
    }
}

impl<T> DebugInvariants for TracingBfsIter<'_, T> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "tracing breadth-first queue");
    }

    fn validate_invariants(&self) -> Result<(), TraversalError> {
        self.validate_slots(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn plain_bfs_expands_lazily() {
        let fetched = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&fetched);
        let mut it = PlainBfsIter::new([1u32], move |n: &u32| {
            log.borrow_mut().push(*n);
            (*n < 4).then(|| vec![n * 2, n * 2 + 1])
        });
        assert_eq!(it.next(), Some(1));
        assert!(fetched.borrow().is_empty());
        assert_eq!(it.next(), Some(2));
        assert_eq!(*fetched.borrow(), vec![1]);
        assert_eq!(it.pending(), 1);
    }

    #[test]
    fn tracing_dedups_roots() {
        let it = TracingBfsIter::new([1u32, 1, 2], |_: &u32| None::<Vec<u32>>);
        assert_eq!(it.discovered(), 2);
        assert_eq!(it.collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn tracing_terminates_on_cycles() {
        let it = TracingBfsIter::new([0u32], |n: &u32| Some(vec![(n + 1) % 3]));
        assert_eq!(it.collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn tracing_parent_cleared_after_exhaustion() {
        let mut it = TracingBfsIter::new([5u32], |_: &u32| None::<Vec<u32>>);
        assert_eq!(it.next(), Some(5));
        assert_eq!(it.parent(), Ok(None));
        assert_eq!(it.next(), None);
        assert_eq!(it.parent(), Err(TraversalError::NoCurrentElement));
    }

    #[test]
    fn tracing_by_key_merges_equal_keys() {
        // 2 and 3 share a key, so 3 is never queued
        let it = TracingBfsIter::by_key([1u32], |n: &u32| (*n == 1).then(|| vec![2, 3, 4]), |n: &u32| n / 2);
        assert_eq!(it.collect::<Vec<_>>(), vec![1, 2, 4]);
    }

    #[test]
    fn tracing_without_dedup_keeps_repeated_children() {
        let mut it = TracingBfsIter::with_expand(
            roots_of([1u32]),
            expand_fn(|n: &u32| (*n == 1).then(|| vec![2, 2])),
            None,
        );
        assert_eq!(it.by_ref().collect::<Vec<_>>(), vec![1, 2, 2]);
        assert_eq!(it.discovered(), 3);
    }

    #[test]
    fn tracing_invariants_flag_forward_parent() {
        let mut it = TracingBfsIter::new([1u32], |n: &u32| (*n < 4).then(|| vec![n * 2, n * 2 + 1]));
        assert_eq!(it.by_ref().take(3).count(), 3);
        assert!(it.validate_invariants().is_ok());
        it.discovered[1].1 = Some(2);
        assert!(matches!(
            it.validate_invariants(),
            Err(TraversalError::QueueInvariant(_))
        ));
    }
}
