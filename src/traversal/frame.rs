//! Frames: per-node children-fetch progress shared by the stack-based iterators.
//!
//! A [`Frame`] holds either one node (children are fetched through the
//! children function on first access) or the root collection itself. The
//! children iterator is created exactly once and reused for every poll.

use std::iter::Peekable;
use std::rc::Rc;

/// Boxed lazy sequence of nodes.
pub type Nodes<'a, T> = Box<dyn Iterator<Item = T> + 'a>;

/// Type-erased children function shared by every iterator of one traversal.
pub(crate) type Expand<'a, T> = Rc<dyn Fn(&T) -> Option<Nodes<'a, T>> + 'a>;

/// Erase a caller-supplied children function. `None` and an empty `I` both
/// mean "no children".
pub(crate) fn expand_fn<'a, T, F, I>(children: F) -> Expand<'a, T>
where
    T: 'a,
    F: Fn(&T) -> Option<I> + 'a,
    I: IntoIterator<Item = T>,
    I::IntoIter: 'a,
{
    Rc::new(move |node: &T| children(node).map(|c| Box::new(c.into_iter()) as Nodes<'a, T>))
}

/// Box a root collection into a node sequence.
pub(crate) fn roots_of<'a, T, R>(roots: R) -> Nodes<'a, T>
where
    R: IntoIterator<Item = T>,
    R::IntoIter: 'a,
{
    Box::new(roots.into_iter())
}

pub(crate) struct Frame<'a, T> {
    node: Option<T>,
    roots: Option<Nodes<'a, T>>,
    children: Option<Peekable<Nodes<'a, T>>>,
    empty: bool,
}

impl<'a, T> Frame<'a, T> {
    /// Frame for a single node; children come from the children function.
    pub(crate) fn of_node(node: T) -> Self {
        Self {
            node: Some(node),
            roots: None,
            children: None,
            empty: false,
        }
    }

    /// Synthetic root-level frame wrapping the whole root collection.
    pub(crate) fn of_roots(roots: Nodes<'a, T>) -> Self {
        Self {
            node: None,
            roots: Some(roots),
            children: None,
            empty: false,
        }
    }

    #[inline]
    pub(crate) fn node(&self) -> Option<&T> {
        self.node.as_ref()
    }

    #[inline]
    pub(crate) fn into_node(self) -> Option<T> {
        self.node
    }

    /// Whether the children source was originally absent or produced nothing.
    ///
    /// Only meaningful once [`Frame::children`] has been called; it records the
    /// state at first access, not whether the iterator has since been drained.
    #[inline]
    pub(crate) fn was_empty(&self) -> bool {
        self.empty
    }

    /// Split borrow of the node and its (already fetched) children.
    pub(crate) fn parts(&mut self) -> (Option<&T>, Option<&mut Peekable<Nodes<'a, T>>>) {
        (self.node.as_ref(), self.children.as_mut())
    }
}

impl<'a, T: 'a> Frame<'a, T> {
    /// Children iterator, fetched on first access.
    pub(crate) fn children(&mut self, expand: &Expand<'a, T>) -> &mut Peekable<Nodes<'a, T>> {
        let children = match self.children.take() {
            Some(children) => children,
            None => {
                let source = match self.roots.take() {
                    Some(roots) => Some(roots),
                    None => self.node.as_ref().and_then(|n| (**expand)(n)),
                };
                let absent = source.is_none();
                let mut it = source
                    .unwrap_or_else(|| Box::new(std::iter::empty()) as Nodes<'a, T>)
                    .peekable();
                self.empty = absent || it.peek().is_none();
                it
            }
        };
        self.children.insert(children)
    }

    #[inline]
    pub(crate) fn next_child(&mut self, expand: &Expand<'a, T>) -> Option<T> {
        self.children(expand).next()
    }
}
