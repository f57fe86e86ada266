//! Strategy selection and restartable traversals.
//!
//! [`TreeTraversal`] names one of a fixed set of strategies. Binding it to
//! roots and a children function yields a [`Traversal`]: a stateless,
//! reusable sequence that builds a brand-new [`TreeIter`] each time it is
//! iterated, so runs over the same roots never share state.
//!
//! ```
//! use tree_traversal::traversal::TreeTraversal;
//!
//! //        h
//! //      / | \
//! //     d  e  g
//! //    /|\    |
//! //   a b c   f
//! let children = |n: &char| match n {
//!     'h' => Some(vec!['d', 'e', 'g']),
//!     'd' => Some(vec!['a', 'b', 'c']),
//!     'g' => Some(vec!['f']),
//!     _ => None,
//! };
//! let pre: String = TreeTraversal::PreOrderDfs.traversal(['h'], children).iter().collect();
//! assert_eq!(pre, "hdabcegf");
//! let bfs: String = TreeTraversal::PlainBfs.traversal(['h'], children).iter().collect();
//! assert_eq!(bfs, "hdegabcf");
//! ```

pub mod bfs;
pub mod dfs;
pub mod frame;
pub mod guided;
pub mod tracing;

use std::fmt;
use std::hash::Hash;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::identity::Identity;
use crate::traversal_error::TraversalError;

use self::bfs::{FirstSight, LeavesBfsIter, PlainBfsIter, TracingBfsIter, identity_filter, key_filter};
use self::dfs::{LeavesDfsIter, PostOrderIter, PreOrderIter};
use self::frame::{Expand, Nodes, expand_fn, roots_of};
use self::guided::GuidedIter;
use self::tracing::Tracing;

/// The closed set of traversal strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TreeTraversal {
    /// Node before its subtree.
    PreOrderDfs,
    /// Node after its subtree.
    PostOrderDfs,
    /// Leaves only, depth-first discovery order.
    LeavesDfs,
    /// Level order.
    PlainBfs,
    /// Leaves only, level order of discovery.
    LeavesBfs,
    /// Level order with identity dedup and parent tracking.
    TracingBfs,
    /// Every step decided by a user-supplied [`guided::Guide`].
    #[serde(rename = "GUIDED_TRAVERSAL")]
    Guided,
}

impl TreeTraversal {
    pub const ALL: [TreeTraversal; 7] = [
        TreeTraversal::PreOrderDfs,
        TreeTraversal::PostOrderDfs,
        TreeTraversal::LeavesDfs,
        TreeTraversal::PlainBfs,
        TreeTraversal::LeavesBfs,
        TreeTraversal::TracingBfs,
        TreeTraversal::Guided,
    ];

    /// Debug name, e.g. `PRE_ORDER_DFS`.
    pub const fn name(self) -> &'static str {
        match self {
            TreeTraversal::PreOrderDfs => "PRE_ORDER_DFS",
            TreeTraversal::PostOrderDfs => "POST_ORDER_DFS",
            TreeTraversal::LeavesDfs => "LEAVES_DFS",
            TreeTraversal::PlainBfs => "PLAIN_BFS",
            TreeTraversal::LeavesBfs => "LEAVES_BFS",
            TreeTraversal::TracingBfs => "TRACING_BFS",
            TreeTraversal::Guided => "GUIDED_TRAVERSAL",
        }
    }

    /// Whether iterators of this strategy answer [`Tracing`] queries.
    pub const fn is_tracing(self) -> bool {
        matches!(
            self,
            TreeTraversal::PreOrderDfs
                | TreeTraversal::PostOrderDfs
                | TreeTraversal::LeavesDfs
                | TreeTraversal::TracingBfs
        )
    }

    /// Restartable traversal over `roots`.
    ///
    /// `children` may return `None` or an empty collection for a leaf. It is
    /// called at most once per visited node per iteration.
    pub fn traversal<'a, T, R, F, I>(self, roots: R, children: F) -> Traversal<'a, T, R>
    where
        T: Clone + 'a,
        R: IntoIterator<Item = T> + Clone,
        R::IntoIter: 'a,
        F: Fn(&T) -> Option<I> + 'a,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        Traversal {
            strategy: self,
            roots,
            expand: expand_fn(children),
            dedup: None,
        }
    }

    /// Restartable traversal over zero or one root.
    pub fn traversal_from<'a, T, F, I>(
        self,
        root: Option<T>,
        children: F,
    ) -> Traversal<'a, T, Option<T>>
    where
        T: Clone + 'a,
        F: Fn(&T) -> Option<I> + 'a,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        self.traversal(root, children)
    }

    /// Binds the children function once and maps each root to its traversal.
    pub fn traversal_fn<'a, T, F, I>(
        self,
        children: F,
    ) -> impl Fn(T) -> Traversal<'a, T, Option<T>>
    where
        T: Clone + 'a,
        F: Fn(&T) -> Option<I> + 'a,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        let expand = expand_fn(children);
        move |root: T| Traversal {
            strategy: self,
            roots: Some(root),
            expand: Rc::clone(&expand),
            dedup: None,
        }
    }

    /// A fresh iterator of this strategy.
    ///
    /// A [`TreeTraversal::TracingBfs`] iterator created here does not
    /// deduplicate; use [`TracingBfsIter::new`] or
    /// [`Traversal::deduplicated`] for shared or cyclic structures.
    pub fn create_iterator<'a, T, R, F, I>(self, roots: R, children: F) -> TreeIter<'a, T>
    where
        T: Clone + 'a,
        R: IntoIterator<Item = T>,
        R::IntoIter: 'a,
        F: Fn(&T) -> Option<I> + 'a,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        self.iterator_with(roots_of(roots), expand_fn(children), None)
    }

    fn iterator_with<'a, T>(
        self,
        roots: Nodes<'a, T>,
        expand: Expand<'a, T>,
        first_sight: Option<FirstSight<'a, T>>,
    ) -> TreeIter<'a, T>
    where
        T: Clone + 'a,
    {
        match self {
            TreeTraversal::PreOrderDfs => {
                TreeIter::PreOrder(PreOrderIter::with_expand(roots, expand))
            }
            TreeTraversal::PostOrderDfs => {
                TreeIter::PostOrder(PostOrderIter::with_expand(roots, expand))
            }
            TreeTraversal::LeavesDfs => {
                TreeIter::LeavesDfs(LeavesDfsIter::with_expand(roots, expand))
            }
            TreeTraversal::PlainBfs => {
                TreeIter::PlainBfs(PlainBfsIter::with_expand(roots, expand))
            }
            TreeTraversal::LeavesBfs => {
                TreeIter::LeavesBfs(LeavesBfsIter::with_expand(roots, expand))
            }
            TreeTraversal::TracingBfs => {
                TreeIter::TracingBfs(TracingBfsIter::with_expand(roots, expand, first_sight))
            }
            TreeTraversal::Guided => TreeIter::Guided(GuidedIter::with_expand(roots, expand)),
        }
    }
}

impl fmt::Display for TreeTraversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TreeTraversal {
    type Err = TraversalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TreeTraversal::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| TraversalError::UnknownStrategy(s.to_owned()))
    }
}

// -----------------------------------------------------------------------------
// Traversal
// -----------------------------------------------------------------------------

/// A strategy bound to roots and a children function.
///
/// Holds no traversal state; [`Traversal::iter`] (or `&traversal` in a `for`
/// loop) starts a new, independent walk every time.
pub struct Traversal<'a, T, R> {
    strategy: TreeTraversal,
    roots: R,
    expand: Expand<'a, T>,
    /// Builds a fresh first-sight filter for each tracing breadth-first run.
    dedup: Option<Rc<dyn Fn() -> FirstSight<'a, T> + 'a>>,
}

impl<T, R: Clone> Clone for Traversal<'_, T, R> {
    fn clone(&self) -> Self {
        Self {
            strategy: self.strategy,
            roots: self.roots.clone(),
            expand: Rc::clone(&self.expand),
            dedup: self.dedup.clone(),
        }
    }
}

impl<'a, T, R> Traversal<'a, T, R>
where
    T: Clone + 'a,
    R: IntoIterator<Item = T> + Clone,
    R::IntoIter: 'a,
{
    pub fn strategy(&self) -> TreeTraversal {
        self.strategy
    }

    pub fn iter(&self) -> TreeIter<'a, T> {
        let first_sight = self.dedup.as_ref().map(|make| make());
        self.strategy.iterator_with(
            roots_of(self.roots.clone()),
            Rc::clone(&self.expand),
            first_sight,
        )
    }

    /// Tracing breadth-first runs visit each node once, keyed by [`Identity`].
    ///
    /// Other strategies ignore this.
    pub fn deduplicated(mut self) -> Self
    where
        T: Identity,
        T::Id: 'a,
    {
        self.dedup = Some(Rc::new(identity_filter::<T>));
        self
    }

    /// Like [`Traversal::deduplicated`], with a caller-supplied identity.
    pub fn deduplicated_by<K, G>(mut self, key: G) -> Self
    where
        K: Hash + Eq + 'a,
        G: Fn(&T) -> K + 'a,
    {
        let key = Rc::new(key);
        self.dedup = Some(Rc::new(move || {
            let key = Rc::clone(&key);
            key_filter(move |node: &T| (*key)(node))
        }));
        self
    }
}

impl<'a, T, R> IntoIterator for &Traversal<'a, T, R>
where
    T: Clone + 'a,
    R: IntoIterator<Item = T> + Clone,
    R::IntoIter: 'a,
{
    type Item = T;
    type IntoIter = TreeIter<'a, T>;

    fn into_iter(self) -> TreeIter<'a, T> {
        self.iter()
    }
}

// -----------------------------------------------------------------------------
// TreeIter
// -----------------------------------------------------------------------------

/// Iterator of any strategy, as created by [`TreeTraversal::create_iterator`].
pub enum TreeIter<'a, T> {
    PreOrder(PreOrderIter<'a, T>),
    PostOrder(PostOrderIter<'a, T>),
    LeavesDfs(LeavesDfsIter<'a, T>),
    PlainBfs(PlainBfsIter<'a, T>),
    LeavesBfs(LeavesBfsIter<'a, T>),
    TracingBfs(TracingBfsIter<'a, T>),
    Guided(GuidedIter<'a, T>),
}

impl<'a, T> TreeIter<'a, T> {
    /// Parent/backtrace view, for strategies that support it.
    pub fn as_tracing(&self) -> Option<&dyn Tracing<T>> {
        match self {
            TreeIter::PreOrder(it) => Some(it),
            TreeIter::PostOrder(it) => Some(it),
            TreeIter::LeavesDfs(it) => Some(it),
            TreeIter::TracingBfs(it) => Some(it),
            TreeIter::PlainBfs(_) | TreeIter::LeavesBfs(_) | TreeIter::Guided(_) => None,
        }
    }

    /// The guided iterator, so a guide can be attached before polling.
    pub fn as_guided_mut(&mut self) -> Option<&mut GuidedIter<'a, T>> {
        match self {
            TreeIter::Guided(it) => Some(it),
            _ => None,
        }
    }
}

impl<'a, T: Clone + 'a> Iterator for TreeIter<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match self {
            TreeIter::PreOrder(it) => it.next(),
            TreeIter::PostOrder(it) => it.next(),
            TreeIter::LeavesDfs(it) => it.next(),
            TreeIter::PlainBfs(it) => it.next(),
            TreeIter::LeavesBfs(it) => it.next(),
            TreeIter::TracingBfs(it) => it.next(),
            TreeIter::Guided(it) => it.next(),
        }
    }
}
