//! Node identity for identity-keyed bookkeeping.
//!
//! Breadth-first tracing records the first parent that discovered each node.
//! Two structurally equal nodes reached through different parents must stay
//! distinct there, so the parent map is keyed by *identity*, not by `Eq`.
//!
//! This module provides:
//! - The [`Identity`] trait mapping a node to a hashable identity key.
//! - Pointer identity for references, `Rc` and `Arc` handles. The key is the
//!   full (possibly wide) pointer, so `&xs[..2]` and `&xs[..]` differ even
//!   though they start at the same address.
//! - Value identity for plain scalar node types (`char`, integers, `bool`),
//!   which carry no identity beyond their value.
//! - [`ById`], a borrowed-node adapter whose `Eq`/`Hash` compare pointers.
//!
//! References to zero-sized values may share a pointer while being distinct
//! borrows; wrap such nodes in a type with its own [`Identity`].

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::ptr;
use std::rc::Rc;
use std::sync::Arc;

/// Maps a node to the key used by identity-keyed maps.
pub trait Identity {
    /// Key type; equal keys mean "the same node".
    type Id: Hash + Eq;

    fn identity(&self) -> Self::Id;
}

impl<N: ?Sized> Identity for &N {
    type Id = *const N;

    #[inline]
    fn identity(&self) -> *const N {
        ptr::from_ref(*self)
    }
}

impl<N: ?Sized> Identity for Rc<N> {
    type Id = *const N;

    #[inline]
    fn identity(&self) -> *const N {
        Rc::as_ptr(self)
    }
}

impl<N: ?Sized> Identity for Arc<N> {
    type Id = *const N;

    #[inline]
    fn identity(&self) -> *const N {
        Arc::as_ptr(self)
    }
}

macro_rules! value_identity {
    ($($t:ty),* $(,)?) => {
        $(
            impl Identity for $t {
                type Id = $t;

                #[inline]
                fn identity(&self) -> $t {
                    *self
                }
            }
        )*
    };
}

value_identity!(
    bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize
);

// -----------------------------------------------------------------------------
// ById adapter
// -----------------------------------------------------------------------------

/// Borrowed node compared and hashed by pointer.
///
/// Use it as the node type when nodes are borrowed from an arena or a tree of
/// owned values and structurally equal nodes must not be merged.
pub struct ById<'n, N: ?Sized>(pub &'n N);

impl<N: ?Sized> Clone for ById<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N: ?Sized> Copy for ById<'_, N> {}

impl<N: ?Sized> PartialEq for ById<'_, N> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.0, other.0)
    }
}

impl<N: ?Sized> Eq for ById<'_, N> {}

impl<N: ?Sized> Hash for ById<'_, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl<N: ?Sized> Identity for ById<'_, N> {
    type Id = *const N;

    #[inline]
    fn identity(&self) -> *const N {
        ptr::from_ref(self.0)
    }
}

impl<N: ?Sized> Deref for ById<'_, N> {
    type Target = N;

    fn deref(&self) -> &N {
        self.0
    }
}

impl<N: ?Sized + fmt::Debug> fmt::Debug for ById<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ById").field(&self.0).finish()
    }
}
