#![allow(dead_code)]
use tree_traversal::traversal::TreeTraversal;

/// Canonical fixture:
///
/// ```text
///          h
///        / | \
///       d  e  g
///      /|\    |
///     a b c   f
/// ```
pub fn fixture(n: &char) -> Option<Vec<char>> {
    match n {
        'h' => Some(vec!['d', 'e', 'g']),
        'd' => Some(vec!['a', 'b', 'c']),
        'e' => Some(vec![]),
        'g' => Some(vec!['f']),
        _ => None,
    }
}

/// Fixture with `x` shared by `d` and `e`.
pub fn shared_fixture(n: &char) -> Option<Vec<char>> {
    match n {
        'd' => Some(vec!['a', 'b', 'c', 'x']),
        'e' => Some(vec!['x']),
        _ => fixture(n),
    }
}

/// Full sequence of `strategy` over the canonical fixture, as a string.
pub fn order(strategy: TreeTraversal) -> String {
    strategy.traversal(['h'], fixture).iter().collect()
}

/// Assert vec is a permutation of another vec (order-agnostic).
pub fn assert_permutation<T: Ord + Clone + std::fmt::Debug>(got: &[T], want: &[T]) {
    let mut a = got.to_vec();
    a.sort_unstable();
    let mut b = want.to_vec();
    b.sort_unstable();
    assert_eq!(a, b, "not a permutation\n got={:?}\nwant={:?}", got, want);
}
