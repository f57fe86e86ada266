mod util;

use tree_traversal::prelude::*;
use util::{fixture, order};

#[test]
fn pre_order() {
    assert_eq!(order(TreeTraversal::PreOrderDfs), "hdabcegf");
}

#[test]
fn post_order() {
    assert_eq!(order(TreeTraversal::PostOrderDfs), "abcdefgh");
}

#[test]
fn plain_bfs() {
    assert_eq!(order(TreeTraversal::PlainBfs), "hdegabcf");
}

#[test]
fn tracing_bfs_matches_plain_bfs_on_a_tree() {
    assert_eq!(order(TreeTraversal::TracingBfs), "hdegabcf");
}

#[test]
fn leaves_dfs() {
    assert_eq!(order(TreeTraversal::LeavesDfs), "abcef");
}

#[test]
fn leaves_bfs() {
    assert_eq!(order(TreeTraversal::LeavesBfs), "eabcf");
}

#[test]
fn guided_without_guide_is_empty() {
    assert_eq!(order(TreeTraversal::Guided), "");
}

#[test]
fn multiple_roots_keep_their_order() {
    let roots = ['d', 'g'];
    let run = |t: TreeTraversal| -> String { t.traversal(roots, fixture).iter().collect() };
    assert_eq!(run(TreeTraversal::PreOrderDfs), "dabcgf");
    assert_eq!(run(TreeTraversal::PostOrderDfs), "abcdfg");
    assert_eq!(run(TreeTraversal::PlainBfs), "dgabcf");
    assert_eq!(run(TreeTraversal::LeavesDfs), "abcf");
    assert_eq!(run(TreeTraversal::LeavesBfs), "abcf");
}

#[test]
fn empty_roots_produce_nothing() {
    for t in TreeTraversal::ALL {
        let out: Vec<char> = t.traversal(Vec::<char>::new(), fixture).iter().collect();
        assert!(out.is_empty(), "{t} produced {out:?}");
    }
}

#[test]
fn single_leaf_root() {
    for t in TreeTraversal::ALL.into_iter().filter(|t| *t != TreeTraversal::Guided) {
        let out: String = t.traversal(['a'], fixture).iter().collect();
        assert_eq!(out, "a", "{t}");
    }
}

#[test]
fn typed_iterators_match_the_facade() {
    let pre: String = PreOrderIter::new(['h'], fixture).collect();
    let post: String = PostOrderIter::new(['h'], fixture).collect();
    let leaves: String = LeavesDfsIter::new(['h'], fixture).collect();
    let bfs: String = PlainBfsIter::new(['h'], fixture).collect();
    let leaves_bfs: String = LeavesBfsIter::new(['h'], fixture).collect();
    assert_eq!(pre, order(TreeTraversal::PreOrderDfs));
    assert_eq!(post, order(TreeTraversal::PostOrderDfs));
    assert_eq!(leaves, order(TreeTraversal::LeavesDfs));
    assert_eq!(bfs, order(TreeTraversal::PlainBfs));
    assert_eq!(leaves_bfs, order(TreeTraversal::LeavesBfs));
}

#[test]
fn borrowed_children_from_a_map() {
    use std::collections::HashMap;
    let tree: HashMap<&str, Vec<&str>> =
        HashMap::from([("src", vec!["lib.rs", "traversal"]), ("traversal", vec!["mod.rs"])]);
    let children = |n: &&str| tree.get(*n).map(|v| v.iter().copied());
    let out: Vec<&str> = TreeTraversal::PreOrderDfs
        .traversal(["src"], children)
        .iter()
        .collect();
    assert_eq!(out, vec!["src", "lib.rs", "traversal", "mod.rs"]);
}
