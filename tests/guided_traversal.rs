mod util;

use tree_traversal::prelude::*;
use util::{fixture, order};

fn guided<'a, F>(roots: &[char], guide: F) -> String
where
    F: FnMut(&mut GuidedContext<'_, 'a, char>) + 'a,
{
    GuidedIter::new(roots.to_vec(), fixture)
        .with_guide(guide)
        .collect()
}

#[test]
fn queue_next_and_result_reproduce_pre_order() {
    let out = guided(&['h'], |cx| {
        if let Some(child) = cx.take_child() {
            cx.queue_next(child).result(child);
        }
    });
    assert_eq!(out, order(TreeTraversal::PreOrderDfs));
}

#[test]
fn emitting_parent_on_exhaustion_reproduces_post_order() {
    let out = guided(&['h'], |cx| match cx.take_child() {
        Some(child) => {
            cx.queue_next(child);
        }
        None => {
            if let Some(&parent) = cx.parent() {
                cx.result(parent);
            }
        }
    });
    assert_eq!(out, order(TreeTraversal::PostOrderDfs));
}

#[test]
fn unqueued_child_prunes_its_subtree() {
    let out = guided(&['h'], |cx| {
        if let Some(child) = cx.take_child() {
            if child != 'd' {
                cx.queue_next(child);
            }
            cx.result(child);
        }
    });
    assert_eq!(out, "hdegf");
}

#[test]
fn queue_last_reorders_but_reaches_everything() {
    let out = guided(&['h'], |cx| {
        if let Some(child) = cx.take_child() {
            cx.queue_last(child).result(child);
        }
    });
    assert_eq!(out, order(TreeTraversal::PlainBfs));
    util::assert_permutation(
        &out.chars().collect::<Vec<_>>(),
        &order(TreeTraversal::PreOrderDfs).chars().collect::<Vec<_>>(),
    );
}

#[test]
fn guide_may_emit_something_other_than_the_child() {
    // uppercase every node with children, skip leaves
    let out = guided(&['h'], |cx| {
        if let Some(child) = cx.take_child() {
            cx.queue_next(child);
        } else if !cx.no_children() {
            if let Some(&parent) = cx.parent() {
                cx.result(parent.to_ascii_uppercase());
            }
        }
    });
    assert_eq!(out, "DGH");
}

#[test]
fn steps_without_result_do_not_emit() {
    let out = guided(&['h'], |cx| {
        if let Some(child) = cx.take_child() {
            cx.queue_next(child);
        }
    });
    assert_eq!(out, "");
}

#[test]
fn guide_attached_through_the_facade() {
    let mut it = TreeTraversal::Guided.create_iterator(['h'], fixture);
    it.as_guided_mut()
        .expect("guided strategy")
        .set_guide(Leaves::default());
    let out: String = it.collect();
    assert_eq!(out, order(TreeTraversal::LeavesDfs));
}

#[test]
fn non_guided_strategies_cannot_be_guided() {
    let mut it = TreeTraversal::PreOrderDfs.create_iterator(['h'], fixture);
    assert!(it.as_guided_mut().is_none());
}

/// Guide emitting leaves, counting the steps it was shown.
#[derive(Default)]
struct Leaves {
    steps: usize,
}

impl<'a> Guide<'a, char> for Leaves {
    fn advance(&mut self, cx: &mut GuidedContext<'_, 'a, char>) {
        self.steps += 1;
        if let Some(child) = cx.take_child() {
            cx.queue_next(child);
        } else if cx.no_children()
            && let Some(&leaf) = cx.parent()
        {
            cx.result(leaf);
        }
    }
}

#[test]
fn every_frame_is_stepped_once_per_child_plus_once_at_exhaustion() {
    let mut it = GuidedIter::new(['h'], fixture);
    let steps = std::rc::Rc::new(std::cell::Cell::new(0));
    let counter = std::rc::Rc::clone(&steps);
    it.set_guide(Counting(counter));
    assert_eq!(it.count(), 0);
    // 7 edges + 1 root-list child, 8 node frames seen once more when drained
    assert_eq!(steps.get(), 16);
}

struct Counting(std::rc::Rc<std::cell::Cell<usize>>);

impl<'a> Guide<'a, char> for Counting {
    fn advance(&mut self, cx: &mut GuidedContext<'_, 'a, char>) {
        self.0.set(self.0.get() + 1);
        if let Some(child) = cx.take_child() {
            cx.queue_next(child);
        }
    }
}
