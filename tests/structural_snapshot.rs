//! Structural regression tests: capture the full link state of a tree before
//! and after an operation and assert exactly which nodes were touched.

use std::collections::BTreeMap;
use tree_collections::arena::NodeId;
use tree_collections::error::Error;
use tree_collections::links::LinkTree;
use tree_collections::vanilla_tree::VanillaTree;

/// A by-key snapshot of every node's `(left, right, parent)` keys.
///
/// Comparing two snapshots pins down which nodes an operation relinked,
/// making locality claims (a rotation touches three nodes, a failed
/// operation touches none) directly checkable.
#[derive(Debug, PartialEq)]
struct LinkSnapshot {
    links: BTreeMap<i32, (Option<i32>, Option<i32>, Option<i32>)>,
}

impl LinkSnapshot {
    /// Captures the link state reachable from `roots`. Detached components
    /// are included by passing their roots alongside the tree root.
    fn capture(tree: &LinkTree<i32>, roots: &[Option<NodeId>]) -> Self {
        let mut links = BTreeMap::new();
        let mut stack: Vec<NodeId> = roots.iter().filter_map(|root| *root).collect();

        while let Some(id) = stack.pop() {
            let node = tree.get(id).unwrap();
            let key_of = |child: Option<NodeId>| child.map(|id| tree.get(id).unwrap().key);

            links.insert(
                node.key,
                (key_of(node.left), key_of(node.right), key_of(node.parent)),
            );
            stack.extend(node.left);
            stack.extend(node.right);
        }

        LinkSnapshot { links }
    }

    /// Returns the keys whose links differ between the two snapshots,
    /// including keys present in only one of them.
    fn difference(&self, other: &LinkSnapshot) -> Vec<i32> {
        let mut changed = Vec::new();
        for (key, links) in &self.links {
            if other.links.get(key) != Some(links) {
                changed.push(*key);
            }
        }
        for key in other.links.keys() {
            if !self.links.contains_key(key) {
                changed.push(*key);
            }
        }
        changed.sort_unstable();
        changed
    }
}

fn build(keys: &[i32]) -> VanillaTree<i32> {
    let mut tree = VanillaTree::new();
    for &key in keys {
        tree.insert(key);
    }
    tree
}

#[test]
fn test_rotation_relinks_three_nodes() {
    let mut tree = build(&[4, 2, 6, 1, 3, 5, 7]);
    let node = tree.links().find(&2);
    let before = LinkSnapshot::capture(tree.links(), &[tree.links().root()]);

    tree.links_mut().rotate_left(node).unwrap();

    let after = LinkSnapshot::capture(tree.links(), &[tree.links().root()]);
    assert_eq!(before.difference(&after), vec![2, 3, 4]);
}

#[test]
fn test_rotation_inverse_restores_all_links() {
    let mut tree = build(&[4, 2, 6, 1, 3, 5, 7]);
    let before = LinkSnapshot::capture(tree.links(), &[tree.links().root()]);

    let four = tree.links().find(&4);
    tree.links_mut().rotate_left(four).unwrap();
    let six = tree.links().find(&6);
    tree.links_mut().rotate_right(six).unwrap();

    let after = LinkSnapshot::capture(tree.links(), &[tree.links().root()]);
    assert_eq!(before, after);
}

#[test]
fn test_detaching_subtree_relinks_both_ends() {
    let mut tree = build(&[4, 2, 6, 5, 7]);
    let six = tree.links().find(&6);
    let seven = tree.links().find(&7);
    let before = LinkSnapshot::capture(tree.links(), &[tree.links().root()]);

    tree.links_mut().replace_right_subtree(six, None).unwrap();

    // The detached node is its own component now; capture it explicitly.
    let after = LinkSnapshot::capture(tree.links(), &[tree.links().root(), seven]);
    assert_eq!(before.difference(&after), vec![6, 7]);
    assert_eq!(after.links[&7], (None, None, None));
}

#[test]
fn test_remove_missing_key_leaves_links_untouched() {
    let mut tree = build(&[4, 2, 6, 1, 3, 5, 7]);
    let before = LinkSnapshot::capture(tree.links(), &[tree.links().root()]);

    assert_eq!(tree.remove(&10), Err(Error::KeyNotFound));

    let after = LinkSnapshot::capture(tree.links(), &[tree.links().root()]);
    assert_eq!(before, after);
}

#[test]
fn test_rotation_without_inner_child_leaves_links_untouched() {
    let mut tree = build(&[4, 2, 1]);
    let node = tree.links().find(&2);
    let before = LinkSnapshot::capture(tree.links(), &[tree.links().root()]);

    assert_eq!(tree.links_mut().rotate_left(node), Err(Error::MissingChild));

    let after = LinkSnapshot::capture(tree.links(), &[tree.links().root()]);
    assert_eq!(before, after);
}

#[test]
fn test_cyclic_replacement_leaves_links_untouched() {
    let mut tree = build(&[4, 2, 6, 1, 3]);
    let root = tree.links().root();
    let node = tree.links().find(&2);
    let before = LinkSnapshot::capture(tree.links(), &[root]);

    assert_eq!(
        tree.links_mut().replace_subtree(node, root),
        Err(Error::CycleError),
    );

    let after = LinkSnapshot::capture(tree.links(), &[tree.links().root()]);
    assert_eq!(before, after);
}
