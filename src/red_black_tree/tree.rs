use crate::arena::NodeId;
use crate::error::{Error, Result};
use crate::links::{Iter, LinkTree};
use crate::node::Color;
use std::borrow::Borrow;

/// A self-balancing binary search tree maintaining the red-black invariants:
/// the root is black, a red node never has a red child, and every path from a
/// node to an absent-child position passes through the same number of black
/// nodes.
///
/// The tree never mutates links directly; it only sequences rotations and
/// recolors over the structural primitives of [`LinkTree`].
///
/// [`LinkTree`]: ../links/struct.LinkTree.html
#[derive(Serialize, Deserialize)]
pub struct RedBlackTree<T> {
    links: LinkTree<T>,
}

impl<T> RedBlackTree<T>
where
    T: Ord,
{
    /// Constructs a new, empty `RedBlackTree<T>`.
    pub fn new() -> Self {
        RedBlackTree {
            links: LinkTree::new(),
        }
    }

    /// Inserts a key, keeping the tree balanced. Returns the new node, or
    /// `None` if the key was already present (the tree is left untouched).
    pub fn insert(&mut self, key: T) -> Option<NodeId> {
        let parent = match self.links.find_insertion_parent(&key) {
            Ok(parent) => parent,
            Err(_) => return None,
        };
        let node = self.links.attach_leaf(key, parent);
        self.restore_after_insert(node);
        let root = self.links.root().expect("Expected a non-empty tree.");
        self.links.paint(root, Color::Black);
        Some(node)
    }

    fn restore_after_insert(&mut self, mut node: NodeId) {
        // While both the parent and the aunt are red, recoloring the
        // grandparent's level pushes the violation two levels up without
        // any rotation.
        loop {
            let parent = match self.links.parent(node) {
                Some(parent) => parent,
                None => return,
            };
            if self.links.color(Some(parent)) != Color::Red {
                return;
            }
            if self.links.color(self.links.aunt(node)) != Color::Red {
                break;
            }
            let grandparent = self
                .links
                .parent(parent)
                .expect("Expected a red node to have a parent.");
            let left = self
                .links
                .left(grandparent)
                .expect("Expected two children under a red aunt.");
            let right = self
                .links
                .right(grandparent)
                .expect("Expected two children under a red aunt.");
            self.links.paint(grandparent, Color::Red);
            self.links.paint(left, Color::Black);
            self.links.paint(right, Color::Black);
            node = grandparent;
        }

        // The parent is red but the aunt is black. Straighten a bent
        // node/parent path first, then recolor and rotate the grandparent
        // toward the side opposite the node.
        if self.links.is_left_child(node) && self.links.is_right_child(self.parent_of(node)) {
            node = self.parent_of(node);
            self.links
                .rotate_right(Some(node))
                .expect("Expected a left child on the bent path.");
        } else if self.links.is_right_child(node) && self.links.is_left_child(self.parent_of(node))
        {
            node = self.parent_of(node);
            self.links
                .rotate_left(Some(node))
                .expect("Expected a right child on the bent path.");
        }

        let parent = self.parent_of(node);
        let grandparent = self
            .links
            .parent(parent)
            .expect("Expected a red parent below the root.");
        self.links.paint(parent, Color::Black);
        self.links.paint(grandparent, Color::Red);
        if self.links.is_left_child(node) {
            self.links
                .rotate_right(Some(grandparent))
                .expect("Expected a left child in the straight case.");
        } else {
            self.links
                .rotate_left(Some(grandparent))
                .expect("Expected a right child in the straight case.");
        }
    }

    fn parent_of(&self, node: NodeId) -> NodeId {
        self.links
            .parent(node)
            .expect("Expected a non-root node.")
    }

    /// Removes a key from the tree, keeping it balanced, and returns it.
    ///
    /// # Errors
    ///
    /// Returns `KeyNotFound` if the key is absent; the tree is left
    /// structurally unchanged.
    pub fn remove<V>(&mut self, key: &V) -> Result<T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let found = self.links.find(key).ok_or(Error::KeyNotFound)?;

        // A node with two children cannot be unlinked in place; its in-order
        // successor (which has at most one child) is removed instead and
        // later spliced into the original position.
        let mut to_delete = found;
        let mut to_replace = None;
        {
            let node = self.links.get(found).expect("Expected a found node.");
            if node.left.is_some() && node.right.is_some() {
                to_replace = Some(found);
                to_delete = self
                    .links
                    .successor(found)
                    .expect("Expected a successor for a node with two children.");
            }
        }

        let (lone_child, is_red) = {
            let node = self.links.get(to_delete).expect("Expected a target node.");
            (node.lone_child(), node.color == Color::Red)
        };
        if let Some(child) = lone_child {
            // A one-child black node's lone child is guaranteed red;
            // repainting it black restores the black depth.
            self.links.replace_subtree(Some(to_delete), Some(child))?;
            self.links.paint(child, Color::Black);
        } else if is_red {
            // Removing a red leaf changes no black depth.
            self.links.replace_subtree(Some(to_delete), None)?;
        } else {
            self.remove_black_leaf(to_delete)?;
        }

        let node = if let Some(original) = to_replace {
            let color = self.links.color(Some(original));
            self.links.splice_node(Some(original), Some(to_delete))?;
            self.links.paint(to_delete, color);
            self.links.detach(original)
        } else {
            self.links.detach(to_delete)
        };
        Ok(node.key)
    }

    // Removing a black leaf leaves its parent one black node short on that
    // side. The deficit is pushed upward by repainting black siblings red
    // while no red relative is available, then absorbed at the first red
    // sibling, niece, or parent found. Reaching the root means the whole
    // tree's black depth dropped by one, which is still valid.
    fn remove_black_leaf(&mut self, node: NodeId) -> Result<()> {
        let mut current = node;
        while Some(current) != self.links.root() {
            let parent = self.parent_of(current);
            let sibling = self
                .links
                .sibling(current)
                .expect("Expected a black non-root node to have a sibling.");
            let sibling_children_black = {
                let sibling_node = self.links.get(sibling).expect("Expected a sibling node.");
                self.links.color(sibling_node.left) == Color::Black
                    && self.links.color(sibling_node.right) == Color::Black
            };
            if self.links.color(Some(parent)) == Color::Black
                && self.links.color(Some(sibling)) == Color::Black
                && sibling_children_black
            {
                self.links.paint(sibling, Color::Red);
                current = parent;
            } else {
                break;
            }
        }

        if Some(current) != self.links.root() {
            let sibling = self
                .links
                .sibling(current)
                .expect("Expected a black non-root node to have a sibling.");
            if self.links.color(Some(sibling)) == Color::Red {
                self.transform_red_sibling(current)?;
            }

            // The transform above may have rotated a new sibling into place.
            let sibling = self
                .links
                .sibling(current)
                .expect("Expected a black non-root node to have a sibling.");
            let has_red_niece = {
                let sibling_node = self.links.get(sibling).expect("Expected a sibling node.");
                self.links.color(sibling_node.left) == Color::Red
                    || self.links.color(sibling_node.right) == Color::Red
            };
            if has_red_niece {
                self.rotate_red_niece(current)?;
            } else {
                let parent = self.parent_of(current);
                self.links.paint(parent, Color::Black);
                self.links.paint(sibling, Color::Red);
            }
        }

        self.links.replace_subtree(Some(node), None)
    }

    // Converts a red-sibling configuration into a red-parent one.
    fn transform_red_sibling(&mut self, node: NodeId) -> Result<()> {
        let sibling = self
            .links
            .sibling(node)
            .expect("Expected a sibling in the red-sibling case.");
        let parent = self.parent_of(node);
        self.links.paint(sibling, Color::Black);
        self.links.paint(parent, Color::Red);
        if self.links.is_left_child(node) {
            self.links.rotate_left(Some(parent))
        } else {
            self.links.rotate_right(Some(parent))
        }
    }

    // Rotates a red niece up to absorb the black deficit. The rebuilt
    // subtree keeps the color its root had before the rotations and both of
    // its children end up black, preserving the subtree's total black depth.
    fn rotate_red_niece(&mut self, node: NodeId) -> Result<()> {
        let parent = self.parent_of(node);
        let subtree_root_was_red = self.links.color(Some(parent)) == Color::Red;
        let sibling = self
            .links
            .sibling(node)
            .expect("Expected a sibling in the red-niece case.");

        // When the outer niece is black the red one sits on the inner side;
        // rotate the sibling first so a red node ends up in the position the
        // parent rotation will lift.
        if self.links.is_left_child(sibling)
            && self.links.color(self.links.left(sibling)) != Color::Red
        {
            self.links.rotate_left(Some(sibling))?;
        } else if self.links.is_right_child(sibling)
            && self.links.color(self.links.right(sibling)) != Color::Red
        {
            self.links.rotate_right(Some(sibling))?;
        }

        if self.links.is_left_child(node) {
            self.links.rotate_left(Some(parent))?;
        } else {
            self.links.rotate_right(Some(parent))?;
        }

        let new_subtree_root = self
            .links
            .parent(self.parent_of(node))
            .expect("Expected the rotated subtree to have a root above the parent.");
        let left = self
            .links
            .left(new_subtree_root)
            .expect("Expected two children under the rotated subtree root.");
        let right = self
            .links
            .right(new_subtree_root)
            .expect("Expected two children under the rotated subtree root.");
        self.links.paint(left, Color::Black);
        self.links.paint(right, Color::Black);
        let color = if subtree_root_was_red {
            Color::Red
        } else {
            Color::Black
        };
        self.links.paint(new_subtree_root, color);
        Ok(())
    }

    /// Checks if a key exists in the tree.
    pub fn contains<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.links.find(key).is_some()
    }

    /// Returns the number of keys in the tree.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns `true` if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Clears the tree, removing all keys.
    pub fn clear(&mut self) {
        self.links.clear();
    }

    /// Returns an iterator yielding keys in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.links.iter()
    }

    /// Returns the shared structural core, exposing node identity for
    /// diagnostics and verification tooling.
    pub fn links(&self) -> &LinkTree<T> {
        &self.links
    }

    pub(crate) fn into_links(self) -> LinkTree<T> {
        self.links
    }

    /// Verifies the red-black invariants and parent/child link consistency.
    ///
    /// Diagnostic only; walks the whole tree iteratively.
    pub fn is_valid(&self) -> bool {
        let root = match self.links.root() {
            Some(root) => root,
            None => return true,
        };
        if self.links.color(Some(root)) != Color::Black || self.links.parent(root).is_some() {
            return false;
        }

        let mut expected_black_depth = None;
        let mut stack = vec![(root, 0)];
        while let Some((id, black_above)) = stack.pop() {
            let node = match self.links.get(id) {
                Some(node) => node,
                None => return false,
            };
            if node.color == Color::Red
                && (self.links.color(node.left) == Color::Red
                    || self.links.color(node.right) == Color::Red)
            {
                return false;
            }
            let black_here = black_above + if node.color == Color::Black { 1 } else { 0 };
            for &child in &[node.left, node.right] {
                match child {
                    Some(child) => {
                        if self.links.parent(child) != Some(id) {
                            return false;
                        }
                        stack.push((child, black_here));
                    }
                    None => match expected_black_depth {
                        None => expected_black_depth = Some(black_here),
                        Some(depth) => {
                            if depth != black_here {
                                return false;
                            }
                        }
                    },
                }
            }
        }
        true
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let root = match self.links.root() {
            Some(root) => root,
            None => return 0,
        };
        let mut max_depth = 0;
        let mut stack = vec![(root, 1)];
        while let Some((id, depth)) = stack.pop() {
            if depth > max_depth {
                max_depth = depth;
            }
            let node = self.links.get(id).expect("Expected a reachable node.");
            if let Some(left) = node.left {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right {
                stack.push((right, depth + 1));
            }
        }
        max_depth
    }
}

impl<T> Default for RedBlackTree<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}
