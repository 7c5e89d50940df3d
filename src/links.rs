//! Balance-agnostic structural core shared by every tree variant.
//!
//! `LinkTree` owns the node arena, the root link and nothing else; it knows
//! how to find, relink, rotate and traverse nodes, but nothing about balance.
//! Every operation is iterative and runs in O(depth) time and O(1) auxiliary
//! space, so degenerate trees cannot overflow the call stack.

use crate::arena::{Arena, NodeId};
use crate::error::{Error, Result};
use crate::node::{Color, Node};
use std::borrow::Borrow;
use std::cmp::Ordering;

/// A parent-linked binary search tree over raw node links.
///
/// All mutating primitives either complete with the link invariants intact or
/// fail before touching any link.
///
/// # Examples
///
/// ```
/// use tree_collections::links::LinkTree;
///
/// let mut tree = LinkTree::new();
/// let root = tree.attach_leaf(2, None);
///
/// let parent = tree.find_insertion_parent(&1).unwrap();
/// tree.attach_leaf(1, parent);
///
/// assert_eq!(tree.len(), 2);
/// assert_eq!(tree.iter().collect::<Vec<&i32>>(), vec![&1, &2]);
/// assert_eq!(tree.root(), Some(root));
/// ```
#[derive(Serialize, Deserialize)]
pub struct LinkTree<T> {
    arena: Arena<Node<T>>,
    root: Option<NodeId>,
}

impl<T> LinkTree<T> {
    /// Constructs a new, empty `LinkTree<T>`.
    pub fn new() -> Self {
        LinkTree {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Returns the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Removes every node from the tree.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// Returns the root node, or `None` if the tree is empty.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Returns the node with the given identifier, or `None` if it is stale.
    pub fn get(&self, node: NodeId) -> Option<&Node<T>> {
        self.arena.get(node)
    }

    /// Returns a node's parent link.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena[node].parent
    }

    /// Returns a node's left child link.
    pub fn left(&self, node: NodeId) -> Option<NodeId> {
        self.arena[node].left
    }

    /// Returns a node's right child link.
    pub fn right(&self, node: NodeId) -> Option<NodeId> {
        self.arena[node].right
    }

    /// Returns the other child of a node's parent, if any.
    pub fn sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.arena[node].parent?;
        if self.arena[parent].left == Some(node) {
            self.arena[parent].right
        } else {
            self.arena[parent].left
        }
    }

    /// Returns the sibling of a node's parent, if any.
    pub fn aunt(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.arena[node].parent?;
        self.sibling(parent)
    }

    pub(crate) fn is_left_child(&self, node: NodeId) -> bool {
        match self.arena[node].parent {
            Some(parent) => self.arena[parent].left == Some(node),
            None => false,
        }
    }

    pub(crate) fn is_right_child(&self, node: NodeId) -> bool {
        match self.arena[node].parent {
            Some(parent) => self.arena[parent].right == Some(node),
            None => false,
        }
    }

    /// Effective color of a possibly-absent node; absent children count as
    /// black leaves.
    pub(crate) fn color(&self, node: Option<NodeId>) -> Color {
        match node {
            Some(id) => self.arena[id].color,
            None => Color::Black,
        }
    }

    pub(crate) fn paint(&mut self, node: NodeId, color: Color) {
        self.arena[node].color = color;
    }

    /// Frees a fully unlinked node and returns it.
    pub(crate) fn detach(&mut self, node: NodeId) -> Node<T> {
        self.arena.free(node)
    }

    /// Returns the node holding the smallest key, or `None` if the tree is
    /// empty.
    pub fn min_node(&self) -> Option<NodeId> {
        self.root.map(|root| self.leftmost(root))
    }

    /// Returns the node holding the largest key, or `None` if the tree is
    /// empty.
    pub fn max_node(&self) -> Option<NodeId> {
        let mut current = self.root?;
        while let Some(right) = self.arena[current].right {
            current = right;
        }
        Some(current)
    }

    fn leftmost(&self, mut current: NodeId) -> NodeId {
        while let Some(left) = self.arena[current].left {
            current = left;
        }
        current
    }

    /// Returns the in-order successor of a node.
    ///
    /// If the node has a right child, the successor is the leftmost node of
    /// that subtree; otherwise it is the first ancestor reached by a
    /// left-child ascent. Returns `None` for the maximum node.
    pub fn successor(&self, node: NodeId) -> Option<NodeId> {
        if let Some(right) = self.arena[node].right {
            return Some(self.leftmost(right));
        }
        let mut current = node;
        while let Some(parent) = self.arena[current].parent {
            if self.arena[parent].right == Some(current) {
                current = parent;
            } else {
                return Some(parent);
            }
        }
        None
    }

    /// Returns `true` if `lower` lies within the subtree rooted at `upper`.
    ///
    /// An absent `upper` contains nothing; an absent `lower` is vacuously
    /// within any present subtree. Identity is compared by node id, never by
    /// key.
    pub fn is_descendant(&self, lower: Option<NodeId>, upper: Option<NodeId>) -> bool {
        let upper = match upper {
            Some(id) => id,
            None => return false,
        };
        let mut current = match lower {
            Some(id) => id,
            None => return true,
        };
        loop {
            if current == upper {
                return true;
            }
            match self.arena[current].parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Locates where `new` currently hangs off its parent, if its parent
    /// actually links back to it. Nodes carrying a stale parent reference
    /// (for example a just-unlinked leaf) report no slot.
    fn occupied_slot(&self, node: NodeId) -> Option<(NodeId, bool)> {
        let parent = self.arena[node].parent?;
        if self.arena[parent].left == Some(node) {
            Some((parent, true))
        } else if self.arena[parent].right == Some(node) {
            Some((parent, false))
        } else {
            None
        }
    }

    /// Replaces the position of `old` with `new`, leaving both nodes'
    /// children untouched.
    ///
    /// `old`'s parent (or the tree root) links to `new` instead; `new` is
    /// first unlinked from any position it already occupies; `old`'s parent
    /// link is cleared. A no-op when `new` is `old`.
    ///
    /// # Errors
    ///
    /// Returns `NullArgument` if `old` is absent, and `CycleError` if `new`
    /// is a strict ancestor of `old` (replacing would disconnect the tree).
    /// Neither failure mutates any link.
    pub fn replace_subtree(&mut self, old: Option<NodeId>, new: Option<NodeId>) -> Result<()> {
        let old = old.ok_or(Error::NullArgument("old"))?;
        if new == Some(old) {
            return Ok(());
        }

        let mut current = self.arena[old].parent;
        while let Some(ancestor) = current {
            if Some(ancestor) == new {
                return Err(Error::CycleError);
            }
            current = self.arena[ancestor].parent;
        }

        // The slot `new` is leaving must be recorded before relinking; when
        // `old` and `new` share a parent, looking it up afterwards would find
        // the slot `new` just moved into instead of the one it left.
        let prior_slot = new.and_then(|id| self.occupied_slot(id));

        let old_parent = self.arena[old].parent;
        match old_parent {
            None => self.root = new,
            Some(parent) => {
                if self.arena[parent].left == Some(old) {
                    self.arena[parent].left = new;
                } else {
                    self.arena[parent].right = new;
                }
            }
        }

        if let Some(new_id) = new {
            if let Some((prior_parent, went_left)) = prior_slot {
                if went_left {
                    if self.arena[prior_parent].left == Some(new_id) {
                        self.arena[prior_parent].left = None;
                    }
                } else if self.arena[prior_parent].right == Some(new_id) {
                    self.arena[prior_parent].right = None;
                }
            }
            self.arena[new_id].parent = old_parent;
        }
        self.arena[old].parent = None;
        Ok(())
    }

    fn replace_child(&mut self, parent: NodeId, new: Option<NodeId>, left: bool) {
        if let Some(new_id) = new {
            if let Some((prior_parent, went_left)) = self.occupied_slot(new_id) {
                if went_left {
                    self.arena[prior_parent].left = None;
                } else {
                    self.arena[prior_parent].right = None;
                }
            }
        }
        let displaced = if left {
            self.arena[parent].left
        } else {
            self.arena[parent].right
        };
        if let Some(child) = displaced {
            // The displaced link may be stale (a node relocated earlier in a
            // compound operation); only a genuine back-link is severed.
            if self.arena[child].parent == Some(parent) {
                self.arena[child].parent = None;
            }
        }
        if left {
            self.arena[parent].left = new;
        } else {
            self.arena[parent].right = new;
        }
        if let Some(new_id) = new {
            self.arena[new_id].parent = Some(parent);
        }
    }

    /// Sets `parent`'s left child to `new`, unlinking `new` from any prior
    /// position and severing the displaced child's parent link.
    ///
    /// # Errors
    ///
    /// Returns `NullArgument` if `parent` is absent.
    pub fn replace_left_subtree(&mut self, parent: Option<NodeId>, new: Option<NodeId>) -> Result<()> {
        let parent = parent.ok_or(Error::NullArgument("parent"))?;
        self.replace_child(parent, new, true);
        Ok(())
    }

    /// Sets `parent`'s right child to `new`, unlinking `new` from any prior
    /// position and severing the displaced child's parent link.
    ///
    /// # Errors
    ///
    /// Returns `NullArgument` if `parent` is absent.
    pub fn replace_right_subtree(&mut self, parent: Option<NodeId>, new: Option<NodeId>) -> Result<()> {
        let parent = parent.ok_or(Error::NullArgument("parent"))?;
        self.replace_child(parent, new, false);
        Ok(())
    }

    /// Substitutes `new` into `old`'s position, carrying both of `old`'s
    /// subtrees over. Used when physically relocating a node, such as moving
    /// an in-order successor into a removed node's place.
    ///
    /// # Errors
    ///
    /// Returns `NullArgument` if either node is absent, and `CycleError` if
    /// `new` is a strict ancestor of `old`.
    pub fn splice_node(&mut self, old: Option<NodeId>, new: Option<NodeId>) -> Result<()> {
        let old = old.ok_or(Error::NullArgument("old"))?;
        let new = new.ok_or(Error::NullArgument("new"))?;
        if old == new {
            return Ok(());
        }
        self.replace_subtree(Some(old), Some(new))?;
        // If `new` was one of `old`'s children, the positional swap has
        // already cleared that child link, so these reads are safe.
        let old_left = self.arena[old].left;
        let old_right = self.arena[old].right;
        self.replace_left_subtree(Some(new), old_left)?;
        self.replace_right_subtree(Some(new), old_right)?;
        Ok(())
    }

    /// Rotates a node down one level to the left, lifting its right child
    /// into its position. Expressed purely through the replace primitives, so
    /// the rotation inherits their link-consistency guarantees.
    ///
    /// # Errors
    ///
    /// Returns `NullArgument` if `node` is absent, and `MissingChild` if it
    /// has no right child. Neither failure mutates any link.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_collections::error::Error;
    /// use tree_collections::links::LinkTree;
    ///
    /// let mut tree = LinkTree::new();
    /// let root = tree.attach_leaf(1, None);
    /// assert_eq!(tree.rotate_left(Some(root)), Err(Error::MissingChild));
    /// ```
    pub fn rotate_left(&mut self, node: Option<NodeId>) -> Result<()> {
        let node = node.ok_or(Error::NullArgument("node"))?;
        let right_child = self.arena[node].right.ok_or(Error::MissingChild)?;
        self.replace_subtree(Some(node), Some(right_child))?;
        let inner = self.arena[right_child].left;
        self.replace_right_subtree(Some(node), inner)?;
        self.replace_left_subtree(Some(right_child), Some(node))?;
        Ok(())
    }

    /// Rotates a node down one level to the right, lifting its left child
    /// into its position.
    ///
    /// # Errors
    ///
    /// Returns `NullArgument` if `node` is absent, and `MissingChild` if it
    /// has no left child. Neither failure mutates any link.
    pub fn rotate_right(&mut self, node: Option<NodeId>) -> Result<()> {
        let node = node.ok_or(Error::NullArgument("node"))?;
        let left_child = self.arena[node].left.ok_or(Error::MissingChild)?;
        self.replace_subtree(Some(node), Some(left_child))?;
        let inner = self.arena[left_child].right;
        self.replace_left_subtree(Some(node), inner)?;
        self.replace_right_subtree(Some(left_child), Some(node))?;
        Ok(())
    }

    /// Removes and returns the smallest key in the tree. Does not rebalance;
    /// intended for draining.
    pub fn pop_min(&mut self) -> Option<T> {
        let min = self.min_node()?;
        let right = self.arena[min].right;
        self.replace_subtree(Some(min), right)
            .expect("Expected replacing the minimum node to succeed.");
        Some(self.arena.free(min).key)
    }

    /// Returns an iterator yielding keys in ascending order. The iterator is
    /// lazy, restartable, and does not mutate the tree.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            tree: self,
            next: self.min_node(),
        }
    }
}

impl<T> LinkTree<T>
where
    T: Ord,
{
    /// Returns the node holding the given key, or `None` if it is absent.
    pub fn find<V>(&self, key: &V) -> Option<NodeId>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut current = self.root;
        while let Some(id) = current {
            match key.cmp(self.arena[id].key.borrow()) {
                Ordering::Less => current = self.arena[id].left,
                Ordering::Greater => current = self.arena[id].right,
                Ordering::Equal => return Some(id),
            }
        }
        None
    }

    /// Returns the node a new leaf with the given key would hang off, or
    /// `None` when the tree is empty.
    ///
    /// # Errors
    ///
    /// Returns `KeyAlreadyExists` if the key is already present.
    pub fn find_insertion_parent<V>(&self, key: &V) -> Result<Option<NodeId>>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut previous = None;
        let mut current = self.root;
        while let Some(id) = current {
            previous = Some(id);
            match key.cmp(self.arena[id].key.borrow()) {
                Ordering::Less => current = self.arena[id].left,
                Ordering::Greater => current = self.arena[id].right,
                Ordering::Equal => return Err(Error::KeyAlreadyExists),
            }
        }
        Ok(previous)
    }

    /// Creates a red leaf holding `key` under `parent` and returns it. With
    /// no parent the leaf becomes the root of an empty tree. The parent must
    /// come from [`find_insertion_parent`](#method.find_insertion_parent) for
    /// the BST property to hold.
    pub fn attach_leaf(&mut self, key: T, parent: Option<NodeId>) -> NodeId {
        let id = self.arena.alloc(Node::new(key, parent));
        match parent {
            None => {
                debug_assert!(self.root.is_none());
                self.root = Some(id);
            }
            Some(parent_id) => {
                if self.arena[parent_id].key < self.arena[id].key {
                    self.arena[parent_id].right = Some(id);
                } else {
                    self.arena[parent_id].left = Some(id);
                }
            }
        }
        id
    }
}

impl<T> Default for LinkTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntoIterator for LinkTree<T> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { tree: self }
    }
}

/// An iterator over borrowed keys of a `LinkTree<T>` in ascending order.
///
/// Walks the tree by successor links, so it needs no auxiliary stack.
pub struct Iter<'a, T> {
    tree: &'a LinkTree<T>,
    next: Option<NodeId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.tree.successor(id);
        Some(&self.tree.arena[id].key)
    }
}

/// An owning in-order iterator that drains the tree as it walks.
pub struct IntoIter<T> {
    tree: LinkTree<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.tree.pop_min()
    }
}
