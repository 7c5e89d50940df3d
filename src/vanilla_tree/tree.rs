use crate::arena::NodeId;
use crate::error::{Error, Result};
use crate::links::{Iter, LinkTree};
use std::borrow::Borrow;

/// A binary search tree without balancing.
///
/// The most basic consumer of the structural core: textbook leaf insertion
/// and successor-relocation deletion, with no fixup pass. Kept as a baseline
/// for comparing against the balanced variant.
#[derive(Serialize, Deserialize)]
pub struct VanillaTree<T> {
    links: LinkTree<T>,
}

impl<T> VanillaTree<T>
where
    T: Ord,
{
    /// Constructs a new, empty `VanillaTree<T>`.
    pub fn new() -> Self {
        VanillaTree {
            links: LinkTree::new(),
        }
    }

    /// Inserts a key as a new leaf. Returns the new node, or `None` if the
    /// key was already present (the tree is left untouched).
    pub fn insert(&mut self, key: T) -> Option<NodeId> {
        let parent = match self.links.find_insertion_parent(&key) {
            Ok(parent) => parent,
            Err(_) => return None,
        };
        Some(self.links.attach_leaf(key, parent))
    }

    /// Removes a key from the tree and returns it.
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
        let node = self.links.find(key).ok_or(Error::KeyNotFound)?;
        let (left, right) = {
            let found = self.links.get(node).expect("Expected a found node.");
            (found.left, found.right)
        };
        if left.is_none() {
            // At most a right child.
            self.links.replace_subtree(Some(node), right)?;
        } else if right.is_none() {
            self.links.replace_subtree(Some(node), left)?;
        } else {
            let successor = self
                .links
                .successor(node)
                .expect("Expected a successor for a node with two children.");
            if self.links.parent(successor) != Some(node) {
                let successor_right = self.links.right(successor);
                self.links.replace_subtree(Some(successor), successor_right)?;
                self.links.replace_right_subtree(Some(successor), right)?;
            }
            self.links.replace_subtree(Some(node), Some(successor))?;
            self.links.replace_left_subtree(Some(successor), left)?;
        }
        Ok(self.links.detach(node).key)
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
    /// verification tooling.
    pub fn links(&self) -> &LinkTree<T> {
        &self.links
    }

    /// Returns mutable access to the structural core, allowing the raw
    /// helper primitives to be driven directly. Rotations preserve the BST
    /// property; the other primitives leave ordering up to the caller.
    pub fn links_mut(&mut self) -> &mut LinkTree<T> {
        &mut self.links
    }

    pub(crate) fn into_links(self) -> LinkTree<T> {
        self.links
    }
}

impl<T> Default for VanillaTree<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}
