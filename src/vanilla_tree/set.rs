use crate::error::Result;
use crate::links;
use crate::vanilla_tree::tree::VanillaTree;
use std::borrow::Borrow;

/// An ordered set implemented using an unbalanced binary search tree.
///
/// Operations are O(depth), which degenerates to O(n) for sorted insertion
/// orders; prefer [`RedBlackSet`] outside of testing and comparison.
///
/// [`RedBlackSet`]: ../red_black_tree/struct.RedBlackSet.html
///
/// # Examples
///
/// ```
/// use tree_collections::vanilla_tree::VanillaSet;
///
/// let mut set = VanillaSet::new();
/// set.insert(0);
/// set.insert(3);
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.remove(&0), Ok(0));
/// assert!(set.remove(&1).is_err());
/// ```
#[derive(Serialize, Deserialize)]
pub struct VanillaSet<T> {
    tree: VanillaTree<T>,
}

impl<T> VanillaSet<T>
where
    T: Ord,
{
    /// Constructs a new, empty `VanillaSet<T>`.
    pub fn new() -> Self {
        VanillaSet {
            tree: VanillaTree::new(),
        }
    }

    /// Inserts a key into the set. Returns `true` if the key was not already
    /// present; inserting a duplicate is a silent no-op.
    pub fn insert(&mut self, key: T) -> bool {
        self.tree.insert(key).is_some()
    }

    /// Removes a key from the set and returns it.
    ///
    /// # Errors
    ///
    /// Returns `KeyNotFound` if the key is not in the set; the set is left
    /// unchanged.
    pub fn remove<V>(&mut self, key: &V) -> Result<T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.remove(key)
    }

    /// Checks if a key exists in the set.
    pub fn contains<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.contains(key)
    }

    /// Returns the number of keys in the set.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the set, removing all keys.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the minimum key of the set. Returns `None` if the set is
    /// empty.
    pub fn min(&self) -> Option<&T> {
        let links = self.tree.links();
        links
            .min_node()
            .map(|id| &links.get(id).expect("Expected a minimum node.").key)
    }

    /// Returns the maximum key of the set. Returns `None` if the set is
    /// empty.
    pub fn max(&self) -> Option<&T> {
        let links = self.tree.links();
        links
            .max_node()
            .map(|id| &links.get(id).expect("Expected a maximum node.").key)
    }

    /// Returns an iterator over the set. The iterator will yield keys using
    /// in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_collections::vanilla_tree::VanillaSet;
    ///
    /// let mut set = VanillaSet::new();
    /// set.insert(3);
    /// set.insert(1);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> VanillaSetIter<'_, T> {
        VanillaSetIter {
            tree_iter: self.tree.iter(),
        }
    }
}

impl<T> IntoIterator for VanillaSet<T>
where
    T: Ord,
{
    type IntoIter = VanillaSetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            links_iter: self.tree.into_links().into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a VanillaSet<T>
where
    T: 'a + Ord,
{
    type IntoIter = VanillaSetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `VanillaSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields owned
/// keys.
pub struct VanillaSetIntoIter<T> {
    links_iter: links::IntoIter<T>,
}

impl<T> Iterator for VanillaSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.links_iter.next()
    }
}

/// An iterator for `VanillaSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields
/// immutable references.
pub struct VanillaSetIter<'a, T> {
    tree_iter: links::Iter<'a, T>,
}

impl<'a, T> Iterator for VanillaSetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next()
    }
}

impl<T> Default for VanillaSet<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::VanillaSet;
    use crate::error::Error;

    #[test]
    fn test_len_empty() {
        let set: VanillaSet<u32> = VanillaSet::new();
        assert_eq!(set.len(), 0);
        assert!(set.is_empty());
    }

    #[test]
    fn test_insert() {
        let mut set = VanillaSet::new();
        assert!(set.insert(1));
        assert!(set.contains(&1));
        assert!(!set.insert(1));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut set = VanillaSet::new();
        set.insert(1);
        assert_eq!(set.remove(&1), Ok(1));
        assert_eq!(set.remove(&1), Err(Error::KeyNotFound));
    }

    #[test]
    fn test_min_max() {
        let mut set = VanillaSet::new();
        set.insert(3);
        set.insert(1);
        set.insert(5);

        assert_eq!(set.min(), Some(&1));
        assert_eq!(set.max(), Some(&5));
    }

    #[test]
    fn test_into_iter() {
        let mut set = VanillaSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.into_iter().collect::<Vec<u32>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_iter() {
        let mut set = VanillaSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
    }
}
