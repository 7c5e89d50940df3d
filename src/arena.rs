//! Slotted allocator for tree nodes.

use std::mem;
use std::ops::{Index, IndexMut};

/// An opaque, stable identifier for a node stored in an `Arena<T>`.
///
/// Identifiers stay valid across unrelated allocations and frees; a freed
/// identifier may be reissued by a later allocation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct NodeId(usize);

#[derive(Serialize, Deserialize)]
enum Slot<T> {
    Occupied(T),
    Vacant(Option<usize>),
}

/// A vector-backed allocator handing out stable `NodeId`s.
///
/// Freed slots are threaded into an intrusive free list and reused by later
/// allocations, so long-lived trees with churn do not grow without bound. The
/// backing store is a plain `Vec` and no unsafe code is involved.
///
/// # Examples
///
/// ```
/// use tree_collections::arena::Arena;
///
/// let mut arena = Arena::new();
///
/// let id = arena.alloc(1);
/// assert_eq!(arena[id], 1);
///
/// arena[id] += 1;
/// assert_eq!(arena.free(id), 2);
/// ```
#[derive(Serialize, Deserialize)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<usize>,
    len: usize,
}

impl<T> Arena<T> {
    /// Constructs a new, empty `Arena<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_collections::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::new();
    /// assert_eq!(arena.len(), 0);
    /// ```
    pub fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    /// Stores a value in the arena and returns its identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let id = arena.alloc(0);
    /// assert_eq!(arena.get(id), Some(&0));
    /// ```
    pub fn alloc(&mut self, value: T) -> NodeId {
        self.len += 1;
        match self.free_head.take() {
            Some(index) => {
                let old_slot = mem::replace(&mut self.slots[index], Slot::Occupied(value));
                match old_slot {
                    Slot::Vacant(next_free) => self.free_head = next_free,
                    Slot::Occupied(_) => panic!("Expected a vacant slot at the free list head."),
                }
                NodeId(index)
            }
            None => {
                self.slots.push(Slot::Occupied(value));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Removes a value from the arena and returns it, recycling its slot.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to an occupied slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let id = arena.alloc(100);
    /// assert_eq!(arena.free(id), 100);
    /// assert_eq!(arena.get(id), None);
    /// ```
    pub fn free(&mut self, id: NodeId) -> T {
        if self.get(id).is_none() {
            panic!("Error: attempting to free an invalid or vacant slot.");
        }
        let old_slot = mem::replace(&mut self.slots[id.0], Slot::Vacant(self.free_head.take()));
        match old_slot {
            Slot::Occupied(value) => {
                self.len -= 1;
                self.free_head = Some(id.0);
                value
            }
            Slot::Vacant(_) => unreachable!(),
        }
    }

    /// Returns an immutable reference to the value with the given identifier,
    /// or `None` if the slot is vacant or out of bounds.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        match self.slots.get(id.0) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the value with the given identifier, or
    /// `None` if the slot is vacant or out of bounds.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        match self.slots.get_mut(id.0) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the number of occupied slots in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no values.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes all values from the arena, invalidating every identifier.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<NodeId> for Arena<T> {
    type Output = T;

    fn index(&self, id: NodeId) -> &Self::Output {
        self.get(id).expect("Error: id refers to a vacant slot.")
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        self.get_mut(id).expect("Error: id refers to a vacant slot.")
    }
}
