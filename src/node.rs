//! Tree node representation shared by every variant.

use crate::arena::NodeId;

/// An enum representing the color of a node in a red-black tree.
///
/// The vanilla variant stores but ignores it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub fn flip(self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

/// A single tree vertex: a key, two owned child links, and a non-owning
/// parent back-reference.
///
/// Links are arena identifiers, so the parent reference carries no ownership
/// and parent/child links cannot form a retain cycle. The key is immutable
/// for the node's lifetime; only the color and the links change.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node<T> {
    pub key: T,
    pub color: Color,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub parent: Option<NodeId>,
}

impl<T> Node<T> {
    /// Constructs a new red leaf with the given key and parent link.
    pub fn new(key: T, parent: Option<NodeId>) -> Self {
        Node {
            key,
            color: Color::Red,
            left: None,
            right: None,
            parent,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Returns the node's only child, if it has exactly one.
    pub fn lone_child(&self) -> Option<NodeId> {
        match (self.left, self.right) {
            (Some(child), None) | (None, Some(child)) => Some(child),
            _ => None,
        }
    }
}
