//! Unbalanced binary search tree, kept as a reference variant. It shares the
//! structural core with the balanced trees but performs no rebalancing, so
//! its depth is O(n) in the worst case.

mod set;
mod tree;

pub use self::set::{VanillaSet, VanillaSetIntoIter, VanillaSetIter};
pub use self::tree::VanillaTree;
