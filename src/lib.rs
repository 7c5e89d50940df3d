//! Parent-linked binary search trees.
//!
//! Every variant in this crate shares a single structural core: an arena of
//! nodes with parent back-references, and a set of balance-agnostic link
//! manipulation primitives built on top of it. The red-black tree layers its
//! rebalancing state machines over those primitives; the vanilla tree uses
//! them unmodified.

extern crate serde;
#[macro_use]
extern crate serde_derive;

pub mod arena;
pub mod error;
pub mod links;
pub mod node;
pub mod red_black_tree;
pub mod vanilla_tree;
