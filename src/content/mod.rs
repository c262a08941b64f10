//! Content module: The tree of content that gets flowed into regions.
//!
//! This module contains:
//! - [`ContentNode`]: An element, text leaf, or atomic leaf with a stable [`NodeId`]
//! - [`leaves`]: Document-order leaf enumeration and leaf editing
//! - [`prune`]: Removal of empty wrappers left behind by a split
//! - [`text`]: Word boundaries used when splitting a text leaf

mod node;
pub mod leaves;
pub mod prune;
pub mod text;

pub use leaves::{collect_leaves, Leaf, LeafKind};
pub use node::{AtomicLeaf, ContentNode, Display, NodeId, NodeKind};
pub use prune::{prune, prune_leading};
