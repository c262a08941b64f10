//! # Flywheel Regions
//!
//! Flows a sequence of content trees through a chain of fixed-size regions,
//! like text continuing from one column or page to the next.
//!
//! ## Core Concepts
//!
//! - **Named flows**: content and the ordered regions that display it
//! - **Overflow probe**: each region reports whether its content still fits
//! - **Splitting**: a node that overflows is cut at the last leaf, then the
//!   last word, that fits; the rest continues in the next region
//! - **Actor model**: layout passes run on a dedicated thread, triggered by
//!   content, region and resize events
//!
//! ## Example
//!
//! ```rust
//! use flywheel_regions::{ContentNode, FlowRegistry, Rect, RegionId, TextRegion};
//!
//! let mut registry = FlowRegistry::new();
//! registry.add_content("article", ContentNode::block("p", vec![
//!     ContentNode::text("Regions let content continue where the last one stopped."),
//! ]));
//! for (i, rect) in Rect::from_size(41, 2).columns(2, 1).into_iter().enumerate() {
//!     let id = RegionId::new(u16::try_from(i).unwrap());
//!     registry.add_region("article", TextRegion::new(id, rect));
//! }
//!
//! let outcome = registry.do_layout();
//! assert!(outcome.is_complete());
//! assert!(!outcome.updates[0].overset);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod content;
pub mod error;
pub mod flow;
pub mod layout;

// Re-exports for convenience
pub use actor::{ActorConfig, FlowTrigger, LayoutActor, LayoutCommand, LayoutEvent};
pub use content::{ContentNode, NodeId, NodeKind};
pub use error::FlowError;
pub use flow::{
    Flow, FlowFailure, FlowRegistry, LayoutOutcome, LayoutUpdate, PassReport, RegionFlowEngine,
};
pub use layout::{Overflow, ProbeError, Rect, Region, RegionId, RegionStatus, TextRegion};
