//! Flow: Distributing content across a chain of regions.
//!
//! - [`RegionFlowEngine`] runs one pass over one flow's regions.
//! - [`ContentSplitter`] places a node in a region, splitting it at the
//!   last leaf or word that still fits.
//! - [`ContentRegionIndex`] records which regions display which content.
//! - [`FlowRegistry`] keeps named flows and lays them out on request.

mod engine;
mod index;
mod registry;
mod splitter;

#[cfg(test)]
pub(crate) mod testing;

pub use engine::{PassReport, PassStats, RegionFlowEngine};
pub use index::ContentRegionIndex;
pub use registry::{Flow, FlowFailure, FlowRegistry, LayoutOutcome, LayoutUpdate};
pub use splitter::{ContentSplitter, Placement};
