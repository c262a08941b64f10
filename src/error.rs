//! Error types for layout passes.

use crate::layout::{ProbeError, RegionId};
use thiserror::Error;

/// Errors raised while flowing content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// A region failed to measure its content. The pass is abandoned.
    #[error("overflow probe failed for region {region:?}")]
    Probe {
        /// The region whose probe failed.
        region: RegionId,
        /// What the region reported.
        #[source]
        source: ProbeError,
    },

    /// No flow is registered under this name.
    #[error("unknown flow `{0}`")]
    UnknownFlow(String),

    /// The layout actor is no longer running.
    #[error("layout actor disconnected")]
    Disconnected,
}

impl FlowError {
    /// Wrap a probe failure for `region`.
    pub const fn probe(region: RegionId, source: ProbeError) -> Self {
        Self::Probe { region, source }
    }
}
