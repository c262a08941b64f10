//! Region: The container capability the flow engine fills.

use crate::content::{ContentNode, NodeId};
use thiserror::Error;

/// Unique identifier for a region.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct RegionId(pub u16);

impl RegionId {
    /// Create a new region ID.
    pub const fn new(id: u16) -> Self {
        Self(id)
    }
}

/// Outcome of a layout pass for one region.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum RegionStatus {
    /// No content reached this region.
    Empty,
    /// The region holds content and nothing spills out of it.
    Fit,
    /// The last region of a flow, holding content it cannot show.
    Overset,
}

impl RegionStatus {
    /// Name used by the region overset attribute.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Fit => "fit",
            Self::Overset => "overset",
        }
    }
}

impl std::fmt::Display for RegionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A region could not measure its content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct ProbeError {
    reason: String,
}

impl ProbeError {
    /// Create a probe error with a reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A finite-capacity container that displays flowed content.
///
/// The flow engine owns a region's content for the duration of a pass: it
/// clears it, appends and removes fragments, and probes for overflow.
pub trait Region {
    /// Get the region identifier.
    fn id(&self) -> RegionId;

    /// Remove all fragments.
    fn clear(&mut self);

    /// Append a fragment after the existing ones.
    fn append_fragment(&mut self, fragment: ContentNode);

    /// Remove the most recently appended fragment whose root is `id`.
    fn remove_fragment(&mut self, id: NodeId) -> Option<ContentNode>;

    /// Get the fragments currently held, in order.
    fn fragments(&self) -> &[ContentNode];

    /// Check if the region takes part in layout.
    ///
    /// Hidden regions are skipped by a pass and keep whatever they hold.
    fn is_displayed(&self) -> bool {
        true
    }

    /// Check whether the current content exceeds the visible bounds.
    ///
    /// Implementations must leave no observable change behind: any setting
    /// switched for the measurement is restored before returning.
    fn probe_overflow(&mut self) -> Result<bool, ProbeError>;
}

impl<R: Region + ?Sized> Region for &mut R {
    fn id(&self) -> RegionId {
        (**self).id()
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn append_fragment(&mut self, fragment: ContentNode) {
        (**self).append_fragment(fragment);
    }

    fn remove_fragment(&mut self, id: NodeId) -> Option<ContentNode> {
        (**self).remove_fragment(id)
    }

    fn fragments(&self) -> &[ContentNode] {
        (**self).fragments()
    }

    fn is_displayed(&self) -> bool {
        (**self).is_displayed()
    }

    fn probe_overflow(&mut self) -> Result<bool, ProbeError> {
        (**self).probe_overflow()
    }
}

impl<R: Region + ?Sized> Region for Box<R> {
    fn id(&self) -> RegionId {
        (**self).id()
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn append_fragment(&mut self, fragment: ContentNode) {
        (**self).append_fragment(fragment);
    }

    fn remove_fragment(&mut self, id: NodeId) -> Option<ContentNode> {
        (**self).remove_fragment(id)
    }

    fn fragments(&self) -> &[ContentNode] {
        (**self).fragments()
    }

    fn is_displayed(&self) -> bool {
        (**self).is_displayed()
    }

    fn probe_overflow(&mut self) -> Result<bool, ProbeError> {
        (**self).probe_overflow()
    }
}
