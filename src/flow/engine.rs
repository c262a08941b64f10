//! Region flow engine: One full distribution pass over a chain of regions.
//!
//! A pass clears every region, then walks the regions in order pulling
//! content from a work queue. A node that does not fit is split; what is
//! left of it goes back to the front of the queue for the next region. The
//! last region takes everything still queued, fitting or not.

use super::index::ContentRegionIndex;
use super::splitter::ContentSplitter;
use crate::content::ContentNode;
use crate::error::FlowError;
use crate::layout::{Region, RegionId, RegionStatus};
use std::collections::VecDeque;
use tracing::debug;

/// Running counters across passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Passes completed.
    pub passes: u64,
    /// Overflow probes issued.
    pub probes: u64,
    /// Nodes split across two regions.
    pub splits: u64,
}

/// Result of one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Whether the last region holds content it cannot show.
    pub overset: bool,
    /// Index of the first region that received no content.
    pub first_empty_region_index: Option<usize>,
    /// Status of every region visited, in order.
    pub statuses: Vec<(RegionId, RegionStatus)>,
    /// Which regions display which content.
    pub regions_by_content: ContentRegionIndex,
}

impl PassReport {
    /// Get the status a region ended the pass with.
    pub fn status(&self, region: RegionId) -> Option<RegionStatus> {
        self.statuses
            .iter()
            .find_map(|&(id, status)| (id == region).then_some(status))
    }
}

/// Drives layout passes.
#[derive(Debug, Default)]
pub struct RegionFlowEngine {
    stats: PassStats,
}

impl RegionFlowEngine {
    /// Create a new engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the counters accumulated so far.
    pub const fn stats(&self) -> PassStats {
        self.stats
    }

    /// Distribute `content` over `regions`.
    ///
    /// `regions` must already exclude hidden regions. Every region is cleared
    /// first; on error the regions are left as the failed pass had them.
    pub fn run_pass<R: Region>(
        &mut self,
        content: &[ContentNode],
        regions: &mut [R],
    ) -> Result<PassReport, FlowError> {
        let mut report = PassReport::default();
        let Some(last) = regions.len().checked_sub(1) else {
            return Ok(report);
        };

        for region in regions.iter_mut() {
            region.clear();
        }

        let mut queue: VecDeque<ContentNode> = content.iter().cloned().collect();
        debug!(nodes = queue.len(), regions = regions.len(), "layout pass");

        for (position, region) in regions.iter_mut().enumerate() {
            let region_id = region.id();

            let status = if queue.is_empty() {
                report.first_empty_region_index.get_or_insert(position);
                RegionStatus::Empty
            } else if position == last {
                self.fill_last(&mut queue, region, &mut report)?
            } else {
                self.fill(&mut queue, region, &mut report.regions_by_content)?
            };

            report.statuses.push((region_id, status));
        }

        self.stats.passes += 1;
        debug!(
            overset = report.overset,
            first_empty = ?report.first_empty_region_index,
            probes = self.stats.probes,
            "layout pass done"
        );
        Ok(report)
    }

    /// Fill a region that has a successor, splitting the node that overflows.
    fn fill<R: Region>(
        &mut self,
        queue: &mut VecDeque<ContentNode>,
        region: &mut R,
        index: &mut ContentRegionIndex,
    ) -> Result<RegionStatus, FlowError> {
        let mut splitter = ContentSplitter::new(index, &mut self.stats);
        while let Some(node) = queue.pop_front() {
            if let Some(remainder) = splitter.place(node, region)?.into_remainder() {
                queue.push_front(remainder);
                break;
            }
        }
        Ok(RegionStatus::Fit)
    }

    /// Give the last region everything left.
    fn fill_last<R: Region>(
        &mut self,
        queue: &mut VecDeque<ContentNode>,
        region: &mut R,
        report: &mut PassReport,
    ) -> Result<RegionStatus, FlowError> {
        let region_id = region.id();
        for node in queue.drain(..) {
            report.regions_by_content.record_fragment(&node, region_id);
            region.append_fragment(node);
        }

        self.stats.probes += 1;
        let overflowing = region
            .probe_overflow()
            .map_err(|source| FlowError::probe(region_id, source))?;

        if overflowing {
            report.overset = true;
            Ok(RegionStatus::Overset)
        } else {
            Ok(RegionStatus::Fit)
        }
    }
}
