//! Named flows and the registry that lays them out.

use super::engine::{PassReport, PassStats, RegionFlowEngine};
use crate::content::{ContentNode, NodeId};
use crate::error::FlowError;
use crate::layout::{Region, RegionId, RegionStatus};
use tracing::{debug, warn};

/// Outcome of laying out one flow, published once per pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutUpdate {
    /// Name of the flow.
    pub flow: String,
    /// Whether content remains that no region can show.
    pub overset: bool,
    /// Index among the displayed regions of the first one left empty.
    pub first_empty_region_index: Option<usize>,
}

/// A flow whose pass failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowFailure {
    /// Name of the flow.
    pub flow: String,
    /// Why its pass was abandoned.
    pub error: FlowError,
}

/// Everything one [`FlowRegistry::do_layout`] call produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutOutcome {
    /// Updates of the flows that completed, in registration order.
    pub updates: Vec<LayoutUpdate>,
    /// Flows whose pass failed, in registration order.
    pub failures: Vec<FlowFailure>,
}

impl LayoutOutcome {
    /// Check if every flow completed its pass.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A named stream of content and the regions that display it.
#[derive(Debug)]
pub struct Flow<R> {
    name: String,
    content: Vec<ContentNode>,
    regions: Vec<R>,
    overset: bool,
    report: PassReport,
}

impl<R: Region> Flow<R> {
    /// Create an empty flow.
    ///
    /// A flow counts as overset until its first pass completes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Vec::new(),
            regions: Vec::new(),
            overset: true,
            report: PassReport::default(),
        }
    }

    /// Name of the flow.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source content, in flow order.
    pub fn content(&self) -> &[ContentNode] {
        &self.content
    }

    /// Append a source node. Returns its id.
    pub fn push_content(&mut self, node: ContentNode) -> NodeId {
        let id = node.id();
        self.content.push(node);
        id
    }

    /// Remove all source content.
    pub fn clear_content(&mut self) {
        self.content.clear();
    }

    /// Regions in chain order, hidden ones included.
    pub fn regions(&self) -> &[R] {
        &self.regions
    }

    /// Mutable access to the region chain, e.g. to resize a region.
    pub fn regions_mut(&mut self) -> &mut [R] {
        &mut self.regions
    }

    /// Append a region to the end of the chain.
    pub fn push_region(&mut self, region: R) {
        self.regions.push(region);
    }

    /// Find a region by id.
    pub fn region(&self, id: RegionId) -> Option<&R> {
        self.regions.iter().find(|r| r.id() == id)
    }

    /// Whether the last completed pass left content undisplayed.
    pub const fn overset(&self) -> bool {
        self.overset
    }

    /// First displayed region the last pass left empty.
    pub const fn first_empty_region_index(&self) -> Option<usize> {
        self.report.first_empty_region_index
    }

    /// Regions displaying content owned by `owner`, from the last pass.
    pub fn regions_by_content(&self, owner: NodeId) -> &[RegionId] {
        self.report.regions_by_content.query(owner)
    }

    /// Status of a region after the last pass. Hidden regions have none.
    pub fn region_status(&self, id: RegionId) -> Option<RegionStatus> {
        self.report.status(id)
    }

    /// Full report of the last completed pass.
    pub const fn last_report(&self) -> &PassReport {
        &self.report
    }

    /// Run one pass over the displayed regions.
    ///
    /// Returns an update when the flow has at least one region, displayed or
    /// not. On error the previous report is kept.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Probe`] if a region fails to measure itself.
    pub fn layout(
        &mut self,
        engine: &mut RegionFlowEngine,
    ) -> Result<Option<LayoutUpdate>, FlowError> {
        let total = self.regions.len();
        let mut displayed: Vec<&mut R> = self
            .regions
            .iter_mut()
            .filter(|region| region.is_displayed())
            .collect();
        debug!(
            flow = %self.name,
            regions = total,
            displayed = displayed.len(),
            "laying out flow"
        );

        let report = engine.run_pass(&self.content, displayed.as_mut_slice())?;
        self.overset = report.overset;
        self.report = report;

        if self.regions.is_empty() {
            return Ok(None);
        }
        Ok(Some(LayoutUpdate {
            flow: self.name.clone(),
            overset: self.overset,
            first_empty_region_index: self.report.first_empty_region_index,
        }))
    }
}

/// Named flows in registration order, sharing one engine.
#[derive(Debug)]
pub struct FlowRegistry<R> {
    flows: Vec<Flow<R>>,
    engine: RegionFlowEngine,
}

impl<R: Region> Default for FlowRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Region> FlowRegistry<R> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            flows: Vec::new(),
            engine: RegionFlowEngine::new(),
        }
    }

    /// Append content to `flow`, creating the flow if needed.
    pub fn add_content(&mut self, flow: &str, node: ContentNode) -> NodeId {
        self.flow_or_insert(flow).push_content(node)
    }

    /// Append a region to `flow`, creating the flow if needed.
    pub fn add_region(&mut self, flow: &str, region: R) {
        self.flow_or_insert(flow).push_region(region);
    }

    /// Look up a flow by name.
    pub fn named_flow(&self, name: &str) -> Option<&Flow<R>> {
        self.flows.iter().find(|f| f.name == name)
    }

    /// Look up a flow by name for editing.
    pub fn named_flow_mut(&mut self, name: &str) -> Option<&mut Flow<R>> {
        self.flows.iter_mut().find(|f| f.name == name)
    }

    /// All flows, in registration order.
    pub fn flows(&self) -> &[Flow<R>] {
        &self.flows
    }

    /// Number of flows.
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    /// Check if no flow is registered.
    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Counters accumulated by the shared engine.
    pub const fn stats(&self) -> PassStats {
        self.engine.stats()
    }

    /// Lay out every flow in registration order.
    ///
    /// Flows without regions run but publish nothing. A flow whose pass
    /// fails is reported in [`LayoutOutcome::failures`] and keeps its previous
    /// report; the flows after it are still laid out.
    pub fn do_layout(&mut self) -> LayoutOutcome {
        let mut outcome = LayoutOutcome::default();
        if self.flows.is_empty() {
            warn!("layout requested with no named flows");
            return outcome;
        }

        for flow in &mut self.flows {
            match flow.layout(&mut self.engine) {
                Ok(update) => outcome.updates.extend(update),
                Err(error) => {
                    warn!(flow = %flow.name, %error, "flow layout failed");
                    outcome.failures.push(FlowFailure {
                        flow: flow.name.clone(),
                        error,
                    });
                }
            }
        }
        outcome
    }

    /// Lay out a single flow.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::UnknownFlow`] if no flow has this name, or the
    /// flow's pass error.
    pub fn layout_flow(&mut self, name: &str) -> Result<Option<LayoutUpdate>, FlowError> {
        let flow = self
            .flows
            .iter_mut()
            .find(|f| f.name == name)
            .ok_or_else(|| FlowError::UnknownFlow(name.to_owned()))?;
        flow.layout(&mut self.engine)
    }

    fn flow_or_insert(&mut self, name: &str) -> &mut Flow<R> {
        let position = match self.flows.iter().position(|f| f.name == name) {
            Some(position) => position,
            None => {
                debug!(flow = name, "creating named flow");
                self.flows.push(Flow::new(name));
                self.flows.len() - 1
            }
        };
        &mut self.flows[position]
    }
}
