//! Test regions with exact, countable capacity.

use crate::content::{ContentNode, NodeId, NodeKind};
use crate::layout::{ProbeError, Region, RegionId};

/// Build `"w<a> w<a+1> ... w<b>"`.
pub(crate) fn words(range: std::ops::RangeInclusive<usize>) -> String {
    range.map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
}

/// A region whose size is counted in words.
///
/// Every word costs one unit, every atomic leaf its rows, and every element
/// `block_cost` units. The region overflows when the total exceeds its
/// capacity.
#[derive(Debug, Clone)]
pub(crate) struct CapacityRegion {
    id: RegionId,
    capacity: usize,
    block_cost: usize,
    displayed: bool,
    fragments: Vec<ContentNode>,
    probes: usize,
    fail_after: Option<usize>,
}

impl CapacityRegion {
    pub(crate) fn new(id: u16, capacity: usize) -> Self {
        Self {
            id: RegionId::new(id),
            capacity,
            block_cost: 0,
            displayed: true,
            fragments: Vec::new(),
            probes: 0,
            fail_after: None,
        }
    }

    pub(crate) const fn with_block_cost(mut self, cost: usize) -> Self {
        self.block_cost = cost;
        self
    }

    /// Fail every probe after the first `probes` ones.
    pub(crate) const fn failing_after(mut self, probes: usize) -> Self {
        self.fail_after = Some(probes);
        self
    }

    pub(crate) const fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    pub(crate) fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    pub(crate) fn used(&self) -> usize {
        self.fragments.iter().map(|f| self.cost(f)).sum()
    }

    fn cost(&self, node: &ContentNode) -> usize {
        match node.kind() {
            NodeKind::Element { children, .. } => {
                self.block_cost + children.iter().map(|c| self.cost(c)).sum::<usize>()
            }
            NodeKind::Text(text) => text.split_whitespace().count(),
            NodeKind::Atomic(leaf) => usize::from(leaf.rows),
        }
    }
}

impl Region for CapacityRegion {
    fn id(&self) -> RegionId {
        self.id
    }

    fn clear(&mut self) {
        self.fragments.clear();
    }

    fn append_fragment(&mut self, fragment: ContentNode) {
        self.fragments.push(fragment);
    }

    fn remove_fragment(&mut self, id: NodeId) -> Option<ContentNode> {
        let index = self.fragments.iter().rposition(|f| f.id() == id)?;
        Some(self.fragments.remove(index))
    }

    fn fragments(&self) -> &[ContentNode] {
        &self.fragments
    }

    fn is_displayed(&self) -> bool {
        self.displayed
    }

    fn probe_overflow(&mut self) -> Result<bool, ProbeError> {
        self.probes += 1;
        if self.fail_after.is_some_and(|limit| self.probes > limit) {
            return Err(ProbeError::new("measurement unavailable"));
        }
        Ok(self.used() > self.capacity)
    }
}
