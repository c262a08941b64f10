//! Content-to-region index: Which regions show which content.

use crate::content::{collect_leaves, ContentNode, NodeId};
use crate::layout::RegionId;
use std::collections::HashMap;

/// Maps the owner of each placed leaf to the regions displaying it.
///
/// Owners are kept in the order they were first recorded, and each owner's
/// regions in the order they were recorded. A text leaf split across two
/// regions maps to both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentRegionIndex {
    /// Owners in first-recorded order.
    owners: Vec<NodeId>,
    /// Regions per owner, parallel to `owners`.
    regions: Vec<Vec<RegionId>>,
    /// Position of each owner in `owners`.
    lookup: HashMap<NodeId, usize>,
}

impl ContentRegionIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `region` to the regions recorded for `owner`.
    pub fn record(&mut self, owner: NodeId, region: RegionId) {
        let slot = *self.lookup.entry(owner).or_insert_with(|| {
            self.owners.push(owner);
            self.regions.push(Vec::new());
            self.owners.len() - 1
        });
        self.regions[slot].push(region);
    }

    /// Record every leaf owner in `fragment` against `region`.
    ///
    /// Each owner is recorded once per call, in document order.
    pub fn record_fragment(&mut self, fragment: &ContentNode, region: RegionId) {
        let mut seen: Vec<NodeId> = Vec::new();
        for leaf in collect_leaves(fragment) {
            if !seen.contains(&leaf.owner) {
                seen.push(leaf.owner);
                self.record(leaf.owner, region);
            }
        }
    }

    /// Get the regions displaying content owned by `owner`.
    pub fn query(&self, owner: NodeId) -> &[RegionId] {
        self.lookup
            .get(&owner)
            .map(|&slot| self.regions[slot].as_slice())
            .unwrap_or_default()
    }

    /// Iterate owners and their regions in first-recorded order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &[RegionId])> {
        self.owners
            .iter()
            .copied()
            .zip(self.regions.iter().map(Vec::as_slice))
    }

    /// Number of owners recorded.
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Check if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.owners.clear();
        self.regions.clear();
        self.lookup.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_unknown_is_empty() {
        let index = ContentRegionIndex::new();
        assert!(index.query(NodeId(42)).is_empty());
        assert!(index.is_empty());
    }

    #[test]
    fn test_record_keeps_order_and_cross_call_duplicates() {
        let mut index = ContentRegionIndex::new();
        index.record(NodeId(1), RegionId::new(0));
        index.record(NodeId(2), RegionId::new(0));
        index.record(NodeId(1), RegionId::new(1));
        index.record(NodeId(1), RegionId::new(1));

        assert_eq!(
            index.query(NodeId(1)),
            &[RegionId::new(0), RegionId::new(1), RegionId::new(1)]
        );
        let owners: Vec<_> = index.iter().map(|(owner, _)| owner).collect();
        assert_eq!(owners, vec![NodeId(1), NodeId(2)]);
    }

    #[test]
    fn test_record_fragment_dedupes_within_call() {
        let p = ContentNode::block(
            "p",
            vec![
                ContentNode::text("first "),
                ContentNode::inline("b", vec![ContentNode::text("bold")]),
                ContentNode::text(" last"),
            ],
        );
        let bold_id = p.children()[1].id();

        let mut index = ContentRegionIndex::new();
        index.record_fragment(&p, RegionId::new(7));

        assert_eq!(index.len(), 2);
        assert_eq!(index.query(p.id()), &[RegionId::new(7)]);
        assert_eq!(index.query(bold_id), &[RegionId::new(7)]);
    }

    #[test]
    fn test_atomic_leaf_owns_itself() {
        let img = ContentNode::atomic("img", "photo", 5);
        let wrapper = ContentNode::block("figure", vec![img.clone()]);

        let mut index = ContentRegionIndex::new();
        index.record_fragment(&wrapper, RegionId::new(2));

        assert_eq!(index.query(img.id()), &[RegionId::new(2)]);
        assert!(index.query(wrapper.id()).is_empty());
    }

    #[test]
    fn test_clear() {
        let mut index = ContentRegionIndex::new();
        index.record(NodeId(9), RegionId::new(0));
        index.clear();
        assert!(index.is_empty());
        assert!(index.query(NodeId(9)).is_empty());
    }
}
