//! Content splitter: Fit as much of one node into one region as it can hold.
//!
//! A node is first tried whole. When it overflows, the splitter looks for the
//! longest prefix of its leaves that fits (binary search over leaf count),
//! then the longest word prefix of the leaf where that search stopped
//! (binary search over word count). The prefix is committed to the region;
//! everything after it comes back as the remainder, with the same element
//! structure and the same node identifiers.

use super::engine::PassStats;
use super::index::ContentRegionIndex;
use crate::content::leaves::{edit_leaves, LeafEdit};
use crate::content::text::{split_after_words, word_count};
use crate::content::{collect_leaves, prune, prune_leading, ContentNode, LeafKind};
use crate::error::FlowError;
use crate::layout::Region;
use tracing::{trace, warn};

/// What happened to a node offered to a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// The whole node is in the region.
    Placed,
    /// A prefix is in the region; the rest goes to the next one.
    Split {
        /// Content left for the next region.
        remainder: ContentNode,
    },
    /// Nothing could be placed; the node moves on unchanged.
    Deferred {
        /// The node as it was offered.
        remainder: ContentNode,
    },
    /// The node has no content leaves and overflows even when empty.
    Dropped,
}

impl Placement {
    /// Get the content that still needs a region, if any.
    pub fn into_remainder(self) -> Option<ContentNode> {
        match self {
            Self::Split { remainder } | Self::Deferred { remainder } => Some(remainder),
            Self::Placed | Self::Dropped => None,
        }
    }

    /// Check if nothing is left over.
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Placed | Self::Dropped)
    }
}

/// Places nodes into regions, splitting them when they do not fit.
pub struct ContentSplitter<'a> {
    /// Where committed leaves are recorded.
    index: &'a mut ContentRegionIndex,
    /// Probe and split counters.
    stats: &'a mut PassStats,
}

impl<'a> ContentSplitter<'a> {
    /// Create a splitter recording into `index`.
    pub fn new(index: &'a mut ContentRegionIndex, stats: &'a mut PassStats) -> Self {
        Self { index, stats }
    }

    /// Place as much of `node` into `region` as fits.
    ///
    /// Whatever is committed stays in the region and is recorded in the
    /// index. The only error is a failed probe.
    pub fn place<R: Region + ?Sized>(
        &mut self,
        node: ContentNode,
        region: &mut R,
    ) -> Result<Placement, FlowError> {
        let region_id = region.id();

        region.append_fragment(node.clone());
        if !self.probe(region)? {
            self.index.record_fragment(&node, region_id);
            trace!(region = ?region_id, node = ?node.id(), "placed whole");
            return Ok(Placement::Placed);
        }
        region.remove_fragment(node.id());

        let leaves = collect_leaves(&node);
        let total = leaves.len();
        if total == 0 {
            warn!(
                region = ?region_id,
                node = ?node.id(),
                "dropping node without content that overflows on its own"
            );
            return Ok(Placement::Dropped);
        }
        if total == 1 && leaves[0].kind == LeafKind::Atomic {
            trace!(region = ?region_id, node = ?node.id(), "deferring atomic node");
            return Ok(Placement::Deferred { remainder: node });
        }

        // Find the first leaf count that overflows. Keeping every leaf is the
        // node itself, which is already known to overflow.
        let mut low = 0;
        let mut high = total;
        while low < high {
            let mid = low + (high - low) / 2;
            if self.fits(region, retain_prefix(&node, mid, None))? {
                low = mid + 1;
            } else {
                high = mid;
            }
        }

        // Not even the bare wrappers fit.
        let Some(whole) = low.checked_sub(1) else {
            trace!(region = ?region_id, node = ?node.id(), "no leaf fits");
            return Ok(Placement::Deferred { remainder: node });
        };

        let boundary_text = leaves[whole].text().map(str::to_owned);
        let words = match &boundary_text {
            Some(text) => self.fit_words(region, &node, whole, text)?,
            None => 0,
        };
        trace!(region = ?region_id, whole, words, total, "split point");

        if whole == 0 && words == 0 {
            return Ok(Placement::Deferred { remainder: node });
        }

        let (head, tail) = match &boundary_text {
            Some(text) if words > 0 => {
                let (head, tail) = split_after_words(text, words);
                (Some(head.to_owned()), Some(tail.to_owned()))
            }
            _ => (None, None),
        };

        let prefix = prune(retain_prefix(&node, whole, head));
        let remainder = prune_leading(retain_suffix(&node, whole, tail));

        self.index.record_fragment(&prefix, region_id);
        region.append_fragment(prefix);
        self.stats.splits += 1;

        Ok(Placement::Split { remainder })
    }

    /// Largest word count of the boundary leaf that still fits.
    ///
    /// Zero words is the leaf count found by the leaf search, which fits; all
    /// words is one more leaf, which does not.
    fn fit_words<R: Region + ?Sized>(
        &mut self,
        region: &mut R,
        node: &ContentNode,
        whole: usize,
        text: &str,
    ) -> Result<usize, FlowError> {
        let mut low = 1;
        let mut high = word_count(text);
        while low < high {
            let mid = low + (high - low) / 2;
            let (head, _) = split_after_words(text, mid);
            if self.fits(region, retain_prefix(node, whole, Some(head.to_owned())))? {
                low = mid + 1;
            } else {
                high = mid;
            }
        }
        Ok(low - 1)
    }

    /// Try a candidate in the region without keeping it.
    fn fits<R: Region + ?Sized>(
        &mut self,
        region: &mut R,
        candidate: ContentNode,
    ) -> Result<bool, FlowError> {
        let id = candidate.id();
        region.append_fragment(candidate);
        let overflowing = self.probe(region);
        region.remove_fragment(id);
        Ok(!overflowing?)
    }

    fn probe<R: Region + ?Sized>(&mut self, region: &mut R) -> Result<bool, FlowError> {
        self.stats.probes += 1;
        region
            .probe_overflow()
            .map_err(|source| FlowError::probe(region.id(), source))
    }
}

/// Copy of `node` with leaves `[0, whole)` and, if given, `partial` as the
/// text of leaf `whole`. Later leaves are removed.
fn retain_prefix(node: &ContentNode, whole: usize, partial: Option<String>) -> ContentNode {
    edit_leaves(node, |ordinal| {
        if ordinal < whole {
            LeafEdit::Keep
        } else if ordinal == whole {
            partial.clone().map_or(LeafEdit::Remove, LeafEdit::Replace)
        } else {
            LeafEdit::Remove
        }
    })
}

/// Copy of `node` with leaves `[whole, ..)`, where leaf `whole` becomes
/// `rest` if given.
fn retain_suffix(node: &ContentNode, whole: usize, rest: Option<String>) -> ContentNode {
    edit_leaves(node, |ordinal| {
        if ordinal < whole {
            LeafEdit::Remove
        } else if ordinal == whole {
            rest.clone().map_or(LeafEdit::Keep, LeafEdit::Replace)
        } else {
            LeafEdit::Keep
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::testing::{words, CapacityRegion};
    use crate::layout::RegionId;

    fn place(node: ContentNode, region: &mut CapacityRegion) -> (Placement, ContentRegionIndex) {
        let mut index = ContentRegionIndex::new();
        let mut stats = PassStats::default();
        let placement = ContentSplitter::new(&mut index, &mut stats)
            .place(node, region)
            .unwrap();
        (placement, index)
    }

    #[test]
    fn test_place_whole() {
        let mut region = CapacityRegion::new(0, 10);
        let node = ContentNode::block("p", vec![ContentNode::text("short text")]);
        let (placement, index) = place(node.clone(), &mut region);

        assert_eq!(placement, Placement::Placed);
        assert_eq!(region.fragments(), &[node.clone()]);
        assert_eq!(index.query(node.id()), &[RegionId::new(0)]);
    }

    #[test]
    fn test_split_single_text_leaf() {
        let mut region = CapacityRegion::new(0, 6);
        let node = ContentNode::text(words(1..=10));
        let (placement, index) = place(node.clone(), &mut region);

        let remainder = placement.into_remainder().unwrap();
        assert_eq!(region.fragments().len(), 1);
        assert_eq!(region.fragments()[0].as_text(), Some("w1 w2 w3 w4 w5 w6 "));
        assert_eq!(remainder.as_text(), Some("w7 w8 w9 w10"));
        assert_eq!(remainder.id(), node.id());
        assert_eq!(index.query(node.id()), &[RegionId::new(0)]);
    }

    #[test]
    fn test_split_before_atomic_leaf() {
        let mut region = CapacityRegion::new(0, 5);
        let node = ContentNode::block(
            "div",
            vec![
                ContentNode::block("p", vec![ContentNode::text("a b c")]),
                ContentNode::atomic("img", "photo", 3),
                ContentNode::block("p", vec![ContentNode::text("d e f g")]),
            ],
        );
        let img_id = node.children()[1].id();

        let (placement, index) = place(node.clone(), &mut region);
        let remainder = placement.into_remainder().unwrap();

        let placed = &region.fragments()[0];
        assert_eq!(placed.children().len(), 1);
        assert_eq!(placed.text_content(), "a b c");

        assert_eq!(remainder.id(), node.id());
        assert_eq!(remainder.children().len(), 2);
        assert_eq!(remainder.children()[0].id(), img_id);
        assert_eq!(remainder.text_content(), "d e f g");
        assert!(index.query(img_id).is_empty());
    }

    #[test]
    fn test_split_inside_later_text_leaf() {
        let mut region = CapacityRegion::new(0, 8);
        let node = ContentNode::block(
            "div",
            vec![
                ContentNode::block("p", vec![ContentNode::text("a b c")]),
                ContentNode::atomic("img", "photo", 3),
                ContentNode::block("p", vec![ContentNode::text("d e f g")]),
            ],
        );
        let last_p = node.children()[2].id();

        let (placement, index) = place(node, &mut region);
        let remainder = placement.into_remainder().unwrap();

        let placed = &region.fragments()[0];
        assert_eq!(placed.children().len(), 3);
        assert_eq!(placed.text_content(), "a b cd e ");

        assert_eq!(remainder.children().len(), 1);
        assert_eq!(remainder.children()[0].id(), last_p);
        assert_eq!(remainder.text_content(), "f g");
        assert_eq!(index.query(last_p), &[RegionId::new(0)]);
    }

    #[test]
    fn test_lone_atomic_is_deferred() {
        let mut region = CapacityRegion::new(0, 2);
        let node = ContentNode::block("figure", vec![ContentNode::atomic("img", "tall", 5)]);
        let (placement, index) = place(node.clone(), &mut region);

        assert_eq!(placement, Placement::Deferred { remainder: node });
        assert!(region.fragments().is_empty());
        assert!(index.is_empty());
    }

    #[test]
    fn test_nothing_fits_is_deferred_unchanged() {
        let mut region = CapacityRegion::new(0, 3);
        region.append_fragment(ContentNode::text("x y z"));
        let node = ContentNode::block("p", vec![ContentNode::text("more words")]);

        let (placement, _) = place(node.clone(), &mut region);
        assert_eq!(placement, Placement::Deferred { remainder: node });
        assert_eq!(region.fragments().len(), 1);
    }

    #[test]
    fn test_wrapper_too_big_is_deferred() {
        let mut region = CapacityRegion::new(0, 3).with_block_cost(4);
        let node = ContentNode::block("p", vec![ContentNode::text("a b")]);
        let (placement, _) = place(node.clone(), &mut region);
        assert_eq!(placement, Placement::Deferred { remainder: node });
    }

    #[test]
    fn test_blank_node_that_fits_is_placed() {
        let mut region = CapacityRegion::new(0, 3).with_block_cost(1);
        let node = ContentNode::block("div", vec![ContentNode::text("   ")]);
        let (placement, index) = place(node.clone(), &mut region);

        assert_eq!(placement, Placement::Placed);
        assert_eq!(region.fragments(), &[node]);
        assert!(index.is_empty());
    }

    #[test]
    fn test_blank_node_that_overflows_is_dropped() {
        let mut region = CapacityRegion::new(0, 1).with_block_cost(2);
        let node = ContentNode::block("div", vec![ContentNode::text("   ")]);
        let (placement, _) = place(node, &mut region);

        assert_eq!(placement, Placement::Dropped);
        assert!(placement.is_complete());
        assert!(region.fragments().is_empty());
    }

    #[test]
    fn test_word_split_is_maximal() {
        let node = ContentNode::block(
            "p",
            vec![ContentNode::text("lead in "), ContentNode::text(words(1..=40))],
        );
        for capacity in 3..40 {
            let mut region = CapacityRegion::new(0, capacity);
            let (placement, _) = place(node.clone(), &mut region);
            assert!(placement.into_remainder().is_some());

            assert_eq!(region.probe_overflow(), Ok(false));
            assert_eq!(region.used(), capacity, "capacity {capacity}");
        }
    }

    #[test]
    fn test_probe_count_is_logarithmic() {
        let mut region = CapacityRegion::new(0, 500);
        let mut index = ContentRegionIndex::new();
        let mut stats = PassStats::default();
        ContentSplitter::new(&mut index, &mut stats)
            .place(ContentNode::text(words(1..=1000)), &mut region)
            .unwrap();

        // One whole try, one leaf search step, about log2(1000) word steps.
        assert!(stats.probes <= 13, "probes = {}", stats.probes);
        assert_eq!(stats.splits, 1);
    }

    #[test]
    fn test_probe_failure_propagates() {
        let mut region = CapacityRegion::new(4, 10).failing_after(1);
        let mut index = ContentRegionIndex::new();
        let mut stats = PassStats::default();
        let err = ContentSplitter::new(&mut index, &mut stats)
            .place(ContentNode::text(words(1..=20)), &mut region)
            .unwrap_err();

        assert!(matches!(err, FlowError::Probe { region, .. } if region == RegionId::new(4)));
        assert!(index.is_empty());
    }
}
