//! Text region: A terminal rectangle that word-wraps the fragments it holds.
//!
//! Measurement follows a simple line model:
//! - block elements start and end their own lines
//! - inline elements and text flow on the current line, one space between words
//! - atomic leaves start a new line and occupy their declared rows
//! - every fragment starts on a new line
//!
//! Words wider than the region are broken across lines by grapheme.

use super::rect::Rect;
use super::region::{ProbeError, Region, RegionId};
use crate::content::{ContentNode, NodeId, NodeKind};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// How a region treats content taller than itself.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Overflow {
    /// Content spills outside the region and the spill is not reported.
    #[default]
    Visible,
    /// Content is clipped.
    Hidden,
    /// Content is clipped and scrollable.
    Scroll,
}

/// A region backed by a rectangle of terminal cells.
#[derive(Clone, Debug)]
pub struct TextRegion {
    /// Unique identifier.
    id: RegionId,
    /// Position and size.
    rect: Rect,
    /// Configured overflow mode.
    overflow: Overflow,
    /// Whether the region takes part in layout.
    displayed: bool,
    /// Fragments in append order.
    fragments: Vec<ContentNode>,
}

impl TextRegion {
    /// Create a new, displayed region with visible overflow.
    pub const fn new(id: RegionId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            overflow: Overflow::Visible,
            displayed: true,
            fragments: Vec::new(),
        }
    }

    /// Set the overflow mode.
    #[must_use]
    pub const fn with_overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = overflow;
        self
    }

    /// Take the region out of layout.
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    /// Get the region bounds.
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Move or resize the region.
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    /// Get the configured overflow mode.
    pub const fn overflow(&self) -> Overflow {
        self.overflow
    }

    /// Show or hide the region.
    pub fn set_displayed(&mut self, displayed: bool) {
        self.displayed = displayed;
    }

    /// Number of rows the region shows.
    pub fn client_height(&self) -> usize {
        usize::from(self.rect.height)
    }

    /// Number of rows the content needs, as reported under the current
    /// overflow mode.
    pub fn scroll_height(&self) -> usize {
        let rows = self.lines().len();
        match self.overflow {
            Overflow::Visible => rows.min(self.client_height()),
            Overflow::Hidden | Overflow::Scroll => rows,
        }
    }

    /// Wrap the content into display lines.
    pub fn lines(&self) -> Vec<String> {
        let mut wrapper = LineWrapper::new(usize::from(self.rect.width));
        for fragment in &self.fragments {
            wrapper.break_line();
            wrapper.push_node(fragment);
        }
        wrapper.finish()
    }
}

impl Region for TextRegion {
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
        if self.rect.width == 0 {
            return Err(ProbeError::new(format!(
                "region {:?} has zero width and cannot wrap text",
                self.id
            )));
        }

        // Visible overflow hides the spill; measure clipped, then put it back.
        let configured = self.overflow;
        if configured == Overflow::Visible {
            self.overflow = Overflow::Hidden;
        }
        let overflowing = self.client_height() < self.scroll_height();
        self.overflow = configured;

        Ok(overflowing)
    }
}

/// Greedy word wrapper producing display lines.
struct LineWrapper {
    width: usize,
    lines: Vec<String>,
    current: String,
    current_width: usize,
}

impl LineWrapper {
    const fn new(width: usize) -> Self {
        Self {
            width,
            lines: Vec::new(),
            current: String::new(),
            current_width: 0,
        }
    }

    fn push_node(&mut self, node: &ContentNode) {
        match node.kind() {
            NodeKind::Element {
                display, children, ..
            } => {
                let block = *display == crate::content::Display::Block;
                if block {
                    self.break_line();
                }
                for child in children {
                    self.push_node(child);
                }
                if block {
                    self.break_line();
                }
            }
            NodeKind::Text(text) => {
                for word in text.split_whitespace() {
                    self.push_word(word);
                }
            }
            NodeKind::Atomic(leaf) => {
                self.break_line();
                if leaf.rows > 0 {
                    let label = format!("[{}]", leaf.label);
                    self.lines.push(self.clip(&label));
                    for _ in 1..leaf.rows {
                        self.lines.push(String::new());
                    }
                }
            }
        }
    }

    fn push_word(&mut self, word: &str) {
        let word_width = UnicodeWidthStr::width(word);

        if self.current_width > 0 {
            if self.current_width + 1 + word_width <= self.width {
                self.current.push(' ');
                self.current.push_str(word);
                self.current_width += 1 + word_width;
                return;
            }
            self.break_line();
        }

        if word_width <= self.width {
            self.current.push_str(word);
            self.current_width = word_width;
            return;
        }

        // Too wide for any line: hard-break by grapheme.
        for grapheme in word.graphemes(true) {
            let grapheme_width = UnicodeWidthStr::width(grapheme);
            if self.current_width + grapheme_width > self.width && self.current_width > 0 {
                self.break_line();
            }
            self.current.push_str(grapheme);
            self.current_width += grapheme_width;
        }
    }

    fn clip(&self, text: &str) -> String {
        let mut out = String::new();
        let mut used = 0;
        for grapheme in text.graphemes(true) {
            let grapheme_width = UnicodeWidthStr::width(grapheme);
            if used + grapheme_width > self.width {
                break;
            }
            out.push_str(grapheme);
            used += grapheme_width;
        }
        out
    }

    fn break_line(&mut self) {
        if self.current_width > 0 || !self.current.is_empty() {
            self.lines.push(std::mem::take(&mut self.current));
            self.current_width = 0;
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.break_line();
        self.lines
    }
}
