//! `ContentNode`: The unit of flowed content.

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of fresh node identifiers.
static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a content node.
///
/// Clones keep the identifier of the node they were made from, so a fragment
/// placed in one region and its remainder in the next still refer to the
/// same original node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Allocate an identifier that no other node created so far uses.
    pub fn fresh() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// How an element participates in line layout.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Display {
    /// Starts and ends its own lines.
    #[default]
    Block,
    /// Flows on the current line with its siblings.
    Inline,
}

/// An indivisible leaf, such as an image or a figure.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct AtomicLeaf {
    /// Tag name (e.g. `img`, `fig`).
    pub tag: String,
    /// Short label shown in place of the content when rendered as text.
    pub label: String,
    /// Height in rows.
    pub rows: u16,
}

/// The variant of a content node.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NodeKind {
    /// A wrapper with ordered children.
    Element {
        /// Tag name.
        tag: String,
        /// Block or inline.
        display: Display,
        /// Children in document order.
        children: Vec<ContentNode>,
    },
    /// A run of text.
    Text(String),
    /// An indivisible leaf.
    Atomic(AtomicLeaf),
}

/// A node in a content tree.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ContentNode {
    pub(crate) id: NodeId,
    pub(crate) kind: NodeKind,
}

impl ContentNode {
    /// Create a node of the given kind with a fresh identifier.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            id: NodeId::fresh(),
            kind,
        }
    }

    /// Create a block element.
    pub fn block(tag: impl Into<String>, children: Vec<Self>) -> Self {
        Self::new(NodeKind::Element {
            tag: tag.into(),
            display: Display::Block,
            children,
        })
    }

    /// Create an inline element.
    pub fn inline(tag: impl Into<String>, children: Vec<Self>) -> Self {
        Self::new(NodeKind::Element {
            tag: tag.into(),
            display: Display::Inline,
            children,
        })
    }

    /// Create a text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Text(text.into()))
    }

    /// Create an atomic leaf that occupies `rows` rows.
    pub fn atomic(tag: impl Into<String>, label: impl Into<String>, rows: u16) -> Self {
        Self::new(NodeKind::Atomic(AtomicLeaf {
            tag: tag.into(),
            label: label.into(),
            rows,
        }))
    }

    /// Get the node identifier.
    #[inline]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Get the node variant.
    #[inline]
    pub const fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Get the children of an element (empty for leaves).
    pub fn children(&self) -> &[Self] {
        match &self.kind {
            NodeKind::Element { children, .. } => children,
            NodeKind::Text(_) | NodeKind::Atomic(_) => &[],
        }
    }

    /// Get mutable access to the children of an element.
    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<Self>> {
        match &mut self.kind {
            NodeKind::Element { children, .. } => Some(children),
            NodeKind::Text(_) | NodeKind::Atomic(_) => None,
        }
    }

    /// Get the text payload of a text leaf.
    pub fn as_text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element { .. } | NodeKind::Atomic(_) => None,
        }
    }

    /// Check if this node is an element.
    pub const fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element { .. })
    }

    /// Check if this node can never be split.
    pub const fn is_atomic(&self) -> bool {
        matches!(self.kind, NodeKind::Atomic(_))
    }

    /// Check if this node is a leaf that carries content.
    ///
    /// Atomic leaves always do; text leaves only when they hold something
    /// other than whitespace.
    pub fn is_content_leaf(&self) -> bool {
        match &self.kind {
            NodeKind::Atomic(_) => true,
            NodeKind::Text(text) => !text.trim().is_empty(),
            NodeKind::Element { .. } => false,
        }
    }

    /// Check if any content leaf exists in this subtree.
    pub fn has_content(&self) -> bool {
        self.is_content_leaf() || self.children().iter().any(Self::has_content)
    }

    /// Concatenate all text in this subtree, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match &self.kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element { children, .. } => {
                for child in children {
                    child.push_text(out);
                }
            }
            NodeKind::Atomic(_) => {}
        }
    }

    /// Find a node by identifier in this subtree.
    pub fn find(&self, id: NodeId) -> Option<&Self> {
        if self.id == id {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(id))
    }
}
