//! Leaf enumeration: The sequence of splittable units inside a node.
//!
//! Leaves are the text leaves that carry something other than whitespace and
//! every atomic leaf, in document order. Whitespace-only text never counts.

use super::node::{ContentNode, NodeId, NodeKind};

/// Which kind of leaf was found.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum LeafKind {
    /// A text leaf; can be split at word boundaries.
    Text,
    /// An atomic leaf; moves as a whole.
    Atomic,
}

/// A leaf found inside a content tree.
#[derive(Clone, Copy, Debug)]
pub struct Leaf<'a> {
    /// The leaf node itself.
    pub node: &'a ContentNode,
    /// The node that owns the leaf for bookkeeping purposes.
    ///
    /// For a text leaf this is the enclosing element; for an atomic leaf (or a
    /// text leaf with no enclosing element) it is the leaf itself.
    pub owner: NodeId,
    /// Text or atomic.
    pub kind: LeafKind,
}

impl Leaf<'_> {
    /// Get the text of a text leaf.
    pub fn text(&self) -> Option<&str> {
        self.node.as_text()
    }
}

/// Collect the leaves of `root` in document order.
pub fn collect_leaves(root: &ContentNode) -> Vec<Leaf<'_>> {
    let mut out = Vec::new();
    walk(root, root.id(), &mut out);
    out
}

fn walk<'a>(node: &'a ContentNode, owner: NodeId, out: &mut Vec<Leaf<'a>>) {
    match node.kind() {
        NodeKind::Element { children, .. } => {
            for child in children {
                walk(child, node.id(), out);
            }
        }
        NodeKind::Text(_) => {
            if node.is_content_leaf() {
                out.push(Leaf {
                    node,
                    owner,
                    kind: LeafKind::Text,
                });
            }
        }
        NodeKind::Atomic(_) => out.push(Leaf {
            node,
            owner: node.id(),
            kind: LeafKind::Atomic,
        }),
    }
}

/// What to do with one leaf when copying a tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum LeafEdit {
    /// Copy unchanged.
    Keep,
    /// Leave out of the copy.
    Remove,
    /// Copy a text leaf with a different payload. Atomic leaves are kept.
    Replace(String),
}

/// Copy `root`, deciding per leaf ordinal what happens to it.
///
/// Identifiers are preserved. Whitespace-only text and elements are always
/// copied; use [`prune`](super::prune) to clean up wrappers that end up empty.
pub(crate) fn edit_leaves<F>(root: &ContentNode, mut edit: F) -> ContentNode
where
    F: FnMut(usize) -> LeafEdit,
{
    let mut ordinal = 0;
    edit_node(root, &mut ordinal, &mut edit).unwrap_or_else(|| ContentNode {
        id: root.id(),
        kind: NodeKind::Text(String::new()),
    })
}

fn edit_node<F>(node: &ContentNode, ordinal: &mut usize, edit: &mut F) -> Option<ContentNode>
where
    F: FnMut(usize) -> LeafEdit,
{
    match node.kind() {
        NodeKind::Element {
            tag,
            display,
            children,
        } => Some(ContentNode {
            id: node.id(),
            kind: NodeKind::Element {
                tag: tag.clone(),
                display: *display,
                children: children
                    .iter()
                    .filter_map(|child| edit_node(child, ordinal, edit))
                    .collect(),
            },
        }),
        NodeKind::Text(_) | NodeKind::Atomic(_) if node.is_content_leaf() => {
            let current = *ordinal;
            *ordinal += 1;
            match edit(current) {
                LeafEdit::Keep => Some(node.clone()),
                LeafEdit::Remove => None,
                LeafEdit::Replace(text) if !node.is_atomic() => Some(ContentNode {
                    id: node.id(),
                    kind: NodeKind::Text(text),
                }),
                LeafEdit::Replace(_) => Some(node.clone()),
            }
        }
        NodeKind::Text(_) | NodeKind::Atomic(_) => Some(node.clone()),
    }
}
