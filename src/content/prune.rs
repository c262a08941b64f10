//! Pruning: Clean up the wrappers a split leaves behind.
//!
//! After a split, the fitting prefix still carries the element structure of
//! the leaves that moved on, and the remainder carries the structure of the
//! leaves that stayed. Pruning removes that dead structure while keeping the
//! root of the fragment in place.

use super::node::ContentNode;

/// Prune a prefix fragment.
///
/// Removes every sibling that follows the last content leaf, at each level
/// from the root down to that leaf, then every non-root element subtree that
/// holds no content leaf.
#[must_use]
pub fn prune(mut fragment: ContentNode) -> ContentNode {
    trim_after_last_leaf(&mut fragment);
    drop_empty_wrappers(&mut fragment);
    fragment
}

/// Prune a remainder fragment.
///
/// Mirror of [`prune`]: removes every sibling that precedes the first content
/// leaf, then every non-root element subtree that holds no content leaf.
#[must_use]
pub fn prune_leading(mut fragment: ContentNode) -> ContentNode {
    trim_before_first_leaf(&mut fragment);
    drop_empty_wrappers(&mut fragment);
    fragment
}

fn trim_after_last_leaf(node: &mut ContentNode) {
    let Some(children) = node.children_mut() else {
        return;
    };
    let Some(last) = children.iter().rposition(ContentNode::has_content) else {
        return;
    };

    children.truncate(last + 1);
    if let Some(child) = children.last_mut() {
        trim_after_last_leaf(child);
    }
}

fn trim_before_first_leaf(node: &mut ContentNode) {
    let Some(children) = node.children_mut() else {
        return;
    };
    let Some(first) = children.iter().position(ContentNode::has_content) else {
        return;
    };

    children.drain(..first);
    if let Some(child) = children.first_mut() {
        trim_before_first_leaf(child);
    }
}

fn drop_empty_wrappers(node: &mut ContentNode) {
    if let Some(children) = node.children_mut() {
        children.retain(|child| !child.is_element() || child.has_content());
        for child in children.iter_mut() {
            drop_empty_wrappers(child);
        }
    }
}
