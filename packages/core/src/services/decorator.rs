//! Tree Node Decoration
//!
//! Turns catalog hits into tree nodes: marks the anchor content and its
//! ancestors, drops what the strategy rejects and decorates the rest. Catalog
//! order is preserved.

use super::strategy::TreeStrategy;
use crate::models::{is_descendant_path, Brain, TreeNode};

/// Position flags of `path` relative to the anchor path
///
/// Returns `(current_item, current_parent)`.
pub fn tree_position(path: &str, anchor_path: Option<&str>) -> (bool, bool) {
    match anchor_path {
        Some(anchor) => (path == anchor, is_descendant_path(anchor, path)),
        None => (false, false),
    }
}

/// Filter and decorate catalog hits for one tree level
///
/// Every node keeps the "not computed" depth marker; depth is only assigned
/// when a whole tree is assembled.
pub fn decorate_hits(
    brains: Vec<Brain>,
    anchor_path: Option<&str>,
    strategy: &dyn TreeStrategy,
) -> Vec<TreeNode> {
    let total = brains.len();
    let nodes: Vec<TreeNode> = brains
        .into_iter()
        .filter_map(|brain| {
            let (current_item, current_parent) = tree_position(&brain.path, anchor_path);
            let mut node = TreeNode::new(brain);
            node.current_item = current_item;
            node.current_parent = current_parent;
            if strategy.admit(&node) {
                Some(strategy.decorate(node))
            } else {
                None
            }
        })
        .collect();

    tracing::debug!("Admitted {} of {} catalog hits", nodes.len(), total);
    nodes
}
