//! Tree Strategies
//!
//! A strategy decides which catalog hits become tree nodes (`admit`) and adds
//! the presentation fields the client needs (`decorate`). Strategies are chosen
//! per widget and handed to the tree services explicitly.

use super::source::BoundSource;
use crate::models::{NodePresentation, TreeNode, WidgetSettings};
use std::sync::Arc;

/// Node filter and decorator pair
pub trait TreeStrategy: Send + Sync {
    /// Whether the node belongs in the tree at all
    fn admit(&self, node: &TreeNode) -> bool;

    /// Add presentation fields to an admitted node
    fn decorate(&self, node: TreeNode) -> TreeNode;
}

/// Default strategy: folders and selectable items only
pub struct ContentTreeStrategy {
    source: BoundSource,
}

impl ContentTreeStrategy {
    pub fn new(source: BoundSource) -> Self {
        Self { source }
    }
}

impl TreeStrategy for ContentTreeStrategy {
    fn admit(&self, node: &TreeNode) -> bool {
        node.item.is_folderish || self.source.is_brain_selectable(&node.item)
    }

    fn decorate(&self, node: TreeNode) -> TreeNode {
        decorate_with_source(&self.source, node)
    }
}

/// Strategy for widgets showing every node
pub struct ShowAllStrategy {
    source: BoundSource,
}

impl ShowAllStrategy {
    pub fn new(source: BoundSource) -> Self {
        Self { source }
    }
}

impl TreeStrategy for ShowAllStrategy {
    fn admit(&self, _node: &TreeNode) -> bool {
        true
    }

    fn decorate(&self, node: TreeNode) -> TreeNode {
        decorate_with_source(&self.source, node)
    }
}

/// Pick the strategy a widget asks for
pub fn strategy_for(widget: &WidgetSettings, source: BoundSource) -> Arc<dyn TreeStrategy> {
    if widget.show_all_nodes {
        Arc::new(ShowAllStrategy::new(source))
    } else {
        Arc::new(ContentTreeStrategy::new(source))
    }
}

fn decorate_with_source(source: &BoundSource, mut node: TreeNode) -> TreeNode {
    let term = source.term_for(&node.item);
    node.presentation = Some(NodePresentation {
        token: term.token,
        title: term.title,
        portal_type: node.item.portal_type.clone(),
        normalized_portal_type: normalize_name(&node.item.portal_type),
        normalized_review_state: normalize_name(&node.item.review_state),
        selectable: source.is_brain_selectable(&node.item),
        show_children: node.item.is_folderish,
    });
    node
}

/// Lowercase a name and replace runs of other characters with a dash
///
/// `"News Item"` becomes `"news-item"`, usable as a CSS class.
pub fn normalize_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            normalized.push(ch.to_ascii_lowercase());
        } else if !normalized.ends_with('-') && !normalized.is_empty() {
            normalized.push('-');
        }
    }
    normalized.trim_end_matches('-').to_string()
}
