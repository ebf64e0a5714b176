//! Decorated Tree Nodes
//!
//! [`TreeNode`] wraps a catalog [`Brain`] with its position in the tree being
//! browsed. Nodes are built fresh for every request and dropped once the
//! response is rendered.

use super::Brain;
use serde::{Deserialize, Serialize};

/// Depth marker for nodes whose depth was not computed
pub const DEPTH_NOT_COMPUTED: i32 = -1;

/// Presentation fields added by a tree strategy's decorator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePresentation {
    /// Client-visible token for this item
    pub token: String,
    pub title: String,
    pub portal_type: String,
    /// Lowercased, dash-separated type name usable as a CSS class
    pub normalized_portal_type: String,
    pub normalized_review_state: String,
    /// Whether the item may be chosen in the widget
    pub selectable: bool,
    /// Whether the client should offer to expand the node
    pub show_children: bool,
}

/// One node of a (partial) content tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub item: Brain,

    /// Relative nesting level, [`DEPTH_NOT_COMPUTED`] for lazily fetched levels
    pub depth: i32,

    /// The node is the anchor content itself
    pub current_item: bool,

    /// The node lies on the path to the anchor content
    pub current_parent: bool,

    /// Child nodes, only ever filled one level at a time
    #[serde(default)]
    pub children: Vec<TreeNode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentation: Option<NodePresentation>,
}

impl TreeNode {
    /// Wrap a brain with no position information yet
    pub fn new(item: Brain) -> Self {
        Self {
            item,
            depth: DEPTH_NOT_COMPUTED,
            current_item: false,
            current_parent: false,
            children: Vec::new(),
            presentation: None,
        }
    }

    /// Path of the wrapped item
    pub fn path(&self) -> &str {
        &self.item.path
    }

    /// Title to show, preferring the decorated title
    pub fn display_title(&self) -> &str {
        match &self.presentation {
            Some(presentation) if !presentation.title.is_empty() => &presentation.title,
            _ => self.item.title_or_id(),
        }
    }

    /// Token to link to, falling back to the physical path
    pub fn token(&self) -> &str {
        self.presentation
            .as_ref()
            .map(|presentation| presentation.token.as_str())
            .unwrap_or(&self.item.path)
    }

    /// Whether the node may have children worth expanding
    pub fn has_children(&self) -> bool {
        self.presentation
            .as_ref()
            .map(|presentation| presentation.show_children)
            .unwrap_or(self.item.is_folderish)
    }

    pub fn is_selectable(&self) -> bool {
        self.presentation
            .as_ref()
            .map(|presentation| presentation.selectable)
            .unwrap_or(false)
    }
}
