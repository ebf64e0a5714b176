//! Initial Folder Tree
//!
//! When the widget opens it shows the tree below the selected library root
//! with the path to the anchor content already expanded. Unlike fetches this
//! is built from one query: every descendant of the root is queried, filtered
//! through the strategy and nested under its parent. Only the anchor and its
//! ancestors get their children attached; every other folder stays collapsed
//! and is expanded later through a fetch.

use super::decorator::tree_position;
use super::fragment::{assemble_fragment, Fragment};
use super::query_builder::normalize_default_page;
use super::strategy::TreeStrategy;
use crate::catalog::Catalog;
use crate::models::{path_depth, NavQuery, TreeNode};
use std::collections::HashMap;

/// Build the nested tree below `root_path`
///
/// Default pages are excluded unless the base query says otherwise, as for
/// level queries. Nodes whose parent was rejected by the strategy are left
/// out together with their whole subtree. Children are attached only below
/// nodes on the path to the anchor. Depth is 1 for the root's immediate
/// children.
pub async fn build_folder_tree(
    catalog: &dyn Catalog,
    root_path: &str,
    anchor_path: Option<&str>,
    base_query: &NavQuery,
    strategy: &dyn TreeStrategy,
) -> anyhow::Result<Fragment> {
    let root_path = match root_path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };
    let mut query = base_query.clone();
    query.set_path(root_path, None);
    normalize_default_page(&mut query);

    let brains = catalog.search(&query).await?;
    let root_depth = path_depth(root_path);

    // Admitted nodes grouped by parent path, in catalog order
    let mut by_parent: HashMap<String, Vec<TreeNode>> = HashMap::new();
    for brain in brains {
        if brain.path == root_path {
            continue;
        }
        let Some(parent) = brain.parent_path().map(str::to_string) else {
            continue;
        };
        let (current_item, current_parent) = tree_position(&brain.path, anchor_path);
        let depth = path_depth(&brain.path).saturating_sub(root_depth);
        let mut node = TreeNode::new(brain);
        node.depth = depth as i32;
        node.current_item = current_item;
        node.current_parent = current_parent;
        if strategy.admit(&node) {
            by_parent
                .entry(parent)
                .or_default()
                .push(strategy.decorate(node));
        }
    }

    let children = attach_children(root_path, &mut by_parent);
    tracing::debug!(
        "Built folder tree below {} with {} top level nodes",
        root_path,
        children.len()
    );
    Ok(assemble_fragment(children, 1))
}

fn attach_children(path: &str, by_parent: &mut HashMap<String, Vec<TreeNode>>) -> Vec<TreeNode> {
    let mut nodes = by_parent.remove(path).unwrap_or_default();
    for node in nodes.iter_mut().filter(|node| node.current_item || node.current_parent) {
        let child_path = node.item.path.clone();
        node.children = attach_children(&child_path, by_parent);
    }
    nodes
}
