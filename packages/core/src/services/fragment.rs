//! Fragment Assembly
//!
//! A fragment is one level of the tree, sent to the client when it expands a
//! node. The assembler never recurses: deeper levels arrive through further
//! requests, each carrying the token of the node being expanded.
//!
//! The markup is the list structure the client tree script expects:
//!
//! ```html
//! <ul class="jqueryFileTree" style="display: none;">
//!   <li class="directory collapsed contenttype-folder"><a href="/site/docs" rel="0">Docs</a></li>
//! </ul>
//! ```

use crate::models::TreeNode;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// One level of tree expansion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fragment {
    /// Nesting level requested by the client
    pub level: u32,
    pub children: Vec<TreeNode>,
}

/// Wrap decorated nodes into a fragment for `level`
pub fn assemble_fragment(nodes: Vec<TreeNode>, level: u32) -> Fragment {
    Fragment {
        level,
        children: nodes,
    }
}

impl Fragment {
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Markup for this level only
    pub fn render_html(&self) -> String {
        let mut html = String::from("<ul class=\"jqueryFileTree\" style=\"display: none;\">");
        for node in &self.children {
            render_item(&mut html, node, self.level, false);
        }
        html.push_str("</ul>");
        html
    }

    /// Markup for this level and the expanded path below it
    ///
    /// Used for the initial tree. Only the current item and its ancestors are
    /// rendered expanded, any other folder stays collapsed.
    pub fn render_recursive(&self) -> String {
        let mut html = String::from("<ul class=\"jqueryFileTree\">");
        for node in &self.children {
            render_item(&mut html, node, self.level, true);
        }
        html.push_str("</ul>");
        html
    }
}

fn render_item(html: &mut String, node: &TreeNode, level: u32, recurse: bool) {
    let expanded = recurse
        && (node.current_item || node.current_parent)
        && !node.children.is_empty();
    let mut classes = vec![if !node.has_children() {
        "file"
    } else if expanded {
        "directory expanded"
    } else {
        "directory collapsed"
    }];
    if node.is_selectable() {
        classes.push("selectable");
    }
    if node.current_item {
        classes.push("navTreeCurrentItem");
    }
    let type_class = node
        .presentation
        .as_ref()
        .map(|presentation| format!("contenttype-{}", presentation.normalized_portal_type));

    let mut class_attr = classes.join(" ");
    if let Some(type_class) = type_class {
        class_attr.push(' ');
        class_attr.push_str(&type_class);
    }

    // Writing to a String cannot fail
    let _ = write!(
        html,
        "<li class=\"{}\"><a href=\"{}\" rel=\"{}\">{}</a>",
        escape_html(&class_attr),
        escape_html(node.token()),
        level,
        escape_html(node.display_title()),
    );

    if expanded {
        html.push_str("<ul class=\"jqueryFileTree\">");
        for child in &node.children {
            render_item(html, child, level + 1, true);
        }
        html.push_str("</ul>");
    }
    html.push_str("</li>");
}

/// Escape text for use in element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
#[path = "fragment_test.rs"]
mod fragment_test;
