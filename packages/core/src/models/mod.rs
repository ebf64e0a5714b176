//! Data Models
//!
//! This module contains the data structures shared by the tree services:
//!
//! - `Brain` - Read-only catalog summary of one content item
//! - `NavQuery` - Catalog filter for one tree level
//! - `TreeNode` - A brain decorated with its tree position
//! - `LibraryEntry` - A browsable root
//! - `ContentContext` - The (possibly transient) object a form edits
//! - `WidgetSettings` - Widget and source configuration

mod brain;
mod content;
mod library;
mod nav_query;
mod tree_node;
mod widget;

pub use brain::{is_descendant_path, parent_path, path_depth, Brain};
pub use content::ContentContext;
pub use library::LibraryEntry;
pub use nav_query::{
    NavQuery, PathQuery, QueryValue, DEFAULT_PAGE_INDEX, PATH_INDEX, PORTAL_TYPE_INDEX,
    SORT_ON_KEY,
};
pub use tree_node::{NodePresentation, TreeNode, DEPTH_NOT_COMPUTED};
pub use widget::{ClientConfig, SelectableFilter, SourceSettings, TokenScheme, WidgetSettings};
