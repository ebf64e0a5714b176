//! Tree Services
//!
//! This module contains the logic behind the content tree widget:
//!
//! - `ContentTreeService` - Fetch, preview, initial tree and widget configuration
//! - `access_guard` - Re-validation of the view a widget was reached through
//! - `source` - Token issuing and location resolution
//! - `query_builder` - Per-level catalog query construction
//! - `strategy` / `decorator` - Node admission and decoration
//! - `fragment` / `folder_tree` - One-level fragments and the initial tree
//! - `anchor` / `libraries` - Closest content and library roots per request
//! - `preview` - Preview adapters
//!
//! Services coordinate the catalog, the security policy and the widget
//! settings; none of them keeps state across requests.

pub mod access_guard;
pub mod anchor;
pub mod decorator;
pub mod error;
pub mod folder_tree;
pub mod fragment;
pub mod libraries;
pub mod preview;
pub mod query_builder;
pub mod source;
pub mod strategy;
pub mod tree_service;

pub use access_guard::{validate_access, SecurityPolicy, Subject, ViewPermissions};
pub use anchor::{closest_content, RequestScope};
pub use decorator::decorate_hits;
pub use error::{ContentTreeError, ContentTreeResult};
pub use folder_tree::build_folder_tree;
pub use fragment::{assemble_fragment, Fragment};
pub use libraries::{
    resolve_library_roots, BookmarkLibraryProvider, LibraryProvider, SiteRootLibraryProvider,
};
pub use preview::{PreviewAdapter, PreviewRegistry, SummaryPreview, NO_PREVIEW};
pub use query_builder::{build_level_query, build_preview_query};
pub use source::{BoundSource, PathTokens, Term, TokenResolver, UidTokens};
pub use strategy::{strategy_for, ContentTreeStrategy, ShowAllStrategy, TreeStrategy};
pub use tree_service::{ContentTreeService, WidgetConfig, WidgetRequest};
