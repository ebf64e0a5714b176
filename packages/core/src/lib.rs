//! Content Tree Picker Core
//!
//! This crate provides the server side of a hierarchical content picker: lazy
//! tree fetching, node filtering and decoration, previews, library roots and
//! the access checks guarding the widget endpoints.
//!
//! # Architecture
//!
//! - **Lazy fetching**: the client expands one level at a time, sending back the
//!   token of the node it opens
//! - **Pluggable collaborators**: catalog, security policy and token scheme sit
//!   behind traits; in-memory implementations back the tests and dev server
//! - **Stateless services**: per-request values live in a request scope and are
//!   computed at most once
//!
//! # Modules
//!
//! - [`models`] - Data structures (Brain, TreeNode, NavQuery, WidgetSettings, etc.)
//! - [`catalog`] - Catalog and content store seams plus the in-memory catalog
//! - [`services`] - Tree services (ContentTreeService, access guard, strategies, etc.)
//! - [`http`] - axum router exposing the widget endpoints

pub mod catalog;
pub mod http;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use catalog::*;
pub use models::*;
pub use services::*;
