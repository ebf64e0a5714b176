//! Catalog Result Summaries
//!
//! A [`Brain`] is the lightweight, read-only summary the catalog returns for one
//! content item. The tree services never mutate brains; they wrap them in
//! [`TreeNode`](super::TreeNode) values instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary of one indexed content item.
///
/// # Examples
///
/// ```rust
/// use contenttree_core::models::Brain;
///
/// let brain = Brain::new("a", "/site/docs/a", "Document", "Page A");
/// assert_eq!(brain.parent_path(), Some("/site/docs"));
/// assert!(!brain.is_folderish);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brain {
    /// Stable unique identifier (UUID string)
    pub uid: String,

    /// Short name of the item inside its container
    pub id: String,

    /// Absolute physical path, e.g. `/site/docs/a`
    pub path: String,

    /// Content type name (e.g. "Folder", "Document")
    pub portal_type: String,

    /// Display title, may be empty
    #[serde(default)]
    pub title: String,

    /// Workflow state (e.g. "published", "private")
    #[serde(default)]
    pub review_state: String,

    /// Whether the item can contain other items
    #[serde(default)]
    pub is_folderish: bool,

    /// Whether the item is the default page of its container
    #[serde(default)]
    pub is_default_page: bool,

    /// Last modification timestamp
    #[serde(default = "Utc::now")]
    pub modified: DateTime<Utc>,
}

impl Brain {
    /// Create a non-folderish brain with a fresh UID
    pub fn new(
        id: impl Into<String>,
        path: impl Into<String>,
        portal_type: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            uid: uuid::Uuid::new_v4().to_string(),
            id: id.into(),
            path: path.into(),
            portal_type: portal_type.into(),
            title: title.into(),
            review_state: String::new(),
            is_folderish: false,
            is_default_page: false,
            modified: Utc::now(),
        }
    }

    /// Builder-style switch for folderish items
    pub fn folderish(mut self) -> Self {
        self.is_folderish = true;
        self
    }

    /// Builder-style switch for default pages
    pub fn default_page(mut self) -> Self {
        self.is_default_page = true;
        self
    }

    /// Builder-style workflow state
    pub fn with_review_state(mut self, state: impl Into<String>) -> Self {
        self.review_state = state.into();
        self
    }

    /// Title, falling back to the id when the title is blank
    pub fn title_or_id(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.id
        } else {
            &self.title
        }
    }

    /// Path of the containing item, `None` for the root
    pub fn parent_path(&self) -> Option<&str> {
        parent_path(&self.path)
    }

    /// Look up a field by its catalog index name
    ///
    /// Used for generic query matching and selectable filters. Boolean
    /// fields are rendered as `"true"` / `"false"`.
    pub fn field(&self, name: &str) -> Option<String> {
        match name {
            "uid" | "UID" => Some(self.uid.clone()),
            "id" | "getId" => Some(self.id.clone()),
            "path" => Some(self.path.clone()),
            "portal_type" => Some(self.portal_type.clone()),
            "title" | "Title" => Some(self.title.clone()),
            "review_state" => Some(self.review_state.clone()),
            "is_folderish" => Some(self.is_folderish.to_string()),
            "is_default_page" => Some(self.is_default_page.to_string()),
            _ => None,
        }
    }
}

/// Parent of an absolute path (`/site/docs/a` → `/site/docs`)
pub fn parent_path(path: &str) -> Option<&str> {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) if trimmed.len() > 1 => Some("/"),
        Some(0) | None => None,
        Some(idx) => Some(&trimmed[..idx]),
    }
}

/// Whether `path` lies strictly below `ancestor`
pub fn is_descendant_path(path: &str, ancestor: &str) -> bool {
    let ancestor = ancestor.trim_end_matches('/');
    let path = path.trim_end_matches('/');
    path.len() > ancestor.len()
        && path.starts_with(ancestor)
        && path.as_bytes()[ancestor.len()] == b'/'
}

/// Number of path segments (`/site/docs` → 2)
pub fn path_depth(path: &str) -> usize {
    path.split('/').filter(|segment| !segment.is_empty()).count()
}
