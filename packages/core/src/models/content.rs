//! Form Contexts
//!
//! The object a form is edited on is not always part of the content tree: an
//! add form works on a transient object that has no path yet. [`ContentContext`]
//! models both cases and keeps an explicit link to the object it was reached
//! from, so the closest addressable content can be found by walking parents.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentContext {
    pub id: String,

    #[serde(default)]
    pub title: String,

    /// Physical path, `None` for transient objects not attached to the tree
    #[serde(default)]
    pub path: Option<String>,

    /// The object this one was reached from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Arc<ContentContext>>,
}

impl ContentContext {
    /// An object that lives in the content tree at `path`
    pub fn attached(id: impl Into<String>, title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            path: Some(path.into()),
            parent: None,
        }
    }

    /// A transient object reached from `parent`
    pub fn transient(id: impl Into<String>, parent: Arc<ContentContext>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            path: None,
            parent: Some(parent),
        }
    }

    /// Set the parent link
    pub fn with_parent(mut self, parent: Arc<ContentContext>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Whether the object can be addressed by path
    pub fn is_addressable(&self) -> bool {
        self.path.is_some()
    }

    pub fn parent(&self) -> Option<&Arc<ContentContext>> {
        self.parent.as_ref()
    }

    pub fn title_or_id(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.id
        } else {
            &self.title
        }
    }
}
