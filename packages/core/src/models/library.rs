//! Library Roots
//!
//! A library is a named root the editor can browse from, such as the site
//! root or the folder closest to the edited content.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryEntry {
    /// Label shown in the library selector
    pub label: String,

    /// Absolute path the tree is rooted at
    pub query: String,

    #[serde(default)]
    pub selected: bool,
}

impl LibraryEntry {
    pub fn new(label: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            query: query.into(),
            selected: false,
        }
    }
}
