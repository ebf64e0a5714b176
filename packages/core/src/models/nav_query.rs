//! Navigation Tree Queries
//!
//! A [`NavQuery`] is the catalog filter for one tree level: a mapping from
//! index name to the value(s) an item must match. Widgets carry a base query
//! which the query builder copies and specializes per request.
//!
//! # Examples
//!
//! ```rust
//! use contenttree_core::models::{NavQuery, QueryValue};
//!
//! let mut query = NavQuery::new();
//! query.insert("portal_type", QueryValue::texts(["Folder", "Document"]));
//! query.set_path("/site/docs", Some(1));
//! assert!(query.contains_key("path"));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Index name of the path constraint
pub const PATH_INDEX: &str = "path";

/// Index name of the content type constraint
pub const PORTAL_TYPE_INDEX: &str = "portal_type";

/// Index name of the default page constraint
pub const DEFAULT_PAGE_INDEX: &str = "is_default_page";

/// Index name used to request an ordering
pub const SORT_ON_KEY: &str = "sort_on";

/// Path constraint: everything below `query`, optionally limited to `depth` levels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathQuery {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
}

/// Value side of a query entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    Bool(bool),
    BoolList(Vec<bool>),
    Text(String),
    TextList(Vec<String>),
    Path(PathQuery),
}

impl QueryValue {
    /// Build a text list value
    pub fn texts<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::TextList(values.into_iter().map(Into::into).collect())
    }

    /// Whether the value admits the given boolean
    pub fn contains_bool(&self, wanted: bool) -> bool {
        match self {
            Self::Bool(value) => *value == wanted,
            Self::BoolList(values) => values.contains(&wanted),
            Self::Text(value) => value.eq_ignore_ascii_case(&wanted.to_string()),
            Self::TextList(values) => values
                .iter()
                .any(|value| value.eq_ignore_ascii_case(&wanted.to_string())),
            Self::Path(_) => false,
        }
    }

    /// Whether the value admits the given text
    pub fn contains_text(&self, wanted: &str) -> bool {
        match self {
            Self::Text(value) => value == wanted,
            Self::TextList(values) => values.iter().any(|value| value == wanted),
            Self::Bool(value) => value.to_string() == wanted,
            Self::BoolList(values) => values.iter().any(|value| value.to_string() == wanted),
            Self::Path(path) => path.query == wanted,
        }
    }
}

/// Catalog filter for one tree level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavQuery {
    entries: BTreeMap<String, QueryValue>,
}

impl NavQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: QueryValue) -> Option<QueryValue> {
        self.entries.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<QueryValue> {
        self.entries.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &QueryValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the path constraint
    pub fn set_path(&mut self, location: impl Into<String>, depth: Option<u32>) {
        self.entries.insert(
            PATH_INDEX.to_string(),
            QueryValue::Path(PathQuery {
                query: location.into(),
                depth,
            }),
        );
    }

    /// The path constraint, if one is set
    pub fn path(&self) -> Option<&PathQuery> {
        match self.entries.get(PATH_INDEX) {
            Some(QueryValue::Path(path)) => Some(path),
            _ => None,
        }
    }
}

impl<K: Into<String>> FromIterator<(K, QueryValue)> for NavQuery {
    fn from_iter<T: IntoIterator<Item = (K, QueryValue)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
