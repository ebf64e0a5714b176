//! In-memory catalog over a fixture of brains
//!
//! Query semantics follow the navigation catalog:
//!
//! - `path`: the path itself and everything below it; with `depth: n` only items
//!   1..=n levels below (depth 0 is the item itself)
//! - `sort_on`: `sortable_title`, `path` or `modified`, reversed by
//!   `sort_order: "reverse"`; insertion order otherwise
//! - any other key: the brain field of that name must match one of the values
//!
//! Unknown keys are ignored with a warning so a base query written for a
//! richer index still works here.

use super::{Catalog, ContentStore};
use crate::models::{
    is_descendant_path, path_depth, Brain, ContentContext, NavQuery, PathQuery,
    QueryValue, PATH_INDEX, SORT_ON_KEY,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

const SORT_ORDER_KEY: &str = "sort_order";

/// A site: its root plus every indexed item, in catalog order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteFixture {
    pub id: String,
    pub title: String,
    /// Physical path of the site root, e.g. `/site`
    pub path: String,
    #[serde(default)]
    pub items: Vec<Brain>,
}

impl SiteFixture {
    /// Read a fixture from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read fixture {}: {}", path.display(), e))?;
        let fixture = serde_json::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("Invalid fixture {}: {}", path.display(), e))?;
        Ok(fixture)
    }
}

/// Catalog and content store backed by a [`SiteFixture`]
pub struct InMemoryCatalog {
    site: SiteFixture,
    by_path: HashMap<String, usize>,
    by_uid: HashMap<String, usize>,
}

impl InMemoryCatalog {
    pub fn new(site: SiteFixture) -> Self {
        let by_path = site
            .items
            .iter()
            .enumerate()
            .map(|(idx, brain)| (brain.path.clone(), idx))
            .collect();
        let by_uid = site
            .items
            .iter()
            .enumerate()
            .map(|(idx, brain)| (brain.uid.clone(), idx))
            .collect();
        Self {
            site,
            by_path,
            by_uid,
        }
    }

    pub fn site(&self) -> &SiteFixture {
        &self.site
    }

    /// Evaluate a query synchronously
    pub fn evaluate(&self, query: &NavQuery) -> Vec<Brain> {
        let mut hits: Vec<Brain> = self
            .site
            .items
            .iter()
            .filter(|brain| Self::matches(brain, query))
            .cloned()
            .collect();

        if let Some(QueryValue::Text(sort_on)) = query.get(SORT_ON_KEY) {
            sort_brains(&mut hits, sort_on);
            if let Some(QueryValue::Text(order)) = query.get(SORT_ORDER_KEY) {
                if order == "reverse" || order == "descending" {
                    hits.reverse();
                }
            }
        }

        hits
    }

    fn matches(brain: &Brain, query: &NavQuery) -> bool {
        query.iter().all(|(key, value)| match key.as_str() {
            PATH_INDEX => match value {
                QueryValue::Path(path) => path_matches(&brain.path, path),
                QueryValue::Text(root) => path_matches(
                    &brain.path,
                    &PathQuery {
                        query: root.clone(),
                        depth: None,
                    },
                ),
                other => {
                    tracing::warn!("Ignoring unsupported path value: {:?}", other);
                    true
                }
            },
            SORT_ON_KEY | SORT_ORDER_KEY => true,
            field => match brain.field(field) {
                Some(actual) => value.contains_text(&actual),
                None => {
                    tracing::warn!("Ignoring unknown catalog index: {}", field);
                    true
                }
            },
        })
    }

    fn context_for(&self, brain: &Brain) -> ContentContext {
        let mut context = ContentContext::attached(&brain.id, &brain.title, &brain.path);
        if let Some(parent) = brain.parent_path().and_then(|p| self.content_at(p)) {
            context = context.with_parent(parent);
        }
        context
    }
}

fn path_matches(path: &str, constraint: &PathQuery) -> bool {
    let root = constraint.query.trim_end_matches('/');
    let root = if root.is_empty() { "/" } else { root };
    let distance = if path == root {
        0
    } else if is_descendant_path(path, root) {
        path_depth(path) - path_depth(root)
    } else {
        return false;
    };

    match constraint.depth {
        Some(0) => distance == 0,
        Some(depth) => distance >= 1 && distance <= depth as usize,
        None => true,
    }
}

fn sort_brains(hits: &mut [Brain], sort_on: &str) {
    let compare: fn(&Brain, &Brain) -> Ordering = match sort_on {
        "sortable_title" => |a: &Brain, b: &Brain| {
            a.title_or_id()
                .to_lowercase()
                .cmp(&b.title_or_id().to_lowercase())
        },
        "path" => |a: &Brain, b: &Brain| a.path.cmp(&b.path),
        "modified" => |a: &Brain, b: &Brain| a.modified.cmp(&b.modified),
        other => {
            tracing::warn!("Ignoring unsupported sort index: {}", other);
            return;
        }
    };
    hits.sort_by(compare);
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn search(&self, query: &NavQuery) -> anyhow::Result<Vec<Brain>> {
        Ok(self.evaluate(query))
    }

    async fn brain_by_uid(&self, uid: &str) -> anyhow::Result<Option<Brain>> {
        Ok(self
            .by_uid
            .get(uid)
            .map(|idx| self.site.items[*idx].clone()))
    }
}

impl ContentStore for InMemoryCatalog {
    fn content_at(&self, path: &str) -> Option<Arc<ContentContext>> {
        let path = path.trim_end_matches('/');
        if path == self.site.path.trim_end_matches('/') {
            return Some(Arc::new(ContentContext::attached(
                &self.site.id,
                &self.site.title,
                &self.site.path,
            )));
        }
        let idx = self.by_path.get(path)?;
        Some(Arc::new(self.context_for(&self.site.items[*idx])))
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;
