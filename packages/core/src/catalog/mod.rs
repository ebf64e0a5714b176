//! Catalog Layer
//!
//! The catalog is the index the tree services query for content summaries.
//! Real deployments plug in their own index behind the [`Catalog`] trait; the
//! [`InMemoryCatalog`] evaluates navigation queries over a fixture of brains
//! and backs the dev server and the tests.
//!
//! Content lookup by path ([`ContentStore`]) is a separate seam because the
//! HTTP layer needs the form context object, not a catalog summary.

mod memory;

pub use memory::{InMemoryCatalog, SiteFixture};

use crate::models::{Brain, ContentContext, NavQuery};
use async_trait::async_trait;
use std::sync::Arc;

/// Index gateway executing navigation queries
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Return every brain matching `query`, in catalog order
    async fn search(&self, query: &NavQuery) -> anyhow::Result<Vec<Brain>>;

    /// Look up one brain by UID
    async fn brain_by_uid(&self, uid: &str) -> anyhow::Result<Option<Brain>>;
}

/// Traversal from a physical path to the content object living there
pub trait ContentStore: Send + Sync {
    /// The object at `path`, with its parent links populated
    fn content_at(&self, path: &str) -> Option<Arc<ContentContext>>;

    /// The longest prefix of `path` that is a content object
    fn deepest_content(&self, path: &str) -> Option<Arc<ContentContext>> {
        let mut candidate = path.trim_end_matches('/').to_string();
        loop {
            if let Some(content) = self.content_at(&candidate) {
                return Some(content);
            }
            match candidate.rfind('/') {
                Some(0) | None => return self.content_at("/"),
                Some(idx) => candidate.truncate(idx),
            }
        }
    }
}
