//! Source Vocabulary and Location Resolution
//!
//! The source is what the widget chooses from. It issues a token for every
//! brain it presents and maps tokens coming back from the client to physical
//! paths. Two token schemes exist:
//!
//! - **Path tokens**: the token is the physical path itself. Only paths inside
//!   the portal resolve.
//! - **UID tokens**: the token is the item's UID, looked up in the catalog.
//!
//! A token that does not resolve is not an error: the caller simply gets no
//! path override and queries without a path constraint.

use crate::catalog::Catalog;
use crate::models::{is_descendant_path, Brain, NavQuery, SourceSettings, TokenScheme};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Maps client tokens to locations and back
#[async_trait]
pub trait TokenResolver: Send + Sync {
    /// Resolve a token to a physical path
    ///
    /// `None` in means "no override"; `Ok(None)` out means the token did not
    /// resolve. Only collaborator failures are errors.
    async fn token_to_path(&self, token: Option<&str>) -> anyhow::Result<Option<String>>;

    /// Token the client should send back for `brain`
    fn token_for(&self, brain: &Brain) -> String;
}

/// Tokens are physical paths below the portal root
pub struct PathTokens {
    portal_path: String,
}

impl PathTokens {
    pub fn new(portal_path: impl Into<String>) -> Self {
        Self {
            portal_path: portal_path.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl TokenResolver for PathTokens {
    async fn token_to_path(&self, token: Option<&str>) -> anyhow::Result<Option<String>> {
        let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(None);
        };
        let path = if token.len() > 1 {
            token.trim_end_matches('/')
        } else {
            token
        };
        if path == self.portal_path || is_descendant_path(path, &self.portal_path) {
            Ok(Some(path.to_string()))
        } else {
            tracing::debug!("Path token outside portal {}: {}", self.portal_path, token);
            Ok(None)
        }
    }

    fn token_for(&self, brain: &Brain) -> String {
        brain.path.clone()
    }
}

/// Tokens are UIDs resolved through the catalog
pub struct UidTokens {
    catalog: Arc<dyn Catalog>,
}

impl UidTokens {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl TokenResolver for UidTokens {
    async fn token_to_path(&self, token: Option<&str>) -> anyhow::Result<Option<String>> {
        let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(None);
        };
        if uuid::Uuid::parse_str(token).is_err() {
            tracing::debug!("Malformed UID token: {}", token);
            return Ok(None);
        }
        let brain = self.catalog.brain_by_uid(token).await?;
        if brain.is_none() {
            tracing::debug!("UID token not in catalog: {}", token);
        }
        Ok(brain.map(|brain| brain.path))
    }

    fn token_for(&self, brain: &Brain) -> String {
        brain.uid.clone()
    }
}

/// Vocabulary term for one brain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Path relative to the portal root
    pub value: String,
    pub token: String,
    pub title: String,
}

/// A source bound to the services it needs for one widget
#[derive(Clone)]
pub struct BoundSource {
    settings: SourceSettings,
    tokens: Arc<dyn TokenResolver>,
}

impl BoundSource {
    /// Bind `settings` using the token scheme they name
    pub fn bind(settings: SourceSettings, catalog: Arc<dyn Catalog>) -> Self {
        let tokens: Arc<dyn TokenResolver> = match settings.token_scheme {
            TokenScheme::Path => Arc::new(PathTokens::new(settings.portal_path.clone())),
            TokenScheme::Uid => Arc::new(UidTokens::new(catalog)),
        };
        Self { settings, tokens }
    }

    /// Bind with an explicit resolver
    pub fn with_resolver(settings: SourceSettings, tokens: Arc<dyn TokenResolver>) -> Self {
        Self { settings, tokens }
    }

    pub fn settings(&self) -> &SourceSettings {
        &self.settings
    }

    pub fn navigation_tree_query(&self) -> &NavQuery {
        &self.settings.navigation_tree_query
    }

    pub async fn token_to_path(&self, token: Option<&str>) -> anyhow::Result<Option<String>> {
        self.tokens.token_to_path(token).await
    }

    pub fn is_brain_selectable(&self, brain: &Brain) -> bool {
        self.settings.selectable_filter.matches(brain)
    }

    pub fn term_for(&self, brain: &Brain) -> Term {
        let portal = self.settings.portal_path.trim_end_matches('/');
        let value = brain
            .path
            .strip_prefix(portal)
            .filter(|rest| rest.is_empty() || rest.starts_with('/'))
            .unwrap_or(&brain.path)
            .to_string();
        Term {
            value,
            token: self.tokens.token_for(brain),
            title: brain.title_or_id().to_string(),
        }
    }
}

#[cfg(test)]
#[path = "source_test.rs"]
mod source_test;
