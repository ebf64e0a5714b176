//! Content Tree Service
//!
//! Entry points behind the widget endpoints. Every entry point validates
//! access first, binds the widget's source for the request and then runs its
//! flow:
//!
//! - **fetch**: token → path → level query → catalog → decorate → fragment
//! - **preview**: token → path → preview query → first hit → adapter
//! - **initial tree**: base query root → folder tree
//! - **client config**: library roots → client script parameters
//!
//! The service holds no per-request state. Everything computed for a request
//! lives in its [`WidgetRequest`].

use super::access_guard::{validate_access, SecurityPolicy, Subject};
use super::anchor::RequestScope;
use super::decorator::decorate_hits;
use super::error::{ContentTreeError, ContentTreeResult};
use super::folder_tree::build_folder_tree;
use super::fragment::{assemble_fragment, Fragment};
use super::libraries::LibraryProvider;
use super::preview::{PreviewRegistry, NO_PREVIEW};
use super::query_builder::{build_level_query, build_preview_query};
use super::source::{BoundSource, TokenResolver};
use super::strategy::{strategy_for, TreeStrategy};
use crate::catalog::Catalog;
use crate::models::{Brain, ClientConfig, ContentContext, LibraryEntry, NavQuery, WidgetSettings};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Catalog queries slower than this are logged as warnings
const SLOW_QUERY_THRESHOLD: Duration = Duration::from_millis(100);

/// One request to a widget endpoint
pub struct WidgetRequest {
    pub subject: Subject,
    /// Path the request was made for, used to find the invoked view
    pub request_path: String,
    pub widget: Arc<WidgetSettings>,
    scope: RequestScope,
}

impl WidgetRequest {
    pub fn new(
        subject: Subject,
        request_path: impl Into<String>,
        context: Arc<ContentContext>,
        widget: Arc<WidgetSettings>,
    ) -> Self {
        Self {
            subject,
            request_path: request_path.into(),
            widget,
            scope: RequestScope::new(context),
        }
    }

    pub fn context(&self) -> &Arc<ContentContext> {
        self.scope.context()
    }

    pub fn scope(&self) -> &RequestScope {
        &self.scope
    }
}

/// Roots and client parameters for rendering a widget
#[derive(Debug, Clone, serde::Serialize)]
pub struct WidgetConfig {
    pub config: ClientConfig,
    pub libraries: Vec<LibraryEntry>,
}

/// Tree fetching, preview and widget configuration
pub struct ContentTreeService {
    catalog: Arc<dyn Catalog>,
    policy: Arc<dyn SecurityPolicy>,
    libraries: Arc<dyn LibraryProvider>,
    previews: PreviewRegistry,
    /// Overrides the token scheme named by each widget's source
    tokens: Option<Arc<dyn TokenResolver>>,
}

impl ContentTreeService {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        policy: Arc<dyn SecurityPolicy>,
        libraries: Arc<dyn LibraryProvider>,
        previews: PreviewRegistry,
    ) -> Self {
        Self {
            catalog,
            policy,
            libraries,
            previews,
            tokens: None,
        }
    }

    /// Resolve tokens with `resolver` for every widget
    pub fn with_token_resolver(mut self, resolver: Arc<dyn TokenResolver>) -> Self {
        self.tokens = Some(resolver);
        self
    }

    /// Children of the node identified by `token`, one level deep
    ///
    /// An absent or unresolvable token queries without a path constraint.
    #[tracing::instrument(skip(self, request), fields(widget = %request.widget.name))]
    pub async fn fetch(
        &self,
        request: &WidgetRequest,
        token: Option<&str>,
        level: u32,
    ) -> ContentTreeResult<Fragment> {
        self.validate(request).await?;
        let (source, strategy) = self.bind(request);

        let directory = source
            .token_to_path(token)
            .await
            .map_err(ContentTreeError::catalog_failed)?;
        tracing::debug!("Token {:?} resolved to {:?}", token, directory);

        let query = build_level_query(
            source.navigation_tree_query(),
            directory.as_deref(),
            request.widget.show_all_content_types,
        );
        let brains = self.search(&query).await?;

        let nodes = decorate_hits(brains, request.scope().anchor_path(), strategy.as_ref());
        Ok(assemble_fragment(nodes, level))
    }

    /// Preview of the item identified by `token`
    ///
    /// Only the first catalog hit is considered. Without a hit or without an
    /// adapter for its type the no-preview message is returned.
    #[tracing::instrument(skip(self, request), fields(widget = %request.widget.name))]
    pub async fn preview(
        &self,
        request: &WidgetRequest,
        token: Option<&str>,
    ) -> ContentTreeResult<String> {
        self.validate(request).await?;
        let (source, _) = self.bind(request);

        let directory = source
            .token_to_path(token)
            .await
            .map_err(ContentTreeError::catalog_failed)?;

        let query = build_preview_query(source.navigation_tree_query(), directory.as_deref());
        let first: Option<Brain> = self.search(&query).await?.into_iter().next();

        Ok(match first {
            Some(item) => self.previews.render(&item, &request.widget),
            None => {
                tracing::debug!("Nothing to preview for token {:?}", token);
                NO_PREVIEW.to_string()
            }
        })
    }

    /// The tree shown when the widget opens, with the anchor marked
    #[tracing::instrument(skip(self, request), fields(widget = %request.widget.name))]
    pub async fn initial_tree(&self, request: &WidgetRequest) -> ContentTreeResult<Fragment> {
        self.validate(request).await?;
        let (source, strategy) = self.bind(request);

        let root = self.tree_root(&source);
        build_folder_tree(
            self.catalog.as_ref(),
            &root,
            request.scope().anchor_path(),
            source.navigation_tree_query(),
            strategy.as_ref(),
        )
        .await
        .map_err(ContentTreeError::catalog_failed)
    }

    /// Library roots and client script parameters for a widget on `form_url`
    #[tracing::instrument(skip(self, request), fields(widget = %request.widget.name))]
    pub async fn widget_config(
        &self,
        request: &WidgetRequest,
        form_url: &str,
    ) -> ContentTreeResult<WidgetConfig> {
        self.validate(request).await?;

        let libraries = self.library_roots(request).to_vec();
        let config = ClientConfig::for_widget(form_url, &request.widget, &libraries);
        Ok(WidgetConfig { config, libraries })
    }

    /// Library roots for the request, computed once per request
    pub fn library_roots<'r>(&self, request: &'r WidgetRequest) -> &'r [LibraryEntry] {
        request
            .scope()
            .libraries(self.libraries.as_ref(), &request.widget)
    }

    /// Root of the initial tree: the base query's path, else the portal
    fn tree_root(&self, source: &BoundSource) -> String {
        source
            .navigation_tree_query()
            .path()
            .map(|path| path.query.clone())
            .unwrap_or_else(|| source.settings().portal_path.clone())
    }

    /// Check that `subject` may use the view `request_path` invokes on `context`
    ///
    /// The entry points run this themselves. Callers that resolve a widget
    /// after the context use it to deny access before the lookup.
    pub async fn authorize(
        &self,
        subject: &Subject,
        context: &ContentContext,
        request_path: &str,
    ) -> ContentTreeResult<()> {
        validate_access(self.policy.as_ref(), subject, context, request_path).await
    }

    async fn validate(&self, request: &WidgetRequest) -> ContentTreeResult<()> {
        self.authorize(&request.subject, request.context(), &request.request_path)
            .await
    }

    fn bind(&self, request: &WidgetRequest) -> (BoundSource, Arc<dyn TreeStrategy>) {
        let settings = request.widget.source.clone();
        let source = match &self.tokens {
            Some(tokens) => BoundSource::with_resolver(settings, tokens.clone()),
            None => BoundSource::bind(settings, self.catalog.clone()),
        };
        let strategy = strategy_for(&request.widget, source.clone());
        (source, strategy)
    }

    async fn search(&self, query: &NavQuery) -> ContentTreeResult<Vec<Brain>> {
        let start = Instant::now();
        let brains = self
            .catalog
            .search(query)
            .await
            .map_err(ContentTreeError::catalog_failed)?;
        let elapsed = start.elapsed();

        tracing::debug!("Catalog returned {} hits in {:?}", brains.len(), elapsed);
        if elapsed > SLOW_QUERY_THRESHOLD {
            tracing::warn!(
                "Slow catalog query: {} hits in {:?} for {:?}",
                brains.len(),
                elapsed,
                query
            );
        }
        Ok(brains)
    }
}

#[cfg(test)]
#[path = "tree_service_test.rs"]
mod tree_service_test;
