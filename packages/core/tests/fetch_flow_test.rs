//! Integration tests for the fetch and preview flows
//!
//! Tests cover:
//! - Lazy expansion of a folder through its token
//! - Query normalization end to end (default pages, type filters)
//! - Anchor and library roots for transient form contexts
//! - Site fixtures loaded from disk

mod common;

use common::{create_service, demo_site, editor_permissions, related_widget};
use contenttree_core::{
    Brain, Catalog, ContentContext, ContentStore, InMemoryCatalog, NavQuery, QueryValue,
    SiteFixture, Subject, TokenResolver, WidgetRequest, NO_PREVIEW,
};
use std::io::Write;
use std::sync::Arc;

const EDIT_FETCH: &str = "/site/docs/edit/++widget++form.widgets.related/@@contenttree-fetch";

fn docs_request(catalog: &InMemoryCatalog, widget: contenttree_core::WidgetSettings) -> WidgetRequest {
    let context = catalog.content_at("/site/docs").unwrap();
    WidgetRequest::new(Subject::user("editor"), EDIT_FETCH, context, Arc::new(widget))
}

// =========================================================================
// Fetch Flow Tests
// =========================================================================

/// Opaque tokens handed out by an external vocabulary
struct OpaqueTokens;

#[async_trait::async_trait]
impl TokenResolver for OpaqueTokens {
    async fn token_to_path(&self, token: Option<&str>) -> anyhow::Result<Option<String>> {
        Ok((token == Some("T1")).then(|| "/site/docs".to_string()))
    }

    fn token_for(&self, brain: &Brain) -> String {
        brain.path.clone()
    }
}

#[tokio::test]
async fn test_expand_folder_by_token() {
    let catalog = Arc::new(InMemoryCatalog::new(demo_site()));
    let service = create_service(catalog.clone(), editor_permissions())
        .with_token_resolver(Arc::new(OpaqueTokens));
    let request = docs_request(&catalog, related_widget());

    let fragment = service.fetch(&request, Some("T1"), 2).await.unwrap();

    assert_eq!(fragment.level, 2);
    let paths: Vec<&str> = fragment.children.iter().map(|node| node.path()).collect();
    assert_eq!(paths, vec!["/site/docs/a", "/site/docs/b"]);
    assert!(fragment.children.iter().all(|node| node.depth == -1));
}

#[tokio::test]
async fn test_default_pages_included_when_base_query_allows_both() {
    let catalog = Arc::new(InMemoryCatalog::new(demo_site()));
    let service = create_service(catalog.clone(), editor_permissions());
    let mut widget = related_widget();
    widget.source.navigation_tree_query.insert(
        "is_default_page",
        QueryValue::BoolList(vec![true, false]),
    );
    let request = docs_request(&catalog, widget);

    let fragment = service.fetch(&request, Some("/site/docs"), 1).await.unwrap();

    let paths: Vec<&str> = fragment.children.iter().map(|node| node.path()).collect();
    assert_eq!(
        paths,
        vec!["/site/docs/a", "/site/docs/b", "/site/docs/index"]
    );
}

#[tokio::test]
async fn test_sorted_base_query_orders_fragment() {
    let catalog = Arc::new(InMemoryCatalog::new(demo_site()));
    let service = create_service(catalog.clone(), editor_permissions());
    let mut widget = related_widget();
    widget
        .source
        .navigation_tree_query
        .insert("sort_on", QueryValue::Text("sortable_title".to_string()));
    widget
        .source
        .navigation_tree_query
        .insert("sort_order", QueryValue::Text("reverse".to_string()));
    let request = docs_request(&catalog, widget);

    let fragment = service.fetch(&request, Some("/site/docs"), 1).await.unwrap();

    let titles: Vec<&str> = fragment.children.iter().map(|node| node.display_title()).collect();
    assert_eq!(titles, vec!["B", "A"]);
}

#[tokio::test]
async fn test_uid_tokens_round_trip_through_fetch() {
    let catalog = Arc::new(InMemoryCatalog::new(demo_site()));
    let service = create_service(catalog.clone(), editor_permissions());
    let mut widget = related_widget();
    widget.source.token_scheme = contenttree_core::TokenScheme::Uid;
    let request = docs_request(&catalog, widget);

    let top = service.fetch(&request, None, 0).await.unwrap();
    let docs = top
        .children
        .iter()
        .find(|node| node.path() == "/site/docs")
        .unwrap();
    assert_eq!(docs.token(), docs.item.uid);

    let token = docs.token().to_string();
    let level = service.fetch(&request, Some(&token), 1).await.unwrap();

    assert_eq!(level.children.len(), 2);
}

#[tokio::test]
async fn test_fetch_denied_for_anonymous() {
    let catalog = Arc::new(InMemoryCatalog::new(demo_site()));
    let service = create_service(catalog.clone(), editor_permissions());
    let context = catalog.content_at("/site/docs").unwrap();
    let request = WidgetRequest::new(
        Subject::anonymous(),
        EDIT_FETCH,
        context,
        Arc::new(related_widget()),
    );

    let err = service.fetch(&request, Some("/site/docs"), 0).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(err.to_string().contains("Anonymous User"));
}

// =========================================================================
// Preview Tests
// =========================================================================

#[tokio::test]
async fn test_preview_document_and_missing_item() {
    let catalog = Arc::new(InMemoryCatalog::new(demo_site()));
    let service = create_service(catalog.clone(), editor_permissions());
    let mut widget = related_widget();
    widget
        .source
        .navigation_tree_query
        .insert("portal_type", QueryValue::texts(["Document"]));
    let request = docs_request(&catalog, widget);

    let preview = service.preview(&request, Some("/site/docs/b")).await.unwrap();
    assert!(preview.contains("<h3>B</h3>"));

    let preview = service.preview(&request, Some("/site/news")).await.unwrap();
    assert_eq!(preview, NO_PREVIEW);
}

// =========================================================================
// Anchor and Library Tests
// =========================================================================

#[tokio::test]
async fn test_add_form_anchors_to_container() {
    let catalog = Arc::new(InMemoryCatalog::new(demo_site()));
    let service = create_service(catalog.clone(), editor_permissions());
    let docs = catalog.content_at("/site/docs").unwrap();
    let draft = Arc::new(ContentContext::transient("++add++Document", docs));
    let request = WidgetRequest::new(
        Subject::user("editor"),
        "/site/docs/++add++Document/++widget++form.widgets.related/@@contenttree-config",
        draft,
        Arc::new(related_widget()),
    );

    let config = service.widget_config(&request, "/site/docs/++add++Document").await.unwrap();

    assert_eq!(request.scope().anchor_path(), Some("/site/docs"));
    assert_eq!(config.libraries[0].query, "/site/docs");
    assert!(config.libraries[0].selected);
    assert_eq!(config.libraries.iter().filter(|entry| entry.selected).count(), 1);
    assert_eq!(config.config.root_url, "/site/docs");
}

#[tokio::test]
async fn test_bookmarked_anchor_is_not_duplicated() {
    let catalog = Arc::new(InMemoryCatalog::new(demo_site()));
    let service = create_service(catalog.clone(), editor_permissions());
    let mut widget = related_widget();
    widget.libraries = vec![
        contenttree_core::LibraryEntry::new("Site", "/site"),
        contenttree_core::LibraryEntry::new("Docs", "/site/docs"),
    ];
    let request = docs_request(&catalog, widget);

    let roots = service.library_roots(&request);

    assert_eq!(roots.len(), 2);
    assert!(!roots[0].selected);
    assert!(roots[1].selected);
}

// =========================================================================
// Fixture Loading Tests
// =========================================================================

#[tokio::test]
async fn test_fixture_loaded_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let json = serde_json::to_string(&demo_site()).unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let site = SiteFixture::load(file.path()).unwrap();
    let catalog = InMemoryCatalog::new(site);

    let mut query = NavQuery::new();
    query.set_path("/site", Some(1));
    let hits = catalog.search(&query).await.unwrap();

    let paths: Vec<&str> = hits.iter().map(|brain| brain.path.as_str()).collect();
    assert_eq!(paths, vec!["/site/docs", "/site/news"]);
}

#[test]
fn test_invalid_fixture_is_reported() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{ not json").unwrap();

    let err = SiteFixture::load(file.path()).unwrap_err();

    assert!(err.to_string().contains("Invalid fixture"));
}
