//! Shared fixtures for the integration tests

#![allow(dead_code)]

use contenttree_core::http::AppState;
use contenttree_core::{
    Brain, BookmarkLibraryProvider, ContentTreeService, InMemoryCatalog, PreviewRegistry,
    SelectableFilter, SiteFixture, SourceSettings, SummaryPreview, ViewPermissions,
    WidgetSettings,
};
use std::sync::Arc;

pub const RELATED_WIDGET: &str = "form.widgets.related";

/// Small site with folders, documents, an image and a default page
pub fn demo_site() -> SiteFixture {
    SiteFixture {
        id: "site".to_string(),
        title: "Site".to_string(),
        path: "/site".to_string(),
        items: vec![
            Brain::new("docs", "/site/docs", "Folder", "Docs").folderish(),
            Brain::new("a", "/site/docs/a", "Document", "A"),
            Brain::new("b", "/site/docs/b", "Document", "B"),
            Brain::new("img", "/site/docs/img", "Image", "Picture"),
            Brain::new("index", "/site/docs/index", "Document", "Docs index").default_page(),
            Brain::new("news", "/site/news", "Folder", "News").folderish(),
            Brain::new("launch", "/site/news/launch", "News Item", "Launch")
                .with_review_state("published"),
        ],
    }
}

/// Widget choosing documents, browsing everything
pub fn related_widget() -> WidgetSettings {
    let mut source = SourceSettings::new("/site");
    source.selectable_filter = SelectableFilter::new().with("portal_type", ["Document"]);
    WidgetSettings::new(RELATED_WIDGET, source)
}

/// Edit view for authenticated users only
pub fn editor_permissions() -> ViewPermissions {
    ViewPermissions::default().grant("@@edit", ["Authenticated"])
}

pub fn create_service(catalog: Arc<InMemoryCatalog>, policy: ViewPermissions) -> ContentTreeService {
    ContentTreeService::new(
        catalog,
        Arc::new(policy),
        Arc::new(BookmarkLibraryProvider::new("Site")),
        PreviewRegistry::new().with("Document", Arc::new(SummaryPreview)),
    )
}

/// Router state over [`demo_site`] with [`related_widget`]
pub fn create_state() -> AppState {
    let catalog = Arc::new(InMemoryCatalog::new(demo_site()));
    let service = create_service(catalog.clone(), editor_permissions());
    AppState::new(Arc::new(service), catalog, vec![related_widget()])
}
