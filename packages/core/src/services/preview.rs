//! Item Previews
//!
//! Previews are rendered by adapters registered per content type. Types with
//! no adapter get the [`NO_PREVIEW`] message instead of an error.

use super::fragment::escape_html;
use crate::models::{Brain, WidgetSettings};
use std::collections::HashMap;
use std::sync::Arc;

/// Message returned when nothing can be previewed
pub const NO_PREVIEW: &str = "No preview available.";

/// Registry key matching every content type
pub const ANY_TYPE: &str = "*";

/// Renders a preview of one item for one widget
pub trait PreviewAdapter: Send + Sync {
    fn render(&self, item: &Brain, widget: &WidgetSettings) -> String;
}

/// Preview adapters keyed by content type
#[derive(Clone, Default)]
pub struct PreviewRegistry {
    adapters: HashMap<String, Arc<dyn PreviewAdapter>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `adapter` for `portal_type` (or [`ANY_TYPE`])
    pub fn register(&mut self, portal_type: impl Into<String>, adapter: Arc<dyn PreviewAdapter>) {
        self.adapters.insert(portal_type.into(), adapter);
    }

    /// Builder-style registration
    pub fn with(mut self, portal_type: impl Into<String>, adapter: Arc<dyn PreviewAdapter>) -> Self {
        self.register(portal_type, adapter);
        self
    }

    /// Adapter for `item`, falling back to the wildcard registration
    pub fn lookup(&self, item: &Brain) -> Option<&Arc<dyn PreviewAdapter>> {
        self.adapters
            .get(&item.portal_type)
            .or_else(|| self.adapters.get(ANY_TYPE))
    }

    /// Render `item` or return the no-preview message
    pub fn render(&self, item: &Brain, widget: &WidgetSettings) -> String {
        match self.lookup(item) {
            Some(adapter) => adapter.render(item, widget),
            None => {
                tracing::debug!("No preview adapter for type {}", item.portal_type);
                NO_PREVIEW.to_string()
            }
        }
    }
}

/// Short summary card: title, type and location
pub struct SummaryPreview;

impl PreviewAdapter for SummaryPreview {
    fn render(&self, item: &Brain, _widget: &WidgetSettings) -> String {
        format!(
            "<div class=\"contenttree-preview\"><h3>{}</h3><p class=\"discreet\">{} at {}</p></div>",
            escape_html(item.title_or_id()),
            escape_html(&item.portal_type),
            escape_html(&item.path),
        )
    }
}
