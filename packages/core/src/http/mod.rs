//! HTTP surface for the content tree widgets
//!
//! Exposes the widget endpoints as an axum router. The router carries no
//! authentication: the acting user is whatever the `X-Remote-User` header says,
//! so it must sit behind something that sets that header.
//!
//! # Usage
//!
//! ```rust,ignore
//! let state = AppState::new(service, catalog, widgets);
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

use crate::catalog::ContentStore;
use crate::models::WidgetSettings;
use crate::services::ContentTreeService;
use axum::Router;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

mod http_error;
mod widget_endpoints;

pub use http_error::HttpError;
pub use widget_endpoints::{
    subject_from_headers, WidgetEndpoint, WidgetParams, WidgetPath, REMOTE_USER_HEADER,
    THEME_DISABLED_HEADER,
};

/// Application state shared across all endpoints
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ContentTreeService>,
    /// Traversal to the form context
    pub content: Arc<dyn ContentStore>,
    /// Widgets by field name
    pub widgets: Arc<HashMap<String, Arc<WidgetSettings>>>,
}

impl AppState {
    pub fn new(
        service: Arc<ContentTreeService>,
        content: Arc<dyn ContentStore>,
        widgets: impl IntoIterator<Item = WidgetSettings>,
    ) -> Self {
        let widgets = widgets
            .into_iter()
            .map(|widget| (widget.name.clone(), Arc::new(widget)))
            .collect();
        Self {
            service,
            content,
            widgets: Arc::new(widgets),
        }
    }
}

/// Create the application router with request tracing
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(widget_endpoints::routes(state))
        .layer(TraceLayer::new_for_http())
}
