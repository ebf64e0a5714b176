//! Widget Endpoints
//!
//! Endpoints are traversed to through the form they belong to:
//!
//! ```text
//! <form path>/++widget++<name>/<endpoint>
//! ```
//!
//! # Endpoints
//!
//! - `@@contenttree-fetch` (alias `@@fetch`) - One tree level as HTML
//! - `@@contenttree-preview` (alias `@@preview`) - Preview of one item
//! - `@@contenttree-tree` - Initial tree with the path to the form context expanded
//! - `@@contenttree-config` - Client script parameters and library roots as JSON
//!
//! # Usage
//!
//! ```bash
//! # Expand the docs folder
//! curl "http://localhost:3001/site/docs/edit/++widget++form.widgets.related/@@contenttree-fetch?href=/site/docs&rel=1"
//!
//! # Act as a logged in user
//! curl -H "X-Remote-User: editor" "http://localhost:3001/site/docs/edit/++widget++form.widgets.related/@@contenttree-config"
//! ```

use super::http_error::HttpError;
use super::AppState;
use crate::services::{ContentTreeError, Subject, WidgetRequest};
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderName},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;

/// Header carrying the authenticated user id
pub const REMOTE_USER_HEADER: HeaderName = HeaderName::from_static("x-remote-user");

/// Header telling the front end not to theme a fragment
pub const THEME_DISABLED_HEADER: HeaderName = HeaderName::from_static("x-theme-disabled");

const WIDGET_TRAVERSAL_PREFIX: &str = "++widget++";

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Endpoints a widget answers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEndpoint {
    Fetch,
    Preview,
    Tree,
    Config,
}

impl WidgetEndpoint {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "@@contenttree-fetch" | "@@fetch" => Some(Self::Fetch),
            "@@contenttree-preview" | "@@preview" => Some(Self::Preview),
            "@@contenttree-tree" => Some(Self::Tree),
            "@@contenttree-config" => Some(Self::Config),
            _ => None,
        }
    }
}

/// A request path split at the widget traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetPath {
    /// Path of the form the widget belongs to, e.g. `/site/docs/edit`
    pub form_path: String,
    pub widget_name: String,
    pub endpoint: String,
    /// The full request path
    pub request_path: String,
}

impl WidgetPath {
    /// Split `path` into form, widget and endpoint
    ///
    /// Returns `None` unless the path has exactly one segment after the
    /// widget traversal.
    pub fn parse(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let widget_idx = segments
            .iter()
            .position(|segment| segment.starts_with(WIDGET_TRAVERSAL_PREFIX))?;

        let widget_name = &segments[widget_idx][WIDGET_TRAVERSAL_PREFIX.len()..];
        if widget_name.is_empty() || segments.len() != widget_idx + 2 {
            return None;
        }

        Some(Self {
            form_path: format!("/{}", segments[..widget_idx].join("/")),
            widget_name: widget_name.to_string(),
            endpoint: segments[widget_idx + 1].to_string(),
            request_path: format!("/{}", segments.join("/")),
        })
    }
}

/// Query parameters sent by the client tree script
#[derive(Debug, Default, Deserialize)]
pub struct WidgetParams {
    /// Token of the node to expand or preview
    pub href: Option<String>,
    /// Nesting level of the requested fragment
    pub rel: Option<String>,
}

impl WidgetParams {
    /// Requested level, 0 when absent
    pub fn level(&self) -> Result<u32, HttpError> {
        match self.rel.as_deref().map(str::trim) {
            None | Some("") => Ok(0),
            Some(rel) => rel.parse::<u32>().map_err(|_| {
                HttpError::new(
                    format!("Invalid rel '{}'. Must be a non-negative integer", rel),
                    "INVALID_INPUT",
                )
            }),
        }
    }
}

/// Acting subject from the remote user header
pub fn subject_from_headers(headers: &HeaderMap) -> Subject {
    headers
        .get(REMOTE_USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|user| !user.is_empty())
        .map(Subject::user)
        .unwrap_or_else(Subject::anonymous)
}

/// Route every widget request through one handler
///
/// The widget traversal can appear at any depth, so a wildcard route is used
/// and the path is split by [`WidgetPath::parse`].
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/*path", get(dispatch))
        .with_state(state)
}

async fn dispatch(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(params): Query<WidgetParams>,
    headers: HeaderMap,
) -> Result<Response, HttpError> {
    let Some(widget_path) = WidgetPath::parse(&path) else {
        return Err(HttpError::new(
            format!("No widget endpoint at /{}", path),
            "RESOURCE_NOT_FOUND",
        ));
    };
    let Some(endpoint) = WidgetEndpoint::from_name(&widget_path.endpoint) else {
        return Err(HttpError::new(
            format!("Unknown widget endpoint: {}", widget_path.endpoint),
            "RESOURCE_NOT_FOUND",
        ));
    };
    tracing::debug!("{:?} for widget {}", endpoint, widget_path.widget_name);

    let request = build_request(&state, &widget_path, subject_from_headers(&headers)).await?;
    let token = params.href.as_deref();

    let response = match endpoint {
        WidgetEndpoint::Fetch => {
            let level = params.level()?;
            let fragment = state.service.fetch(&request, token, level).await?;
            (
                [
                    (header::CONTENT_TYPE, HTML_CONTENT_TYPE),
                    (THEME_DISABLED_HEADER, "True"),
                ],
                fragment.render_html(),
            )
                .into_response()
        }
        WidgetEndpoint::Preview => {
            let preview = state.service.preview(&request, token).await?;
            ([(header::CONTENT_TYPE, HTML_CONTENT_TYPE)], preview).into_response()
        }
        WidgetEndpoint::Tree => {
            let tree = state.service.initial_tree(&request).await?;
            ([(header::CONTENT_TYPE, HTML_CONTENT_TYPE)], tree.render_recursive()).into_response()
        }
        WidgetEndpoint::Config => {
            let config = state
                .service
                .widget_config(&request, &widget_path.form_path)
                .await?;
            Json(config).into_response()
        }
    };
    Ok(response)
}

/// Resolve the form context, check access, then look up the widget
///
/// A path without content is denied like a forbidden view, and the widget
/// name is only looked up once access is granted.
async fn build_request(
    state: &AppState,
    widget_path: &WidgetPath,
    subject: Subject,
) -> Result<WidgetRequest, ContentTreeError> {
    let Some(context) = state.content.deepest_content(&widget_path.form_path) else {
        tracing::warn!("No content at {}", widget_path.form_path);
        return Err(ContentTreeError::unauthorized(subject.to_string(), ""));
    };

    state
        .service
        .authorize(&subject, &context, &widget_path.request_path)
        .await?;

    let widget = state
        .widgets
        .get(&widget_path.widget_name)
        .cloned()
        .ok_or_else(|| ContentTreeError::widget_not_found(&widget_path.widget_name))?;

    Ok(WidgetRequest::new(
        subject,
        widget_path.request_path.clone(),
        context,
        widget,
    ))
}
