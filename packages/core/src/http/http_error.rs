//! HTTP error handling for the widget endpoints
//!
//! Provides consistent JSON error responses for every service failure.

use crate::services::ContentTreeError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

/// HTTP error response body
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpError {
    /// User-facing error message
    pub message: String,
    /// Machine-readable error code
    pub code: String,
    /// Optional detailed error information for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl HttpError {
    /// Create a new HTTP error
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            details: None,
        }
    }

    /// Create a new HTTP error with details
    pub fn with_details(
        message: impl Into<String>,
        code: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            details: Some(details.into()),
        }
    }

    /// Status code for this error's code
    pub fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "UNAUTHORIZED" => StatusCode::FORBIDDEN,
            "WIDGET_NOT_FOUND" | "RESOURCE_NOT_FOUND" => {
                StatusCode::NOT_FOUND
            }
            "INVALID_INPUT" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<ContentTreeError> for HttpError {
    fn from(err: ContentTreeError) -> Self {
        match err {
            ContentTreeError::Unauthorized { ref subject, ref view } => HttpError::with_details(
                "You are not allowed to use this widget",
                "UNAUTHORIZED",
                format!("subject: {}, view: {}", subject, view),
            ),
            ContentTreeError::WidgetNotFound { .. } => {
                HttpError::new(err.to_string(), "WIDGET_NOT_FOUND")
            }
            ContentTreeError::InvalidRequest(_) => HttpError::new(err.to_string(), "INVALID_INPUT"),
            ContentTreeError::CatalogFailed(_) => HttpError::new(err.to_string(), "CATALOG_ERROR"),
            ContentTreeError::PolicyFailed(_) => HttpError::new(err.to_string(), "POLICY_ERROR"),
        }
    }
}
