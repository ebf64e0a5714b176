//! Service Layer Error Types
//!
//! Errors surfaced by the tree services. Collaborators (catalog, security
//! policy, token resolution) report `anyhow` errors at their trait seams; the
//! services wrap those here so callers can tell an access denial apart from
//! an index failure.
//!
//! Unresolvable tokens and contradictory default-page constraints are not
//! errors and have no variant.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentTreeError {
    /// The subject may not invoke the view the widget was reached through
    #[error("Unauthorized: {subject} may not access view '{view}'")]
    Unauthorized { subject: String, view: String },

    /// No widget with this name on the form
    #[error("Widget not found: {name}")]
    WidgetNotFound { name: String },

    /// Malformed request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Catalog query failed
    #[error("Catalog query failed: {0}")]
    CatalogFailed(String),

    /// Security policy could not be consulted
    #[error("Security policy failed: {0}")]
    PolicyFailed(String),
}

impl ContentTreeError {
    /// Create an unauthorized error
    pub fn unauthorized(subject: impl Into<String>, view: impl Into<String>) -> Self {
        Self::Unauthorized {
            subject: subject.into(),
            view: view.into(),
        }
    }

    /// Create a widget not found error
    pub fn widget_not_found(name: impl Into<String>) -> Self {
        Self::WidgetNotFound { name: name.into() }
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Wrap a catalog failure
    pub fn catalog_failed(err: anyhow::Error) -> Self {
        Self::CatalogFailed(format!("{:#}", err))
    }

    /// Wrap a security policy failure
    pub fn policy_failed(err: anyhow::Error) -> Self {
        Self::PolicyFailed(format!("{:#}", err))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

pub type ContentTreeResult<T> = Result<T, ContentTreeError>;
