//! Access Guard
//!
//! Widget endpoints are reached by traversing through the form's view, and
//! that traversal does not enforce the view's permission. Every endpoint
//! therefore re-validates, before reading any data, that the subject may
//! invoke the view the widget belongs to.

use super::error::{ContentTreeError, ContentTreeResult};
use crate::models::{is_descendant_path, ContentContext};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Pseudo subject every request has
pub const ANONYMOUS: &str = "Anonymous";

/// Pseudo subject every identified request has
pub const AUTHENTICATED: &str = "Authenticated";

/// The acting user, `None` for anonymous requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub user_id: Option<String>,
}

impl Subject {
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub fn user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_none()
    }

    /// Principal names this subject acts as
    pub fn principals(&self) -> Vec<&str> {
        match &self.user_id {
            Some(user_id) => vec![ANONYMOUS, AUTHENTICATED, user_id.as_str()],
            None => vec![ANONYMOUS],
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.user_id {
            Some(user_id) => write!(f, "{}", user_id),
            None => write!(f, "Anonymous User"),
        }
    }
}

/// Permission service validating view access
#[async_trait]
pub trait SecurityPolicy: Send + Sync {
    /// Whether `subject` may invoke `view_name` on the content at `content_path`
    async fn validate(
        &self,
        subject: &Subject,
        content_path: &str,
        view_name: &str,
    ) -> anyhow::Result<bool>;
}

/// Policy granting views to principals
///
/// Views without an entry are governed by `default_allow`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewPermissions {
    #[serde(default)]
    pub views: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub default_allow: bool,
}

impl ViewPermissions {
    /// Grant `view_name` to `principals`
    pub fn grant<I, S>(mut self, view_name: impl Into<String>, principals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.views
            .entry(view_name.into())
            .or_default()
            .extend(principals.into_iter().map(Into::into));
        self
    }
}

#[async_trait]
impl SecurityPolicy for ViewPermissions {
    async fn validate(
        &self,
        subject: &Subject,
        _content_path: &str,
        view_name: &str,
    ) -> anyhow::Result<bool> {
        Ok(match self.views.get(view_name) {
            Some(allowed) => subject
                .principals()
                .iter()
                .any(|principal| allowed.iter().any(|granted| granted == principal)),
            None => self.default_allow,
        })
    }
}

/// Name of the view invoked on `content_path` by a request for `request_path`
///
/// The view is the first segment after the content path. Names that are not
/// already a view (`@@`) or namespace (`++`) traversal get the `@@` prefix,
/// so `edit` resolves to the edit view rather than a method of the content.
pub fn invoked_view_name(content_path: &str, request_path: &str) -> Option<String> {
    let content_path = content_path.trim_end_matches('/');
    if !is_descendant_path(request_path, content_path) {
        return None;
    }
    let view_name = request_path[content_path.len()..]
        .split('/')
        .nth(1)
        .filter(|segment| !segment.is_empty())?;

    if view_name.starts_with("@@") || view_name.starts_with("++") {
        Some(view_name.to_string())
    } else {
        Some(format!("@@{}", view_name))
    }
}

/// Validate that `subject` may use the view the request was routed through
///
/// Transient form contexts have no path to check permissions on and are let
/// through.
#[tracing::instrument(skip(policy, form_context), fields(context = %form_context.id))]
pub async fn validate_access(
    policy: &dyn SecurityPolicy,
    subject: &Subject,
    form_context: &ContentContext,
    request_path: &str,
) -> ContentTreeResult<()> {
    let Some(content_path) = form_context.path.as_deref() else {
        tracing::debug!("Form context is not addressable, skipping access check");
        return Ok(());
    };

    let Some(view_name) = invoked_view_name(content_path, request_path) else {
        tracing::warn!(
            "Request {} does not invoke a view on {}",
            request_path,
            content_path
        );
        return Err(ContentTreeError::unauthorized(subject.to_string(), ""));
    };

    let allowed = policy
        .validate(subject, content_path, &view_name)
        .await
        .map_err(ContentTreeError::policy_failed)?;

    if allowed {
        Ok(())
    } else {
        tracing::warn!("Access denied: {} on {}/{}", subject, content_path, view_name);
        Err(ContentTreeError::unauthorized(subject.to_string(), view_name))
    }
}

#[cfg(test)]
#[path = "access_guard_test.rs"]
mod access_guard_test;
