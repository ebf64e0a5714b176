//! Closest Content and Request Scope
//!
//! Forms may edit objects that are not (yet) part of the content tree. Every
//! path-based decision in a request is taken relative to the closest
//! addressable content, the *anchor*, found by walking parent links outward.
//!
//! [`RequestScope`] computes the anchor and the library roots at most once per
//! request, so every consumer within the request sees the same values.

use super::libraries::{resolve_library_roots, LibraryProvider};
use crate::models::{ContentContext, LibraryEntry, WidgetSettings};
use std::sync::{Arc, OnceLock};

/// Walk parent links until an addressable object is found
///
/// When no object in the chain is addressable the outermost one is returned.
pub fn closest_content(context: &Arc<ContentContext>) -> Arc<ContentContext> {
    let mut current = context;
    loop {
        if current.is_addressable() {
            return Arc::clone(current);
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => {
                tracing::debug!("No addressable ancestor for '{}'", context.id);
                return Arc::clone(current);
            }
        }
    }
}

/// Values computed once per request
pub struct RequestScope {
    context: Arc<ContentContext>,
    anchor: OnceLock<Arc<ContentContext>>,
    libraries: OnceLock<Vec<LibraryEntry>>,
}

impl RequestScope {
    /// Start a scope for a request on `context`
    pub fn new(context: Arc<ContentContext>) -> Self {
        Self {
            context,
            anchor: OnceLock::new(),
            libraries: OnceLock::new(),
        }
    }

    /// The form context as handed in
    pub fn context(&self) -> &Arc<ContentContext> {
        &self.context
    }

    /// The closest addressable content, computed on first use
    pub fn anchor(&self) -> &Arc<ContentContext> {
        self.anchor.get_or_init(|| closest_content(&self.context))
    }

    /// Physical path of the anchor, if it has one
    pub fn anchor_path(&self) -> Option<&str> {
        self.anchor().path.as_deref()
    }

    /// Library roots with the anchor's entry selected, computed on first use
    pub fn libraries(&self, provider: &dyn LibraryProvider, widget: &WidgetSettings) -> &[LibraryEntry] {
        self.libraries
            .get_or_init(|| resolve_library_roots(provider.libraries(widget), self.anchor()))
    }
}

#[cfg(test)]
#[path = "anchor_test.rs"]
mod anchor_test;
