//! Library Roots
//!
//! Libraries are the roots an editor can browse from. Providers supply the
//! candidates; [`resolve_library_roots`] makes sure the anchor content is one
//! of them and is the selected one.

use crate::models::{ContentContext, LibraryEntry, WidgetSettings};

/// Supplies candidate roots for a widget
pub trait LibraryProvider: Send + Sync {
    fn libraries(&self, widget: &WidgetSettings) -> Vec<LibraryEntry>;
}

/// Offers the site root only
pub struct SiteRootLibraryProvider {
    site_title: String,
}

impl SiteRootLibraryProvider {
    pub fn new(site_title: impl Into<String>) -> Self {
        Self {
            site_title: site_title.into(),
        }
    }
}

impl LibraryProvider for SiteRootLibraryProvider {
    fn libraries(&self, widget: &WidgetSettings) -> Vec<LibraryEntry> {
        vec![LibraryEntry::new(
            self.site_title.clone(),
            widget.source.portal_path.clone(),
        )]
    }
}

/// Offers the widget's bookmarked roots, or the site root when there are none
pub struct BookmarkLibraryProvider {
    fallback: SiteRootLibraryProvider,
}

impl BookmarkLibraryProvider {
    pub fn new(site_title: impl Into<String>) -> Self {
        Self {
            fallback: SiteRootLibraryProvider::new(site_title),
        }
    }
}

impl LibraryProvider for BookmarkLibraryProvider {
    fn libraries(&self, widget: &WidgetSettings) -> Vec<LibraryEntry> {
        if widget.libraries.is_empty() {
            self.fallback.libraries(widget)
        } else {
            widget.libraries.clone()
        }
    }
}

/// Select the anchor's entry, inserting one first if it is missing
///
/// Entries are scanned from the end, so the last entry matching the anchor
/// path wins. A missing entry is prepended. Exactly one entry is selected
/// afterwards.
pub fn resolve_library_roots(
    mut entries: Vec<LibraryEntry>,
    anchor: &ContentContext,
) -> Vec<LibraryEntry> {
    let Some(path) = anchor.path.as_deref() else {
        return entries;
    };

    let selected = entries.iter().rposition(|entry| entry.query == path);
    let selected = match selected {
        Some(idx) => idx,
        None => {
            entries.insert(
                0,
                LibraryEntry::new(anchor.title_or_id().to_string(), path.to_string()),
            );
            0
        }
    };

    for (idx, entry) in entries.iter_mut().enumerate() {
        entry.selected = idx == selected;
    }
    entries
}

#[cfg(test)]
#[path = "libraries_test.rs"]
mod libraries_test;
