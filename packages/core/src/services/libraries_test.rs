//! Tests for library root resolution

#[cfg(test)]
mod tests {
    use crate::models::{ContentContext, LibraryEntry, SourceSettings, WidgetSettings};
    use crate::services::libraries::{
        resolve_library_roots, BookmarkLibraryProvider, LibraryProvider,
        SiteRootLibraryProvider,
    };

    fn anchor() -> ContentContext {
        ContentContext::attached("docs", "Documentation", "/site/docs")
    }

    fn selected(entries: &[LibraryEntry]) -> Vec<usize> {
        entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.selected)
            .map(|(idx, _)| idx)
            .collect()
    }

    #[test]
    fn test_existing_entry_selected_without_duplicate() {
        let mut site = LibraryEntry::new("Site", "/site");
        site.selected = true;
        let entries = vec![site, LibraryEntry::new("Docs", "/site/docs")];

        let resolved = resolve_library_roots(entries, &anchor());

        assert_eq!(resolved.len(), 2);
        assert_eq!(selected(&resolved), vec![1]);
        assert_eq!(resolved[1].label, "Docs");
    }

    #[test]
    fn test_last_duplicate_wins() {
        let entries = vec![
            LibraryEntry::new("Docs (first)", "/site/docs"),
            LibraryEntry::new("Site", "/site"),
            LibraryEntry::new("Docs (last)", "/site/docs"),
        ];

        let resolved = resolve_library_roots(entries, &anchor());

        assert_eq!(resolved.len(), 3);
        assert_eq!(selected(&resolved), vec![2]);
    }

    #[test]
    fn test_missing_entry_prepended_and_selected() {
        let mut site = LibraryEntry::new("Site", "/site");
        site.selected = true;

        let resolved = resolve_library_roots(vec![site], &anchor());

        assert_eq!(resolved.len(), 2);
        assert_eq!(
            resolved[0],
            LibraryEntry {
                label: "Documentation".to_string(),
                query: "/site/docs".to_string(),
                selected: true,
            }
        );
        assert_eq!(selected(&resolved), vec![0]);
    }

    #[test]
    fn test_label_falls_back_to_id() {
        let untitled = ContentContext::attached("docs", "", "/site/docs");

        let resolved = resolve_library_roots(Vec::new(), &untitled);

        assert_eq!(resolved[0].label, "docs");
    }

    #[test]
    fn test_providers() {
        let mut widget = WidgetSettings::new("form.widgets.related", SourceSettings::new("/site"));

        let site_only = SiteRootLibraryProvider::new("My Site").libraries(&widget);
        assert_eq!(site_only, vec![LibraryEntry::new("My Site", "/site")]);

        let bookmarks = BookmarkLibraryProvider::new("My Site");
        assert_eq!(bookmarks.libraries(&widget), site_only);

        widget.libraries = vec![LibraryEntry::new("Images", "/site/images")];
        assert_eq!(
            bookmarks.libraries(&widget),
            vec![LibraryEntry::new("Images", "/site/images")]
        );
    }
}
