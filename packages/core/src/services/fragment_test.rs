//! Tests for fragment markup and preview adapters

#[cfg(test)]
mod tests {
    use crate::models::{Brain, NodePresentation, SourceSettings, TreeNode, WidgetSettings};
    use crate::services::fragment::{assemble_fragment, escape_html};
    use crate::services::preview::{PreviewAdapter, PreviewRegistry, SummaryPreview, NO_PREVIEW};
    use std::sync::Arc;

    fn decorated(brain: Brain, selectable: bool) -> TreeNode {
        let presentation = NodePresentation {
            token: brain.path.clone(),
            title: brain.title.clone(),
            portal_type: brain.portal_type.clone(),
            normalized_portal_type: brain.portal_type.to_lowercase(),
            normalized_review_state: String::new(),
            selectable,
            show_children: brain.is_folderish,
        };
        let mut node = TreeNode::new(brain);
        node.presentation = Some(presentation);
        node
    }

    #[test]
    fn test_assemble_keeps_level_and_order() {
        let nodes = vec![
            decorated(Brain::new("b", "/site/b", "Document", "B"), true),
            decorated(Brain::new("a", "/site/a", "Document", "A"), true),
        ];

        let fragment = assemble_fragment(nodes, 3);

        assert_eq!(fragment.level, 3);
        assert_eq!(fragment.children[0].path(), "/site/b");
        assert_eq!(fragment.children[1].path(), "/site/a");
    }

    #[test]
    fn test_assemble_does_not_recurse() {
        let mut folder = decorated(Brain::new("docs", "/site/docs", "Folder", "Docs").folderish(), false);
        folder.children = Vec::new();

        let fragment = assemble_fragment(vec![folder], 0);

        assert!(fragment.children[0].children.is_empty());
    }

    #[test]
    fn test_empty_fragment_markup() {
        let fragment = assemble_fragment(Vec::new(), 0);

        assert!(fragment.is_empty());
        assert_eq!(
            fragment.render_html(),
            "<ul class=\"jqueryFileTree\" style=\"display: none;\"></ul>"
        );
    }

    #[test]
    fn test_render_folder_and_file() {
        let folder = decorated(Brain::new("docs", "/site/docs", "Folder", "Docs").folderish(), false);
        let mut page = decorated(Brain::new("a", "/site/a", "Document", "Page A"), true);
        page.current_item = true;

        let html = assemble_fragment(vec![folder, page], 2).render_html();

        assert!(html.contains(
            "<li class=\"directory collapsed contenttype-folder\"><a href=\"/site/docs\" rel=\"2\">Docs</a></li>"
        ));
        assert!(html.contains(
            "<li class=\"file selectable navTreeCurrentItem contenttype-document\"><a href=\"/site/a\" rel=\"2\">Page A</a></li>"
        ));
    }

    #[test]
    fn test_render_escapes_titles() {
        let node = decorated(
            Brain::new("x", "/site/x", "Document", "<script>\"&\"</script>"),
            true,
        );

        let html = assemble_fragment(vec![node], 0).render_html();

        assert!(html.contains("&lt;script&gt;&quot;&amp;&quot;&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_render_recursive_expands_current_path() {
        let child = decorated(Brain::new("a", "/site/docs/a", "Document", "A"), true);
        let mut folder = decorated(Brain::new("docs", "/site/docs", "Folder", "Docs").folderish(), false);
        folder.current_parent = true;
        folder.children = vec![child];
        let empty = decorated(Brain::new("news", "/site/news", "Folder", "News").folderish(), false);

        let html = assemble_fragment(vec![folder, empty], 1).render_recursive();

        assert!(html.contains("<li class=\"directory expanded contenttype-folder\"><a href=\"/site/docs\" rel=\"1\">Docs</a><ul"));
        assert!(html.contains("<a href=\"/site/docs/a\" rel=\"2\">A</a>"));
        assert!(html.contains("<li class=\"directory collapsed contenttype-folder\"><a href=\"/site/news\" rel=\"1\">News</a></li>"));
    }

    #[test]
    fn test_render_recursive_keeps_off_path_folders_collapsed() {
        let child = decorated(Brain::new("old", "/site/news/old", "Document", "Old"), true);
        let mut folder = decorated(Brain::new("news", "/site/news", "Folder", "News").folderish(), false);
        folder.children = vec![child];

        let html = assemble_fragment(vec![folder], 1).render_recursive();

        assert_eq!(
            html,
            "<ul class=\"jqueryFileTree\"><li class=\"directory collapsed contenttype-folder\"><a href=\"/site/news\" rel=\"1\">News</a></li></ul>"
        );
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("it's"), "it&#x27;s");
        assert_eq!(escape_html("plain"), "plain");
    }

    struct ImagePreview;

    impl PreviewAdapter for ImagePreview {
        fn render(&self, item: &Brain, _widget: &WidgetSettings) -> String {
            format!("<img src=\"{}/@@images/image/thumb\" />", item.path)
        }
    }

    #[test]
    fn test_preview_registry_lookup() {
        let widget = WidgetSettings::new("form.widgets.image", SourceSettings::new("/site"));
        let image = Brain::new("pic", "/site/pic", "Image", "Pic");
        let page = Brain::new("a", "/site/a", "Document", "A");

        let registry = PreviewRegistry::new().with("Image", Arc::new(ImagePreview));
        assert_eq!(
            registry.render(&image, &widget),
            "<img src=\"/site/pic/@@images/image/thumb\" />"
        );
        assert_eq!(registry.render(&page, &widget), NO_PREVIEW);

        let registry = registry.with("*", Arc::new(SummaryPreview));
        assert!(registry.render(&page, &widget).contains("<h3>A</h3>"));
        assert!(registry.render(&image, &widget).starts_with("<img"));
    }
}
