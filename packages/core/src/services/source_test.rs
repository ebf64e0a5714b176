//! Tests for token resolution and vocabulary terms

#[cfg(test)]
mod tests {
    use crate::catalog::{InMemoryCatalog, SiteFixture};
    use crate::models::{Brain, SourceSettings, TokenScheme};
    use crate::services::source::{BoundSource, PathTokens, TokenResolver, UidTokens};
    use std::sync::Arc;

    fn create_test_catalog() -> Arc<InMemoryCatalog> {
        Arc::new(InMemoryCatalog::new(SiteFixture {
            id: "site".to_string(),
            title: "Site".to_string(),
            path: "/site".to_string(),
            items: vec![
                Brain::new("docs", "/site/docs", "Folder", "Docs").folderish(),
                Brain::new("a", "/site/docs/a", "Document", "A"),
            ],
        }))
    }

    #[tokio::test]
    async fn test_path_tokens_resolve_inside_portal() {
        let tokens = PathTokens::new("/site");

        assert_eq!(
            tokens.token_to_path(Some("/site/docs/")).await.unwrap(),
            Some("/site/docs".to_string())
        );
        assert_eq!(
            tokens.token_to_path(Some("/site")).await.unwrap(),
            Some("/site".to_string())
        );
    }

    #[tokio::test]
    async fn test_absent_or_foreign_tokens_do_not_resolve() {
        let tokens = PathTokens::new("/site");

        assert_eq!(tokens.token_to_path(None).await.unwrap(), None);
        assert_eq!(tokens.token_to_path(Some("")).await.unwrap(), None);
        assert_eq!(tokens.token_to_path(Some("/other/x")).await.unwrap(), None);
        assert_eq!(tokens.token_to_path(Some("/site-old")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_uid_tokens() {
        let catalog = create_test_catalog();
        let uid = catalog.site().items[1].uid.clone();
        let tokens = UidTokens::new(catalog);

        assert_eq!(
            tokens.token_to_path(Some(&uid)).await.unwrap(),
            Some("/site/docs/a".to_string())
        );
        assert_eq!(tokens.token_to_path(Some("not-a-uuid")).await.unwrap(), None);
        assert_eq!(
            tokens
                .token_to_path(Some("6f1c1a52-3d1f-4a3e-9d6b-2b9a1f6f0c11"))
                .await
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_term_for_brain() {
        let catalog = create_test_catalog();
        let brain = catalog.site().items[1].clone();

        let path_source = BoundSource::bind(SourceSettings::new("/site"), catalog.clone());
        let term = path_source.term_for(&brain);
        assert_eq!(term.value, "/docs/a");
        assert_eq!(term.token, "/site/docs/a");
        assert_eq!(term.title, "A");

        let mut settings = SourceSettings::new("/site");
        settings.token_scheme = TokenScheme::Uid;
        let uid_source = BoundSource::bind(settings, catalog);
        assert_eq!(uid_source.term_for(&brain).token, brain.uid);
    }
}
