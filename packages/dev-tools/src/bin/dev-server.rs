//! Development HTTP Server Binary
//!
//! Standalone binary serving the content tree widget endpoints over an
//! in-memory site, so the client tree script can be exercised without a real
//! content management backend.
//!
//! # Usage
//!
//! ```bash
//! # Start with the embedded demo site on port 3001
//! cargo run --bin dev-server
//!
//! # Custom port and site
//! CONTENTTREE_PORT=3002 CONTENTTREE_FIXTURE=./my-site.json cargo run --bin dev-server
//!
//! # Expand the docs folder as a logged in user
//! curl -H "X-Remote-User: editor" \
//!   "http://localhost:3001/site/docs/edit/++widget++form.widgets.related/@@contenttree-fetch?href=/site/docs&rel=1"
//! ```
//!
//! # Environment Variables
//!
//! - `CONTENTTREE_PORT`: Server port (default: 3001)
//! - `CONTENTTREE_FIXTURE`: Path to a fixture JSON with `site`, `widgets` and
//!   `permissions` (default: embedded demo site)
//! - `CORS_ALLOW_ORIGIN`: Allowed origin for the client script
//! - `RUST_LOG`: Logging level (e.g., "info", "debug", "trace")
//!
//! # Security
//!
//! **DEVELOPMENT ONLY**: the acting user is taken from the `X-Remote-User`
//! header without any authentication.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use contenttree_core::http::{create_router, AppState};
use contenttree_core::services::preview::ANY_TYPE;
use contenttree_core::{
    BookmarkLibraryProvider, ContentTreeService, InMemoryCatalog, PreviewRegistry, SiteFixture,
    SummaryPreview, ViewPermissions, WidgetSettings,
};
use serde::Deserialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

const DEMO_FIXTURE: &str = include_str!("../../fixtures/demo-site.json");

/// Everything the dev server serves
#[derive(Debug, Deserialize)]
struct DevFixture {
    site: SiteFixture,
    #[serde(default)]
    widgets: Vec<WidgetSettings>,
    #[serde(default)]
    permissions: ViewPermissions,
}

/// Server settings read from the environment
#[derive(Debug)]
struct ServerConfig {
    port: u16,
    fixture: Option<PathBuf>,
}

impl ServerConfig {
    fn from_env() -> Self {
        let port = env::var("CONTENTTREE_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3001);
        let fixture = env::var("CONTENTTREE_FIXTURE")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        Self { port, fixture }
    }

    async fn load_fixture(&self) -> anyhow::Result<DevFixture> {
        let raw = match &self.fixture {
            Some(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to read fixture {}: {}", path.display(), e))?,
            None => DEMO_FIXTURE.to_string(),
        };
        serde_json::from_str(&raw).map_err(|e| anyhow::anyhow!("Invalid fixture: {}", e))
    }
}

/// Create CORS layer for development
///
/// Defaults to the usual local dev server origins. Configure with
/// `CORS_ALLOW_ORIGIN`.
fn cors_layer() -> anyhow::Result<CorsLayer> {
    let origins: Vec<HeaderValue> = match env::var("CORS_ALLOW_ORIGIN") {
        Ok(custom_origin) => vec![custom_origin
            .parse::<HeaderValue>()
            .map_err(|_| anyhow::anyhow!("Invalid CORS_ALLOW_ORIGIN: {}", custom_origin))?],
        Err(_) => vec![
            HeaderValue::from_static("http://localhost:8080"),
            HeaderValue::from_static("http://localhost:5173"),
        ],
    };

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET])
        .allow_headers(Any)
        .expose_headers([header::CONTENT_TYPE])
        .allow_credentials(false))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Content Tree Dev Server");

    let config = ServerConfig::from_env();
    tracing::info!("Port: {}", config.port);
    match &config.fixture {
        Some(path) => tracing::info!("Fixture: {}", path.display()),
        None => tracing::info!("Fixture: embedded demo site"),
    }

    let fixture = config.load_fixture().await?;
    tracing::info!(
        "Loaded site {} with {} items and {} widgets",
        fixture.site.path,
        fixture.site.items.len(),
        fixture.widgets.len()
    );

    let site_title = fixture.site.title.clone();
    let catalog = Arc::new(InMemoryCatalog::new(fixture.site));
    let previews = PreviewRegistry::new().with(ANY_TYPE, Arc::new(SummaryPreview));
    let service = ContentTreeService::new(
        catalog.clone(),
        Arc::new(fixture.permissions),
        Arc::new(BookmarkLibraryProvider::new(site_title)),
        previews,
    );

    for widget in &fixture.widgets {
        tracing::info!("Widget: {}", widget.name);
    }
    let state = AppState::new(Arc::new(service), catalog, fixture.widgets);
    let app = create_router(state).layer(cors_layer()?);

    let addr = format!("127.0.0.1:{}", config.port);
    tracing::info!("HTTP dev server starting on http://{}", addr);
    tracing::info!("Development mode only - NOT for production use");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
