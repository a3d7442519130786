//! quarry-web library
//!
//! Search front end: builds backend queries, turns backend result sets into
//! view models with windowed pagination, and serves the rendered page.

use std::sync::Arc;

use axum::Router;
use quarry_common::SearchConfig;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub mod api;
pub mod backend;
pub mod error;
pub mod models;
pub mod pagination;
pub mod presenter;
pub mod query;
pub mod render;

pub use crate::backend::{BackendClient, BackendError};
pub use crate::error::{ApiError, ApiResult};
pub use crate::render::{HtmlRenderer, Renderer};

/// Application state shared across HTTP handlers
///
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Validated search configuration
    pub config: Arc<SearchConfig>,
    /// Search backend client
    pub backend: BackendClient,
    /// View renderer
    pub renderer: Arc<dyn Renderer>,
}

impl AppState {
    /// Create application state with the built-in HTML renderer
    pub fn new(config: SearchConfig, backend: BackendClient) -> Self {
        Self {
            config: Arc::new(config),
            backend,
            renderer: Arc::new(HtmlRenderer::default()),
        }
    }

    /// Replace the view renderer
    pub fn with_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }
}

/// Build application router
///
/// Everything is mounted under the configured base path:
/// - `{base}` and `{base}/`: search page
/// - `{base}/health`: health check
/// - `{base}/static`: static assets (when a directory is configured)
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let base = state.config.base.clone();

    let mut router = Router::new()
        .route(&state.config.route_path(), get(api::search_page))
        .route(&format!("{}/health", base), get(api::health_check));

    if !base.is_empty() {
        router = router.route(&format!("{}/", base), get(api::search_page));
    }

    match &state.config.server.static_dir {
        Some(dir) if dir.is_dir() => {
            info!("Serving static assets from {}", dir.display());
            router = router.nest_service(&format!("{}/static", base), ServeDir::new(dir));
        }
        Some(dir) => {
            warn!("Static asset directory {} not found, not serving assets", dir.display());
        }
        None => {}
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
