//! HTTP server setup and routing.

mod mood;
mod recommend;
mod routes;
mod tracks;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use crate::cache::TrackCache;
use crate::catalog::CatalogClient;
use crate::config::AppConfig;

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub catalog: Arc<CatalogClient>,
    /// Session track cache, explicit state rather than a process-wide global
    pub cache: Arc<Mutex<TrackCache>>,
    /// Server start time for uptime calculation
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let catalog = Arc::new(CatalogClient::new(&config.catalog));
        let cache = Arc::new(Mutex::new(TrackCache::new(config.cache.capacity)));

        Self {
            config: Arc::new(config),
            catalog,
            cache,
            started_at: Instant::now(),
        }
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// Creates the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(routes::health))
        .route("/config", get(routes::config))
        // Seed lookup and track profile endpoints
        .route("/search", get(tracks::search))
        .route("/tracks/{id}/profile", get(tracks::profile))
        // Recommendation pipeline endpoints
        .route("/recommend", post(recommend::recommend))
        .route("/recommend/map", post(recommend::recommendation_map))
        .route("/surprise", post(recommend::surprise))
        // Mood preset endpoints
        .route("/moods", get(mood::list_moods));

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
