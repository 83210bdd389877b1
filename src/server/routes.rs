//! HTTP route handlers for health and configuration.

use axum::{extract::State, Json};

use crate::types::{
    CacheInfo, CatalogInfo, ConfigResponse, HealthResponse, HealthStatus, RecommendInfo,
    ServerInfo,
};

use super::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Health check endpoint
///
/// GET /api/v1/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let catalog_configured = state.config.catalog.has_credentials();

    // Degraded without credentials: every catalog call will fail until
    // they are supplied
    let status = if catalog_configured {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    };

    Json(HealthResponse {
        status,
        version: VERSION.to_string(),
        catalog_configured,
        uptime_seconds: state.uptime_seconds(),
    })
}

/// Configuration endpoint. Credential values are never included.
///
/// GET /api/v1/config
pub async fn config(State(state): State<AppState>) -> Json<ConfigResponse> {
    let config = &state.config;
    let entries = state.cache.lock().await.len();

    Json(ConfigResponse {
        catalog: CatalogInfo {
            base_url: config.catalog.base_url.clone(),
            timeout_secs: config.catalog.timeout_secs,
            credentials_configured: config.catalog.has_credentials(),
        },
        recommend: RecommendInfo {
            pool_size: config.recommend.pool_size,
            related_artists: config.recommend.related_artists,
            mood_threshold: config.recommend.mood_threshold,
        },
        cache: CacheInfo {
            capacity: config.cache.capacity,
            entries,
        },
        server: ServerInfo {
            host: config.server.host.clone(),
            port: config.server.port,
        },
    })
}
