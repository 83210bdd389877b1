//! Seed search and track profile endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;

use crate::error::AppError;
use crate::features::Feature;
use crate::types::{ProfilePoint, ProfileResponse, SearchParams, SeedResponse, Track};

use super::AppState;

/// Find the best-matching seed track for a free-text query
///
/// GET /api/v1/search?q=...
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SeedResponse>, AppError> {
    let query = params.q.trim();
    if query.is_empty() {
        return Err(AppError::InvalidInput("query must not be empty".to_string()));
    }

    let track = state.catalog.search_seed(query).await?;
    state.cache.lock().await.insert(track.clone());

    Ok(Json(SeedResponse { track }))
}

/// Radar-chart profile of a single track: the unit-range profile dimensions
///
/// GET /api/v1/tracks/{id}/profile
pub async fn profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProfileResponse>, AppError> {
    let track = lookup_track(&state, &id).await?;

    let profile = Feature::PROFILE
        .into_iter()
        .map(|feature| ProfilePoint {
            feature,
            value: track.features.scaled(feature),
        })
        .collect();

    Ok(Json(ProfileResponse {
        track_id: track.id,
        title: track.title,
        artists: track.artists,
        profile,
    }))
}

/// Fetch a track by id, going to the catalog only on a cache miss
pub(super) async fn lookup_track(state: &AppState, id: &str) -> Result<Track, AppError> {
    if let Some(track) = state.cache.lock().await.get(id) {
        return Ok(track);
    }

    let track = state.catalog.track_by_id(id).await?;
    state.cache.lock().await.insert(track.clone());
    Ok(track)
}
