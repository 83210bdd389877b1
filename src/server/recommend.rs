//! Recommendation, surprise and projection-map endpoints.

use axum::{extract::State, Json};

use crate::error::AppError;
use crate::math;
use crate::mood::presets;
use crate::recommend::{self, RecommendOptions};
use crate::types::{
    MapPoint, MapResponse, RecommendRequest, RecommendResponse, SurpriseRequest, SurpriseResponse,
    Track,
};

use super::AppState;

/// Content-based recommendations for a seed query
///
/// POST /api/v1/recommend
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, AppError> {
    let (seed, outcome) = run_pipeline(&state, &request).await?;

    Ok(Json(RecommendResponse {
        seed,
        recommendations: outcome
            .recommendations
            .into_iter()
            .map(Into::into)
            .collect(),
        candidates_considered: outcome.candidates_considered,
    }))
}

/// Mood-driven suggestions without a seed track
///
/// POST /api/v1/surprise
pub async fn surprise(
    State(state): State<AppState>,
    Json(request): Json<SurpriseRequest>,
) -> Result<Json<SurpriseResponse>, AppError> {
    // Resolve the preset and validate the count before touching the catalog
    let preset = presets::get_preset(&request.mood)
        .ok_or_else(|| AppError::InvalidInput(format!("unknown mood: {}", request.mood)))?;
    recommend::validate_count(request.count)?;

    let pool = state
        .catalog
        .search_pool(preset.seed_query, state.config.recommend.pool_size)
        .await?;

    {
        let mut cache = state.cache.lock().await;
        for track in &pool {
            cache.insert(track.clone());
        }
    }

    let recommendations = recommend::rank_by_mood(preset, pool, request.count)?;

    Ok(Json(SurpriseResponse {
        mood: preset.id.to_string(),
        recommendations: recommendations.into_iter().map(Into::into).collect(),
    }))
}

/// 2D projection of the seed and its recommendations
///
/// POST /api/v1/recommend/map
pub async fn recommendation_map(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<MapResponse>, AppError> {
    let (seed, outcome) = run_pipeline(&state, &request).await?;

    let rows: Vec<Vec<f32>> = std::iter::once(&seed)
        .chain(outcome.recommendations.iter().map(|r| &r.track))
        .map(|t| t.features.as_array().to_vec())
        .collect();

    let (coords, explained_variance) = math::pca_project(&math::standardize(&rows));

    let mut points = Vec::with_capacity(coords.len());
    points.push(MapPoint {
        track_id: seed.id.clone(),
        title: seed.title.clone(),
        x: coords[0][0],
        y: coords[0][1],
        seed: true,
        score: None,
    });
    for (rec, xy) in outcome.recommendations.iter().zip(&coords[1..]) {
        points.push(MapPoint {
            track_id: rec.track.id.clone(),
            title: rec.track.title.clone(),
            x: xy[0],
            y: xy[1],
            seed: false,
            score: Some(rec.score),
        });
    }

    Ok(Json(MapResponse {
        points,
        explained_variance,
    }))
}

/// Shared seed-resolution + candidate-gathering + ranking path
async fn run_pipeline(
    state: &AppState,
    request: &RecommendRequest,
) -> Result<(Track, recommend::PipelineOutcome), AppError> {
    let options = RecommendOptions::from_request(request, state.config.recommend.mood_threshold)?;

    let seed = state.catalog.search_seed(request.query.trim()).await?;

    let candidates = state
        .catalog
        .gather_candidates(
            &seed,
            state.config.recommend.pool_size,
            state.config.recommend.related_artists,
        )
        .await?;

    tracing::debug!(
        seed = %seed.id,
        pool = candidates.len(),
        "gathered candidate pool"
    );

    {
        let mut cache = state.cache.lock().await;
        cache.insert(seed.clone());
        for track in &candidates {
            cache.insert(track.clone());
        }
    }

    let outcome = recommend::recommend(&seed, candidates, &options)?;
    Ok((seed, outcome))
}
