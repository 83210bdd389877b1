//! Mood preset listing endpoint.

use axum::Json;

use crate::mood::presets::ALL_MOODS;
use crate::types::{ListMoodsResponse, MoodInfo, MoodTarget};

/// List the available mood presets and their target vectors
///
/// GET /api/v1/moods
pub async fn list_moods() -> Json<ListMoodsResponse> {
    let moods: Vec<MoodInfo> = ALL_MOODS
        .iter()
        .map(|preset| MoodInfo {
            id: preset.id.to_string(),
            name: preset.name.to_string(),
            targets: preset
                .targets
                .iter()
                .map(|&(feature, value)| MoodTarget { feature, value })
                .collect(),
            seed_query: preset.seed_query.to_string(),
        })
        .collect();

    let count = moods.len();
    Json(ListMoodsResponse { moods, count })
}
