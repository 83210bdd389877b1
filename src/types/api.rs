//! API request and response types for the recommendation endpoints.

use serde::{Deserialize, Serialize};

use crate::features::Feature;
use crate::recommend::Recommendation;
use crate::types::Track;

/// Query parameters for seed search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    /// Free-text query (song title and/or artist)
    pub q: String,
}

/// Response for a seed search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedResponse {
    pub track: Track,
}

/// Request for content-based recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
    /// Free-text seed query
    pub query: String,

    /// Number of recommendations to return (5-20)
    #[serde(default = "default_count")]
    pub count: usize,

    /// Inclusive popularity lower bound
    #[serde(default)]
    pub popularity_min: u8,

    /// Inclusive popularity upper bound
    #[serde(default = "default_popularity_max")]
    pub popularity_max: u8,

    /// Inclusive release-year lower bound
    #[serde(default)]
    pub year_min: Option<u16>,

    /// Inclusive release-year upper bound
    #[serde(default)]
    pub year_max: Option<u16>,

    /// Optional mood constraint (preset id)
    #[serde(default)]
    pub mood: Option<String>,
}

pub(crate) fn default_count() -> usize {
    10
}

fn default_popularity_max() -> u8 {
    100
}

/// A recommended track with its similarity score relative to the seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedTrack {
    pub track: Track,
    /// Cosine similarity to the seed in the standardized feature space
    pub score: f32,
}

impl From<Recommendation> for RecommendedTrack {
    fn from(rec: Recommendation) -> Self {
        Self {
            track: rec.track,
            score: rec.score,
        }
    }
}

/// Response with ordered recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    /// The seed track the recommendations are anchored to
    pub seed: Track,
    /// Recommendations, scores non-increasing
    pub recommendations: Vec<RecommendedTrack>,
    /// Size of the candidate pool after filtering
    pub candidates_considered: usize,
}

/// Request for mood-based "surprise me" suggestions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurpriseRequest {
    /// Mood preset id (e.g. "happy")
    pub mood: String,

    /// Number of suggestions to return (5-20)
    #[serde(default = "default_count")]
    pub count: usize,
}

/// Response for mood-based suggestions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurpriseResponse {
    pub mood: String,
    /// Suggestions ordered by closeness to the mood target
    pub recommendations: Vec<RecommendedTrack>,
}

/// One mood target dimension
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodTarget {
    pub feature: Feature,
    pub value: f32,
}

/// Info about a single mood preset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodInfo {
    /// Preset identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Target feature values
    pub targets: Vec<MoodTarget>,
    /// Search query used to seed the surprise path
    pub seed_query: String,
}

/// Response listing available mood presets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMoodsResponse {
    pub moods: Vec<MoodInfo>,
    pub count: usize,
}

/// One radar-chart dimension of a track profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilePoint {
    pub feature: Feature,
    /// Value in [0, 1]
    pub value: f32,
}

/// Radar-chart data for a single track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub track_id: String,
    pub title: String,
    pub artists: Vec<String>,
    /// The unit-range profile dimensions
    pub profile: Vec<ProfilePoint>,
}

/// One point of the PCA scatter projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapPoint {
    pub track_id: String,
    pub title: String,
    pub x: f32,
    pub y: f32,
    /// True for the seed track
    pub seed: bool,
    /// Similarity score; absent for the seed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

/// PCA scatter data for seed + recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapResponse {
    pub points: Vec<MapPoint>,
    /// Explained-variance ratio per component
    pub explained_variance: [f32; 2],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommend_request_defaults() {
        let json = r#"{"query": "bohemian rhapsody"}"#;
        let req: RecommendRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.query, "bohemian rhapsody");
        assert_eq!(req.count, 10);
        assert_eq!(req.popularity_min, 0);
        assert_eq!(req.popularity_max, 100);
        assert!(req.year_min.is_none());
        assert!(req.mood.is_none());
    }

    #[test]
    fn test_recommend_request_with_filters() {
        let json = r#"{"query": "x", "count": 5, "popularity_min": 40, "year_min": 1990, "year_max": 1999, "mood": "happy"}"#;
        let req: RecommendRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.count, 5);
        assert_eq!(req.popularity_min, 40);
        assert_eq!(req.year_min, Some(1990));
        assert_eq!(req.mood.as_deref(), Some("happy"));
    }

    #[test]
    fn test_surprise_request_defaults() {
        let req: SurpriseRequest = serde_json::from_str(r#"{"mood": "chill"}"#).unwrap();
        assert_eq!(req.mood, "chill");
        assert_eq!(req.count, 10);
    }

    #[test]
    fn test_mood_info_serialization() {
        let info = MoodInfo {
            id: "happy".to_string(),
            name: "Happy".to_string(),
            targets: vec![MoodTarget {
                feature: Feature::Valence,
                value: 0.8,
            }],
            seed_query: "happy upbeat hits".to_string(),
        };

        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("happy"));
        assert!(json.contains("valence"));

        let decoded: MoodInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.id, "happy");
        assert_eq!(decoded.targets.len(), 1);
    }
}
