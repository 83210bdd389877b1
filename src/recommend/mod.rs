//! The recommendation pipeline: filter, standardize, rank, truncate.

mod filter;
mod rank;

pub use filter::{Filters, MoodFilter};
pub use rank::rank;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::mood::{self, MoodPreset};
use crate::types::{RecommendRequest, Track};

/// Smallest number of recommendations a caller may request
pub const MIN_COUNT: usize = 5;

/// Largest number of recommendations a caller may request
pub const MAX_COUNT: usize = 20;

/// A track paired with its similarity score relative to the seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub track: Track,
    pub score: f32,
}

/// Errors that can occur while assembling recommendations
#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    #[error("count must be between {min} and {max}, got {got}")]
    CountOutOfRange { min: usize, max: usize, got: usize },

    #[error("query must not be empty")]
    EmptyQuery,

    #[error("{0} range has min greater than max")]
    InvertedRange(&'static str),

    #[error("unknown mood: {0}")]
    UnknownMood(String),

    #[error("every candidate was filtered out")]
    NoResults,
}

/// Validated pipeline parameters for one request
#[derive(Debug)]
pub struct RecommendOptions {
    pub count: usize,
    pub filters: Filters,
}

impl RecommendOptions {
    /// Validate a request and resolve its mood label.
    ///
    /// The mood lookup happens here, before any catalog call, so a bad label
    /// never costs a network round trip.
    pub fn from_request(
        request: &RecommendRequest,
        mood_threshold: f32,
    ) -> Result<Self, RecommendError> {
        if request.query.trim().is_empty() {
            return Err(RecommendError::EmptyQuery);
        }
        validate_count(request.count)?;

        if request.popularity_min > request.popularity_max {
            return Err(RecommendError::InvertedRange("popularity"));
        }
        if let (Some(min), Some(max)) = (request.year_min, request.year_max) {
            if min > max {
                return Err(RecommendError::InvertedRange("year"));
            }
        }

        let mood = match request.mood.as_deref() {
            Some(label) => {
                let preset = mood::get_preset(label)
                    .ok_or_else(|| RecommendError::UnknownMood(label.to_string()))?;
                Some(MoodFilter {
                    preset,
                    threshold: mood_threshold,
                })
            }
            None => None,
        };

        let year = match (request.year_min, request.year_max) {
            (None, None) => None,
            (min, max) => Some((min.unwrap_or(0), max.unwrap_or(u16::MAX))),
        };

        Ok(Self {
            count: request.count,
            filters: Filters {
                popularity: Some((request.popularity_min, request.popularity_max)),
                year,
                mood,
            },
        })
    }
}

/// Bounds check on the requested recommendation count
pub fn validate_count(count: usize) -> Result<(), RecommendError> {
    if !(MIN_COUNT..=MAX_COUNT).contains(&count) {
        return Err(RecommendError::CountOutOfRange {
            min: MIN_COUNT,
            max: MAX_COUNT,
            got: count,
        });
    }
    Ok(())
}

/// Result of one pipeline run
#[derive(Debug)]
pub struct PipelineOutcome {
    /// Ordered recommendations, scores non-increasing
    pub recommendations: Vec<Recommendation>,
    /// Pool size after filtering, before truncation
    pub candidates_considered: usize,
}

/// Run the full pipeline for a seed and its candidate pool.
///
/// Filters first, then standardizes seed + survivors together and ranks by
/// cosine similarity. An empty post-filter pool is `NoResults` so the caller
/// can tell the user to relax the filters.
pub fn recommend(
    seed: &Track,
    candidates: Vec<Track>,
    options: &RecommendOptions,
) -> Result<PipelineOutcome, RecommendError> {
    let survivors = options.filters.apply(candidates);
    if survivors.is_empty() {
        return Err(RecommendError::NoResults);
    }
    let candidates_considered = survivors.len();
    Ok(PipelineOutcome {
        recommendations: rank::rank(seed, survivors, options.count),
        candidates_considered,
    })
}

/// Rank candidates by closeness to a mood target (the "surprise me" path).
///
/// No seed is involved; the preset's target vector is the reference. Ties
/// break on higher popularity, then on candidate order.
pub fn rank_by_mood(
    preset: &'static MoodPreset,
    candidates: Vec<Track>,
    count: usize,
) -> Result<Vec<Recommendation>, RecommendError> {
    if candidates.is_empty() {
        return Err(RecommendError::NoResults);
    }

    let mut scored: Vec<(usize, f32)> = candidates
        .iter()
        .enumerate()
        .map(|(i, t)| (i, mood::mood_closeness(preset, &t.features)))
        .collect();

    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| candidates[b.0].popularity.cmp(&candidates[a.0].popularity))
            .then_with(|| a.0.cmp(&b.0))
    });

    let mut ordered: Vec<Option<Track>> = candidates.into_iter().map(Some).collect();
    Ok(scored
        .into_iter()
        .take(count)
        .map(|(i, score)| Recommendation {
            track: ordered[i].take().expect("candidate consumed twice"),
            score,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureVector;
    use crate::mood::presets::MOOD_HAPPY;

    fn track(id: &str, popularity: u8, valence: f32) -> Track {
        Track {
            id: id.to_string(),
            title: id.to_string(),
            artists: vec![],
            artist_id: None,
            album: None,
            artwork_url: None,
            preview_url: None,
            popularity,
            release_year: Some(2015),
            features: FeatureVector {
                danceability: 0.7,
                energy: 0.7,
                valence,
                tempo: 120.0,
                acousticness: 0.2,
                liveness: 0.1,
                instrumentalness: 0.0,
                loudness: -7.0,
                speechiness: 0.05,
            },
        }
    }

    fn request(query: &str) -> RecommendRequest {
        serde_json::from_value(serde_json::json!({ "query": query })).unwrap()
    }

    #[test]
    fn test_count_bounds() {
        assert!(validate_count(5).is_ok());
        assert!(validate_count(20).is_ok());
        assert!(validate_count(4).is_err());
        assert!(validate_count(21).is_err());
        assert!(validate_count(0).is_err());
    }

    #[test]
    fn test_options_reject_empty_query() {
        let err = RecommendOptions::from_request(&request("  "), 0.35).unwrap_err();
        assert!(matches!(err, RecommendError::EmptyQuery));
    }

    #[test]
    fn test_options_reject_unknown_mood() {
        let mut req = request("something");
        req.mood = Some("ecstatic".to_string());
        let err = RecommendOptions::from_request(&req, 0.35).unwrap_err();
        assert!(matches!(err, RecommendError::UnknownMood(_)));
    }

    #[test]
    fn test_options_reject_inverted_ranges() {
        let mut req = request("something");
        req.popularity_min = 90;
        req.popularity_max = 10;
        assert!(matches!(
            RecommendOptions::from_request(&req, 0.35).unwrap_err(),
            RecommendError::InvertedRange("popularity")
        ));

        let mut req = request("something");
        req.year_min = Some(2020);
        req.year_max = Some(1990);
        assert!(matches!(
            RecommendOptions::from_request(&req, 0.35).unwrap_err(),
            RecommendError::InvertedRange("year")
        ));
    }

    #[test]
    fn test_half_open_year_range() {
        let mut req = request("something");
        req.year_min = Some(2000);
        let options = RecommendOptions::from_request(&req, 0.35).unwrap();
        assert_eq!(options.filters.year, Some((2000, u16::MAX)));
    }

    #[test]
    fn test_unsatisfiable_filters_signal_no_results() {
        // Popularity [90, 100] over a batch topping out at 60
        let mut req = request("something");
        req.popularity_min = 90;
        let options = RecommendOptions::from_request(&req, 0.35).unwrap();

        let seed = track("seed", 80, 0.6);
        let candidates = vec![track("a", 60, 0.5), track("b", 40, 0.4)];

        let err = recommend(&seed, candidates, &options).unwrap_err();
        assert!(matches!(err, RecommendError::NoResults));
    }

    #[test]
    fn test_pipeline_filters_then_ranks() {
        let mut req = request("something");
        req.count = 5;
        req.popularity_min = 50;
        let options = RecommendOptions::from_request(&req, 0.35).unwrap();

        let seed = track("seed", 80, 0.7);
        let candidates = vec![
            track("keep-close", 70, 0.69),
            track("drop-popularity", 10, 0.7),
            track("keep-far", 90, 0.05),
        ];

        let outcome = recommend(&seed, candidates, &options).unwrap();
        assert_eq!(outcome.candidates_considered, 2);
        assert_eq!(outcome.recommendations.len(), 2);
        assert!(outcome
            .recommendations
            .iter()
            .all(|r| r.track.popularity >= 50));
        for pair in outcome.recommendations.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_rank_by_mood_orders_by_closeness() {
        let on_target = track("on", 40, 0.8);
        let off_target = track("off", 95, 0.1);

        let recs = rank_by_mood(&MOOD_HAPPY, vec![off_target, on_target], 5).unwrap();
        assert_eq!(recs[0].track.id, "on");
        assert!(recs[0].score > recs[1].score);
    }

    #[test]
    fn test_rank_by_mood_empty_pool() {
        assert!(matches!(
            rank_by_mood(&MOOD_HAPPY, vec![], 5).unwrap_err(),
            RecommendError::NoResults
        ));
    }
}
