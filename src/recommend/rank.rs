//! Similarity ranking of candidates against a seed track.

use std::cmp::Ordering;

use crate::math;
use crate::types::Track;

use super::Recommendation;

/// Rank candidates by cosine similarity to the seed and keep the best `count`.
///
/// The seed and candidates are standardized together so no single dimension
/// dominates the metric. Ties break on higher popularity, then on original
/// candidate order. The output is non-increasing in score and never longer
/// than `count`.
pub fn rank(seed: &Track, candidates: Vec<Track>, count: usize) -> Vec<Recommendation> {
    if candidates.is_empty() || count == 0 {
        return Vec::new();
    }

    let rows: Vec<Vec<f32>> = std::iter::once(seed)
        .chain(candidates.iter())
        .map(|t| t.features.as_array().to_vec())
        .collect();
    let standardized = math::standardize(&rows);
    let seed_row = &standardized[0];

    let mut scored: Vec<(usize, f32)> = candidates
        .iter()
        .enumerate()
        .map(|(i, _)| (i, math::cosine_similarity(seed_row, &standardized[i + 1])))
        .collect();

    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| candidates[b.0].popularity.cmp(&candidates[a.0].popularity))
            .then_with(|| a.0.cmp(&b.0))
    });

    let mut ordered: Vec<Option<Track>> = candidates.into_iter().map(Some).collect();
    scored
        .into_iter()
        .take(count)
        .map(|(i, score)| Recommendation {
            track: ordered[i].take().expect("candidate consumed twice"),
            score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureVector;

    fn track(id: &str, popularity: u8, features: FeatureVector) -> Track {
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
            features,
        }
    }

    fn features(danceability: f32, energy: f32, valence: f32, tempo: f32) -> FeatureVector {
        FeatureVector {
            danceability,
            energy,
            valence,
            tempo,
            acousticness: 0.2,
            liveness: 0.1,
            instrumentalness: 0.0,
            loudness: -7.0,
            speechiness: 0.05,
        }
    }

    #[test]
    fn test_near_identical_candidate_ranks_first() {
        let seed = track("seed", 80, features(0.8, 0.9, 0.7, 125.0));
        let near = track("near", 50, features(0.79, 0.88, 0.71, 124.0));
        let far = track("far", 50, features(0.1, 0.2, 0.1, 60.0));

        let ranked = rank(&seed, vec![far, near], 2);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].track.id, "near");
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn test_output_is_non_increasing() {
        let seed = track("seed", 80, features(0.8, 0.9, 0.7, 125.0));
        let candidates: Vec<Track> = (0..12)
            .map(|i| {
                let x = i as f32 / 12.0;
                track(&format!("c{i}"), 50, features(x, 1.0 - x, x * 0.5, 60.0 + x * 120.0))
            })
            .collect();

        let ranked = rank(&seed, candidates, 12);

        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_truncation_respects_count() {
        let seed = track("seed", 80, features(0.8, 0.9, 0.7, 125.0));
        let candidates: Vec<Track> = (0..10)
            .map(|i| track(&format!("c{i}"), 50, features(0.5, 0.5, 0.5, 100.0 + i as f32)))
            .collect();

        assert_eq!(rank(&seed, candidates.clone(), 4).len(), 4);
        // Fewer candidates than count: return all of them
        assert_eq!(rank(&seed, candidates[..3].to_vec(), 4).len(), 3);
    }

    #[test]
    fn test_ties_break_on_popularity_then_order() {
        let seed = track("seed", 80, features(0.8, 0.9, 0.7, 125.0));
        let same = features(0.6, 0.7, 0.5, 110.0);
        // Identical feature vectors give identical scores
        let a = track("a", 30, same);
        let b = track("b", 90, same);
        let c = track("c", 30, same);

        let ranked = rank(&seed, vec![a, b, c], 3);

        assert_eq!(ranked[0].track.id, "b");
        // Equal popularity falls back to candidate-set order
        assert_eq!(ranked[1].track.id, "a");
        assert_eq!(ranked[2].track.id, "c");
    }

    #[test]
    fn test_empty_candidates() {
        let seed = track("seed", 80, features(0.8, 0.9, 0.7, 125.0));
        assert!(rank(&seed, vec![], 10).is_empty());
    }
}
