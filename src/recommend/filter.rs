//! Candidate filtering by popularity, release year and mood.

use crate::mood::{mood_distance, MoodPreset};
use crate::types::Track;

/// Mood constraint: keep tracks within `threshold` RMS distance of the preset target
#[derive(Debug, Clone, Copy)]
pub struct MoodFilter {
    pub preset: &'static MoodPreset,
    pub threshold: f32,
}

/// User-specified constraints on the candidate set.
///
/// Ranges are inclusive. A track with an unknown release year fails any year
/// constraint rather than slipping through.
#[derive(Debug, Clone, Copy, Default)]
pub struct Filters {
    pub popularity: Option<(u8, u8)>,
    pub year: Option<(u16, u16)>,
    pub mood: Option<MoodFilter>,
}

impl Filters {
    /// Whether a single track satisfies every constraint
    pub fn passes(&self, track: &Track) -> bool {
        if let Some((min, max)) = self.popularity {
            if track.popularity < min || track.popularity > max {
                return false;
            }
        }

        if let Some((min, max)) = self.year {
            match track.release_year {
                Some(year) if year >= min && year <= max => {}
                _ => return false,
            }
        }

        if let Some(mood) = self.mood {
            if mood_distance(mood.preset, &track.features) > mood.threshold {
                return false;
            }
        }

        true
    }

    /// Drop every candidate that fails a constraint, preserving order
    pub fn apply(&self, candidates: Vec<Track>) -> Vec<Track> {
        candidates.into_iter().filter(|t| self.passes(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureVector;
    use crate::mood::presets::MOOD_HAPPY;

    fn track(id: &str, popularity: u8, year: Option<u16>, valence: f32) -> Track {
        Track {
            id: id.to_string(),
            title: id.to_string(),
            artists: vec![],
            artist_id: None,
            album: None,
            artwork_url: None,
            preview_url: None,
            popularity,
            release_year: year,
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

    #[test]
    fn test_popularity_bounds_are_inclusive() {
        let filters = Filters {
            popularity: Some((40, 80)),
            ..Filters::default()
        };

        assert!(filters.passes(&track("a", 40, None, 0.5)));
        assert!(filters.passes(&track("b", 80, None, 0.5)));
        assert!(!filters.passes(&track("c", 39, None, 0.5)));
        assert!(!filters.passes(&track("d", 81, None, 0.5)));
    }

    #[test]
    fn test_year_bounds_are_inclusive() {
        let filters = Filters {
            year: Some((1990, 1999)),
            ..Filters::default()
        };

        assert!(filters.passes(&track("a", 50, Some(1990), 0.5)));
        assert!(filters.passes(&track("b", 50, Some(1999), 0.5)));
        assert!(!filters.passes(&track("c", 50, Some(1989), 0.5)));
        assert!(!filters.passes(&track("d", 50, Some(2000), 0.5)));
    }

    #[test]
    fn test_unknown_year_fails_year_filter() {
        let filters = Filters {
            year: Some((1990, 1999)),
            ..Filters::default()
        };
        assert!(!filters.passes(&track("a", 50, None, 0.5)));
    }

    #[test]
    fn test_no_filters_pass_everything() {
        let filters = Filters::default();
        assert!(filters.passes(&track("a", 0, None, 0.0)));
        assert!(filters.passes(&track("b", 100, Some(2024), 1.0)));
    }

    #[test]
    fn test_mood_filter_drops_distant_tracks() {
        let filters = Filters {
            mood: Some(MoodFilter {
                preset: &MOOD_HAPPY,
                threshold: 0.2,
            }),
            ..Filters::default()
        };

        // On target: valence 0.8 against happy's 0.8 target
        assert!(filters.passes(&track("close", 50, None, 0.8)));
        // Gloomy track is well past the threshold
        assert!(!filters.passes(&track("far", 50, None, 0.05)));
    }

    #[test]
    fn test_apply_never_returns_out_of_bounds_tracks() {
        let filters = Filters {
            popularity: Some((60, 100)),
            year: Some((2000, 2020)),
            ..Filters::default()
        };

        let survivors = filters.apply(vec![
            track("a", 70, Some(2010), 0.5),
            track("b", 50, Some(2010), 0.5),
            track("c", 70, Some(1995), 0.5),
            track("d", 99, Some(2020), 0.5),
        ]);

        assert_eq!(survivors.len(), 2);
        for t in &survivors {
            let (pmin, pmax) = filters.popularity.unwrap();
            let (ymin, ymax) = filters.year.unwrap();
            assert!(t.popularity >= pmin && t.popularity <= pmax);
            let y = t.release_year.unwrap();
            assert!(y >= ymin && y <= ymax);
        }
    }
}
