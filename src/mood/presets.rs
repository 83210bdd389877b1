//! Mood preset definitions for the "surprise me" path and mood filtering.
//!
//! Each preset pairs a target feature vector with a search query heuristically
//! associated with the mood. The target values are tunable constants, not
//! derived quantities; they only need to point the ranking in the right
//! direction.

use crate::features::Feature;

/// A mood preset: target feature values plus a seed search query
#[derive(Debug, Clone)]
pub struct MoodPreset {
    /// Preset identifier (lowercase)
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Target values for the dimensions this mood constrains
    pub targets: &'static [(Feature, f32)],
    /// Catalog search query used to gather candidates without a seed track
    pub seed_query: &'static str,
}

pub const MOOD_HAPPY: MoodPreset = MoodPreset {
    id: "happy",
    name: "Happy",
    targets: &[
        (Feature::Valence, 0.8),
        (Feature::Energy, 0.7),
        (Feature::Danceability, 0.7),
    ],
    seed_query: "happy upbeat hits",
};

pub const MOOD_CHILL: MoodPreset = MoodPreset {
    id: "chill",
    name: "Chill",
    targets: &[
        (Feature::Valence, 0.5),
        (Feature::Energy, 0.3),
        (Feature::Acousticness, 0.6),
    ],
    seed_query: "chill acoustic relaxing",
};

pub const MOOD_WORKOUT: MoodPreset = MoodPreset {
    id: "workout",
    name: "Workout",
    targets: &[
        (Feature::Energy, 0.85),
        (Feature::Tempo, 140.0),
        (Feature::Danceability, 0.7),
    ],
    seed_query: "workout power mix",
};

pub const MOOD_SAD: MoodPreset = MoodPreset {
    id: "sad",
    name: "Sad",
    targets: &[
        (Feature::Valence, 0.2),
        (Feature::Energy, 0.3),
        (Feature::Acousticness, 0.5),
    ],
    seed_query: "sad slow songs",
};

pub const MOOD_PARTY: MoodPreset = MoodPreset {
    id: "party",
    name: "Party",
    targets: &[
        (Feature::Danceability, 0.85),
        (Feature::Energy, 0.8),
        (Feature::Valence, 0.7),
    ],
    seed_query: "party dance anthems",
};

/// All mood presets
pub const ALL_MOODS: &[MoodPreset] = &[MOOD_HAPPY, MOOD_CHILL, MOOD_WORKOUT, MOOD_SAD, MOOD_PARTY];

/// Look up a preset by id (case-insensitive)
pub fn get_preset(id: &str) -> Option<&'static MoodPreset> {
    ALL_MOODS.iter().find(|m| m.id.eq_ignore_ascii_case(id.trim()))
}
