//! The fixed-shape audio feature vector and its dimensions.
//!
//! The external catalog describes every track with the same nine numeric
//! features. They are mapped into a named record at the API boundary so the
//! rest of the pipeline never sees a dynamic payload.

use serde::{Deserialize, Serialize};

/// Number of audio feature dimensions
pub const FEATURE_COUNT: usize = 9;

/// Tempo ceiling in BPM used when scaling tempo into [0, 1]
pub const TEMPO_CEILING: f32 = 220.0;

/// Loudness floor in dB used when scaling loudness into [0, 1]
pub const LOUDNESS_FLOOR: f32 = -60.0;

/// A single audio feature dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Danceability,
    Energy,
    Valence,
    Tempo,
    Acousticness,
    Liveness,
    Instrumentalness,
    Loudness,
    Speechiness,
}

impl Feature {
    /// All dimensions, in the canonical vector order
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Danceability,
        Feature::Energy,
        Feature::Valence,
        Feature::Tempo,
        Feature::Acousticness,
        Feature::Liveness,
        Feature::Instrumentalness,
        Feature::Loudness,
        Feature::Speechiness,
    ];

    /// Unit-range dimensions shown on the radar profile
    pub const PROFILE: [Feature; 5] = [
        Feature::Danceability,
        Feature::Energy,
        Feature::Valence,
        Feature::Acousticness,
        Feature::Liveness,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Feature::Danceability => "danceability",
            Feature::Energy => "energy",
            Feature::Valence => "valence",
            Feature::Tempo => "tempo",
            Feature::Acousticness => "acousticness",
            Feature::Liveness => "liveness",
            Feature::Instrumentalness => "instrumentalness",
            Feature::Loudness => "loudness",
            Feature::Speechiness => "speechiness",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A track's 9-dimensional audio feature profile.
///
/// Unit-range features lie in [0, 1]; tempo is BPM and loudness is dB.
/// Values coming from the wire are clamped into range by [`FeatureVector::clamped`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub danceability: f32,
    pub energy: f32,
    pub valence: f32,
    pub tempo: f32,
    pub acousticness: f32,
    pub liveness: f32,
    pub instrumentalness: f32,
    pub loudness: f32,
    pub speechiness: f32,
}

impl FeatureVector {
    /// Value of a single dimension
    pub fn get(&self, feature: Feature) -> f32 {
        match feature {
            Feature::Danceability => self.danceability,
            Feature::Energy => self.energy,
            Feature::Valence => self.valence,
            Feature::Tempo => self.tempo,
            Feature::Acousticness => self.acousticness,
            Feature::Liveness => self.liveness,
            Feature::Instrumentalness => self.instrumentalness,
            Feature::Loudness => self.loudness,
            Feature::Speechiness => self.speechiness,
        }
    }

    /// The vector in canonical dimension order
    pub fn as_array(&self) -> [f32; FEATURE_COUNT] {
        let mut out = [0.0; FEATURE_COUNT];
        for (slot, feature) in out.iter_mut().zip(Feature::ALL) {
            *slot = self.get(feature);
        }
        out
    }

    /// Value of a dimension rescaled into [0, 1].
    ///
    /// Tempo is scaled against [`TEMPO_CEILING`], loudness against
    /// [`LOUDNESS_FLOOR`]; unit-range dimensions pass through.
    pub fn scaled(&self, feature: Feature) -> f32 {
        match feature {
            Feature::Tempo => (self.tempo / TEMPO_CEILING).clamp(0.0, 1.0),
            Feature::Loudness => ((self.loudness - LOUDNESS_FLOOR) / -LOUDNESS_FLOOR).clamp(0.0, 1.0),
            other => self.get(other).clamp(0.0, 1.0),
        }
    }

    /// Clamp every dimension into its documented range.
    ///
    /// Applied once at the catalog boundary so out-of-range wire values
    /// never propagate into the pipeline.
    pub fn clamped(self) -> Self {
        Self {
            danceability: self.danceability.clamp(0.0, 1.0),
            energy: self.energy.clamp(0.0, 1.0),
            valence: self.valence.clamp(0.0, 1.0),
            tempo: self.tempo.clamp(0.0, TEMPO_CEILING + 30.0),
            acousticness: self.acousticness.clamp(0.0, 1.0),
            liveness: self.liveness.clamp(0.0, 1.0),
            instrumentalness: self.instrumentalness.clamp(0.0, 1.0),
            loudness: self.loudness.clamp(LOUDNESS_FLOOR, 0.0),
            speechiness: self.speechiness.clamp(0.0, 1.0),
        }
    }
}
