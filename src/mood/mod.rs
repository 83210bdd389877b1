//! Mood presets and mood-distance scoring.
//!
//! A mood constrains only the dimensions its preset names. Distance is the
//! root-mean-square difference over those dimensions after rescaling each
//! into [0, 1], so thresholds stay comparable across presets with different
//! dimension counts.

pub mod presets;

pub use presets::{get_preset, MoodPreset, ALL_MOODS};

use crate::features::{Feature, FeatureVector, LOUDNESS_FLOOR, TEMPO_CEILING};

/// RMS distance between a track's features and a mood target, in [0, 1]
pub fn mood_distance(preset: &MoodPreset, features: &FeatureVector) -> f32 {
    if preset.targets.is_empty() {
        return 0.0;
    }

    let sum_sq: f32 = preset
        .targets
        .iter()
        .map(|&(feature, target)| {
            let d = features.scaled(feature) - scale_target(feature, target);
            d * d
        })
        .sum();

    (sum_sq / preset.targets.len() as f32).sqrt()
}

/// Closeness score in [0, 1]; 1 means the track sits on the mood target
pub fn mood_closeness(preset: &MoodPreset, features: &FeatureVector) -> f32 {
    (1.0 - mood_distance(preset, features)).max(0.0)
}

/// Rescale a preset target value into [0, 1] on the same scale as
/// [`FeatureVector::scaled`]
fn scale_target(feature: Feature, target: f32) -> f32 {
    match feature {
        Feature::Tempo => (target / TEMPO_CEILING).clamp(0.0, 1.0),
        Feature::Loudness => ((target - LOUDNESS_FLOOR) / -LOUDNESS_FLOOR).clamp(0.0, 1.0),
        _ => target.clamp(0.0, 1.0),
    }
}
