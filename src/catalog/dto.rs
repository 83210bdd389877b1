//! Raw wire shapes returned by the catalog API.
//!
//! Deliberately lenient: optional fields default instead of failing the whole
//! payload. The adapter in `client` converts these into the fixed-shape
//! [`Track`](crate::types::Track) record and drops entries that cannot be
//! completed.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    pub tracks: Option<TrackPage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackPage {
    #[serde(default)]
    pub items: Vec<TrackDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistDto>,
    pub album: Option<AlbumDto>,
    #[serde(default)]
    pub popularity: u8,
    pub preview_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistDto {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumDto {
    pub name: Option<String>,
    #[serde(default)]
    pub images: Vec<ImageDto>,
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageDto {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopTracksPage {
    #[serde(default)]
    pub tracks: Vec<TrackDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelatedArtistsPage {
    #[serde(default)]
    pub artists: Vec<ArtistDto>,
}

/// Batch audio-features payload; the catalog returns `null` slots for
/// unknown track ids
#[derive(Debug, Clone, Deserialize)]
pub struct AudioFeaturesPage {
    #[serde(default)]
    pub audio_features: Vec<Option<AudioFeaturesDto>>,
}

/// Audio features as sent by the catalog. Missing numbers coerce to 0 and
/// are clamped into range by the adapter.
#[derive(Debug, Clone, Deserialize)]
pub struct AudioFeaturesDto {
    pub id: String,
    #[serde(default)]
    pub danceability: f32,
    #[serde(default)]
    pub energy: f32,
    #[serde(default)]
    pub valence: f32,
    #[serde(default)]
    pub tempo: f32,
    #[serde(default)]
    pub acousticness: f32,
    #[serde(default)]
    pub liveness: f32,
    #[serde(default)]
    pub instrumentalness: f32,
    #[serde(default)]
    pub loudness: f32,
    #[serde(default)]
    pub speechiness: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenDto {
    pub access_token: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}
