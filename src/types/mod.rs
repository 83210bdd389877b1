//! Shared types for the recommendation API.
//!
//! These types are used across the application for request/response handling
//! and internal data representation.

pub mod api;

use serde::{Deserialize, Serialize};

pub use api::*;

use crate::features::FeatureVector;

/// A track fetched from the external catalog, with its audio feature profile.
///
/// Immutable once built; the session cache owns clones keyed by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Catalog track id
    pub id: String,
    /// Track title
    pub title: String,
    /// Artist names, in catalog order
    pub artists: Vec<String>,
    /// Catalog id of the primary artist, used for candidate gathering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<String>,
    /// Album name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    /// Album art URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artwork_url: Option<String>,
    /// Preview audio URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    /// Popularity score, 0-100
    pub popularity: u8,
    /// Release year, when the catalog provides a parseable release date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_year: Option<u16>,
    /// Audio feature profile
    pub features: FeatureVector,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(default)]
    pub catalog_configured: bool,
    #[serde(default)]
    pub uptime_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Configuration response (subset of config safe to expose)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigResponse {
    pub catalog: CatalogInfo,
    pub recommend: RecommendInfo,
    pub cache: CacheInfo,
    pub server: ServerInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogInfo {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Whether credentials are present; the values themselves are never exposed
    pub credentials_configured: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendInfo {
    pub pool_size: usize,
    pub related_artists: usize,
    pub mood_threshold: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheInfo {
    pub capacity: usize,
    pub entries: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub host: String,
    pub port: u16,
}
