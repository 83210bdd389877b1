//! Client for the external music catalog API.
//!
//! Wraps track search, audio feature lookup, artist top tracks and related
//! artists behind typed calls, and gathers deduplicated candidate pools for
//! the recommendation pipeline. Authentication uses the catalog's
//! client-credentials exchange with a cached bearer token.

mod client;
mod dto;
mod token;

pub use client::CatalogClient;

use thiserror::Error;

/// Errors from the catalog layer.
///
/// Everything except `NotFound` is recoverable from the caller's point of
/// view: the catalog is rate-limited and occasionally rejects auth, so these
/// fold into a single catalog-unavailable condition at the API boundary.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no matching entry in the catalog")]
    NotFound,

    #[error("catalog rejected the credentials")]
    Unauthorized,

    #[error("catalog rate limit exceeded")]
    RateLimited,

    #[error("catalog request failed: {0}")]
    Network(String),

    #[error("unexpected catalog payload: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CatalogError::Network("request timed out".to_string())
        } else if err.is_decode() {
            CatalogError::Parse(err.to_string())
        } else {
            CatalogError::Network(err.to_string())
        }
    }
}
