//! Songmatch
//!
//! A content-based music recommendation service. Given a free-text seed
//! query it resolves a track through an external music catalog, gathers a
//! candidate pool, and ranks candidates by cosine similarity over
//! standardized audio features. Mood presets provide a seedless
//! "surprise me" path.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod features;
pub mod math;
pub mod mood;
pub mod recommend;
pub mod server;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use features::{Feature, FeatureVector};
pub use types::Track;
