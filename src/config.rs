use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::net::SocketAddr;

/// Application configuration loaded from environment variables.
///
/// All settings can be configured via environment variables with the
/// `SONGMATCH_` prefix. For example: `SONGMATCH_SERVER__PORT=8097`,
/// `SONGMATCH_CATALOG__CLIENT_ID=...`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// External music catalog configuration
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Recommendation pipeline tunables
    #[serde(default)]
    pub recommend: RecommendConfig,

    /// Session track cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// OAuth client id for the client-credentials exchange
    #[serde(default)]
    pub client_id: String,

    /// OAuth client secret. Never echoed by any endpoint.
    #[serde(default)]
    pub client_secret: String,

    /// Catalog API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Token endpoint URL
    #[serde(default = "default_auth_url")]
    pub auth_url: String,

    /// Per-request timeout in seconds; a timeout surfaces as catalog-unavailable
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            base_url: default_base_url(),
            auth_url: default_auth_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.spotify.com/v1".to_string()
}

fn default_auth_url() -> String {
    "https://accounts.spotify.com/api/token".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendConfig {
    /// Maximum number of candidates gathered per seed (K)
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,

    /// How many related artists contribute top tracks to the pool
    #[serde(default = "default_related_artists")]
    pub related_artists: usize,

    /// Mood filter threshold: maximum RMS distance from the mood target
    #[serde(default = "default_mood_threshold")]
    pub mood_threshold: f32,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            pool_size: default_pool_size(),
            related_artists: default_related_artists(),
            mood_threshold: default_mood_threshold(),
        }
    }
}

fn default_pool_size() -> usize {
    50
}

fn default_related_artists() -> usize {
    3
}

fn default_mood_threshold() -> f32 {
    0.35
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of tracks kept in the per-session LRU cache
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
        }
    }
}

fn default_cache_capacity() -> usize {
    256
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8097
}

impl ServerConfig {
    /// Returns the socket address for binding the server
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }
}

impl CatalogConfig {
    /// Whether both credential values are present.
    ///
    /// Absent credentials are not a startup failure; the first catalog call
    /// surfaces them as catalog-unavailable instead.
    pub fn has_credentials(&self) -> bool {
        !self.client_id.trim().is_empty() && !self.client_secret.trim().is_empty()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables should be prefixed with `SONGMATCH_` and use
    /// double underscores for nested values:
    /// - `SONGMATCH_CATALOG__CLIENT_ID` -> catalog.client_id
    /// - `SONGMATCH_RECOMMEND__POOL_SIZE` -> recommend.pool_size
    /// - `SONGMATCH_SERVER__PORT` -> server.port
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("SONGMATCH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
