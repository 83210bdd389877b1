//! Client-credentials token exchange with cached expiry.

use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::debug;

use super::dto::TokenDto;
use super::CatalogError;

/// Refresh this long before the advertised expiry to avoid racing it
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

#[derive(Clone)]
struct CachedToken {
    bearer: String,
    expires_at: Instant,
}

/// Holds catalog credentials and a cached bearer token.
///
/// The token is fetched lazily on first use; missing or rejected credentials
/// surface as [`CatalogError::Unauthorized`] at that point, never at startup.
pub struct TokenProvider {
    http: reqwest::Client,
    auth_url: String,
    client_id: String,
    client_secret: String,
    cached: RwLock<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(
        http: reqwest::Client,
        auth_url: String,
        client_id: String,
        client_secret: String,
    ) -> Self {
        Self {
            http,
            auth_url,
            client_id,
            client_secret,
            cached: RwLock::new(None),
        }
    }

    /// Current bearer token, refreshing it when absent or near expiry
    pub async fn bearer(&self) -> Result<String, CatalogError> {
        if let Some(token) = self.cached.read().await.as_ref() {
            if Instant::now() < token.expires_at {
                return Ok(token.bearer.clone());
            }
        }

        let fresh = self.request_token().await?;
        let bearer = fresh.bearer.clone();
        *self.cached.write().await = Some(fresh);
        Ok(bearer)
    }

    async fn request_token(&self) -> Result<CachedToken, CatalogError> {
        if self.client_id.trim().is_empty() || self.client_secret.trim().is_empty() {
            return Err(CatalogError::Unauthorized);
        }

        debug!("requesting fresh catalog token");

        let response = self
            .http
            .post(&self.auth_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(CatalogError::Unauthorized);
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(CatalogError::RateLimited);
        }
        if !status.is_success() {
            return Err(CatalogError::Network(format!("token endpoint HTTP {status}")));
        }

        let token: TokenDto = response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        let lifetime = Duration::from_secs(token.expires_in);
        let expires_at = Instant::now() + lifetime.saturating_sub(REFRESH_MARGIN);

        Ok(CachedToken {
            bearer: token.access_token,
            expires_at,
        })
    }
}
