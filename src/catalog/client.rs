//! HTTP client for the catalog API.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto;
use super::token::TokenProvider;
use super::CatalogError;
use crate::config::CatalogConfig;
use crate::features::FeatureVector;
use crate::types::Track;

const USER_AGENT: &str = concat!("songmatch/", env!("CARGO_PKG_VERSION"));

/// The catalog caps audio-features lookups at this many ids per call
const FEATURES_BATCH: usize = 100;

/// How many results the seed-title search contributes to the pool
const TITLE_SEARCH_LIMIT: usize = 10;

/// Typed client for the external music catalog
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    token: TokenProvider,
}

impl CatalogClient {
    /// Create a client from configuration.
    ///
    /// The per-request timeout is set on the underlying HTTP client; a
    /// timeout surfaces as [`CatalogError::Network`].
    pub fn new(config: &CatalogConfig) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        let token = TokenProvider::new(
            http.clone(),
            config.auth_url.clone(),
            config.client_id.clone(),
            config.client_secret.clone(),
        );

        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Create a client for testing with a custom base URL
    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let config = CatalogConfig {
            client_id: "test-id".to_string(),
            client_secret: "test-secret".to_string(),
            base_url: base_url.into(),
            ..CatalogConfig::default()
        };
        Self::new(&config)
    }

    /// Find the best-matching seed track for a free-text query.
    ///
    /// Fails with [`CatalogError::NotFound`] when the catalog yields no match
    /// and with [`CatalogError::Parse`] when the match has no feature profile.
    pub async fn search_seed(&self, query: &str) -> Result<Track, CatalogError> {
        let dto = self
            .search_tracks(query, 1)
            .await?
            .into_iter()
            .next()
            .ok_or(CatalogError::NotFound)?;

        let features = self
            .audio_features(std::slice::from_ref(&dto.id))
            .await?
            .remove(&dto.id)
            .ok_or_else(|| CatalogError::Parse("seed track has no audio features".to_string()))?;

        Ok(build_track(dto, features))
    }

    /// Fetch a single track by catalog id, with its feature profile
    pub async fn track_by_id(&self, id: &str) -> Result<Track, CatalogError> {
        let dto: dto::TrackDto = self.get_json(&format!("/tracks/{id}")).await?;

        let features = self
            .audio_features(std::slice::from_ref(&dto.id))
            .await?
            .remove(&dto.id)
            .ok_or_else(|| CatalogError::Parse("track has no audio features".to_string()))?;

        Ok(build_track(dto, features))
    }

    /// Gather a deduplicated candidate pool of at most `pool_size` tracks.
    ///
    /// Sources, in order: the seed artist's top tracks, top tracks of up to
    /// `related_artists` related artists, and a text search on the seed
    /// title. The seed itself is excluded. Tracks whose feature lookup comes
    /// back empty are dropped. A source that merely finds nothing is skipped;
    /// transport and auth failures propagate.
    pub async fn gather_candidates(
        &self,
        seed: &Track,
        pool_size: usize,
        related_artists: usize,
    ) -> Result<Vec<Track>, CatalogError> {
        let mut pool: Vec<dto::TrackDto> = Vec::new();

        if let Some(artist_id) = seed.artist_id.as_deref() {
            match self.top_tracks(artist_id).await {
                Ok(tracks) => pool.extend(tracks),
                Err(CatalogError::NotFound) => {}
                Err(e) => return Err(e),
            }

            let related = match self.related_artists(artist_id).await {
                Ok(artists) => artists,
                Err(CatalogError::NotFound) => Vec::new(),
                Err(e) => return Err(e),
            };
            for artist in related
                .iter()
                .filter_map(|a| a.id.as_deref())
                .take(related_artists)
            {
                match self.top_tracks(artist).await {
                    Ok(tracks) => pool.extend(tracks),
                    Err(CatalogError::NotFound) => {}
                    Err(e) => return Err(e),
                }
            }
        }

        match self.search_tracks(&seed.title, TITLE_SEARCH_LIMIT).await {
            Ok(tracks) => pool.extend(tracks),
            Err(CatalogError::NotFound) => {}
            Err(e) => return Err(e),
        }

        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(seed.id.clone());
        let mut unique: Vec<dto::TrackDto> = Vec::new();
        for track in pool {
            if seen.insert(track.id.clone()) {
                unique.push(track);
            }
        }
        unique.truncate(pool_size);

        let ids: Vec<String> = unique.iter().map(|t| t.id.clone()).collect();
        let mut features = self.audio_features(&ids).await?;

        debug!(
            candidates = unique.len(),
            with_features = features.len(),
            "gathered candidate pool"
        );

        Ok(unique
            .into_iter()
            .filter_map(|t| features.remove(&t.id).map(|f| build_track(t, f)))
            .collect())
    }

    /// Text search for tracks, with feature profiles resolved.
    ///
    /// Tracks without a feature profile are dropped. Used by the surprise
    /// path, which has a search query but no seed track.
    pub async fn search_pool(&self, query: &str, limit: usize) -> Result<Vec<Track>, CatalogError> {
        let dtos = self.search_tracks(query, limit).await?;
        let ids: Vec<String> = dtos.iter().map(|t| t.id.clone()).collect();
        let mut features = self.audio_features(&ids).await?;

        Ok(dtos
            .into_iter()
            .filter_map(|t| features.remove(&t.id).map(|f| build_track(t, f)))
            .collect())
    }

    /// Text search for tracks
    async fn search_tracks(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<dto::TrackDto>, CatalogError> {
        let page: dto::SearchPage = self
            .get_json(&format!(
                "/search?q={}&type=track&limit={limit}",
                urlencoding::encode(query.trim())
            ))
            .await?;

        Ok(page.tracks.map(|t| t.items).unwrap_or_default())
    }

    /// An artist's top tracks
    async fn top_tracks(&self, artist_id: &str) -> Result<Vec<dto::TrackDto>, CatalogError> {
        let page: dto::TopTracksPage = self
            .get_json(&format!("/artists/{artist_id}/top-tracks?market=US"))
            .await?;
        Ok(page.tracks)
    }

    /// Artists related to the given artist
    async fn related_artists(
        &self,
        artist_id: &str,
    ) -> Result<Vec<dto::ArtistDto>, CatalogError> {
        let page: dto::RelatedArtistsPage = self
            .get_json(&format!("/artists/{artist_id}/related-artists"))
            .await?;
        Ok(page.artists)
    }

    /// Batch audio-features lookup, keyed by track id.
    ///
    /// Ids unknown to the catalog come back as `null` slots and are omitted
    /// from the map. Values are clamped into their documented ranges here,
    /// at the boundary.
    pub async fn audio_features(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, FeatureVector>, CatalogError> {
        let mut out = HashMap::with_capacity(ids.len());

        for chunk in ids.chunks(FEATURES_BATCH) {
            let page: dto::AudioFeaturesPage = self
                .get_json(&format!("/audio-features?ids={}", chunk.join(",")))
                .await?;

            for features in page.audio_features.into_iter().flatten() {
                out.insert(
                    features.id.clone(),
                    FeatureVector {
                        danceability: features.danceability,
                        energy: features.energy,
                        valence: features.valence,
                        tempo: features.tempo,
                        acousticness: features.acousticness,
                        liveness: features.liveness,
                        instrumentalness: features.instrumentalness,
                        loudness: features.loudness,
                        speechiness: features.speechiness,
                    }
                    .clamped(),
                );
            }
        }

        Ok(out)
    }

    /// Send an authenticated GET and decode the JSON response
    async fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T, CatalogError> {
        let bearer = self.token.bearer().await?;

        let response = self
            .http
            .get(format!("{}{path_and_query}", self.base_url))
            .bearer_auth(bearer)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound);
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(CatalogError::RateLimited);
        }
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(CatalogError::Unauthorized);
        }
        if !status.is_success() {
            return Err(CatalogError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }
}

/// Map a wire track plus its features into the fixed-shape domain record
fn build_track(dto: dto::TrackDto, features: FeatureVector) -> Track {
    let artist_id = dto.artists.first().and_then(|a| a.id.clone());
    let artists = dto.artists.into_iter().map(|a| a.name).collect();

    let (album, artwork_url, release_year) = match dto.album {
        Some(album) => (
            album.name,
            album.images.into_iter().next().map(|i| i.url),
            album.release_date.as_deref().and_then(parse_release_year),
        ),
        None => (None, None, None),
    };

    Track {
        id: dto.id,
        title: dto.name,
        artists,
        artist_id,
        album,
        artwork_url,
        preview_url: dto.preview_url,
        popularity: dto.popularity.min(100),
        release_year,
        features,
    }
}

/// Year prefix of a catalog release date ("1997-05-21", "1997-05", "1997")
fn parse_release_year(release_date: &str) -> Option<u16> {
    let year = release_date.split('-').next()?.parse().ok()?;
    (1000..=2200).contains(&year).then_some(year)
}
