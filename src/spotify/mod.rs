//! # Spotify Integration Module
//!
//! This module is the only place moodlist talks to Spotify. It owns the
//! application's access token and exposes the catalog calls the playlist
//! assembler and the CLI need.
//!
//! ## Architecture
//!
//! ```text
//! Playlist Assembler / CLI / HTTP handlers
//!          ↓
//! SpotifyClient
//!     ├── Authentication (client-credentials grant, cached token)
//!     ├── Recommendations (audio-feature constrained suggestions)
//!     └── Tracks (search, lookup by id)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! ### Authentication Module
//!
//! [`auth`] - Implements the two-legged client-credentials flow:
//! - **Credential Checks**: Missing or placeholder credentials are rejected
//!   before any request leaves the process
//! - **Basic Auth**: `client_id:client_secret` is sent base64-encoded to the
//!   token endpoint
//! - **Token Caching**: The token is kept in a [`TokenManager`] shared by every
//!   request and refreshed once it is within a minute of expiring
//! - **Single Flight**: Concurrent callers that find the token expired wait on
//!   one handshake instead of starting their own
//!
//! ### Recommendations Module
//!
//! [`recommendations`] - Queries `GET /recommendations` with seed genres and
//! valence/energy bounds produced by the preference mapper.
//!
//! ### Tracks Module
//!
//! [`tracks`] - `GET /search?type=track` and `GET /tracks/{id}`.
//!
//! ## Error Handling Philosophy
//!
//! Nothing here retries. Every failure comes back as a
//! [`PlaylistError`] that names the call that failed:
//! - `Configuration` - credentials absent or placeholders, no request sent
//! - `InvalidCredentials` - token endpoint answered 400 `invalid_client`
//! - `Authentication` - any other token endpoint failure
//! - `RecommendationFetch` - a catalog call failed after a token was obtained
//!
//! Requests carry the timeout from [`SpotifyConfig::timeout`].
//!
//! ## API Coverage
//!
//! - `POST /api/token` - client-credentials grant
//! - `GET /recommendations` - track recommendations
//! - `GET /search` - track search
//! - `GET /tracks/{id}` - single track
//!
//! ## Thread Safety
//!
//! [`SpotifyClient`] is `Send + Sync` and meant to be shared behind an `Arc`.
//! The token mutex is the only lock and the only one held across a network
//! call.

pub mod auth;
pub mod recommendations;
pub mod tracks;

use std::sync::Arc;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    clock::Clock,
    config::SpotifyConfig,
    error::PlaylistError,
    management::TokenManager,
    types::{RecommendationQuery, Track},
};

/// Where the playlist assembler gets candidate tracks from.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationSource: Send + Sync {
    async fn recommendations(
        &self,
        query: &RecommendationQuery,
    ) -> Result<Vec<Track>, PlaylistError>;
}

pub struct SpotifyClient {
    http: Client,
    config: SpotifyConfig,
    tokens: TokenManager,
}

impl SpotifyClient {
    pub fn new(config: SpotifyConfig) -> Self {
        SpotifyClient {
            http: Client::new(),
            config,
            tokens: TokenManager::new(),
        }
    }

    /// Same as [`SpotifyClient::new`] but token expiry is judged by `clock`.
    pub fn with_clock(config: SpotifyConfig, clock: Arc<dyn Clock>) -> Self {
        SpotifyClient {
            http: Client::new(),
            config,
            tokens: TokenManager::with_clock(clock),
        }
    }

    pub fn config(&self) -> &SpotifyConfig {
        &self.config
    }

    /// Bearer-authenticated GET against the catalog API.
    ///
    /// The token is resolved first, so credential problems surface as
    /// authentication errors; everything after that is reported as a failed
    /// `operation`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, PlaylistError> {
        let token = self.get_access_token().await?;
        let url = format!(
            "{base}/{path}",
            base = self.config.api_url.trim_end_matches('/'),
            path = path.trim_start_matches('/')
        );

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(query)
            .timeout(self.config.timeout)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| {
                tracing::error!("Failed to {}: {}", operation, e);
                PlaylistError::fetch(operation, e)
            })?;

        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to decode response to {}: {}", operation, e);
            PlaylistError::fetch(operation, e)
        })
    }
}

#[async_trait::async_trait]
impl RecommendationSource for SpotifyClient {
    async fn recommendations(
        &self,
        query: &RecommendationQuery,
    ) -> Result<Vec<Track>, PlaylistError> {
        self.get_recommendations(query).await
    }
}
