//! # API Module
//!
//! HTTP endpoints of the moodlist service.
//!
//! ## Endpoints
//!
//! - [`welcome`] - `GET /`, a plain greeting
//! - [`health`] - `GET /health`, public liveness and configuration check
//! - [`generate_playlist`] - `POST /api/playlists/generate`, guarded by
//!   [`require_api_key`]
//!
//! Handlers are thin: they validate input, call into
//! [`crate::playlist::PlaylistAssembler`] and translate
//! [`crate::error::PlaylistError`] into a status code through [`ApiError`].
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use moodlist::{api::ApiState, server::router};
//!
//! let app = router(ApiState::new(client, assembler, api_key));
//! ```

mod error;
mod guard;
mod health;
mod playlists;

use std::{sync::Arc, time::Instant};

pub use error::ApiError;
pub use guard::require_api_key;
pub use health::{HealthChecks, HealthStatus, SpotifyCheck, health};
pub use playlists::generate_playlist;

use crate::{config, playlist::PlaylistAssembler, spotify::SpotifyClient};

#[derive(Clone)]
pub struct ApiState {
    pub client: Arc<SpotifyClient>,
    pub assembler: Arc<PlaylistAssembler>,
    pub api_key: Option<String>,
    pub environment: String,
    pub started_at: Instant,
}

impl ApiState {
    pub fn new(
        client: Arc<SpotifyClient>,
        assembler: Arc<PlaylistAssembler>,
        api_key: Option<String>,
    ) -> Self {
        ApiState {
            client,
            assembler,
            api_key,
            environment: config::environment(),
            started_at: Instant::now(),
        }
    }

    /// State wired to a client built from the environment.
    pub fn from_env() -> Self {
        let client = Arc::new(SpotifyClient::new(config::SpotifyConfig::from_env()));
        let assembler = Arc::new(PlaylistAssembler::new(client.clone()));
        Self::new(client, assembler, config::api_key())
    }
}

pub async fn welcome() -> &'static str {
    "Welcome to the moodlist playlist API!"
}
