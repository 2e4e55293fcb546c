//! Configuration management for moodlist.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage Spotify API
//! credentials, endpoint overrides, the service API key and server settings.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the working directory
//! 4. Application defaults (where applicable)
//!
//! None of the accessors panic. Missing Spotify credentials resolve to empty
//! strings so the client can report them as a configuration problem at the
//! moment they are needed, which lets the HTTP service start without them.

use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3000";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Loads environment variables from a `.env` file.
///
/// Looks for `moodlist/.env` in the platform-specific local data directory
/// first and creates the directory if needed:
/// - Linux: `~/.local/share/moodlist/.env`
/// - macOS: `~/Library/Application Support/moodlist/.env`
/// - Windows: `%LOCALAPPDATA%/moodlist/.env`
///
/// When that file does not exist a `.env` in the working directory is tried.
/// A missing file is not an error; variables already present in the process
/// environment are never overwritten.
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or an
/// existing `.env` file cannot be parsed.
///
/// # Example
///
/// ```
/// use moodlist::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    } else {
        dotenv::dotenv().ok();
    }
    Ok(())
}

/// Location of the `.env` file inside the local data directory.
pub fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("moodlist/.env");
    path
}

/// Returns the address the HTTP service binds to.
///
/// Read from `SERVER_ADDRESS`, defaulting to `127.0.0.1:3000`.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Returns the Spotify client ID, or an empty string when unset.
///
/// Read from `SPOTIFY_CLIENT_ID`. The value is obtained when registering the
/// application on Spotify's developer platform.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_CLIENT_ID").unwrap_or_default()
}

/// Returns the Spotify client secret, or an empty string when unset.
///
/// Read from `SPOTIFY_CLIENT_SECRET`.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
pub fn spotify_client_secret() -> String {
    env::var("SPOTIFY_CLIENT_SECRET").unwrap_or_default()
}

/// Returns the Spotify Web API base URL.
///
/// Read from `SPOTIFY_API_URL`, defaulting to `https://api.spotify.com/v1`.
pub fn spotify_api_url() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_SPOTIFY_API_URL.to_string())
}

/// Returns the Spotify token endpoint used for the client-credentials grant.
///
/// Read from `SPOTIFY_TOKEN_URL`, defaulting to
/// `https://accounts.spotify.com/api/token`.
pub fn spotify_token_url() -> String {
    env::var("SPOTIFY_TOKEN_URL").unwrap_or_else(|_| DEFAULT_SPOTIFY_TOKEN_URL.to_string())
}

/// Returns the timeout applied to every outbound Spotify request.
///
/// Read from `SPOTIFY_HTTP_TIMEOUT_SECS`; unparsable values fall back to
/// 10 seconds.
pub fn spotify_http_timeout() -> Duration {
    let secs = env::var("SPOTIFY_HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

/// Returns the API key clients must present to the playlist endpoint.
///
/// Read from `API_KEY`. Blank values count as not configured, in which case
/// the guarded routes reject every request.
pub fn api_key() -> Option<String> {
    env::var("API_KEY").ok().filter(|k| !k.trim().is_empty())
}

/// Returns the deployment environment reported by the health endpoint.
///
/// Read from `APP_ENV`, defaulting to `development`.
pub fn environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "development".to_string())
}

/// Returns the tracing filter directive.
///
/// `RUST_LOG` wins over `MOODLIST_LOG`; the default is `info`.
pub fn log_level() -> String {
    env::var("RUST_LOG")
        .or_else(|_| env::var("MOODLIST_LOG"))
        .unwrap_or_else(|_| "info".to_string())
}

/// Settings needed by [`crate::spotify::SpotifyClient`].
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
    pub api_url: String,
    pub token_url: String,
    pub timeout: Duration,
}

impl SpotifyConfig {
    /// Builds the client settings from the environment accessors above.
    pub fn from_env() -> Self {
        Self {
            client_id: spotify_client_id(),
            client_secret: spotify_client_secret(),
            api_url: spotify_api_url(),
            token_url: spotify_token_url(),
            timeout: spotify_http_timeout(),
        }
    }

    /// Settings pointing at the public Spotify endpoints with the given
    /// credentials.
    pub fn with_credentials(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            api_url: DEFAULT_SPOTIFY_API_URL.to_string(),
            token_url: DEFAULT_SPOTIFY_TOKEN_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}
