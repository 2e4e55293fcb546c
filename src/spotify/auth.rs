use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{StatusCode, header::AUTHORIZATION};

use crate::{
    error::PlaylistError,
    management::AccessToken,
    spotify::SpotifyClient,
    types::{TokenErrorResponse, TokenResponse},
};

/// Substrings that mark a credential as a value copied from a template.
const PLACEHOLDER_MARKERS: [&str; 2] = ["your_spotify", "here"];

/// Checks that a client id/secret pair looks usable.
///
/// Both values must be present, not blank, and must not contain a template
/// marker such as `your_spotify_client_id_here`. No request is made.
///
/// # Example
///
/// ```
/// assert!(validate_credentials("", "secret").is_err());
/// assert!(validate_credentials("your_spotify_client_id", "secret").is_err());
/// assert!(validate_credentials("0a1b2c", "3d4e5f").is_ok());
/// ```
pub fn validate_credentials(client_id: &str, client_secret: &str) -> Result<(), PlaylistError> {
    for (name, value) in [
        ("SPOTIFY_CLIENT_ID", client_id),
        ("SPOTIFY_CLIENT_SECRET", client_secret),
    ] {
        if value.trim().is_empty() {
            return Err(PlaylistError::Configuration(format!("{name} is not set")));
        }
        if PLACEHOLDER_MARKERS.iter().any(|m| value.contains(m)) {
            return Err(PlaylistError::Configuration(format!(
                "{name} still holds a placeholder value"
            )));
        }
    }
    Ok(())
}

impl SpotifyClient {
    /// Runs the client-credentials handshake and caches the new token.
    ///
    /// Credentials are checked before anything is sent. The request is a
    /// form-encoded `grant_type=client_credentials` POST to the token
    /// endpoint carrying `Authorization: Basic base64(id:secret)`.
    ///
    /// # Errors
    ///
    /// - `Configuration` - credentials missing or placeholders
    /// - `InvalidCredentials` - HTTP 400 with `"error": "invalid_client"`
    /// - `Authentication` - transport failure, any other status, or an
    ///   unreadable token response
    pub async fn authenticate(&self) -> Result<AccessToken, PlaylistError> {
        self.tokens.refresh(|| self.request_token()).await
    }

    /// Returns a bearer token, authenticating only when the cached one is
    /// missing or expired.
    ///
    /// Concurrent callers share a single in-flight handshake.
    pub async fn get_access_token(&self) -> Result<String, PlaylistError> {
        self.tokens.get_valid_token(|| self.request_token()).await
    }

    /// Whether the configured credentials would pass the pre-flight check.
    /// Never touches the network.
    pub fn credentials_configured(&self) -> bool {
        validate_credentials(&self.config.client_id, &self.config.client_secret).is_ok()
    }

    async fn request_token(&self) -> Result<TokenResponse, PlaylistError> {
        validate_credentials(&self.config.client_id, &self.config.client_secret)?;

        let credentials = STANDARD.encode(format!(
            "{}:{}",
            self.config.client_id, self.config.client_secret
        ));

        let res = self
            .http
            .post(&self.config.token_url)
            .header(AUTHORIZATION, format!("Basic {credentials}"))
            .form(&[("grant_type", "client_credentials")])
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach Spotify token endpoint: {}", e);
                PlaylistError::Authentication(e.to_string())
            })?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            if status == StatusCode::BAD_REQUEST && is_invalid_client(&body) {
                tracing::error!(
                    "Invalid Spotify credentials. Please check SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET"
                );
                return Err(PlaylistError::InvalidCredentials);
            }
            tracing::error!("Spotify token endpoint returned {}: {}", status, body);
            return Err(PlaylistError::Authentication(format!(
                "token endpoint returned {status}"
            )));
        }

        let token = res.json::<TokenResponse>().await.map_err(|e| {
            tracing::error!("Failed to decode Spotify token response: {}", e);
            PlaylistError::Authentication(e.to_string())
        })?;

        tracing::info!("Successfully authenticated with Spotify API");
        Ok(token)
    }
}

fn is_invalid_client(body: &str) -> bool {
    serde_json::from_str::<TokenErrorResponse>(body)
        .map(|e| e.error == "invalid_client")
        .unwrap_or(false)
}
