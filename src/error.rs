//! Error taxonomy for playlist generation.
//!
//! Every failure names the external call it came from and is handed back
//! to the caller untouched. Nothing in the core retries; callers decide
//! based on [`PlaylistError::is_retryable`].

use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum PlaylistError {
    /// Credentials are missing, blank or still set to a placeholder.
    /// Raised before any network call is made.
    #[error("Spotify credentials are not configured: {0}")]
    Configuration(String),

    /// The token endpoint rejected the client id/secret pair.
    #[error(
        "Invalid Spotify credentials. Please check SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET"
    )]
    InvalidCredentials,

    /// Any other failure while obtaining an access token.
    #[error("Failed to authenticate with Spotify API: {0}")]
    Authentication(String),

    /// A catalog call failed after a token was obtained.
    #[error("Failed to {operation} from Spotify: {reason}")]
    RecommendationFetch {
        operation: &'static str,
        reason: String,
    },

    /// The request did not pass structural validation.
    #[error("Invalid playlist request: {0}")]
    Validation(String),
}

impl PlaylistError {
    pub(crate) fn fetch(operation: &'static str, err: impl std::fmt::Display) -> Self {
        PlaylistError::RecommendationFetch {
            operation,
            reason: err.to_string(),
        }
    }

    /// Whether a caller may reasonably try the same operation again.
    ///
    /// Configuration, credential and validation problems need someone to
    /// change something first.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PlaylistError::Authentication(_) | PlaylistError::RecommendationFetch { .. }
        )
    }

    /// HTTP status used when the error reaches the service boundary.
    pub fn status_code(&self) -> StatusCode {
        match self {
            PlaylistError::Validation(_) => StatusCode::BAD_REQUEST,
            PlaylistError::Configuration(_) | PlaylistError::InvalidCredentials => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            PlaylistError::Authentication(_) | PlaylistError::RecommendationFetch { .. } => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}
