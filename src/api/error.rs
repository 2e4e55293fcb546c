use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::error::PlaylistError;

/// Error returned by handlers and middleware.
#[derive(Debug)]
pub enum ApiError {
    Unauthorized(&'static str),
    Playlist(PlaylistError),
}

impl From<PlaylistError> for ApiError {
    fn from(err: PlaylistError) -> Self {
        ApiError::Playlist(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message.to_string()),
            ApiError::Playlist(err) => (err.status_code(), err.to_string()),
        };

        if status.is_server_error() {
            tracing::error!("{} {}", status, message);
        }

        let body = json!({
            "statusCode": status.as_u16(),
            "message": message,
            "error": status.canonical_reason().unwrap_or("Error"),
        });
        (status, Json(body)).into_response()
    }
}
