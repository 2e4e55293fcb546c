use axum::{
    extract::{State, rejection::JsonRejection},
    response::Json,
};

use crate::{
    api::{ApiError, ApiState},
    error::PlaylistError,
    types::{Playlist, PlaylistRequest},
};

pub async fn generate_playlist(
    State(state): State<ApiState>,
    payload: Result<Json<PlaylistRequest>, JsonRejection>,
) -> Result<Json<Playlist>, ApiError> {
    let Json(request) = payload.map_err(|e| PlaylistError::Validation(e.body_text()))?;
    request.validate()?;

    let playlist = state.assembler.generate_playlist(&request).await?;
    Ok(Json(playlist))
}
