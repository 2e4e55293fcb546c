use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::{net::SocketAddr, str::FromStr};

use crate::{
    Res,
    api::{self, ApiState},
};

/// Builds the application router. `/` and `/health` are public, everything
/// under `/api` requires the API key.
pub fn router(state: ApiState) -> Router {
    let protected = Router::new()
        .route("/playlists/generate", post(api::generate_playlist))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            api::require_api_key,
        ));

    Router::new()
        .route("/", get(api::welcome))
        .route("/health", get(api::health))
        .nest("/api", protected)
        .with_state(state)
}

pub async fn start_api_server(addr: &str, state: ApiState) -> Res<()> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| format!("Failed to parse server address '{}': {}", addr, e))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "moodlist API listening");

    axum::serve(listener, router(state)).await?;
    Ok(())
}
