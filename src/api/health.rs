use axum::{extract::State, response::Json};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::api::ApiState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: String,
    pub uptime: u64,
    pub environment: String,
    pub version: &'static str,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub spotify: SpotifyCheck,
}

#[derive(Debug, Serialize)]
pub struct SpotifyCheck {
    pub status: &'static str,
}

/// Reports liveness plus whether Spotify credentials are configured.
/// Never contacts Spotify.
pub async fn health(State(state): State<ApiState>) -> Json<HealthStatus> {
    let spotify = if state.client.credentials_configured() {
        "configured"
    } else {
        "not_configured"
    };

    Json(HealthStatus {
        status: "ok",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        uptime: state.started_at.elapsed().as_secs(),
        environment: state.environment.clone(),
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks {
            spotify: SpotifyCheck { status: spotify },
        },
    })
}
