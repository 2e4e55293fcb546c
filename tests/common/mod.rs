//! In-process stand-in for the Spotify token and catalog endpoints.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};

use moodlist::config::SpotifyConfig;

pub const TRACK_DURATION_MS: u64 = 180_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenMode {
    Ok,
    InvalidClient,
    ServerError,
}

#[derive(Clone)]
struct StubState {
    token_mode: TokenMode,
    catalog_fails: bool,
    token_delay: Duration,
    token_calls: Arc<AtomicUsize>,
    token_requests: Arc<Mutex<Vec<(Option<String>, String)>>>,
    recommendation_queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    bearer_tokens: Arc<Mutex<Vec<String>>>,
}

pub struct StubSpotify {
    pub addr: SocketAddr,
    state: StubState,
}

pub struct StubBuilder {
    token_mode: TokenMode,
    catalog_fails: bool,
    token_delay: Duration,
}

impl StubBuilder {
    pub fn token_mode(mut self, mode: TokenMode) -> Self {
        self.token_mode = mode;
        self
    }

    pub fn catalog_fails(mut self) -> Self {
        self.catalog_fails = true;
        self
    }

    pub fn token_delay(mut self, delay: Duration) -> Self {
        self.token_delay = delay;
        self
    }

    pub async fn start(self) -> StubSpotify {
        let state = StubState {
            token_mode: self.token_mode,
            catalog_fails: self.catalog_fails,
            token_delay: self.token_delay,
            token_calls: Arc::new(AtomicUsize::new(0)),
            token_requests: Arc::new(Mutex::new(Vec::new())),
            recommendation_queries: Arc::new(Mutex::new(Vec::new())),
            bearer_tokens: Arc::new(Mutex::new(Vec::new())),
        };

        let app = Router::new()
            .route("/api/token", post(token))
            .route("/v1/recommendations", get(recommendations))
            .route("/v1/search", get(search))
            .route("/v1/tracks/{id}", get(track_by_id))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub server");
        });

        StubSpotify { addr, state }
    }
}

impl StubSpotify {
    pub fn builder() -> StubBuilder {
        StubBuilder {
            token_mode: TokenMode::Ok,
            catalog_fails: false,
            token_delay: Duration::ZERO,
        }
    }

    pub async fn start() -> StubSpotify {
        Self::builder().start().await
    }

    pub fn config(&self) -> SpotifyConfig {
        let mut config = SpotifyConfig::with_credentials("stub-client-id", "stub-client-secret");
        config.api_url = format!("http://{}/v1", self.addr);
        config.token_url = format!("http://{}/api/token", self.addr);
        config.timeout = Duration::from_secs(5);
        config
    }

    pub fn token_calls(&self) -> usize {
        self.state.token_calls.load(Ordering::SeqCst)
    }

    /// `(authorization header, form body)` of every token request.
    pub fn token_requests(&self) -> Vec<(Option<String>, String)> {
        self.state.token_requests.lock().unwrap().clone()
    }

    pub fn recommendation_queries(&self) -> Vec<HashMap<String, String>> {
        self.state.recommendation_queries.lock().unwrap().clone()
    }

    pub fn bearer_tokens(&self) -> Vec<String> {
        self.state.bearer_tokens.lock().unwrap().clone()
    }
}

pub fn spotify_track(id: &str, duration_ms: u64) -> Value {
    json!({
        "id": id,
        "name": format!("Song {id}"),
        "artists": [{ "id": "a1", "name": "First Artist" }, { "id": "a2", "name": "Second Artist" }],
        "album": {
            "id": "al1",
            "name": "Some Album",
            "images": [
                { "url": "https://img.example/large.jpg", "height": 640, "width": 640 },
                { "url": "https://img.example/small.jpg", "height": 64, "width": 64 }
            ]
        },
        "duration_ms": duration_ms,
        "external_urls": { "spotify": format!("https://open.spotify.com/track/{id}") },
        "preview_url": null
    })
}

async fn token(State(state): State<StubState>, headers: HeaderMap, body: String) -> Response {
    let n = state.token_calls.fetch_add(1, Ordering::SeqCst) + 1;
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.token_requests.lock().unwrap().push((auth, body));

    if !state.token_delay.is_zero() {
        tokio::time::sleep(state.token_delay).await;
    }

    match state.token_mode {
        TokenMode::Ok => Json(json!({
            "access_token": format!("token-{n}"),
            "token_type": "Bearer",
            "expires_in": 3600
        }))
        .into_response(),
        TokenMode::InvalidClient => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_client", "error_description": "Invalid client" })),
        )
            .into_response(),
        TokenMode::ServerError => {
            (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response()
        }
    }
}

fn record_bearer(state: &StubState, headers: &HeaderMap) {
    if let Some(value) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        state.bearer_tokens.lock().unwrap().push(value.to_string());
    }
}

async fn recommendations(
    State(state): State<StubState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    record_bearer(&state, &headers);
    let limit: usize = params
        .get("limit")
        .and_then(|l| l.parse().ok())
        .unwrap_or(20);
    state.recommendation_queries.lock().unwrap().push(params);

    if state.catalog_fails {
        return (StatusCode::INTERNAL_SERVER_ERROR, "catalog down").into_response();
    }

    let tracks: Vec<Value> = (0..limit)
        .map(|i| spotify_track(&format!("rec-{i}"), TRACK_DURATION_MS))
        .collect();
    Json(json!({ "tracks": tracks, "seeds": [] })).into_response()
}

async fn search(
    State(state): State<StubState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    record_bearer(&state, &headers);
    if state.catalog_fails {
        return (StatusCode::INTERNAL_SERVER_ERROR, "catalog down").into_response();
    }

    let q = params.get("q").cloned().unwrap_or_default();
    let offset: u32 = params.get("offset").and_then(|o| o.parse().ok()).unwrap_or(0);
    let limit: u32 = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(20);
    let items: Vec<Value> = (offset..offset + limit)
        .map(|i| spotify_track(&format!("{q}-{i}"), TRACK_DURATION_MS))
        .collect();

    Json(json!({
        "tracks": { "items": items, "total": 1000, "limit": limit, "offset": offset }
    }))
    .into_response()
}

async fn track_by_id(
    State(state): State<StubState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    record_bearer(&state, &headers);
    if state.catalog_fails || id == "missing" {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": { "status": 404 } }))).into_response();
    }
    Json(spotify_track(&id, 201_000)).into_response()
}
