use std::collections::HashMap;

use axum::{
    extract::{Query, Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::{ApiError, ApiState};

pub const API_KEY_HEADER: &str = "x-api-key";
pub const API_KEY_QUERY: &str = "api_key";

/// Lets a request through only when it carries the configured API key,
/// either in the `x-api-key` header or the `api_key` query parameter.
///
/// With no key configured every request is refused.
pub async fn require_api_key(
    State(state): State<ApiState>,
    Query(params): Query<HashMap<String, String>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.api_key.as_deref() else {
        return Err(ApiError::Unauthorized("API key is not configured"));
    };

    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .or_else(|| params.get(API_KEY_QUERY).map(String::as_str));

    match provided {
        Some(key) if key == expected => Ok(next.run(request).await),
        _ => Err(ApiError::Unauthorized("Invalid or missing API key")),
    }
}
