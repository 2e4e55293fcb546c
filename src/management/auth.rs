use std::{future::Future, sync::Arc};

use tokio::sync::Mutex;

use crate::{
    clock::{Clock, SystemClock},
    error::PlaylistError,
    types::TokenResponse,
};

/// Spotify hands out tokens valid for `expires_in` seconds; this much is
/// shaved off so a token is never used right at its expiry.
pub const TOKEN_SAFETY_MARGIN_MS: i64 = 60_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub value: String,
    pub expires_at_ms: i64,
}

impl AccessToken {
    /// Stamps a token response with its absolute expiry.
    ///
    /// `expires_in` comes straight from the token endpoint; a value that is
    /// not positive or does not fit an `i64` millisecond timestamp is
    /// rejected as an authentication failure.
    pub fn from_response(response: TokenResponse, now_ms: i64) -> Result<Self, PlaylistError> {
        let expires_at_ms = Some(response.expires_in)
            .filter(|secs| *secs > 0)
            .and_then(|secs| secs.checked_mul(1000))
            .and_then(|ms| now_ms.checked_add(ms))
            .and_then(|at| at.checked_sub(TOKEN_SAFETY_MARGIN_MS))
            .ok_or_else(|| {
                PlaylistError::Authentication(format!(
                    "invalid expires_in: {}",
                    response.expires_in
                ))
            })?;

        Ok(AccessToken {
            value: response.access_token,
            expires_at_ms,
        })
    }

    pub fn is_valid_at(&self, now_ms: i64) -> bool {
        now_ms < self.expires_at_ms
    }
}

/// Holds the process-wide access token.
///
/// The cached value sits behind an async mutex that stays locked while a
/// handshake runs, so callers arriving during a refresh wait for it and
/// then read the fresh token instead of starting their own.
pub struct TokenManager {
    token: Mutex<Option<AccessToken>>,
    clock: Arc<dyn Clock>,
}

impl TokenManager {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        TokenManager {
            token: Mutex::new(None),
            clock,
        }
    }

    /// Returns the cached token while it is valid, otherwise runs
    /// `authenticate` once and caches its result.
    pub async fn get_valid_token<F, Fut>(&self, authenticate: F) -> Result<String, PlaylistError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<TokenResponse, PlaylistError>>,
    {
        let mut guard = self.token.lock().await;
        if let Some(token) = guard.as_ref() {
            if token.is_valid_at(self.clock.now_ms()) {
                return Ok(token.value.clone());
            }
        }

        let token = self.exchange(authenticate).await?;
        let value = token.value.clone();
        *guard = Some(token);
        Ok(value)
    }

    /// Runs `authenticate` unconditionally and replaces the cached token.
    pub async fn refresh<F, Fut>(&self, authenticate: F) -> Result<AccessToken, PlaylistError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<TokenResponse, PlaylistError>>,
    {
        let mut guard = self.token.lock().await;
        let token = self.exchange(authenticate).await?;
        *guard = Some(token.clone());
        Ok(token)
    }

    /// The cached token, if any, without checking its expiry.
    pub async fn current_token(&self) -> Option<AccessToken> {
        self.token.lock().await.clone()
    }

    async fn exchange<F, Fut>(&self, authenticate: F) -> Result<AccessToken, PlaylistError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<TokenResponse, PlaylistError>>,
    {
        let response = authenticate().await?;
        AccessToken::from_response(response, self.clock.now_ms())
    }
}

impl Default for TokenManager {
    fn default() -> Self {
        Self::new()
    }
}
