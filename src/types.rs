use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::error::PlaylistError;

pub const MIN_DURATION_MINUTES: u32 = 5;
pub const MAX_DURATION_MINUTES: u32 = 300;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Energetic,
    Calm,
    Romantic,
    Focused,
    Party,
    Chill,
}

impl Mood {
    pub const ALL: [Mood; 8] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Energetic,
        Mood::Calm,
        Mood::Romantic,
        Mood::Focused,
        Mood::Party,
        Mood::Chill,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Energetic => "energetic",
            Mood::Calm => "calm",
            Mood::Romantic => "romantic",
            Mood::Focused => "focused",
            Mood::Party => "party",
            Mood::Chill => "chill",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    Low,
    Medium,
    High,
}

impl EnergyLevel {
    pub const ALL: [EnergyLevel; 3] = [EnergyLevel::Low, EnergyLevel::Medium, EnergyLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyLevel::Low => "low",
            EnergyLevel::Medium => "medium",
            EnergyLevel::High => "high",
        }
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive bounds on one of Spotify's audio features, both in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Default number of tracks asked for when a query carries no limit.
pub const DEFAULT_RECOMMENDATION_LIMIT: u32 = 20;

/// Spotify accepts at most five seeds per recommendation request.
pub const MAX_SEED_GENRES: usize = 5;

/// Constraints sent to the recommendation endpoint. Built once per request;
/// a larger fetch is a new value from [`RecommendationQuery::with_limit`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationQuery {
    pub seed_genres: Vec<String>,
    pub valence: ValueRange,
    pub energy: Option<ValueRange>,
    pub limit: Option<u32>,
}

impl RecommendationQuery {
    pub fn with_limit(&self, limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..self.clone()
        }
    }

    /// Flattens the query into request parameters.
    ///
    /// `seed_genres` is comma-joined and left out when empty, energy bounds
    /// only appear when set, and `limit` falls back to 20.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(6);
        if !self.seed_genres.is_empty() {
            params.push(("seed_genres", self.seed_genres.join(",")));
        }
        params.push(("min_valence", self.valence.min.to_string()));
        params.push(("max_valence", self.valence.max.to_string()));
        if let Some(energy) = self.energy {
            params.push(("min_energy", energy.min.to_string()));
            params.push(("max_energy", energy.max.to_string()));
        }
        params.push((
            "limit",
            self.limit
                .unwrap_or(DEFAULT_RECOMMENDATION_LIMIT)
                .to_string(),
        ));
        params
    }
}

/// What a listener asks for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PlaylistRequest {
    pub mood: Mood,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_level: Option<EnergyLevel>,
    /// Desired length in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

impl PlaylistRequest {
    pub fn new(mood: Mood) -> Self {
        Self {
            mood,
            genres: None,
            energy_level: None,
            duration: None,
        }
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = Some(genres.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_energy_level(mut self, energy_level: EnergyLevel) -> Self {
        self.energy_level = Some(energy_level);
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration = Some(minutes);
        self
    }

    /// Genres the caller actually supplied; `None` for an absent or empty list.
    pub fn genre_list(&self) -> Option<&[String]> {
        self.genres.as_deref().filter(|g| !g.is_empty())
    }

    pub fn target_duration_ms(&self) -> Option<u64> {
        self.duration.map(|minutes| u64::from(minutes) * 60_000)
    }

    /// Structural checks applied at the service and CLI boundaries.
    pub fn validate(&self) -> Result<(), PlaylistError> {
        if let Some(genres) = &self.genres {
            if genres.is_empty() {
                return Err(PlaylistError::Validation(
                    "genres must contain at least 1 element".to_string(),
                ));
            }
            if genres.iter().any(|g| g.trim().is_empty()) {
                return Err(PlaylistError::Validation(
                    "each value in genres must be a non-empty string".to_string(),
                ));
            }
        }

        if let Some(duration) = self.duration {
            if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&duration) {
                return Err(PlaylistError::Validation(format!(
                    "duration must be between {} and {} minutes, got {}",
                    MIN_DURATION_MINUTES, MAX_DURATION_MINUTES, duration
                )));
            }
        }

        Ok(())
    }
}

/// A catalog track as handed back to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub name: String,
    pub album: String,
    pub artists: Vec<String>,
    pub duration_ms: u64,
    pub external_url: String,
    pub album_image_url: Option<String>,
    pub preview_url: Option<String>,
}

impl From<SpotifyTrack> for Track {
    fn from(track: SpotifyTrack) -> Self {
        Track {
            id: track.id,
            name: track.name,
            album: track.album.name,
            artists: track.artists.into_iter().map(|a| a.name).collect(),
            duration_ms: track.duration_ms,
            external_url: track.external_urls.spotify.unwrap_or_default(),
            album_image_url: track.album.images.into_iter().next().map(|i| i.url),
            preview_url: track.preview_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub name: String,
    pub description: String,
    pub tracks: Vec<Track>,
    pub total_duration_ms: u64,
    pub total_duration_minutes: u64,
    pub track_count: usize,
    pub mood: Mood,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_level: Option<EnergyLevel>,
    pub created_at: DateTime<Utc>,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub name: String,
    pub artists: String,
    pub album: String,
    pub length: String,
}

// Spotify wire format

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyTrack {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SpotifyArtist>,
    pub album: SpotifyAlbum,
    pub duration_ms: u64,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub preview_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyArtist {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyAlbum {
    pub name: String,
    #[serde(default)]
    pub images: Vec<SpotifyImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyImage {
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationsResponse {
    pub tracks: Vec<SpotifyTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub tracks: TrackPage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackPage {
    pub items: Vec<SpotifyTrack>,
}
