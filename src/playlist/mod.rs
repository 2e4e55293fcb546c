//! # Playlist Assembly
//!
//! Turns a [`PlaylistRequest`] into a finished [`Playlist`]:
//!
//! ```text
//! request → map_preferences → fetch → dedup → (fit_to_duration) → totals → name/description
//! ```
//!
//! The pipeline is linear and keeps no state between requests. A failure
//! while fetching aborts the whole generation; callers never receive a
//! partial playlist because Spotify was unreachable. The duration fitting
//! itself is approximate by nature (see [`duration`]).

pub mod duration;
pub mod mapper;
pub mod metadata;

use std::sync::Arc;

use chrono::Utc;
use tracing::instrument;

pub use duration::{EXPANSION_FETCH_LIMIT, FitOptions, OVERSHOOT_TOLERANCE, fit_to_duration};
pub use mapper::map_preferences;
pub use metadata::{playlist_description, playlist_name};

use crate::{
    error::PlaylistError,
    spotify::RecommendationSource,
    types::{Playlist, PlaylistRequest, RecommendationQuery, Track},
    utils::{remove_duplicate_tracks, total_duration_ms},
};

pub struct PlaylistAssembler {
    source: Arc<dyn RecommendationSource>,
    fit: FitOptions,
}

impl PlaylistAssembler {
    pub fn new(source: Arc<dyn RecommendationSource>) -> Self {
        PlaylistAssembler {
            source,
            fit: FitOptions::default(),
        }
    }

    pub fn with_fit_options(mut self, fit: FitOptions) -> Self {
        self.fit = fit;
        self
    }

    /// Generates a playlist for `request`.
    ///
    /// The request is assumed to be structurally valid already (see
    /// [`PlaylistRequest::validate`]). Without a duration the first batch
    /// of recommendations is used as-is after dropping repeated ids.
    ///
    /// # Errors
    ///
    /// Any token or fetch error from the recommendation source, unchanged.
    #[instrument(skip(self, request), fields(mood = %request.mood))]
    pub async fn generate_playlist(
        &self,
        request: &PlaylistRequest,
    ) -> Result<Playlist, PlaylistError> {
        tracing::info!("Generating playlist with mood: {}", request.mood);

        let query = map_preferences(request);
        let result = self.assemble_tracks(request, &query).await;
        let tracks = match result {
            Ok(tracks) => tracks,
            Err(e) => {
                tracing::error!("Failed to generate playlist: {}", e);
                return Err(e);
            }
        };

        let total_duration_ms = total_duration_ms(&tracks);
        let playlist = Playlist {
            name: playlist_name(request),
            description: playlist_description(request),
            total_duration_ms,
            total_duration_minutes: (total_duration_ms as f64 / 60_000.0).round() as u64,
            track_count: tracks.len(),
            tracks,
            mood: request.mood,
            genres: request.genre_list().map(<[String]>::to_vec),
            energy_level: request.energy_level,
            created_at: Utc::now(),
        };

        tracing::info!(
            "Generated '{}' with {} tracks ({} ms)",
            playlist.name,
            playlist.track_count,
            playlist.total_duration_ms
        );
        Ok(playlist)
    }

    async fn assemble_tracks(
        &self,
        request: &PlaylistRequest,
        query: &RecommendationQuery,
    ) -> Result<Vec<Track>, PlaylistError> {
        let mut tracks = self.source.recommendations(query).await?;
        remove_duplicate_tracks(&mut tracks);

        match request.target_duration_ms() {
            Some(target_ms) => {
                fit_to_duration(self.source.as_ref(), query, tracks, target_ms, self.fit).await
            }
            None => Ok(tracks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        spotify::MockRecommendationSource,
        types::{EnergyLevel, Mood},
    };

    fn track(id: &str, duration_ms: u64) -> Track {
        Track {
            id: id.to_string(),
            name: format!("Track {id}"),
            album: "Album".to_string(),
            artists: vec!["Artist".to_string()],
            duration_ms,
            external_url: format!("https://open.spotify.com/track/{id}"),
            album_image_url: None,
            preview_url: None,
        }
    }

    fn assembler(source: MockRecommendationSource) -> PlaylistAssembler {
        PlaylistAssembler::new(Arc::new(source))
    }

    #[tokio::test]
    async fn mood_only_request_uses_a_single_fetch() {
        let mut source = MockRecommendationSource::new();
        source
            .expect_recommendations()
            .withf(|query| query.limit == Some(20) && query.seed_genres.is_empty())
            .times(1)
            .returning(|_| {
                Ok(vec![
                    track("a", 200_000),
                    track("b", 210_000),
                    track("a", 200_000),
                    track("c", 190_000),
                ])
            });

        let playlist = assembler(source)
            .generate_playlist(&PlaylistRequest::new(Mood::Happy))
            .await
            .unwrap();

        assert_eq!(playlist.name, "Happy Music Playlist");
        assert_eq!(playlist.description, "A personalized happy playlist.");
        assert_eq!(playlist.track_count, 3);
        assert_eq!(playlist.total_duration_ms, 600_000);
        assert_eq!(playlist.total_duration_minutes, 10);
        assert!(playlist.genres.is_none());
    }

    #[tokio::test]
    async fn full_request_is_fitted_and_described() {
        let mut source = MockRecommendationSource::new();
        source
            .expect_recommendations()
            .withf(|query| query.limit == Some(20))
            .times(1)
            .returning(|_| Ok(vec![track("a", 1_200_000), track("b", 1_200_000)]));
        source
            .expect_recommendations()
            .withf(|query| query.limit == Some(EXPANSION_FETCH_LIMIT))
            .times(1)
            .returning(|_| Ok(vec![track("b", 1_200_000), track("c", 300_000)]));

        let request = PlaylistRequest::new(Mood::Sad)
            .with_genres(["jazz"])
            .with_energy_level(EnergyLevel::Low)
            .with_duration(45);
        let playlist = assembler(source).generate_playlist(&request).await.unwrap();

        assert_eq!(playlist.name, "Melancholic Jazz Playlist");
        assert_eq!(
            playlist.description,
            "A personalized sad playlist, featuring jazz music, with low energy, lasting approximately 45 minutes."
        );
        assert_eq!(playlist.track_count, 3);
        assert_eq!(playlist.total_duration_ms, 2_700_000);
        assert_eq!(playlist.genres, Some(vec!["jazz".to_string()]));
        assert_eq!(playlist.energy_level, Some(EnergyLevel::Low));
    }

    #[tokio::test]
    async fn fetch_failure_yields_no_playlist() {
        let mut source = MockRecommendationSource::new();
        source
            .expect_recommendations()
            .times(1)
            .returning(|_| Err(PlaylistError::InvalidCredentials));

        let err = assembler(source)
            .generate_playlist(&PlaylistRequest::new(Mood::Chill).with_duration(30))
            .await
            .unwrap_err();

        assert!(matches!(err, PlaylistError::InvalidCredentials));
    }

    #[tokio::test]
    async fn totals_always_match_the_tracks() {
        let mut source = MockRecommendationSource::new();
        source
            .expect_recommendations()
            .withf(|query| query.limit == Some(20))
            .returning(|_| {
                Ok(vec![
                    track("a", 200_000),
                    track("b", 200_000),
                    track("c", 200_000),
                ])
            });

        let playlist = assembler(source)
            .generate_playlist(&PlaylistRequest::new(Mood::Romantic).with_duration(5))
            .await
            .unwrap();

        // 5 minutes = 300k: only the first track fits.
        assert_eq!(playlist.track_count, 1);
        assert_eq!(
            playlist.total_duration_ms,
            playlist.tracks.iter().map(|t| t.duration_ms).sum::<u64>()
        );
    }
}
