mod common;

use std::{sync::Arc, time::Duration};

use base64::{Engine, engine::general_purpose::STANDARD};
use common::{StubSpotify, TRACK_DURATION_MS, TokenMode};
use moodlist::{
    clock::ManualClock,
    config::SpotifyConfig,
    error::PlaylistError,
    playlist::PlaylistAssembler,
    spotify::{RecommendationSource, SpotifyClient},
    types::{EnergyLevel, Mood, PlaylistRequest, RecommendationQuery, ValueRange},
};

const HOUR_MS: i64 = 3_600_000;

#[tokio::test]
async fn token_request_uses_basic_auth_and_client_credentials_grant() {
    let stub = StubSpotify::start().await;
    let client = SpotifyClient::new(stub.config());

    let token = client.get_access_token().await.unwrap();
    assert_eq!(token, "token-1");

    let requests = stub.token_requests();
    assert_eq!(requests.len(), 1);
    let expected = format!("Basic {}", STANDARD.encode("stub-client-id:stub-client-secret"));
    assert_eq!(requests[0].0.as_deref(), Some(expected.as_str()));
    assert_eq!(requests[0].1, "grant_type=client_credentials");
}

#[tokio::test]
async fn valid_token_is_reused() {
    let stub = StubSpotify::start().await;
    let client = SpotifyClient::new(stub.config());

    let first = client.get_access_token().await.unwrap();
    let second = client.get_access_token().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(stub.token_calls(), 1);
}

#[tokio::test]
async fn expiry_includes_the_safety_margin() {
    let stub = StubSpotify::start().await;
    let clock = Arc::new(ManualClock::new(1_000));
    let client = SpotifyClient::with_clock(stub.config(), clock.clone());

    let token = client.authenticate().await.unwrap();
    assert_eq!(token.expires_at_ms, 1_000 + HOUR_MS - 60_000);

    // one millisecond before the adjusted expiry the token is still served
    clock.set_ms(token.expires_at_ms - 1);
    assert_eq!(client.get_access_token().await.unwrap(), "token-1");
    assert_eq!(stub.token_calls(), 1);

    clock.set_ms(token.expires_at_ms);
    assert_eq!(client.get_access_token().await.unwrap(), "token-2");
    assert_eq!(stub.token_calls(), 2);
}

#[tokio::test]
async fn concurrent_callers_share_one_refresh() {
    let stub = StubSpotify::builder()
        .token_delay(Duration::from_millis(50))
        .start()
        .await;
    let clock = Arc::new(ManualClock::new(0));
    let client = SpotifyClient::with_clock(stub.config(), clock.clone());

    client.get_access_token().await.unwrap();
    clock.advance_ms(2 * HOUR_MS);

    let (a, b, c, d, e) = tokio::join!(
        client.get_access_token(),
        client.get_access_token(),
        client.get_access_token(),
        client.get_access_token(),
        client.get_access_token(),
    );

    for token in [a, b, c, d, e] {
        assert_eq!(token.unwrap(), "token-2");
    }
    assert_eq!(stub.token_calls(), 2);
}

#[tokio::test]
async fn invalid_client_maps_to_invalid_credentials() {
    let stub = StubSpotify::builder()
        .token_mode(TokenMode::InvalidClient)
        .start()
        .await;
    let client = SpotifyClient::new(stub.config());

    let err = client.get_access_token().await.unwrap_err();
    assert!(matches!(err, PlaylistError::InvalidCredentials));
}

#[tokio::test]
async fn other_token_failures_map_to_authentication() {
    let stub = StubSpotify::builder()
        .token_mode(TokenMode::ServerError)
        .start()
        .await;
    let client = SpotifyClient::new(stub.config());

    let err = client.get_access_token().await.unwrap_err();
    assert!(matches!(err, PlaylistError::Authentication(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn failed_refresh_leaves_nothing_cached() {
    let stub = StubSpotify::builder()
        .token_mode(TokenMode::ServerError)
        .start()
        .await;
    let client = SpotifyClient::new(stub.config());

    assert!(client.get_access_token().await.is_err());
    assert!(client.get_access_token().await.is_err());
    assert_eq!(stub.token_calls(), 2);
}

#[tokio::test]
async fn placeholder_credentials_fail_before_any_request() {
    let stub = StubSpotify::start().await;
    for (id, secret) in [
        ("", "secret"),
        ("your_spotify_client_id", "secret"),
        ("id", "your_spotify_client_secret_here"),
    ] {
        let mut config = stub.config();
        config.client_id = id.to_string();
        config.client_secret = secret.to_string();
        let client = SpotifyClient::new(config);

        assert!(!client.credentials_configured());
        let err = client.get_access_token().await.unwrap_err();
        assert!(matches!(err, PlaylistError::Configuration(_)), "{id}/{secret}");
    }
    assert_eq!(stub.token_calls(), 0);
}

#[tokio::test]
async fn unreachable_token_endpoint_is_an_authentication_error() {
    let mut config = SpotifyConfig::with_credentials("id", "secret");
    config.token_url = "http://127.0.0.1:9/api/token".to_string();
    config.timeout = Duration::from_secs(2);
    let client = SpotifyClient::new(config);

    let err = client.get_access_token().await.unwrap_err();
    assert!(matches!(err, PlaylistError::Authentication(_)));
}

#[tokio::test]
async fn recommendation_query_is_flattened() {
    let stub = StubSpotify::start().await;
    let client = SpotifyClient::new(stub.config());

    let query = RecommendationQuery {
        seed_genres: vec!["pop".to_string(), "rock".to_string()],
        valence: ValueRange::new(0.6, 1.0),
        energy: Some(ValueRange::new(0.4, 0.7)),
        limit: None,
    };
    let tracks = client.get_recommendations(&query).await.unwrap();
    assert_eq!(tracks.len(), 20);

    let params = &stub.recommendation_queries()[0];
    assert_eq!(params["seed_genres"], "pop,rock");
    assert_eq!(params["min_valence"], "0.6");
    assert_eq!(params["max_valence"], "1");
    assert_eq!(params["min_energy"], "0.4");
    assert_eq!(params["max_energy"], "0.7");
    assert_eq!(params["limit"], "20");
    assert_eq!(stub.bearer_tokens(), vec!["Bearer token-1".to_string()]);
}

#[tokio::test]
async fn absent_genres_and_energy_are_left_out() {
    let stub = StubSpotify::start().await;
    let client = SpotifyClient::new(stub.config());

    let query = RecommendationQuery {
        seed_genres: Vec::new(),
        valence: ValueRange::new(0.0, 0.4),
        energy: None,
        limit: Some(50),
    };
    client.recommendations(&query).await.unwrap();

    let params = &stub.recommendation_queries()[0];
    assert!(!params.contains_key("seed_genres"));
    assert!(!params.contains_key("min_energy"));
    assert!(!params.contains_key("max_energy"));
    assert_eq!(params["limit"], "50");
}

#[tokio::test]
async fn tracks_are_converted_to_the_public_shape() {
    let stub = StubSpotify::start().await;
    let client = SpotifyClient::new(stub.config());

    let track = client.get_track("abc").await.unwrap();
    assert_eq!(track.id, "abc");
    assert_eq!(track.name, "Song abc");
    assert_eq!(track.album, "Some Album");
    assert_eq!(track.artists, vec!["First Artist", "Second Artist"]);
    assert_eq!(track.duration_ms, 201_000);
    assert_eq!(track.external_url, "https://open.spotify.com/track/abc");
    assert_eq!(
        track.album_image_url.as_deref(),
        Some("https://img.example/large.jpg")
    );
    assert_eq!(track.preview_url, None);
}

#[tokio::test]
async fn track_ids_cannot_change_the_request_path() {
    let stub = StubSpotify::start().await;
    let client = SpotifyClient::new(stub.config());

    for id in ["abc?market=US", "../search", "abc#frag", "a/b", ""] {
        let err = client.get_track(id).await.unwrap_err();
        assert!(matches!(err, PlaylistError::Validation(_)), "{id}: {err:?}");
    }
    assert_eq!(stub.token_calls(), 0);
    assert!(stub.bearer_tokens().is_empty());
}

#[tokio::test]
async fn search_pages_through_results() {
    let stub = StubSpotify::start().await;
    let client = SpotifyClient::new(stub.config());

    let page = client.search_tracks("daft", 5, 10).await.unwrap();
    assert_eq!(page.len(), 5);
    assert_eq!(page[0].id, "daft-10");
    assert_eq!(page[4].id, "daft-14");
}

#[tokio::test]
async fn catalog_failures_name_the_operation() {
    let stub = StubSpotify::builder().catalog_fails().start().await;
    let client = SpotifyClient::new(stub.config());

    let query = RecommendationQuery {
        seed_genres: Vec::new(),
        valence: ValueRange::new(0.0, 1.0),
        energy: None,
        limit: None,
    };
    match client.get_recommendations(&query).await {
        Err(PlaylistError::RecommendationFetch { operation, .. }) => {
            assert_eq!(operation, "get track recommendations")
        }
        other => panic!("unexpected result: {other:?}"),
    }

    match client.get_track("missing").await {
        Err(PlaylistError::RecommendationFetch { operation, .. }) => {
            assert_eq!(operation, "get track")
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn generates_a_playlist_end_to_end() {
    let stub = StubSpotify::start().await;
    let assembler = PlaylistAssembler::new(Arc::new(SpotifyClient::new(stub.config())));

    let request = PlaylistRequest::new(Mood::Party)
        .with_genres(["dance", "house"])
        .with_energy_level(EnergyLevel::High);
    let playlist = assembler.generate_playlist(&request).await.unwrap();

    assert_eq!(playlist.name, "Party Dance Playlist");
    assert_eq!(playlist.track_count, 20);
    assert_eq!(playlist.total_duration_ms, 20 * TRACK_DURATION_MS);
    assert_eq!(playlist.total_duration_minutes, 60);
    assert_eq!(stub.recommendation_queries().len(), 1);
}

#[tokio::test]
async fn long_first_batch_is_trimmed_without_a_second_fetch() {
    let stub = StubSpotify::start().await;
    let assembler = PlaylistAssembler::new(Arc::new(SpotifyClient::new(stub.config())));

    // 20 x 3 min fetched, 45 min wanted
    let request = PlaylistRequest::new(Mood::Calm).with_duration(45);
    let playlist = assembler.generate_playlist(&request).await.unwrap();

    assert_eq!(playlist.track_count, 15);
    assert_eq!(playlist.total_duration_ms, 45 * 60_000);
    assert_eq!(stub.recommendation_queries().len(), 1);
}

#[tokio::test]
async fn short_first_batch_is_filled_from_one_larger_fetch() {
    let stub = StubSpotify::start().await;
    let assembler = PlaylistAssembler::new(Arc::new(SpotifyClient::new(stub.config())));

    let request = PlaylistRequest::new(Mood::Focused).with_duration(90);
    let playlist = assembler.generate_playlist(&request).await.unwrap();

    assert_eq!(playlist.track_count, 30);
    assert_eq!(playlist.total_duration_ms, 90 * 60_000);

    let queries = stub.recommendation_queries();
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[0]["limit"], "20");
    assert_eq!(queries[1]["limit"], "50");
    assert_eq!(queries[0]["min_valence"], queries[1]["min_valence"]);

    let mut ids: Vec<&str> = playlist.tracks.iter().map(|t| t.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 30);
}

#[tokio::test]
async fn fetch_failure_yields_no_playlist() {
    let stub = StubSpotify::builder().catalog_fails().start().await;
    let assembler = PlaylistAssembler::new(Arc::new(SpotifyClient::new(stub.config())));

    let err = assembler
        .generate_playlist(&PlaylistRequest::new(Mood::Happy))
        .await
        .unwrap_err();
    assert!(matches!(err, PlaylistError::RecommendationFetch { .. }));
}
