use crate::{config, info, spotify::SpotifyClient, success, warning};

/// Prints where configuration comes from and tries one token handshake.
pub async fn status() {
    let settings = config::SpotifyConfig::from_env();

    info!("Environment file: {}", config::env_file_path().display());
    info!("Environment:      {}", config::environment());
    info!("Spotify API:      {}", settings.api_url);
    info!("Token endpoint:   {}", settings.token_url);
    if config::api_key().is_none() {
        warning!("API_KEY is not set, the HTTP API will refuse every playlist request.");
    }

    let client = SpotifyClient::new(settings);
    if !client.credentials_configured() {
        warning!(
            "Spotify credentials are missing. Set SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET in {}",
            config::env_file_path().display()
        );
        return;
    }

    match client.authenticate().await {
        Ok(_) => success!("Spotify credentials are valid."),
        Err(e) => warning!("Spotify authentication failed: {}", e),
    }
}
