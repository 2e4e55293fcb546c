use std::sync::Arc;

use tabled::Table;

use crate::{
    config, error, info,
    playlist::PlaylistAssembler,
    spotify::SpotifyClient,
    success,
    types::{EnergyLevel, Mood, PlaylistRequest},
    utils,
};

/// Generates a playlist and prints it.
///
/// # Arguments
///
/// * `mood` - Target mood
/// * `genres` - Seed genres, at most five are used
/// * `energy` - Optional energy level override
/// * `duration` - Target length in minutes
/// * `json` - Print the playlist as JSON instead of a table
pub async fn generate(
    mood: Mood,
    genres: Vec<String>,
    energy: Option<EnergyLevel>,
    duration: Option<u32>,
    json: bool,
) {
    let mut request = PlaylistRequest::new(mood);
    if !genres.is_empty() {
        request = request.with_genres(genres);
    }
    if let Some(level) = energy {
        request = request.with_energy_level(level);
    }
    if let Some(minutes) = duration {
        request = request.with_duration(minutes);
    }

    if let Err(e) = request.validate() {
        error!("{}", e);
    }

    let client = Arc::new(SpotifyClient::new(config::SpotifyConfig::from_env()));
    let assembler = PlaylistAssembler::new(client);

    let pb = super::spinner("Generating playlist...");
    let result = assembler.generate_playlist(&request).await;
    pb.finish_and_clear();

    let playlist = match result {
        Ok(playlist) => playlist,
        Err(e) => error!("Cannot generate playlist. Err: {}", e),
    };

    if json {
        match serde_json::to_string_pretty(&playlist) {
            Ok(out) => println!("{}", out),
            Err(e) => error!("Cannot serialize playlist. Err: {}", e),
        }
        return;
    }

    success!("{}", playlist.name);
    info!("{}", playlist.description);

    if playlist.tracks.is_empty() {
        info!("No tracks matched these preferences.");
        return;
    }

    println!("{}", Table::new(utils::track_table_rows(&playlist.tracks)));
    info!(
        "{} tracks, {}",
        playlist.track_count,
        utils::format_duration(playlist.total_duration_ms)
    );
}
