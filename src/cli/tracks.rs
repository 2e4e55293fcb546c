use tabled::Table;

use crate::{config, error, info, spotify::SpotifyClient, success, utils};

pub async fn search(query: String, limit: u32, offset: u32) {
    let client = SpotifyClient::new(config::SpotifyConfig::from_env());

    let pb = super::spinner("Searching tracks...");
    let result = client.search_tracks(&query, limit, offset).await;
    pb.finish_and_clear();

    match result {
        Ok(tracks) if tracks.is_empty() => info!("No tracks found for '{}'", query),
        Ok(tracks) => println!("{}", Table::new(utils::track_table_rows(&tracks))),
        Err(e) => error!("Cannot search tracks. Err: {}", e),
    }
}

pub async fn track(id: String) {
    let client = SpotifyClient::new(config::SpotifyConfig::from_env());

    let track = match client.get_track(&id).await {
        Ok(track) => track,
        Err(e) => error!("Cannot load track {}. Err: {}", id, e),
    };

    success!("{}", track.name);
    info!("Artists: {}", track.artists.join(", "));
    info!("Album:   {}", track.album);
    info!("Length:  {}", utils::format_duration(track.duration_ms));
    if !track.external_url.is_empty() {
        info!("Link:    {}", track.external_url);
    }
    if let Some(preview) = track.preview_url {
        info!("Preview: {}", preview);
    }
}
