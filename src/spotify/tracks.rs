use tracing::instrument;

use crate::{
    error::PlaylistError,
    spotify::SpotifyClient,
    types::{SearchResponse, SpotifyTrack, Track},
};

impl SpotifyClient {
    /// Searches the catalog for tracks matching free text.
    ///
    /// Returns the `tracks.items` page in Spotify's order.
    ///
    /// # Arguments
    ///
    /// * `text` - Search query, e.g. `"artist:Daft Punk"`
    /// * `limit` - Page size (Spotify accepts 1-50)
    /// * `offset` - Index of the first result
    #[instrument(skip(self))]
    pub async fn search_tracks(
        &self,
        text: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Track>, PlaylistError> {
        let params = [
            ("q", text.to_string()),
            ("type", "track".to_string()),
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ];

        let res: SearchResponse = self.get_json("search tracks", "search", &params).await?;
        Ok(res.tracks.items.into_iter().map(Track::from).collect())
    }

    /// Looks up a single track by its Spotify id.
    ///
    /// Ids are base62; anything else is refused before a request is made
    /// so it cannot alter the request path.
    #[instrument(skip(self))]
    pub async fn get_track(&self, id: &str) -> Result<Track, PlaylistError> {
        if !is_spotify_id(id) {
            return Err(PlaylistError::Validation(format!(
                "'{id}' is not a Spotify track id"
            )));
        }

        let track: SpotifyTrack = self
            .get_json("get track", &format!("tracks/{id}"), &[])
            .await?;
        Ok(Track::from(track))
    }
}

fn is_spotify_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric())
}
