use tracing::instrument;

use crate::{
    error::PlaylistError,
    spotify::SpotifyClient,
    types::{RecommendationQuery, RecommendationsResponse, Track},
};

impl SpotifyClient {
    /// Retrieves track recommendations for the given constraints.
    ///
    /// The query is flattened into request parameters by
    /// [`RecommendationQuery::to_params`]; an unset limit becomes 20.
    /// Tracks come back in the order Spotify returned them, converted to
    /// [`Track`] but otherwise untouched. Each call is a live round trip.
    ///
    /// # Arguments
    ///
    /// * `query` - Seed genres and valence/energy bounds
    ///
    /// # Errors
    ///
    /// Token errors are returned as-is. Any transport, HTTP or decoding
    /// failure of the recommendation call itself becomes
    /// `RecommendationFetch`. There is no retry.
    ///
    /// # Example
    ///
    /// ```
    /// let query = map_preferences(&PlaylistRequest::new(Mood::Happy));
    /// let tracks = client.get_recommendations(&query).await?;
    /// ```
    #[instrument(skip(self), fields(limit = ?query.limit))]
    pub async fn get_recommendations(
        &self,
        query: &RecommendationQuery,
    ) -> Result<Vec<Track>, PlaylistError> {
        let res: RecommendationsResponse = self
            .get_json(
                "get track recommendations",
                "recommendations",
                &query.to_params(),
            )
            .await?;

        tracing::debug!("Received {} recommended tracks", res.tracks.len());
        Ok(res.tracks.into_iter().map(Track::from).collect())
    }
}
