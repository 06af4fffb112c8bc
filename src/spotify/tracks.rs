use crate::{
    error::Result,
    types::{AccessToken, LikedSong, LikedTracksResponse},
};

use super::{SpotifyClient, read_json};

impl SpotifyClient {
    /// Retrieves one page of the user's liked tracks.
    ///
    /// Spotify returns saved tracks most recently liked first. No further
    /// pages are requested; `limit` is capped at 50 by the API.
    pub async fn get_liked_tracks(&self, token: &AccessToken, limit: u32) -> Result<Vec<LikedSong>> {
        let response = self
            .client
            .get(self.api_url("/me/tracks"))
            .query(&[("limit", limit)])
            .bearer_auth(token.as_str())
            .send()
            .await?;

        let res: LikedTracksResponse = read_json(response, "liked tracks").await?;
        Ok(res.items)
    }
}
