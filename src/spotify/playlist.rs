use crate::{
    error::Result,
    types::{
        AccessToken, AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, GetUserPlaylistsResponse, Playlist, PlaylistTracksResponse,
    },
};

use super::{SpotifyClient, read_json};

impl SpotifyClient {
    /// Lists the first `limit` playlists of the current user.
    ///
    /// Null entries in the response are dropped.
    pub async fn get_user_playlists(&self, token: &AccessToken, limit: u32) -> Result<Vec<Playlist>> {
        let response = self
            .client
            .get(self.api_url("/me/playlists"))
            .query(&[("limit", limit)])
            .bearer_auth(token.as_str())
            .send()
            .await?;

        let res: GetUserPlaylistsResponse = read_json(response, "user playlists").await?;
        Ok(res.items.into_iter().flatten().collect())
    }

    /// Creates a new playlist for `owner_id`.
    ///
    /// A response without an `id` is a decode error; the caller never sees a
    /// playlist it cannot address.
    pub async fn create(
        &self,
        token: &AccessToken,
        owner_id: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<Playlist> {
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: description.to_string(),
            public,
        };

        let response = self
            .client
            .post(self.api_url(&format!("/users/{}/playlists", owner_id)))
            .bearer_auth(token.as_str())
            .json(&body)
            .send()
            .await?;

        let created: CreatePlaylistResponse = read_json(response, "created playlist").await?;
        Ok(Playlist {
            id: created.id,
            name: created.name,
            owner: created.owner,
        })
    }

    /// Returns the ids of the first `limit` entries of a playlist.
    ///
    /// Entries without a track id (local files, removed tracks) are skipped.
    pub async fn get_track_ids(
        &self,
        token: &AccessToken,
        playlist_id: &str,
        limit: u32,
    ) -> Result<Vec<String>> {
        let response = self
            .client
            .get(self.api_url(&format!("/playlists/{}/tracks", playlist_id)))
            .query(&[("limit", limit)])
            .bearer_auth(token.as_str())
            .send()
            .await?;

        let res: PlaylistTracksResponse = read_json(response, "playlist tracks").await?;
        Ok(res
            .items
            .into_iter()
            .filter_map(|item| item.track.and_then(|t| t.id))
            .collect())
    }

    /// Appends track URIs to a playlist.
    ///
    /// The URIs go in a JSON body so the POST always carries a content length;
    /// Spotify rejects bodiless POSTs with 411.
    pub async fn add_tracks(&self, token: &AccessToken, playlist_id: &str, uris: &[String]) -> Result<()> {
        let body = AddTrackToPlaylistRequest {
            uris: uris.to_vec(),
        };

        let response = self
            .client
            .post(self.api_url(&format!("/playlists/{}/tracks", playlist_id)))
            .bearer_auth(token.as_str())
            .json(&body)
            .send()
            .await?;

        let _: AddTrackToPlaylistResponse = read_json(response, "add track").await?;
        Ok(())
    }
}
