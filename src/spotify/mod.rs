//! # Spotify Integration Module
//!
//! This module is the only place that talks to Spotify. It covers the six
//! remote operations a monthly sync needs and nothing else:
//!
//! ### Authentication
//! - `POST /api/token` - Refresh-token exchange using HTTP basic auth
//!
//! ### User Data
//! - `GET /me/tracks` - Most recent page of liked tracks
//! - `GET /me/playlists` - The caller's playlists, used to find this month's one
//!
//! ### Playlist Operations
//! - `POST /users/{user_id}/playlists` - Create the private monthly playlist
//! - `GET /playlists/{playlist_id}/tracks` - First page of existing entries
//! - `POST /playlists/{playlist_id}/tracks` - Append a single track URI
//!
//! ## Architecture
//!
//! ```text
//! Sync Driver (sync::run)
//!          ↓
//! SpotifyApi trait
//!          ↓
//! SpotifyClient (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! The driver only depends on [`SpotifyApi`], so tests swap in an in-memory
//! implementation. [`SpotifyClient`] is the production implementation; its
//! methods live next to the endpoints they call in [`auth`], [`tracks`] and
//! [`playlist`].
//!
//! ## Error Types
//!
//! - Connection failures and non-success statuses become [`Error::Transport`]
//! - Bodies that don't match the expected shape become [`Error::Decode`]
//! - Any failure during the token exchange becomes [`Error::Auth`]
//!
//! Response bodies are always read to completion (or dropped) before a call
//! returns, so connections go back to the pool on every path.
//!
//! ## Thread Safety
//!
//! Calls are awaited one after another on a single-threaded runtime. The only
//! shared value is the access token, which is never mutated after the refresh.

pub mod auth;
pub mod playlist;
pub mod tracks;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::{
    config::{Credentials, Endpoints},
    error::{Error, Result},
    types::{AccessToken, LikedSong, Playlist, Track},
};

/// Remote operations used by the sync workflow.
#[allow(async_fn_in_trait)]
pub trait SpotifyApi {
    /// Exchanges the refresh token for a fresh access token.
    async fn refresh_access_token(&self, credentials: &Credentials) -> Result<AccessToken>;

    /// Returns the most recent `limit` liked tracks as ordered by Spotify.
    async fn liked_tracks(&self, token: &AccessToken, limit: u32) -> Result<Vec<LikedSong>>;

    /// Returns up to `limit` of the caller's playlists.
    async fn playlists(&self, token: &AccessToken, limit: u32) -> Result<Vec<Playlist>>;

    /// Creates a playlist owned by `owner_id` and returns it.
    async fn create_playlist(
        &self,
        token: &AccessToken,
        owner_id: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<Playlist>;

    /// Returns the ids of the first `limit` tracks in the playlist.
    async fn playlist_track_ids(
        &self,
        token: &AccessToken,
        playlist_id: &str,
        limit: u32,
    ) -> Result<Vec<String>>;

    /// Appends a single track to the playlist.
    async fn add_track(&self, token: &AccessToken, playlist_id: &str, track: &Track) -> Result<()>;
}

/// HTTP implementation of [`SpotifyApi`].
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    client: Client,
    endpoints: Endpoints,
}

impl SpotifyClient {
    pub fn new(endpoints: Endpoints) -> Self {
        SpotifyClient {
            client: Client::new(),
            endpoints,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.endpoints.api_url, path)
    }
}

/// Reads a successful response body and decodes it as `T`.
async fn read_json<T: DeserializeOwned>(response: Response, context: &'static str) -> Result<T> {
    let body = response.error_for_status()?.text().await?;
    serde_json::from_str(&body).map_err(|e| Error::decode(context, e))
}

impl SpotifyApi for SpotifyClient {
    async fn refresh_access_token(&self, credentials: &Credentials) -> Result<AccessToken> {
        self.refresh_token(credentials).await
    }

    async fn liked_tracks(&self, token: &AccessToken, limit: u32) -> Result<Vec<LikedSong>> {
        self.get_liked_tracks(token, limit).await
    }

    async fn playlists(&self, token: &AccessToken, limit: u32) -> Result<Vec<Playlist>> {
        self.get_user_playlists(token, limit).await
    }

    async fn create_playlist(
        &self,
        token: &AccessToken,
        owner_id: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<Playlist> {
        self.create(token, owner_id, name, description, public).await
    }

    async fn playlist_track_ids(
        &self,
        token: &AccessToken,
        playlist_id: &str,
        limit: u32,
    ) -> Result<Vec<String>> {
        self.get_track_ids(token, playlist_id, limit).await
    }

    async fn add_track(&self, token: &AccessToken, playlist_id: &str, track: &Track) -> Result<()> {
        self.add_tracks(token, playlist_id, &[track.uri()]).await
    }
}
