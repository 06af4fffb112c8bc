use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Short-lived bearer credential returned by the token refresh.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        AccessToken(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artists: Vec<Artist>,
}

impl Track {
    pub fn uri(&self) -> String {
        format!("spotify:track:{}", self.id)
    }

    /// Name of the first credited artist.
    pub fn main_artist(&self) -> &str {
        self.artists
            .first()
            .map(|artist| artist.name.as_str())
            .unwrap_or("unknown artist")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikedSong {
    pub added_at: DateTime<Utc>,
    pub track: Track,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikedTracksResponse {
    #[serde(default)]
    pub total: Option<u64>,
    pub items: Vec<LikedSong>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistOwner {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub owner: Option<PlaylistOwner>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserPlaylistsResponse {
    // Spotify occasionally returns null entries in this list.
    pub items: Vec<Option<Playlist>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub owner: Option<PlaylistOwner>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksResponse {
    pub items: Vec<PlaylistTrackItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrackItem {
    pub track: Option<PlaylistTrackRef>,
}

/// Minimal view of a playlist entry; local files and removed tracks have no id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrackRef {
    pub id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub track: String,
    pub artist: String,
    pub status: String,
}
