//! Configuration management for the monthly playlist job.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and an optional `.env.local` file. It provides the Spotify
//! credentials, the API endpoints and the page-size limits used by every run.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env.local` file in the working directory
//! 3. Application defaults (endpoints and limits only)

use std::{env, path::Path};

use crate::error::{Error, Result};

pub const CLIENT_ID_VAR: &str = "SPOTIFY_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "SPOTIFY_CLIENT_SECRET";
pub const REFRESH_TOKEN_VAR: &str = "SPOTIFY_REFRESH_TOKEN";
pub const USER_ID_VAR: &str = "SPOTIFY_USER_ID";
pub const API_URL_VAR: &str = "SPOTIFY_API_URL";
pub const TOKEN_URL_VAR: &str = "SPOTIFY_API_TOKEN_URL";

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Description given to every playlist the job creates.
pub const PLAYLIST_DESCRIPTION: &str = "Monthly Playlist";

const ENV_FILE: &str = ".env.local";

/// Loads environment variables from `.env.local` in the working directory.
///
/// The file is a development convenience: when it does not exist the call is
/// a no-op. Variables already present in the process environment win over the
/// file because `dotenv` never overrides existing values.
///
/// # Errors
///
/// Returns [`Error::Env`] if the file exists but cannot be read or parsed.
pub fn load_env() -> Result<()> {
    load_env_from(Path::new(ENV_FILE))
}

pub fn load_env_from(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    dotenv::from_path(path).map_err(|e| Error::Env(e.to_string()))
}

/// Client credentials and the long-lived refresh token.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

// Keep secrets out of debug output.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("refresh_token", &"***")
            .finish()
    }
}

/// Base URLs of the identity provider and the Web API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub api_url: String,
    pub token_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints {
            api_url: DEFAULT_API_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
        }
    }
}

/// Single-page sizes used for every listing call.
///
/// The job never paginates. Running it daily keeps a month's likes well below
/// one page of liked tracks; a playlist grown past `playlist_tracks` entries
/// may receive duplicates because only the first page is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub liked_tracks: u32,
    pub playlists: u32,
    pub playlist_tracks: u32,
}

impl Limits {
    pub const MAX_LIKED_TRACKS: u32 = 50;
    pub const MAX_PLAYLISTS: u32 = 50;
    pub const MAX_PLAYLIST_TRACKS: u32 = 100;

    /// Builds limits from optional overrides, clamping each to `1..=max`.
    pub fn with_overrides(
        liked_tracks: Option<u32>,
        playlists: Option<u32>,
        playlist_tracks: Option<u32>,
    ) -> Self {
        let clamp = |value: Option<u32>, max: u32| value.unwrap_or(max).clamp(1, max);
        Limits {
            liked_tracks: clamp(liked_tracks, Self::MAX_LIKED_TRACKS),
            playlists: clamp(playlists, Self::MAX_PLAYLISTS),
            playlist_tracks: clamp(playlist_tracks, Self::MAX_PLAYLIST_TRACKS),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            liked_tracks: Self::MAX_LIKED_TRACKS,
            playlists: Self::MAX_PLAYLISTS,
            playlist_tracks: Self::MAX_PLAYLIST_TRACKS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub endpoints: Endpoints,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first required variable that is
    /// unset or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(Error::Config { var })
        };
        let optional = |var: &str, default: &str| {
            lookup(var)
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Config {
            credentials: Credentials {
                client_id: required(CLIENT_ID_VAR)?,
                client_secret: required(CLIENT_SECRET_VAR)?,
                refresh_token: required(REFRESH_TOKEN_VAR)?,
            },
            endpoints: Endpoints {
                api_url: optional(API_URL_VAR, DEFAULT_API_URL),
                token_url: optional(TOKEN_URL_VAR, DEFAULT_TOKEN_URL),
            },
        })
    }
}
