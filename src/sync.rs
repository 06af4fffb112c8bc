//! The monthly sync workflow.
//!
//! A run is strictly linear:
//!
//! ```text
//! Start → Authenticated → LikedTracksFetched → PlaylistResolved → TracksAppended → Done
//! ```
//!
//! The first failing step ends the run with a [`SyncError`] that names the
//! [`Stage`]; later steps are never attempted and nothing is rolled back.
//! Re-running is safe: the playlist is looked up before it is created and
//! each track is checked against the playlist before it is added.

use chrono::{Datelike, NaiveDate};

use crate::{
    config::{Credentials, Limits, PLAYLIST_DESCRIPTION},
    error::{Error, Result},
    info,
    spotify::SpotifyApi,
    types::{AccessToken, Playlist, Track},
    utils, warning,
};

/// Inputs of a single run.
#[derive(Debug, Clone)]
pub struct SyncRequest {
    pub credentials: Credentials,
    pub owner_id: String,
    pub date: NaiveDate,
    pub limits: Limits,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Authenticate,
    FetchLikedTracks,
    SearchPlaylist,
    CreatePlaylist,
    AppendTracks,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let step = match self {
            Stage::Authenticate => "getting access token",
            Stage::FetchLikedTracks => "getting liked songs",
            Stage::SearchPlaylist => "searching playlist",
            Stage::CreatePlaylist => "creating playlist",
            Stage::AppendTracks => "adding songs to playlist",
        };
        f.write_str(step)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Error {stage}: {source}")]
pub struct SyncError {
    pub stage: Stage,
    #[source]
    pub source: Error,
}

trait AtStage<T> {
    fn at(self, stage: Stage) -> std::result::Result<T, SyncError>;
}

impl<T> AtStage<T> for Result<T> {
    fn at(self, stage: Stage) -> std::result::Result<T, SyncError> {
        self.map_err(|source| SyncError { stage, source })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOutcome {
    Added,
    AlreadyPresent,
    /// Dry run: the track would have been added.
    WouldAdd,
}

impl std::fmt::Display for TrackOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackOutcome::Added => f.write_str("added"),
            TrackOutcome::AlreadyPresent => f.write_str("already present"),
            TrackOutcome::WouldAdd => f.write_str("would add"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackResult {
    pub track: Track,
    pub outcome: TrackOutcome,
}

#[derive(Debug, Clone)]
pub struct ResolvedPlaylist {
    pub playlist: Playlist,
    pub created: bool,
}

#[derive(Debug, Clone)]
pub struct SyncReport {
    pub playlist_name: String,
    /// `None` only for a dry run whose playlist does not exist yet.
    pub playlist_id: Option<String>,
    pub created: bool,
    pub tracks: Vec<TrackResult>,
}

impl SyncReport {
    pub fn added(&self) -> usize {
        self.tracks
            .iter()
            .filter(|t| t.outcome == TrackOutcome::Added)
            .count()
    }
}

/// Fetches one page of liked tracks and keeps those liked in `month`.
pub async fn fetch_current_month_tracks<A: SpotifyApi>(
    api: &A,
    token: &AccessToken,
    limit: u32,
    month: u32,
) -> Result<Vec<Track>> {
    let liked = api.liked_tracks(token, limit).await?;
    let tracks = utils::filter_liked_songs_for_month(liked, month);

    info!("Were found {} liked song(s) for this month", tracks.len());
    Ok(tracks)
}

/// Returns the first of the caller's playlists named exactly `name`.
pub async fn find_playlist<A: SpotifyApi>(
    api: &A,
    token: &AccessToken,
    name: &str,
    limit: u32,
) -> Result<Option<Playlist>> {
    let playlists = api.playlists(token, limit).await?;
    Ok(playlists.into_iter().find(|p| p.name == name))
}

/// Creates the private monthly playlist `name` for `owner_id`.
pub async fn create_monthly_playlist<A: SpotifyApi>(
    api: &A,
    token: &AccessToken,
    owner_id: &str,
    name: &str,
) -> Result<Playlist> {
    info!("Create playlist {}", name);
    api.create_playlist(token, owner_id, name, PLAYLIST_DESCRIPTION, false)
        .await
}

/// Finds the playlist called `name`, creating a private one if none exists.
pub async fn resolve_playlist<A: SpotifyApi>(
    api: &A,
    token: &AccessToken,
    owner_id: &str,
    name: &str,
    limit: u32,
) -> Result<ResolvedPlaylist> {
    if let Some(playlist) = find_playlist(api, token, name, limit).await? {
        info!("Playlist {} already exists", name);
        return Ok(ResolvedPlaylist {
            playlist,
            created: false,
        });
    }

    let playlist = create_monthly_playlist(api, token, owner_id, name).await?;
    Ok(ResolvedPlaylist {
        playlist,
        created: true,
    })
}

/// Adds each track not yet in the playlist, one request at a time.
///
/// Membership is re-read before every candidate, so a track is never added
/// twice as long as the playlist fits in `limit` entries. The first failing
/// request aborts the loop.
pub async fn append_tracks<A: SpotifyApi>(
    api: &A,
    token: &AccessToken,
    playlist_id: &str,
    tracks: &[Track],
    limit: u32,
    dry_run: bool,
) -> Result<Vec<TrackResult>> {
    let mut results = Vec::with_capacity(tracks.len());

    for track in tracks {
        info!(
            "Checking if the track {} by {} is already in the playlist.",
            track.name,
            track.main_artist()
        );
        let existing = api.playlist_track_ids(token, playlist_id, limit).await?;

        let outcome = if existing.iter().any(|id| id == &track.id) {
            TrackOutcome::AlreadyPresent
        } else if dry_run {
            TrackOutcome::WouldAdd
        } else {
            info!(
                "Adding the track {} by {} to the playlist.",
                track.name,
                track.main_artist()
            );
            api.add_track(token, playlist_id, track).await?;
            TrackOutcome::Added
        };

        results.push(TrackResult {
            track: track.clone(),
            outcome,
        });
    }

    Ok(results)
}

/// Runs one complete sync.
pub async fn run<A: SpotifyApi>(
    api: &A,
    request: &SyncRequest,
) -> std::result::Result<SyncReport, SyncError> {
    let playlist_name = utils::playlist_name(request.date);
    let limits = request.limits;

    let token = api
        .refresh_access_token(&request.credentials)
        .await
        .at(Stage::Authenticate)?;

    let tracks = fetch_current_month_tracks(api, &token, limits.liked_tracks, request.date.month())
        .await
        .at(Stage::FetchLikedTracks)?;

    let existing = find_playlist(api, &token, &playlist_name, limits.playlists)
        .await
        .at(Stage::SearchPlaylist)?;

    let playlist = match existing {
        Some(playlist) => {
            info!("Playlist {} already exists", playlist_name);
            Some(ResolvedPlaylist {
                playlist,
                created: false,
            })
        }
        None if request.dry_run => None,
        None => {
            let playlist = create_monthly_playlist(api, &token, &request.owner_id, &playlist_name)
                .await
                .at(Stage::CreatePlaylist)?;
            Some(ResolvedPlaylist {
                playlist,
                created: true,
            })
        }
    };

    let Some(resolved) = playlist else {
        warning!("Dry run: playlist {} would be created", playlist_name);
        return Ok(SyncReport {
            playlist_name,
            playlist_id: None,
            created: false,
            tracks: tracks
                .into_iter()
                .map(|track| TrackResult {
                    track,
                    outcome: TrackOutcome::WouldAdd,
                })
                .collect(),
        });
    };

    let results = append_tracks(
        api,
        &token,
        &resolved.playlist.id,
        &tracks,
        limits.playlist_tracks,
        request.dry_run,
    )
    .await
    .at(Stage::AppendTracks)?;

    Ok(SyncReport {
        playlist_name,
        playlist_id: Some(resolved.playlist.id),
        created: resolved.created,
        tracks: results,
    })
}
