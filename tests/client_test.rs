use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Form, Json, Router,
    body::Bytes,
    extract::{Path, Query, State},
    http::{
        HeaderMap, StatusCode,
        header::{AUTHORIZATION, CONTENT_LENGTH},
    },
    routing::{get, post},
};
use chrono::NaiveDate;
use monthlify::{
    Error,
    config::{Credentials, Endpoints, Limits},
    spotify::{SpotifyApi, SpotifyClient},
    sync::{self, Stage, SyncRequest},
    types::AccessToken,
};
use serde_json::{Value, json};

// base64("client:secret")
const BASIC_AUTH: &str = "Basic Y2xpZW50OnNlY3JldA==";
const BEARER: &str = "Bearer access-token";

struct FakeState {
    requests: Mutex<Vec<String>>,
    token_status: StatusCode,
    create_body: Value,
    playlist_tracks: Mutex<Vec<Value>>,
}

type Shared = Arc<FakeState>;

impl FakeState {
    fn record(&self, request: String) {
        self.requests.lock().unwrap().push(request);
    }
}

fn bearer_ok(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == BEARER)
}

async fn token(
    State(state): State<Shared>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    state.record(format!(
        "POST /api/token auth={} grant_type={} refresh_token={}",
        auth,
        form.get("grant_type").cloned().unwrap_or_default(),
        form.get("refresh_token").cloned().unwrap_or_default(),
    ));

    if state.token_status != StatusCode::OK {
        return (
            state.token_status,
            Json(json!({ "error": "invalid_grant" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "access_token": "access-token",
            "token_type": "Bearer",
            "scope": "user-library-read playlist-modify-private",
            "expires_in": 3600
        })),
    )
}

async fn liked_tracks(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.record(format!(
        "GET /me/tracks limit={}",
        query.get("limit").cloned().unwrap_or_default()
    ));
    if !bearer_ok(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "total": 3,
            "items": [
                {
                    "added_at": "2025-01-14T10:00:00Z",
                    "track": {
                        "id": "abc123",
                        "name": "First",
                        "uri": "spotify:track:abc123",
                        "artists": [{ "id": "ar1", "name": "Artist A" }]
                    }
                },
                {
                    "added_at": "2025-01-02T08:15:00Z",
                    "track": {
                        "id": "xyz789",
                        "name": "Second",
                        "uri": "spotify:track:xyz789",
                        "artists": [{ "id": "ar2", "name": "Artist B" }]
                    }
                },
                {
                    "added_at": "2024-12-20T22:00:00Z",
                    "track": {
                        "id": "old456",
                        "name": "Old",
                        "uri": "spotify:track:old456",
                        "artists": [{ "id": "ar3", "name": "Artist C" }]
                    }
                }
            ]
        })),
    )
}

async fn playlists(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.record(format!(
        "GET /me/playlists limit={}",
        query.get("limit").cloned().unwrap_or_default()
    ));
    if !bearer_ok(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "items": [
                null,
                { "id": "dec", "name": "Dec'24", "owner": { "id": "owner-1" } }
            ]
        })),
    )
}

async fn create_playlist(
    State(state): State<Shared>,
    Path(owner): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.record(format!(
        "POST /users/{}/playlists name={} description={} public={}",
        owner, body["name"], body["description"], body["public"]
    ));
    if !bearer_ok(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    (StatusCode::CREATED, Json(state.create_body.clone()))
}

async fn playlist_tracks(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.record(format!(
        "GET /playlists/{}/tracks limit={}",
        id,
        query.get("limit").cloned().unwrap_or_default()
    ));
    let items = state.playlist_tracks.lock().unwrap().clone();
    (StatusCode::OK, Json(json!({ "items": items })))
}

async fn add_track(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let content_length = headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("none")
        .to_string();
    let uris: Vec<String> = body["uris"]
        .as_array()
        .map(|uris| {
            uris.iter()
                .filter_map(|u| u.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();
    state.record(format!(
        "POST /playlists/{}/tracks uris={} content-length-set={}",
        id,
        uris.join(","),
        content_length != "none"
    ));

    // Spotify answers bodiless POSTs with 411 Length Required
    if content_length == "none" {
        return (StatusCode::LENGTH_REQUIRED, Json(json!({})));
    }

    let mut tracks = state.playlist_tracks.lock().unwrap();
    for uri in uris {
        let track_id = uri.trim_start_matches("spotify:track:").to_string();
        tracks.push(json!({ "track": { "id": track_id } }));
    }
    (StatusCode::CREATED, Json(json!({ "snapshot_id": "snap" })))
}

async fn start_fake_spotify(state: Shared) -> Endpoints {
    let app = Router::new()
        .route("/api/token", post(token))
        .route("/v1/me/tracks", get(liked_tracks))
        .route("/v1/me/playlists", get(playlists))
        .route("/v1/users/{owner}/playlists", post(create_playlist))
        .route(
            "/v1/playlists/{id}/tracks",
            get(playlist_tracks).post(add_track),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Endpoints {
        api_url: format!("http://{}/v1", addr),
        token_url: format!("http://{}/api/token", addr),
    }
}

fn fake_state(token_status: StatusCode, create_body: Value) -> Shared {
    Arc::new(FakeState {
        requests: Mutex::new(Vec::new()),
        token_status,
        create_body,
        playlist_tracks: Mutex::new(vec![
            json!({ "track": null }),
            json!({ "track": { "id": "abc123" } }),
        ]),
    })
}

fn create_request() -> SyncRequest {
    SyncRequest {
        credentials: Credentials {
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            refresh_token: "refresh".to_string(),
        },
        owner_id: "owner-1".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        limits: Limits::default(),
        dry_run: false,
    }
}

#[tokio::test]
async fn test_full_sync_request_sequence() {
    let state = fake_state(
        StatusCode::OK,
        json!({ "id": "new-playlist", "name": "Jan'25", "owner": { "id": "owner-1" } }),
    );
    let endpoints = start_fake_spotify(Arc::clone(&state)).await;
    let client = SpotifyClient::new(endpoints);

    let report = sync::run(&client, &create_request()).await.unwrap();

    assert!(report.created);
    assert_eq!(report.playlist_id.as_deref(), Some("new-playlist"));
    assert_eq!(report.added(), 1);

    let requests = state.requests.lock().unwrap().clone();
    assert_eq!(
        requests,
        vec![
            format!(
                "POST /api/token auth={} grant_type=refresh_token refresh_token=refresh",
                BASIC_AUTH
            ),
            "GET /me/tracks limit=50".to_string(),
            "GET /me/playlists limit=50".to_string(),
            "POST /users/owner-1/playlists name=\"Jan'25\" description=\"Monthly Playlist\" public=false".to_string(),
            "GET /playlists/new-playlist/tracks limit=100".to_string(),
            "GET /playlists/new-playlist/tracks limit=100".to_string(),
            "POST /playlists/new-playlist/tracks uris=spotify:track:xyz789 content-length-set=true"
                .to_string(),
        ]
    );
}

#[tokio::test]
async fn test_token_http_error_is_auth_failure() {
    let state = fake_state(StatusCode::BAD_REQUEST, json!({}));
    let endpoints = start_fake_spotify(Arc::clone(&state)).await;
    let client = SpotifyClient::new(endpoints);

    let err = sync::run(&client, &create_request()).await.unwrap_err();

    assert_eq!(err.stage, Stage::Authenticate);
    assert!(matches!(err.source, Error::Auth(_)));

    // Nothing after the token exchange was attempted
    let requests = state.requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with("POST /api/token"));
}

#[tokio::test]
async fn test_create_without_id_is_decode_error() {
    let state = fake_state(StatusCode::OK, json!({ "name": "Jan'25" }));
    let endpoints = start_fake_spotify(Arc::clone(&state)).await;
    let client = SpotifyClient::new(endpoints);

    let err = client
        .create_playlist(
            &AccessToken::new("access-token"),
            "owner-1",
            "Jan'25",
            "Monthly Playlist",
            false,
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Decode {
            context: "created playlist",
            ..
        }
    ));
}

#[tokio::test]
async fn test_null_entries_are_skipped() {
    let state = fake_state(StatusCode::OK, json!({}));
    let endpoints = start_fake_spotify(Arc::clone(&state)).await;
    let client = SpotifyClient::new(endpoints);
    let token = AccessToken::new("access-token");

    let playlists = client.playlists(&token, 50).await.unwrap();
    assert_eq!(playlists.len(), 1);
    assert_eq!(playlists[0].name, "Dec'24");

    let ids = client.playlist_track_ids(&token, "any", 100).await.unwrap();
    assert_eq!(ids, vec!["abc123".to_string()]);
}

#[tokio::test]
async fn test_unauthorized_is_transport_error() {
    let state = fake_state(StatusCode::OK, json!({}));
    let endpoints = start_fake_spotify(Arc::clone(&state)).await;
    let client = SpotifyClient::new(endpoints);

    let err = client
        .liked_tracks(&AccessToken::new("wrong"), 50)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
}

#[tokio::test]
async fn test_add_track_sends_uris_in_body() {
    let state = fake_state(StatusCode::OK, json!({}));
    let endpoints = start_fake_spotify(Arc::clone(&state)).await;
    let client = SpotifyClient::new(endpoints);
    let token = AccessToken::new("access-token");

    client
        .add_tracks(&token, "p", &["spotify:track:abc".to_string()])
        .await
        .unwrap();

    let requests = state.requests.lock().unwrap().clone();
    assert_eq!(
        requests,
        vec!["POST /playlists/p/tracks uris=spotify:track:abc content-length-set=true".to_string()]
    );
    let ids = client.playlist_track_ids(&token, "p", 100).await.unwrap();
    assert!(ids.contains(&"abc".to_string()));
}
