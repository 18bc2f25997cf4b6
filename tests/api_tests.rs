use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use coursio::config::Config;
use coursio::ingest::fetcher::{
    FetchError, FetchedPlaylist, FetchedVideo, PlaylistSource,
};

/// Serves a single canned playlist; any other ID is NotFound, mirroring the
/// production fetcher's contract.
struct FixedSource {
    playlist: FetchedPlaylist,
}

#[async_trait::async_trait]
impl PlaylistSource for FixedSource {
    async fn fetch_playlist(&self, playlist_id: &str) -> Result<FetchedPlaylist, FetchError> {
        if playlist_id == self.playlist.youtube_id {
            Ok(self.playlist.clone())
        } else {
            Err(FetchError::NotFound(playlist_id.to_string()))
        }
    }
}

fn sample_playlist() -> FetchedPlaylist {
    let video = |youtube_id: &str, duration: i64, position: i32| FetchedVideo {
        youtube_id: youtube_id.to_string(),
        title: format!("Video {youtube_id}"),
        description: String::new(),
        thumbnail: Some(format!("https://i.ytimg.com/vi/{youtube_id}/hqdefault.jpg")),
        url: format!("https://www.youtube.com/watch?v={youtube_id}"),
        provider: "youtube".to_string(),
        duration,
        position,
    };

    FetchedPlaylist {
        youtube_id: "PL123".to_string(),
        title: "Rust Basics".to_string(),
        description: "An introductory course".to_string(),
        thumbnail: Some("https://i.ytimg.com/vi/abc/hqdefault.jpg".to_string()),
        videos: vec![video("vid1", 3723, 0), video("vid2", 45, 1)],
    }
}

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();

    let source = Arc::new(FixedSource {
        playlist: sample_playlist(),
    });

    let state = coursio::api::create_app_state_with_source(config, source)
        .await
        .expect("Failed to create app state");
    coursio::api::router(state).await
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_import_playlist() {
    let app = spawn_app().await;

    let response = app
        .oneshot(post_json(
            "/api/playlists/import",
            serde_json::json!({ "url": "https://www.youtube.com/playlist?list=PL123" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);

    let data = &body["data"];
    assert_eq!(data["title"], "Rust Basics");
    assert_eq!(data["slug"], "rust-basics");

    let videos = data["videos"].as_array().unwrap();
    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0]["duration"], 3723);
    assert_eq!(videos[1]["duration"], 45);
    assert_eq!(videos[0]["position"], 0);
    assert_eq!(videos[1]["position"], 1);
    assert_eq!(videos[0]["youtubeId"], "vid1");
    assert_eq!(videos[0]["provider"], "youtube");
    assert_eq!(videos[0]["url"], "https://www.youtube.com/watch?v=vid1");
}

#[tokio::test]
async fn test_import_invalid_url_is_400() {
    let app = spawn_app().await;

    let response = app
        .oneshot(post_json(
            "/api/playlists/import",
            serde_json::json!({ "url": "https://www.youtube.com/watch?v=abc" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_import_empty_url_is_400() {
    let app = spawn_app().await;

    let response = app
        .oneshot(post_json(
            "/api/playlists/import",
            serde_json::json!({ "url": "" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_import_unknown_playlist_is_404() {
    let app = spawn_app().await;

    let response = app
        .oneshot(post_json(
            "/api/playlists/import",
            serde_json::json!({ "url": "https://www.youtube.com/playlist?list=PLother" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reimport_is_409() {
    let app = spawn_app().await;
    let import = || {
        post_json(
            "/api/playlists/import",
            serde_json::json!({ "url": "https://www.youtube.com/playlist?list=PL123" }),
        )
    };

    let response = app.clone().oneshot(import()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(import()).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_missing_api_key_is_500() {
    // Real fetcher wiring with an empty API key: the import must
    // short-circuit before any network call.
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.youtube.api_key = String::new();

    let state = coursio::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");
    let app = coursio::api::router(state).await;

    let response = app
        .oneshot(post_json(
            "/api/playlists/import",
            serde_json::json!({ "url": "https://www.youtube.com/playlist?list=PL123" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_list_and_get_playlist() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/playlists/import",
            serde_json::json!({ "url": "https://www.youtube.com/playlist?list=PL123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/playlists")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let playlists = body["data"].as_array().unwrap();
    assert_eq!(playlists.len(), 1);
    assert_eq!(playlists[0]["slug"], "rust-basics");
    assert_eq!(playlists[0]["video_count"], 2);
    assert_eq!(playlists[0]["auto_sync"], false);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/playlists/rust-basics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["videos"].as_array().unwrap().len(), 2);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/playlists/no-such-slug")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sync_and_autosync_endpoints() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/playlists/import",
            serde_json::json!({ "url": "https://www.youtube.com/playlist?list=PL123" }),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    let id = body["data"]["id"].as_i64().unwrap();

    // No remote changes since import, so sync adds nothing.
    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/playlists/{id}/sync"),
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["added"], 0);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/playlists/{id}/autosync"))
                .header("Content-Type", "application/json")
                .body(Body::from(
                    serde_json::json!({ "enabled": true }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/playlists")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"][0]["auto_sync"], true);
}

#[tokio::test]
async fn test_sync_unknown_playlist_is_404() {
    let app = spawn_app().await;

    let response = app
        .oneshot(post_json("/api/playlists/999/sync", serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_playlist() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/playlists/import",
            serde_json::json!({ "url": "https://www.youtube.com/playlist?list=PL123" }),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    let id = body["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/playlists/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/playlists/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_system_status() {
    let app = spawn_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/system/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["database"], "ok");
}
