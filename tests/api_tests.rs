use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use series_catalog::config::Config;
use std::path::PathBuf;
use tower::ServiceExt;

const BOUNDARY: &str = "series-catalog-test-boundary";

async fn spawn_app() -> Router {
    spawn_app_with_media().await.0
}

async fn spawn_app_with_media() -> (Router, PathBuf) {
    let id = uuid::Uuid::new_v4();
    let db_path = std::env::temp_dir().join(format!("series-catalog-api-{id}.db"));
    let media_root = std::env::temp_dir().join(format!("series-catalog-api-media-{id}"));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.media.media_root = media_root.display().to_string();

    let state = series_catalog::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    (series_catalog::api::router(state).await, media_root)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Builds a multipart body from text fields and an optional `(field, filename, bytes)` file.
fn multipart_request(
    method: &str,
    uri: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> Request<Body> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    if let Some((name, filename, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Creates "Breaking Bad" with season 1 and returns `(series_id, season_id)`.
async fn seed(app: &Router) -> (i64, i64) {
    let (status, body) = send(
        app,
        json_request("POST", "/api/series", &json!({ "title": "Breaking Bad" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let series_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        app,
        json_request(
            "POST",
            &format!("/api/series/{series_id}/seasons"),
            &json!({ "number": 1 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let season_id = body["data"]["id"].as_i64().unwrap();

    (series_id, season_id)
}

#[tokio::test]
async fn test_system_endpoints() {
    let app = spawn_app().await;

    let (status, body) = send(&app, get("/api/system/health/live")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "alive");

    let (status, body) = send(&app, get("/api/system/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["database"], true);
    assert_eq!(body["data"]["series_count"], 0);

    seed(&app).await;
    let (_, body) = send(&app, get("/api/system/status")).await;
    assert_eq!(body["data"]["series_count"], 1);
}

#[tokio::test]
async fn test_series_and_season_defaults() {
    let app = spawn_app().await;
    let (series_id, season_id) = seed(&app).await;

    let (status, body) = send(&app, get(&format!("/api/series/{series_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["slug"], "breaking-bad");
    assert_eq!(body["data"]["seasons"][0]["title"], "Season 1");

    let (status, body) = send(&app, get("/api/series/slug/breaking-bad")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"].as_i64(), Some(series_id));

    let (status, body) = send(&app, get(&format!("/api/seasons/{season_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["episodes"], json!([]));
}

#[tokio::test]
async fn test_error_status_codes() {
    let app = spawn_app().await;
    let (series_id, _) = seed(&app).await;

    let (status, body) = send(&app, get("/api/series/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, get("/api/series/0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        json_request("POST", "/api/series", &json!({ "title": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        json_request("POST", "/api/series", &json!({ "title": "Breaking Bad" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            &format!("/api/series/{series_id}/seasons"),
            &json!({ "number": 1 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        json_request("POST", "/api/series/999/seasons", &json!({ "number": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, get("/api/series?limit=0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_episode_upload_flow() {
    let app = spawn_app().await;
    let (series_id, season_id) = seed(&app).await;
    let uri = format!("/api/seasons/{season_id}/episodes");

    // Missing video
    let (status, _) = send(
        &app,
        multipart_request("POST", &uri, &[("title", "Pilot"), ("number", "1")], None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        multipart_request(
            "POST",
            &uri,
            &[("title", "Pilot"), ("number", "1"), ("duration_secs", "3480")],
            Some(("video", "pilot.mp4", b"fake-mp4".as_slice())),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["slug"], "pilot");
    assert_eq!(body["data"]["video"], "series/breaking-bad/season_1/pilot.mp4");
    assert_eq!(body["data"]["url"], "/series/breaking-bad/season-1/pilot/");
    assert_eq!(body["data"]["display_name"], "Breaking Bad S1E1 - Pilot");
    let episode_id = body["data"]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        multipart_request(
            "POST",
            &uri,
            &[("title", "Pilot"), ("number", "2")],
            Some(("video", "again.mp4", b"other".as_slice())),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app, get(&format!("/api/episodes/{episode_id}/series"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"].as_i64(), Some(series_id));

    let (status, body) = send(
        &app,
        multipart_request(
            "PUT",
            &format!("/api/episodes/{episode_id}/video"),
            &[],
            Some(("video", "pilot.mkv", b"fake-mkv".as_slice())),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["video"], "series/breaking-bad/season_1/pilot.mkv");
}

#[tokio::test]
async fn test_delete_series_cascades() {
    let app = spawn_app().await;
    let (series_id, season_id) = seed(&app).await;

    let (status, _) = send(
        &app,
        multipart_request(
            "POST",
            &format!("/api/seasons/{season_id}/episodes"),
            &[("title", "Pilot"), ("number", "1")],
            Some(("video", "pilot.mp4", b"fake-mp4".as_slice())),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/series/{series_id}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["seasons"], 1);
    assert_eq!(body["data"]["episodes"], 1);

    let (status, _) = send(&app, get(&format!("/api/seasons/{season_id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_season_moves_it() {
    let app = spawn_app().await;
    let (_, season_id) = seed(&app).await;

    let (_, body) = send(
        &app,
        json_request("POST", "/api/series", &json!({ "title": "El Camino" })),
    )
    .await;
    let other_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/seasons/{season_id}"),
            &json!({ "series_id": other_id, "number": 1 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["series_id"].as_i64(), Some(other_id));
    assert_eq!(body["data"]["title"], "Season 1");
}

#[tokio::test]
async fn test_streamed_upload_lands_intact() {
    let (app, media_root) = spawn_app_with_media().await;
    let (_, season_id) = seed(&app).await;

    let video: Vec<u8> = (0..=255u8).cycle().take(256 * 1024).collect();
    let (status, body) = send(
        &app,
        multipart_request(
            "POST",
            &format!("/api/seasons/{season_id}/episodes"),
            &[("title", "Pilot"), ("number", "1")],
            Some(("video", "pilot.mp4", video.as_slice())),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let stored = media_root.join(body["data"]["video"].as_str().unwrap());
    assert_eq!(std::fs::read(stored).unwrap(), video);

    // Rejected uploads leave nothing behind in staging either.
    let (status, _) = send(
        &app,
        multipart_request(
            "POST",
            &format!("/api/seasons/{season_id}/episodes"),
            &[("title", "Pilot"), ("number", "2")],
            Some(("video", "pilot.mp4", b"duplicate".as_slice())),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let staging = media_root.join(".staging");
    let leftovers = std::fs::read_dir(&staging).map_or(0, Iterator::count);
    assert_eq!(leftovers, 0);
}
