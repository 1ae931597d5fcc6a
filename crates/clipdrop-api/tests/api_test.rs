//! HTTP API integration tests.
//!
//! Run with: `cargo test -p clipdrop-api --test api_test`
#![cfg(unix)]

mod helpers;

use helpers::{setup_test_app, PUBLIC_BASE_URL};

#[tokio::test]
async fn test_inspect_returns_best_format_and_details() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .get("/api/downloader")
        .add_query_param("url", "https://video.example.com/watch?v=abc&t=1")
        .await;

    assert_eq!(response.status_code(), 200);
    let data: serde_json::Value = response.json();
    assert_eq!(data["format"]["format_id"], "38");
    assert_eq!(data["format"]["ext"], "mp4");
    assert_eq!(data["format"]["resolution"], "1920x1080");
    assert_eq!(data["format"]["filesize"], 900);
    assert_eq!(data["format"]["format_note"], "1080p");
    assert_eq!(data["videoDetails"]["title"], "Sample clip");
    assert_eq!(
        data["videoDetails"]["thumbnail"],
        "https://i.example.com/sample.jpg"
    );
    assert_eq!(data["videoDetails"]["duration"], 95);
}

#[tokio::test]
async fn test_inspect_without_url_is_400() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client.get("/api/downloader").await;
    assert_eq!(response.status_code(), 400);
    let data: serde_json::Value = response.json();
    assert_eq!(data["error"], "No URL provided");
    assert_eq!(data["code"], "INVALID_INPUT");
    // Development config: the variant name is exposed
    assert_eq!(data["error_type"], "InvalidInput");

    let response = client
        .get("/api/downloader")
        .add_query_param("url", "   ")
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_inspect_without_audio_video_format_is_400() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get("/api/downloader")
        .add_query_param("url", "https://video.example.com/audio-only")
        .await;

    assert_eq!(response.status_code(), 400);
    let data: serde_json::Value = response.json();
    assert_eq!(
        data["error"],
        "No suitable format found with both video and audio"
    );
    assert_eq!(data["code"], "NO_SUITABLE_FORMAT");
}

#[tokio::test]
async fn test_inspect_tool_failure_is_500_with_details() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get("/api/downloader")
        .add_query_param("url", "https://video.example.com/broken")
        .await;

    assert_eq!(response.status_code(), 500);
    let data: serde_json::Value = response.json();
    assert_eq!(data["error"], "Failed to process video");
    assert!(data["details"]
        .as_str()
        .unwrap()
        .contains("Unsupported URL"));
}

#[tokio::test]
async fn test_download_publishes_video() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/download")
        .json(&serde_json::json!({
            "url": "https://video.example.com/watch?v=abc",
            "format": "38"
        }))
        .await;

    assert_eq!(response.status_code(), 200);
    let data: serde_json::Value = response.json();
    assert_eq!(data["success"], true);

    let video_url = data["videoUrl"].as_str().unwrap();
    let key = video_url
        .strip_prefix(&format!("{}/", PUBLIC_BASE_URL))
        .expect("URL should point at the public base");
    assert!(key.starts_with("videos/"));
    assert!(key.ends_with(".mp4"));

    let stored = app.storage.read(key).await.unwrap();
    assert_eq!(stored, b"https://video.example.com/watch?v=abc");

    // Nothing left behind in the download root
    let leftovers = std::fs::read_dir(app.download_dir()).unwrap().count();
    assert_eq!(leftovers, 0);
}

#[tokio::test]
async fn test_download_requires_url_and_format() {
    let app = setup_test_app().await;
    let client = app.client();

    for body in [
        serde_json::json!({ "url": "https://video.example.com/watch?v=abc" }),
        serde_json::json!({ "format": "38" }),
        serde_json::json!({ "url": "", "format": "38" }),
    ] {
        let response = client.post("/api/download").json(&body).await;
        assert_eq!(response.status_code(), 400);
        let data: serde_json::Value = response.json();
        assert_eq!(data["error"], "URL and format are required");
    }
}

#[tokio::test]
async fn test_download_rejects_invalid_json() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/download")
        .content_type("application/json")
        .text("{not json")
        .await;

    assert_eq!(response.status_code(), 400);
    let data: serde_json::Value = response.json();
    assert_eq!(data["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_download_unavailable_format_is_500() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/download")
        .json(&serde_json::json!({
            "url": "https://video.example.com/watch?v=abc",
            "format": "missing"
        }))
        .await;

    assert_eq!(response.status_code(), 500);
    let data: serde_json::Value = response.json();
    assert_eq!(data["code"], "EXTERNAL_TOOL_ERROR");
    assert!(data["details"]
        .as_str()
        .unwrap()
        .contains("Requested format is not available"));
}

#[tokio::test]
async fn test_health_and_readiness() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client.get("/health").await;
    assert_eq!(response.status_code(), 200);
    let data: serde_json::Value = response.json();
    assert_eq!(data["status"], "alive");

    let response = client.get("/ready").await;
    assert_eq!(response.status_code(), 200);
    let data: serde_json::Value = response.json();
    assert_eq!(data["media_tool"], "ready");
    assert_eq!(data["media_tool_version"], "2024.08.06");
    assert_eq!(data["storage_backend"], "local");
}

#[tokio::test]
async fn test_openapi_document_lists_endpoints() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/openapi.json").await;
    assert_eq!(response.status_code(), 200);
    let data: serde_json::Value = response.json();
    assert!(data["paths"]["/api/downloader"].is_object());
    assert!(data["paths"]["/api/download"].is_object());
}
