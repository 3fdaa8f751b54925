use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use menorah_server::{api::app_router, build_state, config::Config, AppState};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

async fn test_app() -> (TempDir, Arc<AppState>, Router) {
    let tmp = TempDir::new().unwrap();
    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: tmp.path().join("test.db").to_string_lossy().to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: std::time::Duration::from_secs(30),
        static_dir: tmp.path().to_string_lossy().to_string(),
        upload_dir: tmp.path().join("uploads").to_string_lossy().to_string(),
    };
    let state = build_state(&config).await.unwrap();
    let app = app_router(state.clone(), &config);
    (tmp, state, app)
}

async fn request_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(payload) => builder
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn config_starts_with_defaults() {
    let (_tmp, _state, app) = test_app().await;

    let (status, config) = request_json(&app, "GET", "/api/config", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(config["goalAmount"], 10_000_000);
    assert_eq!(config["presetAmounts"], json!([1800, 3600, 18000, 36000, 100000]));
    assert_eq!(config["displaySettings"]["primaryColor"], "#f59e0b");
}

#[tokio::test]
async fn config_update_persists_and_broadcasts() {
    let (_tmp, state, app) = test_app().await;
    let mut receiver = state.event_bus.subscribe();

    let (status, updated) = request_json(
        &app,
        "PUT",
        "/api/config",
        Some(json!({
            "goalAmount": 5_000_000.9,
            "menorahSegments": [
                { "id": "candle-1", "thresholdPercent": 12.5, "order": 1 },
                { "id": "candle-2", "thresholdPercent": 25.0, "order": 2 }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["goalAmount"], 5_000_000);
    assert_eq!(updated["menorahSegments"].as_array().unwrap().len(), 2);

    let event_json = serde_json::to_value(receiver.recv().await.unwrap()).unwrap();
    assert_eq!(event_json["type"], "config:updated");
    assert_eq!(event_json["config"]["goalAmount"], 5_000_000);

    let (_, fetched) = request_json(&app, "GET", "/api/config", None).await;
    assert_eq!(fetched["goalAmount"], 5_000_000);
}

#[tokio::test]
async fn invalid_goal_is_rejected() {
    let (_tmp, _state, app) = test_app().await;

    let (status, _) =
        request_json(&app, "PUT", "/api/config", Some(json!({ "goalAmount": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, config) = request_json(&app, "GET", "/api/config", None).await;
    assert_eq!(config["goalAmount"], 10_000_000);
}

#[tokio::test]
async fn display_settings_merge_keeps_previous_on_invalid_color() {
    let (_tmp, _state, app) = test_app().await;

    let (status, updated) = request_json(
        &app,
        "PUT",
        "/api/config",
        Some(json!({ "displaySettings": { "primaryColor": "#123abc" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["displaySettings"]["primaryColor"], "#123abc");

    // Malformed color is dropped rather than failing the request.
    let (status, updated) = request_json(
        &app,
        "PUT",
        "/api/config",
        Some(json!({ "displaySettings": { "primaryColor": "not-a-color" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["displaySettings"]["primaryColor"], "#123abc");
}
