use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use zeno::{
    create_router,
    services::RecordingNotifier,
    state::{AppState, PreferenceStore},
};

fn setup(dir: &TempDir) -> (Router, Arc<AppState>, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let state = Arc::new(AppState::new(
        20554,
        "127.0.0.1".to_string(),
        Duration::from_secs(10),
        notifier.clone(),
        PreferenceStore::new(dir.path().join("preferences.json")),
    ));
    (create_router(Arc::clone(&state)), state, notifier)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
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
async fn idle_timer_renders_start_button() {
    let dir = TempDir::new().unwrap();
    let (app, _, _) = setup(&dir);

    let (status, body) = send(&app, "GET", "/timer", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["phase"], "idle");
    assert_eq!(body["view"]["label"], "00:00");
    assert_eq!(body["view"]["primary"], "Start");
    assert_eq!(body["view"]["secondary_enabled"], false);
}

#[tokio::test]
async fn pause_while_idle_is_ignored() {
    let dir = TempDir::new().unwrap();
    let (app, _, _) = setup(&dir);

    let (status, body) = send(&app, "POST", "/timer/pause-resume", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ignored");
    assert_eq!(body["timer"]["phase"], "idle");
}

#[tokio::test]
async fn start_pause_resume_reset_cycle() {
    let dir = TempDir::new().unwrap();
    let (app, _, notifier) = setup(&dir);

    let (_, body) = send(&app, "POST", "/timer/start-reset", None).await;
    assert_eq!(body["status"], "started");
    assert_eq!(body["view"]["primary"], "Reset");
    assert_eq!(body["view"]["secondary"], "Pause");
    assert_eq!(body["view"]["secondary_enabled"], true);

    let (_, body) = send(&app, "POST", "/timer/pause-resume", None).await;
    assert_eq!(body["status"], "paused");
    assert_eq!(body["view"]["secondary"], "Resume");

    let (_, body) = send(&app, "POST", "/timer/pause-resume", None).await;
    assert_eq!(body["status"], "resumed");

    let (_, body) = send(&app, "POST", "/timer/start-reset", None).await;
    assert_eq!(body["status"], "reset");
    assert_eq!(body["timer"]["phase"], "idle");
    assert_eq!(body["timer"]["elapsed_seconds"], 0);
    assert!(notifier.calls().is_empty());
}

#[tokio::test]
async fn expiry_shows_in_status() {
    let dir = TempDir::new().unwrap();
    let (app, state, notifier) = setup(&dir);

    send(&app, "POST", "/timer/start-reset", None).await;
    state.tick(std::time::Instant::now() + Duration::from_secs(12)).unwrap();

    let (status, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["phase"], "idle");
    assert_eq!(body["timer"]["formatted_elapsed"], "00:10");
    assert_eq!(body["timer"]["expirations"], 1);
    assert_eq!(body["last_action"], "expired");
    assert_eq!(body["port"], 20554);
    assert_eq!(notifier.calls().len(), 1);
}

#[tokio::test]
async fn preferences_round_trip_through_api() {
    let dir = TempDir::new().unwrap();
    let (app, state, _) = setup(&dir);

    let (_, body) = send(&app, "GET", "/preferences", None).await;
    assert_eq!(body["show_status_bar"], true);

    let (status, body) = send(
        &app,
        "PUT",
        "/preferences",
        Some(serde_json::json!({ "show_status_bar": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["show_status_bar"], false);
    assert!(!state.preference_store.load().show_status_bar);

    let (_, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(body["preferences"]["show_status_bar"], false);
}

#[tokio::test]
async fn health_reports_version() {
    let dir = TempDir::new().unwrap();
    let (app, _, _) = setup(&dir);

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
