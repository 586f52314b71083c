use std::{sync::Arc, time::Duration};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tokio::time::sleep;
use tower::ServiceExt;

use countdown_timer::{
    create_router, services::SystemHaptics, AppState, TimerSnapshot, TimerState,
};

fn app() -> Router {
    let state = Arc::new(AppState::new(
        20554,
        "127.0.0.1".to_string(),
        SystemHaptics::unavailable(),
    ));
    create_router(state)
}

async fn call(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test(start_paused = true)]
async fn buttons_drive_the_countdown() {
    let app = app();

    let (status, body) = call(&app, "POST", "/start").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["timer"]["state"], "STARTED");
    assert_eq!(body["screen"]["text"], "10");

    sleep(Duration::from_millis(3_500)).await;
    let (_, body) = call(&app, "GET", "/screen").await;
    assert_eq!(body["screen"]["text"], "7");
    assert_eq!(body["remaining_millis"], 6_500);
    assert_eq!(body["suspended"], false);
    assert_eq!(body["last_action"], "start");

    let (status, body) = call(&app, "POST", "/pause").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["state"], "PAUSED");
    assert_eq!(body["timer"]["remainingDurationMillis"], 6_500);

    let (status, body) = call(&app, "POST", "/pause").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ignored");

    let (_, body) = call(&app, "POST", "/reset").await;
    assert_eq!(body["timer"]["state"], "CREATED");
    assert_eq!(body["timer"]["remainingDurationMillis"], 0);
    assert_eq!(body["screen"]["text"], "");
}

#[tokio::test(start_paused = true)]
async fn start_twice_raises_notice() {
    let app = app();

    call(&app, "POST", "/start").await;
    sleep(Duration::from_millis(1_200)).await;

    let (status, body) = call(&app, "POST", "/start").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ignored");
    assert_eq!(body["screen"]["notice"], "Timer is already active");
    assert_eq!(body["timer"]["anchorTimestamp"], 0);
}

#[tokio::test(start_paused = true)]
async fn countdown_ends_with_message() {
    let app = app();

    call(&app, "POST", "/start").await;
    sleep(Duration::from_secs(11)).await;

    let (_, body) = call(&app, "GET", "/screen").await;
    assert_eq!(body["screen"]["text"], "Timer ended!");
    assert_eq!(body["timer"]["state"], "ENDED");
}

#[tokio::test(start_paused = true)]
async fn lifecycle_round_trip() {
    let app = app();

    call(&app, "POST", "/start").await;
    sleep(Duration::from_millis(2_500)).await;

    let (status, body) = call(&app, "POST", "/lifecycle/suspend").await;
    assert_eq!(status, StatusCode::OK);
    let saved: TimerSnapshot = serde_json::from_value(body["timer"].clone()).unwrap();
    assert_eq!(saved.state, TimerState::Started);

    let (status, _) = call(&app, "POST", "/start").await;
    assert_eq!(status, StatusCode::CONFLICT);
    let (status, _) = call(&app, "POST", "/lifecycle/suspend").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = call(&app, "GET", "/snapshot").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_value::<TimerSnapshot>(body).unwrap(), saved);

    sleep(Duration::from_millis(2_000)).await;

    let (status, body) = call(&app, "POST", "/lifecycle/resume").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["state"], "STARTED");
    assert_eq!(body["screen"]["text"], "6");

    let (status, _) = call(&app, "POST", "/lifecycle/resume").await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn health_reports_version() {
    let app = app();
    let (status, body) = call(&app, "GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
