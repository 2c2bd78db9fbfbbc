use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tower::ServiceExt;

use tomato_clock::{
    create_router,
    services::{Notification, NotificationQueue},
    state::{AppState, Durations, TimerMode},
    tasks::countdown_task,
    timer::{ManualTickDriver, TokioTickDriver},
};

fn manual_state(mode: TimerMode) -> (Arc<AppState>, mpsc::UnboundedReceiver<Notification>) {
    let (queue, rx) = NotificationQueue::new();
    let state = AppState::new(
        0,
        "127.0.0.1".to_string(),
        Durations::default(),
        mode,
        Box::new(ManualTickDriver::new()),
        Box::new(queue),
    );
    (Arc::new(state), rx)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
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
async fn health_reports_ok() {
    let (state, _rx) = manual_state(TimerMode::Cycle);
    let app = create_router(state);

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn fresh_timer_shows_full_work_phase() {
    let (state, _rx) = manual_state(TimerMode::Cycle);
    let app = create_router(state);

    let (status, body) = send(&app, "GET", "/timer", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["display"], "25:00");
    assert_eq!(body["timer"]["phase"], "work");
    assert_eq!(body["timer"]["running"], false);
    assert_eq!(body["display"]["text"], "25:00");
}

#[tokio::test]
async fn start_is_idempotent_and_reset_restores_work() {
    let (state, _rx) = manual_state(TimerMode::Cycle);
    let app = create_router(Arc::clone(&state));

    let (_, body) = send(&app, "POST", "/timer/start", None).await;
    assert_eq!(body["message"], "Timer started");
    assert_eq!(body["timer"]["running"], true);

    let (_, body) = send(&app, "POST", "/timer/start", None).await;
    assert_eq!(body["message"], "Timer already running");

    let generation = state.controller.lock().unwrap().generation();
    assert_eq!(generation, 1);
    state.apply_tick(generation).unwrap();

    let (_, body) = send(&app, "GET", "/timer", None).await;
    assert_eq!(body["display"]["text"], "24:59");

    let (_, body) = send(&app, "POST", "/timer/reset", None).await;
    assert_eq!(body["status"], "idle");
    assert_eq!(body["timer"]["display"], "25:00");
    assert_eq!(body["timer"]["running"], false);

    let (_, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(body["last_action"], "reset");
}

#[tokio::test]
async fn stop_pauses_the_countdown() {
    let (state, _rx) = manual_state(TimerMode::Single);
    let app = create_router(Arc::clone(&state));

    let (_, body) = send(&app, "POST", "/timer/stop", None).await;
    assert_eq!(body["message"], "Timer was not running");

    send(&app, "POST", "/timer/start", None).await;
    let generation = state.controller.lock().unwrap().generation();
    state.apply_tick(generation).unwrap();

    let (_, body) = send(&app, "POST", "/timer/stop", None).await;
    assert_eq!(body["message"], "Timer stopped");
    assert_eq!(body["timer"]["remaining_seconds"], 1499);
    assert!(!state.apply_tick(generation).unwrap());
}

#[tokio::test]
async fn cycle_notifies_break_time_once() {
    let (state, mut rx) = manual_state(TimerMode::Cycle);
    state.start_timer().unwrap();
    let generation = state.controller.lock().unwrap().generation();

    for _ in 0..1500 {
        state.apply_tick(generation).unwrap();
    }

    let snapshot = state.get_timer_snapshot().unwrap();
    assert_eq!(snapshot.remaining_seconds, 300);
    assert_eq!(snapshot.display, "05:00");

    let notification = rx.recv().await.unwrap();
    assert_eq!(notification.message, "Break Time!");
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn todo_endpoints_validate_input() {
    let (state, _rx) = manual_state(TimerMode::Cycle);
    let app = create_router(state);

    let (status, body) = send(&app, "POST", "/todos", Some(json!({ "text": "   " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please enter a task.");

    let (status, body) = send(&app, "POST", "/todos", Some(json!({ "text": "Review notes" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["item"]["id"].as_u64().unwrap();

    let (_, body) = send(&app, "GET", "/todos", None).await;
    assert_eq!(body["items"][0]["text"], "Review notes");

    let (status, _) = send(&app, "DELETE", &format!("/todos/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "DELETE", &format!("/todos/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn weather_lookup_reports_conditions_and_misses() {
    let (state, _rx) = manual_state(TimerMode::Cycle);
    let app = create_router(state);

    let (status, body) = send(&app, "GET", "/weather?city=Paris", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("Rainy"));
    assert_eq!(body["found"], true);
    assert_eq!(body["display"]["color"], "#ADD8E6");

    let (_, body) = send(&app, "GET", "/weather?city=Atlantis", None).await;
    assert_eq!(body["message"], "City not found in mock data.");
    assert_eq!(body["color"], "#FF6347");
    assert_eq!(body["display"]["text"], "City not found in mock data.");
    assert_eq!(body["display"]["color"], "#FF6347");

    let (_, body) = send(&app, "GET", "/weather", None).await;
    assert_eq!(body["message"], "Please enter a city name.");
}

#[tokio::test(start_paused = true)]
async fn tokio_driver_counts_down_in_real_time() {
    let (driver, tick_rx) = TokioTickDriver::new();
    let (queue, mut rx) = NotificationQueue::new();
    let state = Arc::new(AppState::new(
        0,
        "127.0.0.1".to_string(),
        Durations::new(3, 2).unwrap(),
        TimerMode::Single,
        Box::new(driver),
        Box::new(queue),
    ));
    tokio::spawn(countdown_task(Arc::clone(&state), tick_rx));

    state.start_timer().unwrap();
    // Only one driver even if start is pressed again
    state.start_timer().unwrap();

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(state.get_display().text, "00:02");

    let notification = rx.recv().await.unwrap();
    assert_eq!(notification.message, "Time's up!");
    let snapshot = state.get_timer_snapshot().unwrap();
    assert!(!snapshot.running);
    assert_eq!(snapshot.remaining_seconds, 0);

    // The driver stays cancelled after expiry
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(state.get_timer_snapshot().unwrap().remaining_seconds, 0);
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn reset_stops_real_ticks() {
    let (driver, tick_rx) = TokioTickDriver::new();
    let (queue, _rx) = NotificationQueue::new();
    let state = Arc::new(AppState::new(
        0,
        "127.0.0.1".to_string(),
        Durations::new(10, 5).unwrap(),
        TimerMode::Cycle,
        Box::new(driver),
        Box::new(queue),
    ));
    tokio::spawn(countdown_task(Arc::clone(&state), tick_rx));

    state.start_timer().unwrap();
    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert_eq!(state.get_timer_snapshot().unwrap().remaining_seconds, 8);

    state.reset_timer().unwrap();
    tokio::time::sleep(Duration::from_secs(3)).await;
    let snapshot = state.get_timer_snapshot().unwrap();
    assert_eq!(snapshot.remaining_seconds, 10);
    assert!(!snapshot.running);
}
