//! End-to-end smoke tests for the full smarthoused stack.
//!
//! Each test spins up the complete application (in-memory `SQLite`, the real
//! settings repository, the virtual house, the real house manager and axum
//! router) and exercises the HTTP layer via `tower::ServiceExt::oneshot`.
//! No TCP port is bound.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use smarthouse_adapter_http_axum::router;
use smarthouse_adapter_http_axum::state::AppState;
use smarthouse_adapter_storage_sqlite_sqlx::{Config, SqliteSettingsRepository};
use smarthouse_adapter_virtual::VirtualHouse;
use smarthouse_app::notifier::LogNotifier;
use smarthouse_app::services::house_manager::HouseManager;
use smarthouse_domain::device::DeviceValue;
use smarthouse_domain::engine::RuleEngine;
use tower::ServiceExt;

type State = AppState<VirtualHouse, SqliteSettingsRepository, LogNotifier>;

/// Build a fully-wired state backed by an in-memory `SQLite` database.
async fn state() -> State {
    let db = Config {
        database_url: "sqlite::memory:".to_string(),
    }
    .build()
    .await
    .expect("in-memory database should initialise");

    AppState::new(HouseManager::new(
        VirtualHouse::default(),
        SqliteSettingsRepository::new(db.pool().clone()),
        LogNotifier,
        RuleEngine::new("owner@example.com"),
    ))
}

async fn call(state: &State, request: Request<Body>) -> (StatusCode, Value) {
    let resp = router::build(state.clone()).oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let state = state().await;
    let resp = router::build(state)
        .oneshot(get("/health"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_show_virtual_devices_and_seeded_settings() {
    let state = state().await;

    let (status, body) = call(&state, get("/api/state")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["devices"]["values"]["leak_detector"], false);
    assert_eq!(body["settings"]["bedroom_target_temperature"], 21.0);
    assert_eq!(body["settings"]["hot_water_target_temperature"], 80.0);
}

// ---------------------------------------------------------------------------
// Rule cycles
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_leave_calm_house_untouched() {
    let state = state().await;

    let (status, body) = call(&state, post("/api/cycle", &json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["applied"], json!([]));
    assert_eq!(state.manager.controller().send_count(), 0);
}

#[tokio::test]
async fn should_shut_water_off_on_leak_and_alert_once() {
    let state = state().await;
    state.manager.controller().set("leak_detector", true);

    let (_, first) = call(&state, post("/api/cycle", &json!({}))).await;
    assert_eq!(first["notifications"], 1);
    assert_eq!(
        state.manager.controller().value("cold_water"),
        Some(DeviceValue::Bool(false))
    );
    assert_eq!(
        state.manager.controller().value("boiler"),
        Some(DeviceValue::Bool(false))
    );

    let (_, second) = call(&state, post("/api/cycle", &json!({}))).await;
    assert_eq!(second["notifications"], 0);
    assert_eq!(second["applied"], json!([]));
}

#[tokio::test]
async fn should_fail_with_bad_gateway_when_a_device_is_missing() {
    let state = state().await;
    state.manager.controller().remove("bedroom_temperature");

    let (status, body) = call(&state, post("/api/cycle", &json!({}))).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "No connection to controllers API");
    assert_eq!(state.manager.controller().send_count(), 0);
}

// ---------------------------------------------------------------------------
// Controls
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_toggle_light_and_persist_thresholds() {
    let state = state().await;
    let request = json!({
        "bedroom_light": true,
        "bathroom_light": false,
        "bedroom_target_temperature": 24.0,
        "hot_water_target_temperature": 70.0,
    });

    let (status, body) = call(&state, post("/api/controls", &request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "lights_toggled");
    assert_eq!(
        state.manager.controller().value("bedroom_light"),
        Some(DeviceValue::Bool(true))
    );

    let (_, overview) = call(&state, get("/api/state")).await;
    assert_eq!(overview["settings"]["bedroom_target_temperature"], 24.0);
    assert_eq!(overview["settings"]["hot_water_target_temperature"], 70.0);
}

#[tokio::test]
async fn should_run_rules_with_submitted_thresholds() {
    let state = state().await;
    // the virtual boiler reads 78, below 0.9 * 90
    let request = json!({
        "bedroom_light": false,
        "bathroom_light": false,
        "bedroom_target_temperature": 21.0,
        "hot_water_target_temperature": 90.0,
    });
    state.manager.controller().set("boiler", false);

    let (status, body) = call(&state, post("/api/controls", &request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "rules_evaluated");
    assert_eq!(body["applied"], json!([{"name": "boiler", "value": true}]));

    let (_, overview) = call(&state, get("/api/state")).await;
    assert_eq!(overview["settings"]["hot_water_target_temperature"], 90.0);
}

#[tokio::test]
async fn should_reject_invalid_controls_without_side_effects() {
    let state = state().await;
    let request = json!({
        "bedroom_light": true,
        "bathroom_light": true,
        "bedroom_target_temperature": 12.0,
        "hot_water_target_temperature": 80.0,
    });

    let (status, _) = call(&state, post("/api/controls", &request)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(state.manager.controller().send_count(), 0);
    let (_, overview) = call(&state, get("/api/state")).await;
    assert_eq!(overview["settings"]["bedroom_target_temperature"], 21.0);
}
