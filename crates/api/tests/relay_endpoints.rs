//! Integration tests for the plugin protocol and raw command submission.

mod common;

use std::time::{Duration, Instant};

use axum::http::StatusCode;
use common::{body_json, get, post_json, test_config, wait_for_queue};
use figbridge_api::state::AppState;
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: registration returns the relay URL and shows up in host listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn register_returns_relay_url() {
    let state = common::test_state();
    let app = common::build_test_app(state.clone());

    let response = post_json(
        app.clone(),
        "/plugin/register",
        json!({ "fileKey": "fileA", "pluginVersion": "2.0.0" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["registered"], true);
    assert_eq!(json["relayUrl"], "http://127.0.0.1:0");

    let hosts = body_json(get(app, "/api/v1/hosts").await).await;
    assert_eq!(hosts["data"][0]["host_id"], "fileA");
    assert_eq!(hosts["data"][0]["version"], "2.0.0");
    assert_eq!(hosts["data"][0]["queued_commands"], 0);
}

// ---------------------------------------------------------------------------
// Test: polling a host nobody has queued for drains an empty list
// ---------------------------------------------------------------------------

#[tokio::test]
async fn poll_unknown_host_returns_empty_list() {
    let app = common::build_test_app(common::test_state());

    let response = get(app.clone(), "/commands/nobody").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "commands": [] }));

    // Polling alone does not make a host appear in the listing.
    let hosts = body_json(get(app, "/api/v1/hosts").await).await;
    assert_eq!(hosts["data"], json!([]));
}

// ---------------------------------------------------------------------------
// Test: submit -> poll -> post result resolves the waiting request
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submitted_command_resolves_with_host_data() {
    let state = common::test_state();
    let app = common::build_test_app(state.clone());

    let submit = tokio::spawn(post_json(
        app.clone(),
        "/api/v1/hosts/fileA/commands",
        json!({ "action": "CREATE_FRAME", "data": { "width": 100, "height": 50 } }),
    ));
    wait_for_queue(&state, "fileA").await;

    let polled = body_json(get(app.clone(), "/commands/fileA").await).await;
    let commands = polled["commands"].as_array().unwrap();
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0]["action"], "CREATE_FRAME");
    assert_eq!(commands[0]["data"], json!({ "width": 100, "height": 50 }));
    let operation_id = commands[0]["operationId"].as_str().unwrap().to_string();

    // The drain was destructive.
    let again = body_json(get(app.clone(), "/commands/fileA").await).await;
    assert_eq!(again["commands"], json!([]));

    let ack = post_json(
        app.clone(),
        "/results",
        json!({ "operationId": operation_id, "success": true, "data": { "nodeId": "1:23" } }),
    )
    .await;
    assert_eq!(body_json(ack).await, json!({ "received": true }));

    let response = submit.await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "data": { "nodeId": "1:23" } }));
    assert_eq!(state.relay.pending_count().await, 0);
}

// ---------------------------------------------------------------------------
// Test: host-reported failure maps to 502 with the message verbatim
// ---------------------------------------------------------------------------

#[tokio::test]
async fn host_failure_returns_502() {
    let state = common::test_state();
    let app = common::build_test_app(state.clone());

    let submit = tokio::spawn(post_json(
        app.clone(),
        "/api/v1/hosts/fileA/commands",
        json!({ "action": "APPLY_AUTO_LAYOUT", "data": { "nodeId": "1:1" } }),
    ));
    wait_for_queue(&state, "fileA").await;

    let polled = body_json(get(app.clone(), "/commands/fileA").await).await;
    let operation_id = polled["commands"][0]["operationId"].clone();

    post_json(
        app,
        "/results",
        json!({ "operationId": operation_id, "success": false, "error": "X" }),
    )
    .await;

    let response = submit.await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "REMOTE_EXECUTION_FAILED");
    assert_eq!(json["error"], "X");
}

// ---------------------------------------------------------------------------
// Test: failure without a message uses the generic one
// ---------------------------------------------------------------------------

#[tokio::test]
async fn host_failure_without_message_uses_default() {
    let state = common::test_state();
    let app = common::build_test_app(state.clone());

    let submit = tokio::spawn(post_json(
        app.clone(),
        "/api/v1/hosts/fileA/commands",
        json!({ "action": "CREATE_TEXT" }),
    ));
    wait_for_queue(&state, "fileA").await;

    let polled = body_json(get(app.clone(), "/commands/fileA").await).await;
    let operation_id = polled["commands"][0]["operationId"].clone();
    // `data` defaults to null when omitted.
    assert!(polled["commands"][0]["data"].is_null());

    post_json(app, "/results", json!({ "operationId": operation_id, "success": false })).await;

    let json = body_json(submit.await.unwrap()).await;
    assert_eq!(json["error"], "Operation failed");
}

// ---------------------------------------------------------------------------
// Test: a host that never polls produces 504 after the timeout
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_host_times_out_with_504() {
    let state = common::test_state();
    let app = common::build_test_app(state.clone());
    let started = Instant::now();

    let response = post_json(
        app,
        "/api/v1/hosts/fileB/commands",
        json!({ "action": "CREATE_RECTANGLE", "data": {}, "timeoutMs": 50 }),
    )
    .await;

    assert!(started.elapsed() >= Duration::from_millis(50));
    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "REMOTE_TIMEOUT");
    assert!(json["error"].as_str().unwrap().contains("50ms"));
    assert!(json["error"].as_str().unwrap().contains("fileB"));
    assert_eq!(state.relay.pending_count().await, 0);
}

// ---------------------------------------------------------------------------
// Test: results for unknown, malformed, or already-settled ids are acknowledged
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stale_and_malformed_results_are_acknowledged() {
    let app = common::build_test_app(common::test_state());

    for body in [
        json!({ "operationId": "not-a-token", "success": true }),
        json!({ "operationId": "5f0c6f7e-3c1b-4d7a-9a6e-2b8f1d4c9e10", "success": true, "data": 1 }),
        json!({ "operationId": "5f0c6f7e-3c1b-4d7a-9a6e-2b8f1d4c9e10", "success": false }),
    ] {
        let response = post_json(app.clone(), "/results", body).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "received": true }));
    }
}

// ---------------------------------------------------------------------------
// Test: a zero timeout is a validation error, not an instant timeout
// ---------------------------------------------------------------------------

#[tokio::test]
async fn zero_timeout_is_rejected() {
    let state = common::test_state();
    let app = common::build_test_app(state.clone());

    let response = post_json(
        app,
        "/api/v1/hosts/fileA/commands",
        json!({ "action": "CREATE_FRAME", "timeoutMs": 0 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    assert_eq!(state.relay.queue_depth("fileA").await, 0);
}

// ---------------------------------------------------------------------------
// Test: unknown actions are refused before anything is queued
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_action_is_refused() {
    let state = common::test_state();
    let app = common::build_test_app(state.clone());

    let response = post_json(
        app,
        "/api/v1/hosts/fileA/commands",
        json!({ "action": "DELETE_EVERYTHING" }),
    )
    .await;

    assert!(response.status().is_client_error());
    assert_eq!(state.relay.queue_depth("fileA").await, 0);
}

// ---------------------------------------------------------------------------
// Test: host listing reflects queued and pending work
// ---------------------------------------------------------------------------

#[tokio::test]
async fn host_listing_shows_queue_depth() {
    let state = common::test_state();
    let app = common::build_test_app(state.clone());

    let _submit = tokio::spawn(post_json(
        app.clone(),
        "/api/v1/hosts/fileC/commands",
        json!({ "action": "CREATE_BUTTON", "data": { "label": "Go" } }),
    ));
    wait_for_queue(&state, "fileC").await;

    let hosts = body_json(get(app.clone(), "/api/v1/hosts").await).await;
    let host = &hosts["data"][0];
    assert_eq!(host["host_id"], "fileC");
    assert_eq!(host["queued_commands"], 1);
    assert_eq!(host["pending_operations"], 1);
    assert!(host["registered_at"].is_null());

    let health = body_json(get(app, "/health").await).await;
    assert_eq!(health["pending_operations"], 1);
}

// ---------------------------------------------------------------------------
// Test: a submit timeout must fit inside the HTTP request timeout
// ---------------------------------------------------------------------------

fn short_request_timeout_state() -> AppState {
    let mut config = test_config();
    config.request_timeout_secs = 1;
    config.command_timeout_ms = 500;
    AppState::new(config)
}

#[tokio::test(start_paused = true)]
async fn timeout_beyond_request_timeout_is_rejected() {
    let state = short_request_timeout_state();
    let app = common::build_test_app(state.clone());

    for timeout_ms in [1000, 5000, u64::MAX] {
        let response = post_json(
            app.clone(),
            "/api/v1/hosts/fileC/commands",
            json!({ "action": "CREATE_FRAME", "timeoutMs": timeout_ms }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert!(json["error"].as_str().unwrap().contains("1000"));
    }

    assert_eq!(state.relay.pending_count().await, 0);
    assert_eq!(state.relay.queue_depth("fileC").await, 0);
}

#[tokio::test(start_paused = true)]
async fn timeout_just_under_request_timeout_reports_remote_timeout() {
    let state = short_request_timeout_state();
    let app = common::build_test_app(state.clone());

    let response = post_json(
        app,
        "/api/v1/hosts/fileC/commands",
        json!({ "action": "CREATE_FRAME", "timeoutMs": 999 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "REMOTE_TIMEOUT");
    assert!(json["error"].as_str().unwrap().contains("999ms"));
    assert_eq!(state.relay.pending_count().await, 0);
}
