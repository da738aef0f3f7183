#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use figbridge_api::config::ServerConfig;
use figbridge_api::router::build_app_router;
use figbridge_api::state::AppState;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as the only CORS origin, no design-data
/// API token, and a 30-second command timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 60,
        command_timeout_ms: 30_000,
        max_body_bytes: 1024 * 1024,
        figma_access_token: None,
        figma_api_base: "http://127.0.0.1:9".to_string(),
    }
}

/// State built from [`test_config`]. Keep a clone to inspect the relay
/// while requests are in flight.
pub fn test_state() -> AppState {
    AppState::new(test_config())
}

/// Build the full application router with all middleware layers, exactly
/// as `main.rs` does.
pub fn build_test_app(state: AppState) -> Router {
    build_app_router(state)
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Yield until the relay has something queued for `host_id`.
pub async fn wait_for_queue(state: &AppState, host_id: &str) {
    while state.relay.queue_depth(host_id).await == 0 {
        tokio::task::yield_now().await;
    }
}
