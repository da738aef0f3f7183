//! Handlers for the host-facing plugin protocol.
//!
//! Hosts sit in a sandbox that can only make outbound requests, so all
//! three endpoints are host-initiated. None of them fail on relay state:
//! an unknown host drains an empty queue, and results for unknown tokens
//! are acknowledged and dropped.

use axum::extract::{Path, State};
use axum::Json;
use figbridge_core::protocol::{
    PollResponse, RegisterRequest, RegisterResponse, ResultAck, ResultReport,
};

use crate::state::AppState;

/// POST /plugin/register
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Json<RegisterResponse> {
    state
        .relay
        .register_host(&body.file_key, body.plugin_version)
        .await;

    Json(RegisterResponse {
        registered: true,
        relay_url: state.config.relay_url(),
    })
}

/// GET /commands/{host_id}
///
/// Returns and removes everything queued for the host, oldest first.
pub async fn poll_commands(
    State(state): State<AppState>,
    Path(host_id): Path<String>,
) -> Json<PollResponse> {
    let commands = state.relay.poll_commands(&host_id).await;
    if !commands.is_empty() {
        tracing::debug!(host_id = %host_id, count = commands.len(), "Commands drained");
    }
    Json(PollResponse { commands })
}

/// POST /results
///
/// Always acknowledges with `{received: true}`.
pub async fn post_result(
    State(state): State<AppState>,
    Json(report): Json<ResultReport>,
) -> Json<ResultAck> {
    Json(state.relay.post_result(report).await)
}
