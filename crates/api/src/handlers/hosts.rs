//! Handlers for caller-facing host endpoints.

use std::time::Duration;

use axum::extract::{Path, State};
use axum::Json;
use figbridge_core::error::CoreError;
use figbridge_core::protocol::CommandAction;
use figbridge_relay::relay::HostSummary;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for submitting a raw command.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub action: CommandAction,
    /// Action-specific payload, forwarded to the host untouched.
    #[serde(default)]
    pub data: serde_json::Value,
    /// Overrides the configured command timeout. Must be below the HTTP
    /// request timeout.
    pub timeout_ms: Option<u64>,
}

/// GET /api/v1/hosts
///
/// Every host that has registered, polled or had a command queued, with
/// its current queue depth and in-flight count.
pub async fn list_hosts(
    State(state): State<AppState>,
) -> Json<DataResponse<Vec<HostSummary>>> {
    Json(DataResponse {
        data: state.relay.host_summaries().await,
    })
}

/// POST /api/v1/hosts/{host_id}/commands
///
/// Queue a command for the host and hold the request open until the host
/// reports back or the timeout passes.
pub async fn submit_command(
    State(state): State<AppState>,
    Path(host_id): Path<String>,
    Json(body): Json<SubmitRequest>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let limit_ms = state.config.request_timeout_ms();
    let timeout = match body.timeout_ms {
        Some(0) => {
            return Err(CoreError::Validation("timeoutMs must be greater than zero".into()).into())
        }
        Some(ms) if ms >= limit_ms => {
            return Err(CoreError::Validation(format!(
                "timeoutMs must be below the request timeout of {limit_ms}ms"
            ))
            .into())
        }
        Some(ms) => Duration::from_millis(ms),
        None => state.relay.default_timeout(),
    };

    let data = state
        .relay
        .submit(&host_id, body.action, body.data, timeout)
        .await?;
    Ok(Json(DataResponse { data }))
}
