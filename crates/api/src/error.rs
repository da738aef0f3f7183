use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use figbridge_core::error::CoreError;
use figbridge_design::FigmaApiError;
use figbridge_relay::RelayError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain errors of each crate and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `figbridge_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A submit that timed out or was rejected by its host.
    #[error(transparent)]
    Relay(#[from] RelayError),

    /// The design-data API failed or returned a non-2xx status.
    #[error(transparent)]
    Upstream(#[from] FigmaApiError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, key } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} '{key}' not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::NotConfigured(msg) => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "NOT_CONFIGURED",
                    msg.clone(),
                ),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Relay outcomes ---
            AppError::Relay(err) => match err {
                RelayError::Timeout { .. } => {
                    (StatusCode::GATEWAY_TIMEOUT, "REMOTE_TIMEOUT", err.to_string())
                }
                // The host's message is passed through untouched.
                RelayError::RemoteExecution { message } => (
                    StatusCode::BAD_GATEWAY,
                    "REMOTE_EXECUTION_FAILED",
                    message.clone(),
                ),
            },

            // --- Design-data API ---
            AppError::Upstream(err) => {
                tracing::warn!(error = %err, "Design API call failed");
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", err.to_string())
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
