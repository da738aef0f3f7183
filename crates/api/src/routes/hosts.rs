use axum::routing::{get, post};
use axum::Router;

use crate::handlers::hosts;
use crate::state::AppState;

/// Routes mounted at `/api/v1/hosts`.
///
/// ```text
/// GET  /                       -> list_hosts
/// POST /{host_id}/commands     -> submit_command
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(hosts::list_hosts))
        .route("/{host_id}/commands", post(hosts::submit_command))
}
