//! Route definitions for the host-facing plugin protocol.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::plugin;
use crate::state::AppState;

/// Root-level routes polled by design-tool hosts.
///
/// ```text
/// POST /plugin/register        -> register
/// GET  /commands/{host_id}     -> poll_commands (destructive drain)
/// POST /results                -> post_result
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/plugin/register", post(plugin::register))
        .route("/commands/{host_id}", get(plugin::poll_commands))
        .route("/results", post(plugin::post_result))
}
