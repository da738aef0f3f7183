pub mod health;
pub mod hosts;
pub mod plugin;
pub mod tools;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /hosts                                 list known hosts (GET)
/// /hosts/{host_id}/commands              submit a command and wait (POST)
///
/// /tools                                 tool catalog (GET)
/// /tools/{name}                          invoke a tool (POST)
/// ```
///
/// The host-facing plugin protocol lives at the root, see [`plugin::router`].
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/hosts", hosts::router())
        .nest("/tools", tools::router())
}
