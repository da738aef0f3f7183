//! Shared response envelope for caller-facing handlers.
//!
//! Caller-facing responses use a `{ "data": ... }` envelope. Host-facing
//! endpoints do not; they speak the plugin protocol's own shapes.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: hosts }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
