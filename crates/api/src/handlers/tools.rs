//! Handlers for the tool catalog.

use axum::extract::{Path, State};
use axum::Json;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::tools::{self, ToolSpec};

/// GET /api/v1/tools
pub async fn list_tools() -> Json<DataResponse<&'static [ToolSpec]>> {
    Json(DataResponse {
        data: tools::CATALOG,
    })
}

/// POST /api/v1/tools/{name}
///
/// The body is the tool's argument object.
pub async fn call_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(args): Json<serde_json::Value>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let data = tools::call(&state, &name, args).await?;
    Ok(Json(DataResponse { data }))
}
