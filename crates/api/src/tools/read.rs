//! Tools served from the design-data API.

use figbridge_design::api::NewComment;
use figbridge_design::extract::{analyze, extract_design_system, summarize_structure};
use serde_json::{json, Value};

use super::args::{AddCommentArgs, AnalyzeArgs, ExportNodesArgs, FileKeyArgs, GetFileArgs};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub async fn get_file(state: &AppState, args: GetFileArgs) -> AppResult<Value> {
    let file = state
        .figma()?
        .get_file(&args.file_key, Some(args.depth))
        .await?;
    Ok(json!({
        "name": file["name"],
        "structure": summarize_structure(&file["document"], args.depth),
    }))
}

pub async fn read_design_system(state: &AppState, args: FileKeyArgs) -> AppResult<Value> {
    let file = state.figma()?.get_file(&args.file_key, None).await?;
    to_value(extract_design_system(&file["document"]))
}

pub async fn export_nodes(state: &AppState, args: ExportNodesArgs) -> AppResult<Value> {
    args.validate()?;
    let images = state
        .figma()?
        .export_images(&args.file_key, &args.node_ids, &args.format, args.scale)
        .await?;
    Ok(images)
}

pub async fn get_comments(state: &AppState, args: FileKeyArgs) -> AppResult<Value> {
    let data = state.figma()?.get_comments(&args.file_key).await?;
    let comments = data["comments"].clone();
    let count = comments.as_array().map_or(0, Vec::len);
    Ok(json!({ "count": count, "comments": comments }))
}

pub async fn add_comment(state: &AppState, args: AddCommentArgs) -> AppResult<Value> {
    let comment = NewComment::new(args.message, args.node_id, args.x, args.y);
    let created = state
        .figma()?
        .post_comment(&args.file_key, &comment)
        .await?;
    Ok(created)
}

pub async fn analyze_and_suggest(state: &AppState, args: AnalyzeArgs) -> AppResult<Value> {
    let file = state.figma()?.get_file(&args.file_key, None).await?;
    let system = extract_design_system(&file["document"]);
    to_value(analyze(&system, &args.focus))
}

fn to_value(value: impl serde::Serialize) -> AppResult<Value> {
    serde_json::to_value(value).map_err(|e| AppError::InternalError(e.to_string()))
}
