//! Tools executed by a host through the relay.
//!
//! The tool's `file_key` is the host id. Each call blocks until that host
//! reports back, fails, or the relay's default timeout passes.

use figbridge_core::protocol::CommandAction;
use serde_json::{json, Value};

use super::args::{
    ApplyAutoLayoutArgs, BuildPrototypeScreenArgs, CreateButtonArgs, CreateFrameArgs,
    CreateInputFieldArgs, CreateRectangleArgs, CreateTextArgs,
};
use crate::error::AppResult;
use crate::state::AppState;

async fn submit(
    state: &AppState,
    host_id: &str,
    action: CommandAction,
    payload: Value,
) -> AppResult<Value> {
    Ok(state
        .relay
        .submit_with_default_timeout(host_id, action, payload)
        .await?)
}

pub async fn create_frame(state: &AppState, args: CreateFrameArgs) -> AppResult<Value> {
    let payload = args.payload()?;
    submit(state, &args.file_key, CommandAction::CreateFrame, payload).await
}

pub async fn create_rectangle(state: &AppState, args: CreateRectangleArgs) -> AppResult<Value> {
    let payload = args.payload()?;
    submit(state, &args.file_key, CommandAction::CreateRectangle, payload).await
}

pub async fn create_text(state: &AppState, args: CreateTextArgs) -> AppResult<Value> {
    submit(state, &args.file_key, CommandAction::CreateText, args.payload()).await
}

pub async fn create_button(state: &AppState, args: CreateButtonArgs) -> AppResult<Value> {
    submit(state, &args.file_key, CommandAction::CreateButton, args.payload()).await
}

pub async fn create_input_field(state: &AppState, args: CreateInputFieldArgs) -> AppResult<Value> {
    submit(state, &args.file_key, CommandAction::CreateInput, args.payload()).await
}

/// Also returns the layout plan sent to the host, since the host only
/// reports the created node.
pub async fn build_prototype_screen(
    state: &AppState,
    args: BuildPrototypeScreenArgs,
) -> AppResult<Value> {
    let layout = args.layout();
    let payload = args.payload(&layout);
    let result = submit(state, &args.file_key, CommandAction::BuildScreen, payload).await?;
    Ok(json!({ "layout": layout, "result": result }))
}

pub async fn apply_auto_layout(state: &AppState, args: ApplyAutoLayoutArgs) -> AppResult<Value> {
    let payload = args.payload()?;
    submit(state, &args.file_key, CommandAction::ApplyAutoLayout, payload).await
}
