//! Wire protocol between the relay and design-tool hosts.
//!
//! Field names follow the plugin's JSON conventions (`operationId`,
//! `fileKey`, camelCase), so the Rust names differ from the wire names in
//! a few places.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{CorrelationToken, HostId, Timestamp};

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Operation a host is asked to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandAction {
    CreateFrame,
    CreateRectangle,
    CreateText,
    CreateButton,
    CreateInput,
    BuildScreen,
    ApplyAutoLayout,
}

impl CommandAction {
    /// Wire name, e.g. `"CREATE_FRAME"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateFrame => "CREATE_FRAME",
            Self::CreateRectangle => "CREATE_RECTANGLE",
            Self::CreateText => "CREATE_TEXT",
            Self::CreateButton => "CREATE_BUTTON",
            Self::CreateInput => "CREATE_INPUT",
            Self::BuildScreen => "BUILD_SCREEN",
            Self::ApplyAutoLayout => "APPLY_AUTO_LAYOUT",
        }
    }
}

impl std::fmt::Display for CommandAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of work queued for a host.
///
/// Built once by the relay and never mutated; ownership passes to the host
/// when its queue is drained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    #[serde(rename = "operationId")]
    pub token: CorrelationToken,
    pub action: CommandAction,
    #[serde(rename = "data")]
    pub payload: serde_json::Value,
    pub enqueued_at: Timestamp,
}

impl Command {
    pub fn new(token: CorrelationToken, action: CommandAction, payload: serde_json::Value) -> Self {
        Self {
            token,
            action,
            payload,
            enqueued_at: chrono::Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Host -> relay messages
// ---------------------------------------------------------------------------

/// Body of `POST /plugin/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub file_key: HostId,
    #[serde(default)]
    pub plugin_version: Option<String>,
}

/// Response to `POST /plugin/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub registered: bool,
    pub relay_url: String,
}

/// Response to `GET /commands/{host_id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PollResponse {
    pub commands: Vec<Command>,
}

/// Body of `POST /results`: the outcome of one command.
///
/// `operation_id` is kept as a raw string so that a malformed id is
/// treated like any other unknown token instead of failing the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultReport {
    pub operation_id: String,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ResultReport {
    pub fn success(token: CorrelationToken, data: serde_json::Value) -> Self {
        Self {
            operation_id: token.to_string(),
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(token: CorrelationToken, message: impl Into<String>) -> Self {
        Self {
            operation_id: token.to_string(),
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Parse the reported id, returning `None` if it is not a valid token.
    pub fn token(&self) -> Option<CorrelationToken> {
        CorrelationToken::from_str(&self.operation_id).ok()
    }
}

/// Response to `POST /results`. Always `received: true`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultAck {
    pub received: bool,
}
