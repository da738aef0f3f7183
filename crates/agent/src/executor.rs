//! Command execution on the host side.
//!
//! [`CommandExecutor`] is the seam a real design-tool integration plugs
//! into. [`SimulatedCanvas`] keeps an in-memory node tree so the agent can
//! run end to end without a design tool.

use std::collections::HashMap;

use async_trait::async_trait;
use figbridge_core::protocol::{Command, CommandAction};
use serde_json::{json, Value};
use tokio::sync::Mutex;

/// A command the host could not carry out. The message is reported to the
/// relay verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ExecutionError(pub String);

#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Carry out one command, returning the data to report on success.
    async fn execute(&self, command: &Command) -> Result<Value, ExecutionError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Frame,
    Rectangle,
    Text,
}

impl NodeKind {
    fn can_have_children(self) -> bool {
        matches!(self, Self::Frame)
    }
}

#[derive(Debug, Clone)]
pub struct CanvasNode {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    pub parent_id: Option<String>,
    pub width: f64,
    pub height: f64,
    /// Auto-layout direction, once applied.
    pub layout_mode: Option<String>,
    pub item_spacing: f64,
    pub padding: f64,
}

#[derive(Default)]
struct Canvas {
    next_id: u64,
    nodes: HashMap<String, CanvasNode>,
}

impl Canvas {
    fn insert(
        &mut self,
        kind: NodeKind,
        name: String,
        parent_id: Option<String>,
        width: f64,
        height: f64,
    ) -> String {
        self.next_id += 1;
        let id = format!("1:{}", self.next_id);
        self.nodes.insert(
            id.clone(),
            CanvasNode {
                id: id.clone(),
                name,
                kind,
                parent_id,
                width,
                height,
                layout_mode: None,
                item_spacing: 0.0,
                padding: 0.0,
            },
        );
        id
    }

    /// Resolve an optional `parentId`; a missing or non-container parent is
    /// an error rather than a silent fall back to the page.
    fn parent(&self, data: &Value) -> Result<Option<String>, ExecutionError> {
        let Some(parent_id) = data["parentId"].as_str() else {
            return Ok(None);
        };
        match self.nodes.get(parent_id) {
            Some(node) if node.kind.can_have_children() => Ok(Some(parent_id.to_string())),
            Some(_) => Err(ExecutionError(format!(
                "Node {parent_id} cannot have children"
            ))),
            None => Err(ExecutionError(format!("Parent node not found: {parent_id}"))),
        }
    }
}

/// In-memory stand-in for a design document.
///
/// Node ids are issued as `"1:1"`, `"1:2"`, ... in creation order.
#[derive(Default)]
pub struct SimulatedCanvas {
    canvas: Mutex<Canvas>,
}

fn text(data: &Value, key: &str) -> String {
    data[key].as_str().unwrap_or_default().to_string()
}

fn number(data: &Value, key: &str, default: f64) -> f64 {
    data[key].as_f64().unwrap_or(default)
}

fn created(id: &str, name: &str, kind: &str) -> Value {
    json!({ "nodeId": id, "nodeName": name, "type": kind })
}

impl SimulatedCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn node(&self, id: &str) -> Option<CanvasNode> {
        self.canvas.lock().await.nodes.get(id).cloned()
    }

    pub async fn node_count(&self) -> usize {
        self.canvas.lock().await.nodes.len()
    }

    fn create(
        canvas: &mut Canvas,
        action: CommandAction,
        data: &Value,
    ) -> Result<Value, ExecutionError> {
        match action {
            CommandAction::CreateFrame => {
                let name = text(data, "name");
                let id = canvas.insert(
                    NodeKind::Frame,
                    name.clone(),
                    None,
                    number(data, "width", 100.0),
                    number(data, "height", 100.0),
                );
                Ok(created(&id, &name, "FRAME"))
            }
            CommandAction::CreateRectangle => {
                let parent = canvas.parent(data)?;
                let name = text(data, "name");
                let id = canvas.insert(
                    NodeKind::Rectangle,
                    name.clone(),
                    parent,
                    number(data, "width", 100.0),
                    number(data, "height", 100.0),
                );
                Ok(created(&id, &name, "RECTANGLE"))
            }
            CommandAction::CreateText => {
                let parent = canvas.parent(data)?;
                let name = text(data, "text");
                let id = canvas.insert(NodeKind::Text, name.clone(), parent, 0.0, 0.0);
                Ok(created(&id, &name, "TEXT"))
            }
            CommandAction::CreateButton => {
                let parent = canvas.parent(data)?;
                let name = format!(
                    "Button / {} / {}",
                    data["variant"].as_str().unwrap_or("primary"),
                    data["size"].as_str().unwrap_or("medium"),
                );
                let id = canvas.insert(NodeKind::Frame, name.clone(), parent, 120.0, 40.0);
                Ok(created(&id, &name, "BUTTON"))
            }
            CommandAction::CreateInput => {
                let parent = canvas.parent(data)?;
                let name = format!("Input / {}", data["type"].as_str().unwrap_or("text"));
                let width = number(data, "width", 300.0);
                let id = canvas.insert(NodeKind::Frame, name.clone(), parent, width, 72.0);
                Ok(created(&id, &name, "INPUT_FIELD"))
            }
            CommandAction::BuildScreen => {
                let name = text(data, "screenName");
                let device = &data["layout"]["device"];
                let id = canvas.insert(
                    NodeKind::Frame,
                    name.clone(),
                    None,
                    number(device, "width", 375.0),
                    number(device, "height", 812.0),
                );
                // Title layer.
                canvas.insert(NodeKind::Text, name.clone(), Some(id.clone()), 0.0, 0.0);
                Ok(json!({
                    "nodeId": id,
                    "nodeName": name,
                    "type": "SCREEN",
                    "device": data["device"],
                    "style": data["style"],
                }))
            }
            CommandAction::ApplyAutoLayout => {
                let node_id = text(data, "nodeId");
                let node = canvas
                    .nodes
                    .get_mut(&node_id)
                    .filter(|n| n.kind == NodeKind::Frame)
                    .ok_or_else(|| ExecutionError("Node must be a frame".into()))?;
                node.layout_mode = Some(
                    data["direction"]
                        .as_str()
                        .unwrap_or("VERTICAL")
                        .to_string(),
                );
                node.item_spacing = number(data, "spacing", 16.0);
                node.padding = number(data, "padding", 24.0);
                Ok(json!({ "nodeId": node_id, "applied": true }))
            }
        }
    }
}

#[async_trait]
impl CommandExecutor for SimulatedCanvas {
    async fn execute(&self, command: &Command) -> Result<Value, ExecutionError> {
        let mut canvas = self.canvas.lock().await;
        Self::create(&mut canvas, command.action, &command.payload)
    }
}
