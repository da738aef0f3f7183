//! Named operations callers invoke with JSON arguments.
//!
//! Read tools query the design-data API directly. Write tools are turned
//! into relay commands for the host whose id is the tool's `file_key`, so a
//! write only completes while that file is open with the plugin polling.

pub mod args;
mod read;
mod write;

use figbridge_core::error::CoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;

/// How a tool is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    /// Design-data API request.
    Read,
    /// Relay command executed by a host.
    Write,
    /// Read followed by local analysis.
    Analysis,
}

/// Catalog entry describing one tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ToolKind,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
}

pub const CATALOG: &[ToolSpec] = &[
    // --- Read ---
    ToolSpec {
        name: "get_file",
        description: "Summarise a file's node tree down to the given depth.",
        kind: ToolKind::Read,
        required: &["file_key"],
        optional: &["depth"],
    },
    ToolSpec {
        name: "read_design_system",
        description: "Extract colours, typography, components and spacing.",
        kind: ToolKind::Read,
        required: &["file_key"],
        optional: &[],
    },
    ToolSpec {
        name: "export_nodes",
        description: "Render nodes to images and return their download URLs.",
        kind: ToolKind::Read,
        required: &["file_key", "node_ids"],
        optional: &["format", "scale"],
    },
    ToolSpec {
        name: "get_comments",
        description: "List comments on a file.",
        kind: ToolKind::Read,
        required: &["file_key"],
        optional: &[],
    },
    ToolSpec {
        name: "add_comment",
        description: "Post a comment, optionally pinned to a node or position.",
        kind: ToolKind::Read,
        required: &["file_key", "message"],
        optional: &["node_id", "x", "y"],
    },
    // --- Write ---
    ToolSpec {
        name: "create_frame",
        description: "Create a top-level frame.",
        kind: ToolKind::Write,
        required: &["file_key", "name", "width", "height"],
        optional: &["x", "y", "background_color"],
    },
    ToolSpec {
        name: "create_rectangle",
        description: "Create a rectangle, optionally inside a parent node.",
        kind: ToolKind::Write,
        required: &["file_key", "name", "width", "height"],
        optional: &["parent_id", "x", "y", "fill_color", "corner_radius"],
    },
    ToolSpec {
        name: "create_text",
        description: "Create a text layer.",
        kind: ToolKind::Write,
        required: &["file_key", "text"],
        optional: &[
            "parent_id",
            "x",
            "y",
            "font_size",
            "font_family",
            "font_weight",
            "text_color",
            "text_align",
        ],
    },
    ToolSpec {
        name: "create_button",
        description: "Create a labelled button.",
        kind: ToolKind::Write,
        required: &["file_key", "label"],
        optional: &["parent_id", "x", "y", "variant", "size"],
    },
    ToolSpec {
        name: "create_input_field",
        description: "Create a labelled input field.",
        kind: ToolKind::Write,
        required: &["file_key", "label"],
        optional: &["parent_id", "placeholder", "x", "y", "width", "type"],
    },
    ToolSpec {
        name: "build_prototype_screen",
        description: "Build a screen from requirements using a style and device preset.",
        kind: ToolKind::Write,
        required: &["file_key", "screen_name", "requirements"],
        optional: &["style", "device"],
    },
    ToolSpec {
        name: "apply_auto_layout",
        description: "Turn a frame into an auto-layout container.",
        kind: ToolKind::Write,
        required: &["file_key", "node_id"],
        optional: &["direction", "spacing", "padding"],
    },
    // --- Analysis ---
    ToolSpec {
        name: "analyze_and_suggest",
        description: "Flag oversized colour palettes and spacing scales.",
        kind: ToolKind::Analysis,
        required: &["file_key"],
        optional: &["focus"],
    },
];

pub fn find(name: &str) -> Option<&'static ToolSpec> {
    CATALOG.iter().find(|spec| spec.name == name)
}

/// Run the tool called `name` with JSON `args`.
///
/// Unknown names are `NotFound`; arguments that do not match the tool's
/// shape are `Validation` errors.
pub async fn call(state: &AppState, name: &str, args: serde_json::Value) -> AppResult<serde_json::Value> {
    tracing::debug!(tool = name, "Tool call");
    match name {
        "get_file" => read::get_file(state, parse(args)?).await,
        "read_design_system" => read::read_design_system(state, parse(args)?).await,
        "export_nodes" => read::export_nodes(state, parse(args)?).await,
        "get_comments" => read::get_comments(state, parse(args)?).await,
        "add_comment" => read::add_comment(state, parse(args)?).await,
        "create_frame" => write::create_frame(state, parse(args)?).await,
        "create_rectangle" => write::create_rectangle(state, parse(args)?).await,
        "create_text" => write::create_text(state, parse(args)?).await,
        "create_button" => write::create_button(state, parse(args)?).await,
        "create_input_field" => write::create_input_field(state, parse(args)?).await,
        "build_prototype_screen" => write::build_prototype_screen(state, parse(args)?).await,
        "apply_auto_layout" => write::apply_auto_layout(state, parse(args)?).await,
        "analyze_and_suggest" => read::analyze_and_suggest(state, parse(args)?).await,
        _ => Err(CoreError::NotFound {
            entity: "Tool",
            key: name.to_string(),
        }
        .into()),
    }
}

fn parse<T: DeserializeOwned>(args: serde_json::Value) -> AppResult<T> {
    serde_json::from_value(args)
        .map_err(|e| CoreError::Validation(format!("Invalid tool arguments: {e}")).into())
}
