//! Argument shapes for each tool.
//!
//! Optional arguments carry the defaults the design tool expects. Write
//! tool arguments also know how to become the camelCase payload a host
//! receives.

use figbridge_core::color::hex_to_rgb;
use figbridge_core::error::CoreError;
use figbridge_core::layout::{plan_layout, LayoutPlan};
use serde::Deserialize;
use serde_json::{json, Value};

fn default_depth() -> u32 {
    3
}
fn default_format() -> String {
    "png".into()
}
fn default_scale() -> f64 {
    2.0
}
fn default_font_size() -> f64 {
    16.0
}
fn default_font_family() -> String {
    "Inter".into()
}
fn default_font_weight() -> String {
    "Regular".into()
}
fn default_text_color() -> String {
    "#000000".into()
}
fn default_text_align() -> String {
    "LEFT".into()
}
fn default_variant() -> String {
    "primary".into()
}
fn default_size() -> String {
    "medium".into()
}
fn default_input_width() -> f64 {
    300.0
}
fn default_input_type() -> String {
    "text".into()
}
fn default_style() -> String {
    "modern".into()
}
fn default_device() -> String {
    "mobile".into()
}
fn default_direction() -> String {
    "VERTICAL".into()
}
fn default_spacing() -> f64 {
    16.0
}
fn default_padding() -> f64 {
    24.0
}
fn default_focus() -> String {
    "all".into()
}

const EXPORT_FORMATS: &[&str] = &["png", "jpg", "svg", "pdf"];
const LAYOUT_DIRECTIONS: &[&str] = &["HORIZONTAL", "VERTICAL"];

fn require_positive(field: &str, value: f64) -> Result<(), CoreError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("{field} must be greater than zero")))
    }
}

// ---------------------------------------------------------------------------
// Read tools
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct GetFileArgs {
    pub file_key: String,
    #[serde(default = "default_depth")]
    pub depth: u32,
}

#[derive(Debug, Deserialize)]
pub struct FileKeyArgs {
    pub file_key: String,
}

#[derive(Debug, Deserialize)]
pub struct ExportNodesArgs {
    pub file_key: String,
    pub node_ids: Vec<String>,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

impl ExportNodesArgs {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.node_ids.is_empty() {
            return Err(CoreError::Validation("node_ids must not be empty".into()));
        }
        if !EXPORT_FORMATS.contains(&self.format.as_str()) {
            return Err(CoreError::Validation(format!(
                "format must be one of {}",
                EXPORT_FORMATS.join(", ")
            )));
        }
        require_positive("scale", self.scale)
    }
}

#[derive(Debug, Deserialize)]
pub struct AddCommentArgs {
    pub file_key: String,
    pub message: String,
    pub node_id: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeArgs {
    pub file_key: String,
    #[serde(default = "default_focus")]
    pub focus: String,
}

// ---------------------------------------------------------------------------
// Write tools
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateFrameArgs {
    pub file_key: String,
    pub name: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub background_color: Option<String>,
}

impl CreateFrameArgs {
    pub fn payload(&self) -> Result<Value, CoreError> {
        require_positive("width", self.width)?;
        require_positive("height", self.height)?;
        Ok(json!({
            "name": self.name,
            "width": self.width,
            "height": self.height,
            "x": self.x,
            "y": self.y,
            "backgroundColor": self.background_color.as_deref().map(hex_to_rgb),
        }))
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateRectangleArgs {
    pub file_key: String,
    pub parent_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Option<String>,
    #[serde(default)]
    pub corner_radius: f64,
}

impl CreateRectangleArgs {
    pub fn payload(&self) -> Result<Value, CoreError> {
        require_positive("width", self.width)?;
        require_positive("height", self.height)?;
        Ok(json!({
            "parentId": self.parent_id,
            "name": self.name,
            "x": self.x,
            "y": self.y,
            "width": self.width,
            "height": self.height,
            "fillColor": self.fill_color.as_deref().map(hex_to_rgb),
            "cornerRadius": self.corner_radius,
        }))
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTextArgs {
    pub file_key: String,
    pub parent_id: Option<String>,
    pub text: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_weight")]
    pub font_weight: String,
    #[serde(default = "default_text_color")]
    pub text_color: String,
    #[serde(default = "default_text_align")]
    pub text_align: String,
}

impl CreateTextArgs {
    pub fn payload(&self) -> Value {
        json!({
            "parentId": self.parent_id,
            "text": self.text,
            "x": self.x,
            "y": self.y,
            "fontSize": self.font_size,
            "fontFamily": self.font_family,
            "fontWeight": self.font_weight,
            "textColor": hex_to_rgb(&self.text_color),
            "textAlign": self.text_align,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateButtonArgs {
    pub file_key: String,
    pub parent_id: Option<String>,
    pub label: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default = "default_variant")]
    pub variant: String,
    #[serde(default = "default_size")]
    pub size: String,
}

impl CreateButtonArgs {
    pub fn payload(&self) -> Value {
        json!({
            "parentId": self.parent_id,
            "label": self.label,
            "x": self.x,
            "y": self.y,
            "variant": self.variant,
            "size": self.size,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateInputFieldArgs {
    pub file_key: String,
    pub parent_id: Option<String>,
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default = "default_input_width")]
    pub width: f64,
    #[serde(rename = "type", default = "default_input_type")]
    pub input_type: String,
}

impl CreateInputFieldArgs {
    pub fn payload(&self) -> Value {
        json!({
            "parentId": self.parent_id,
            "label": self.label,
            "placeholder": self.placeholder,
            "x": self.x,
            "y": self.y,
            "width": self.width,
            "type": self.input_type,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct BuildPrototypeScreenArgs {
    pub file_key: String,
    pub screen_name: String,
    pub requirements: String,
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default = "default_device")]
    pub device: String,
}

impl BuildPrototypeScreenArgs {
    pub fn layout(&self) -> LayoutPlan {
        plan_layout(&self.requirements, &self.style, &self.device)
    }

    pub fn payload(&self, layout: &LayoutPlan) -> Value {
        json!({
            "screenName": self.screen_name,
            "requirements": self.requirements,
            "style": self.style,
            "device": self.device,
            "layout": layout,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ApplyAutoLayoutArgs {
    pub file_key: String,
    pub node_id: String,
    #[serde(default = "default_direction")]
    pub direction: String,
    #[serde(default = "default_spacing")]
    pub spacing: f64,
    #[serde(default = "default_padding")]
    pub padding: f64,
}

impl ApplyAutoLayoutArgs {
    pub fn payload(&self) -> Result<Value, CoreError> {
        if !LAYOUT_DIRECTIONS.contains(&self.direction.as_str()) {
            return Err(CoreError::Validation(
                "direction must be HORIZONTAL or VERTICAL".into(),
            ));
        }
        Ok(json!({
            "nodeId": self.node_id,
            "direction": self.direction,
            "spacing": self.spacing,
            "padding": self.padding,
        }))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn parse<T: serde::de::DeserializeOwned>(value: Value) -> T {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn frame_payload_converts_background() {
        let args: CreateFrameArgs = parse(json!({
            "file_key": "f",
            "name": "Login",
            "width": 375,
            "height": 812,
            "background_color": "#FF0000",
        }));

        let payload = args.payload().unwrap();
        assert_eq!(payload["x"], 0.0);
        assert_eq!(payload["backgroundColor"], json!({"r": 1.0, "g": 0.0, "b": 0.0}));
    }

    #[test]
    fn frame_without_background_sends_null() {
        let args: CreateFrameArgs =
            parse(json!({"file_key": "f", "name": "A", "width": 1, "height": 1}));
        assert!(args.payload().unwrap()["backgroundColor"].is_null());
    }

    #[test]
    fn zero_sized_frame_is_rejected() {
        let args: CreateFrameArgs =
            parse(json!({"file_key": "f", "name": "A", "width": 0, "height": 10}));
        assert_matches!(args.payload(), Err(CoreError::Validation(msg)) if msg.contains("width"));
    }

    #[test]
    fn text_defaults_apply() {
        let args: CreateTextArgs = parse(json!({"file_key": "f", "text": "Hello"}));
        let payload = args.payload();

        assert_eq!(payload["fontSize"], 16.0);
        assert_eq!(payload["fontFamily"], "Inter");
        assert_eq!(payload["fontWeight"], "Regular");
        assert_eq!(payload["textAlign"], "LEFT");
        assert_eq!(payload["textColor"], json!({"r": 0.0, "g": 0.0, "b": 0.0}));
        assert!(payload["parentId"].is_null());
    }

    #[test]
    fn invalid_text_color_falls_back_to_black() {
        let args: CreateTextArgs =
            parse(json!({"file_key": "f", "text": "x", "text_color": "red"}));
        assert_eq!(args.payload()["textColor"], json!({"r": 0.0, "g": 0.0, "b": 0.0}));
    }

    #[test]
    fn input_field_uses_type_key() {
        let args: CreateInputFieldArgs =
            parse(json!({"file_key": "f", "label": "Email", "type": "email"}));
        let payload = args.payload();
        assert_eq!(payload["type"], "email");
        assert_eq!(payload["width"], 300.0);
        assert_eq!(payload["placeholder"], "");
    }

    #[test]
    fn screen_payload_carries_layout_plan() {
        let args: BuildPrototypeScreenArgs = parse(json!({
            "file_key": "f",
            "screen_name": "Login",
            "requirements": "email and password",
            "device": "tablet",
            "style": "brutalist",
        }));
        let layout = args.layout();
        let payload = args.payload(&layout);

        assert_eq!(payload["screenName"], "Login");
        assert_eq!(payload["layout"]["device"], json!({"width": 768, "height": 1024}));
        // Unknown styles fall back to the modern preset.
        assert_eq!(payload["layout"]["style"]["primaryColor"], "#0066FF");
    }

    #[test]
    fn auto_layout_rejects_unknown_direction() {
        let args: ApplyAutoLayoutArgs =
            parse(json!({"file_key": "f", "node_id": "1:2", "direction": "DIAGONAL"}));
        assert_matches!(args.payload(), Err(CoreError::Validation(_)));

        let args: ApplyAutoLayoutArgs = parse(json!({"file_key": "f", "node_id": "1:2"}));
        let payload = args.payload().unwrap();
        assert_eq!(payload["direction"], "VERTICAL");
        assert_eq!(payload["spacing"], 16.0);
        assert_eq!(payload["padding"], 24.0);
    }

    #[test]
    fn export_validation() {
        let ok: ExportNodesArgs = parse(json!({"file_key": "f", "node_ids": ["1:2"]}));
        assert!(ok.validate().is_ok());
        assert_eq!(ok.format, "png");
        assert_eq!(ok.scale, 2.0);

        let empty: ExportNodesArgs = parse(json!({"file_key": "f", "node_ids": []}));
        assert_matches!(empty.validate(), Err(CoreError::Validation(_)));

        let gif: ExportNodesArgs =
            parse(json!({"file_key": "f", "node_ids": ["1:2"], "format": "gif"}));
        assert_matches!(gif.validate(), Err(CoreError::Validation(_)));
    }
}
