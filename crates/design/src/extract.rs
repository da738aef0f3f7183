//! Document tree analysis.
//!
//! Operates on the raw JSON returned by `GET /files/{key}` so it tolerates
//! missing or unexpected fields instead of failing the whole read.

use figbridge_core::color::rgb_to_hex;
use serde::Serialize;
use serde_json::{json, Value};

/// Above this many distinct colours a palette reduction is suggested.
pub const MAX_COLORS_BEFORE_WARNING: usize = 10;

/// Above this many distinct spacing values an 8px grid is suggested.
pub const MAX_SPACINGS_BEFORE_WARNING: usize = 8;

// ---------------------------------------------------------------------------
// Structure
// ---------------------------------------------------------------------------

/// Summarise a node tree down to `max_depth` levels.
///
/// Each node keeps its id, name and type; frames, groups and components
/// also keep their bounding-box size. Nodes beyond `max_depth` are reduced
/// to name and type.
pub fn summarize_structure(node: &Value, max_depth: u32) -> Value {
    summarize_at(node, 0, max_depth)
}

fn summarize_at(node: &Value, depth: u32, max_depth: u32) -> Value {
    if depth > max_depth {
        return json!({ "name": node["name"], "type": node["type"] });
    }

    let mut out = json!({
        "id": node["id"],
        "name": node["name"],
        "type": node["type"],
    });

    if matches!(
        node["type"].as_str(),
        Some("FRAME" | "GROUP" | "COMPONENT")
    ) {
        let bbox = &node["absoluteBoundingBox"];
        out["size"] = json!({ "width": bbox["width"], "height": bbox["height"] });
    }

    if let Some(children) = node["children"].as_array() {
        if depth < max_depth {
            out["children"] = children
                .iter()
                .map(|child| summarize_at(child, depth + 1, max_depth))
                .collect();
        }
    }

    out
}

// ---------------------------------------------------------------------------
// Design system
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorUsage {
    pub hex: String,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyStyle {
    pub family: Option<String>,
    pub size: Option<f64>,
    pub weight: Option<f64>,
    pub line_height: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentInfo {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

/// Colours, type styles, components and spacing found in a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DesignSystem {
    pub colors: Vec<ColorUsage>,
    pub typography: Vec<TypographyStyle>,
    pub components: Vec<ComponentInfo>,
    /// Distinct auto-layout spacing and padding values, ascending.
    pub spacing: Vec<f64>,
}

/// Walk the whole document and collect its design system.
///
/// Colours and type styles are de-duplicated in first-seen order.
pub fn extract_design_system(document: &Value) -> DesignSystem {
    let mut system = DesignSystem::default();
    walk(document, &mut |node| {
        collect_colors(node, &mut system.colors);
        collect_typography(node, &mut system.typography);
        collect_component(node, &mut system.components);
        collect_spacing(node, &mut system.spacing);
    });
    system.spacing.sort_by(|a, b| a.total_cmp(b));
    system
}

fn walk(node: &Value, visit: &mut impl FnMut(&Value)) {
    visit(node);
    if let Some(children) = node["children"].as_array() {
        for child in children {
            walk(child, visit);
        }
    }
}

fn collect_colors(node: &Value, colors: &mut Vec<ColorUsage>) {
    let Some(fills) = node["fills"].as_array() else {
        return;
    };
    for fill in fills {
        if fill["type"] != "SOLID" || fill["visible"] == Value::Bool(false) {
            continue;
        }
        let color = &fill["color"];
        let channel = |k: &str| color[k].as_f64().unwrap_or(0.0);
        let alpha = color["a"].as_f64().unwrap_or(1.0);
        // A zero fill opacity falls back to the colour's own alpha.
        let opacity = fill["opacity"]
            .as_f64()
            .filter(|o| *o != 0.0)
            .unwrap_or(alpha);

        let usage = ColorUsage {
            hex: rgb_to_hex(channel("r"), channel("g"), channel("b")),
            opacity,
        };
        if !colors.contains(&usage) {
            colors.push(usage);
        }
    }
}

fn collect_typography(node: &Value, styles: &mut Vec<TypographyStyle>) {
    if node["type"] != "TEXT" || !node["style"].is_object() {
        return;
    }
    let style = &node["style"];
    let entry = TypographyStyle {
        family: style["fontFamily"].as_str().map(str::to_string),
        size: style["fontSize"].as_f64(),
        weight: style["fontWeight"].as_f64(),
        line_height: style["lineHeightPx"].as_f64(),
    };
    if !styles.contains(&entry) {
        styles.push(entry);
    }
}

fn collect_component(node: &Value, components: &mut Vec<ComponentInfo>) {
    let kind = node["type"].as_str().unwrap_or_default();
    if kind != "COMPONENT" && kind != "COMPONENT_SET" {
        return;
    }
    let text = |k: &str| node[k].as_str().unwrap_or_default().to_string();
    components.push(ComponentInfo {
        id: text("id"),
        name: text("name"),
        kind: kind.to_string(),
        description: text("description"),
    });
}

fn collect_spacing(node: &Value, spacing: &mut Vec<f64>) {
    let has_layout = node["layoutMode"]
        .as_str()
        .is_some_and(|mode| !mode.is_empty());
    if node["type"] != "FRAME" || !has_layout {
        return;
    }
    for key in [
        "itemSpacing",
        "paddingLeft",
        "paddingRight",
        "paddingTop",
        "paddingBottom",
    ] {
        if let Some(v) = node[key].as_f64().filter(|v| *v != 0.0) {
            if !spacing.contains(&v) {
                spacing.push(v);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Suggestions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub category: &'static str,
    pub severity: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignAnalysis {
    pub focus: String,
    pub suggestions: Vec<Suggestion>,
    pub score: u32,
}

/// Flag an oversized palette or spacing scale.
///
/// `focus` is `"all"`, `"colors"` or `"spacing"`; anything else yields no
/// suggestions.
pub fn analyze(system: &DesignSystem, focus: &str) -> DesignAnalysis {
    let mut suggestions = Vec::new();

    if (focus == "all" || focus == "colors") && system.colors.len() > MAX_COLORS_BEFORE_WARNING {
        suggestions.push(Suggestion {
            category: "colors",
            severity: "medium",
            message: format!(
                "You're using {} colors. Consider reducing to 5-8 core colors for better consistency.",
                system.colors.len()
            ),
        });
    }

    if (focus == "all" || focus == "spacing")
        && system.spacing.len() > MAX_SPACINGS_BEFORE_WARNING
    {
        suggestions.push(Suggestion {
            category: "spacing",
            severity: "low",
            message: format!(
                "{} different spacing values detected. Consider using an 8px grid system.",
                system.spacing.len()
            ),
        });
    }

    DesignAnalysis {
        focus: focus.to_string(),
        suggestions,
        score: 0,
    }
}
