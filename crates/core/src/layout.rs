//! Screen layout planning for `BUILD_SCREEN` commands.
//!
//! A plan pairs a target device size with a style preset. Unknown styles
//! fall back to `modern`; unknown devices leave the size unset so the host
//! picks its own default.

use serde::Serialize;

/// Pixel dimensions of a target device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceSize {
    pub width: u32,
    pub height: u32,
}

/// Colour, radius and spacing preset for a visual style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleConfig {
    pub primary_color: &'static str,
    pub background_color: &'static str,
    pub text_color: &'static str,
    pub border_radius: u32,
    pub spacing: u32,
}

/// Layout plan attached to a `BUILD_SCREEN` payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutPlan {
    pub device: Option<DeviceSize>,
    pub style: StyleConfig,
    pub requirements: String,
}

pub fn device_size(device: &str) -> Option<DeviceSize> {
    let (width, height) = match device {
        "mobile" => (375, 812),
        "tablet" => (768, 1024),
        "desktop" => (1440, 900),
        "watch" => (184, 224),
        _ => return None,
    };
    Some(DeviceSize { width, height })
}

pub fn style_config(style: &str) -> StyleConfig {
    match style {
        "minimal" => StyleConfig {
            primary_color: "#000000",
            background_color: "#FFFFFF",
            text_color: "#000000",
            border_radius: 4,
            spacing: 24,
        },
        "corporate" => StyleConfig {
            primary_color: "#003D82",
            background_color: "#F5F7FA",
            text_color: "#2C3E50",
            border_radius: 6,
            spacing: 20,
        },
        _ => StyleConfig {
            primary_color: "#0066FF",
            background_color: "#FFFFFF",
            text_color: "#1A1A1A",
            border_radius: 12,
            spacing: 16,
        },
    }
}

pub fn plan_layout(requirements: &str, style: &str, device: &str) -> LayoutPlan {
    LayoutPlan {
        device: device_size(device),
        style: style_config(style),
        requirements: requirements.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_devices_have_sizes() {
        assert_eq!(
            device_size("mobile"),
            Some(DeviceSize {
                width: 375,
                height: 812
            })
        );
        assert_eq!(device_size("desktop").unwrap().width, 1440);
        assert!(device_size("fridge").is_none());
    }

    #[test]
    fn unknown_style_falls_back_to_modern() {
        assert_eq!(style_config("baroque"), style_config("modern"));
        assert_eq!(style_config("modern").primary_color, "#0066FF");
    }

    #[test]
    fn plan_serializes_camel_case_style() {
        let plan = plan_layout("login screen", "corporate", "tablet");
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["device"]["height"], 1024);
        assert_eq!(json["style"]["primaryColor"], "#003D82");
        assert_eq!(json["requirements"], "login screen");
    }

    #[test]
    fn unknown_device_serializes_as_null() {
        let plan = plan_layout("x", "modern", "fridge");
        let json = serde_json::to_value(&plan).unwrap();
        assert!(json["device"].is_null());
    }
}
