//! Hex colour conversion for design-tool payloads.
//!
//! Design tools express colours as `{r, g, b}` channels in `0.0..=1.0`;
//! tool callers pass `#RRGGBB` strings.

use serde::{Deserialize, Serialize};

/// An sRGB colour with channels normalised to `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
}

/// Parse a `#RRGGBB` (or `RRGGBB`) string, case-insensitive.
///
/// Returns `None` for anything else, including 3-digit shorthand.
pub fn parse_hex(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .ok()
            .map(|v| f64::from(v) / 255.0)
    };

    Some(Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

/// Lenient conversion used for tool arguments: unparseable input becomes black.
pub fn hex_to_rgb(hex: &str) -> Rgb {
    parse_hex(hex).unwrap_or(Rgb::BLACK)
}

/// Format normalised channels as upper-case `#RRGGBB`.
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    let to_byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("#{:02X}{:02X}{:02X}", to_byte(r), to_byte(g), to_byte(b))
}
