//! Live view parameters: fire intensity and the decorative color selection.

use serde::{Deserialize, Serialize};

use super::lights::INTENSITY_DEFAULT;

/// Inclusive range accepted for the intensity parameter.
pub const INTENSITY_RANGE: (f32, f32) = (1.0, 10.0);

/// Default color selection shown by the shell.
pub const DEFAULT_COLOR: &str = "#f97316";

/// Externally mutable view parameters.
///
/// `intensity` drives the lighting rescale. `color` is validated and stored
/// for display but intentionally never feeds back into particle or light
/// colors; the rendered scene ignores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewParams {
    pub intensity: f32,
    pub color: String,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            intensity: INTENSITY_DEFAULT,
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

impl ViewParams {
    /// Clamp and store a new intensity, returning the value actually stored.
    pub fn set_intensity(&mut self, value: f32) -> f32 {
        self.intensity = value.clamp(INTENSITY_RANGE.0, INTENSITY_RANGE.1);
        self.intensity
    }

    /// Validate and store a new color selection.
    ///
    /// Returns `false` (leaving the stored color untouched) when the string
    /// is not a parseable hex color.
    pub fn set_color(&mut self, hex: &str) -> bool {
        if parse_hex_color(hex).is_some() {
            self.color = hex.to_string();
            true
        } else {
            false
        }
    }
}

/// Parse hex color to RGB floats (accepts 6-char RGB or 8-char RGBA, alpha is ignored).
pub fn parse_hex_color(hex: &str) -> Option<[f32; 3]> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 && hex.len() != 8 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()? as f32 / 255.0;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()? as f32 / 255.0;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()? as f32 / 255.0;
    Some([r, g, b])
}
