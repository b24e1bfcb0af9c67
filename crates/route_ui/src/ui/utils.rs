//! Utility functions for the UI: colors and conversions.

use eframe::egui::Color32;
use route_core::style::hex_to_rgb;

/// Color for a `#rrggbb` style value at the given opacity. Unparseable values
/// fall back to mid gray.
pub fn style_color(hex: &str, opacity: f32) -> Color32 {
    let [r, g, b] = hex_to_rgb(hex).unwrap_or([128, 128, 128]);
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(r, g, b, alpha)
}

pub fn opaque(hex: &str) -> Color32 {
    style_color(hex, 1.0)
}
