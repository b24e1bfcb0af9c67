//! Fixed colors and paint values for markers and layers.

pub const START_MARKER_COLOR: &str = "#ff0000";
pub const END_MARKER_COLOR: &str = "#0000ff";
pub const MARKER_CURSOR: &str = "grab";

pub const ROUTE_LINE_WIDTH: f32 = 4.0;
const ROUTE_SLOT_COLORS: [&str; 3] = ["#ff0000", "#0000ff", "#00aa00"];

pub const BOUNDING_BOX_FILL_COLOR: &str = "#888888";
pub const BOUNDING_BOX_OUTLINE_COLOR: &str = "#000000";
pub const BOUNDING_BOX_OPACITY: f32 = 0.2;

/// Line and card header color for a route slot. Wraps around past the table.
pub fn route_slot_color(index: usize) -> &'static str {
    ROUTE_SLOT_COLORS[index % ROUTE_SLOT_COLORS.len()]
}

/// Parse a `#rrggbb` color.
pub fn hex_to_rgb(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}
