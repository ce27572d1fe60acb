// Common constants for all element types
pub const MIN_STROKE_POINTS: usize = 2;

pub const DEFAULT_FONT_SIZE: f64 = 28.0;
pub const DEFAULT_FONT_FAMILY: &str = "Arial";

/// Vertical gap between text lines, added to the font size
pub const TEXT_LINE_GAP: f64 = 6.0;
pub const TEXT_MIN_WIDTH: f64 = 40.0;
pub const TEXT_MIN_HEIGHT: f64 = 24.0;
pub const TEXT_H_PADDING: f64 = 10.0;
pub const TEXT_V_PADDING: f64 = 6.0;

/// Mean of the two axis scales, used where an element can only scale uniformly
pub(crate) fn mean_scale(sx: f64, sy: f64) -> f64 {
    (sx + sy) / 2.0
}
