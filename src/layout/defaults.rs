//! Default geometry (pixels unless noted)

pub const CHAR_WIDTH: u32 = 7;
/// Gap between words, in character cells.
pub const WORD_SPACING: u32 = 6;
pub const ARC_RADIUS: u32 = 15;
/// Vertical distance between two nesting levels.
pub const HEIGHT_UNIT: u32 = 20;
pub const ARC_BASE_HEIGHT: u32 = 15;
/// Gap between the arc legs and the text baseline region.
pub const BASELINE_GAP: u32 = 10;
pub const PADDING_LEFT: f64 = 10.0;
pub const TEXT_BASELINE: f64 = 10.0;
pub const FONT_FAMILY: &str = "monospace";
pub const FONT_SIZE: f64 = 12.0;
pub const ANNOTATION_FONT_SIZE: f64 = 10.0;
/// Advance of one character at the annotation font size.
pub const ANNOTATION_CHAR_WIDTH: f64 = 6.0;
pub const LABEL_GAP: f64 = 5.0;
pub const ARROW_LENGTH: f64 = 3.0;
pub const LINE_WIDTH: f64 = 1.2;
pub const TAG_ROW_HEIGHT: u32 = 20;
