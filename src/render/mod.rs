//! Drawing backends
//!
//! The layout only produces a list of [`Primitive`]s. A [`Renderer`] is the
//! stateful side: it keeps the current point, path, colour and font, and turns
//! the primitives into output.
//!
//! - `svg`: accumulates an SVG document
//! - `raster`: rasterizes that document to PNG

pub mod raster;
pub mod svg;

pub use raster::Rasterizer;
pub use svg::SvgSurface;

use crate::layout::{FontWeight, Primitive};
use crate::types::Rgb;

/// The drawing capabilities the layout relies on.
///
/// Semantics follow the usual 2-D path model: `move_to`, `line_to` and `arc`
/// extend the current path, `stroke` and `fill` paint and then clear it, and
/// `show_text` draws at the current point.
pub trait Renderer {
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    /// Arc around `(cx, cy)` from `start_angle` to `end_angle`, increasing.
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64);
    fn stroke(&mut self);
    fn fill(&mut self);
    fn set_color(&mut self, color: Rgb);
    fn set_line_width(&mut self, width: f64);
    fn select_font(&mut self, family: &str, weight: FontWeight);
    fn set_font_size(&mut self, size: f64);
    fn show_text(&mut self, text: &str);
}

/// Execute `primitives` in order against `renderer`.
pub fn replay<R: Renderer + ?Sized>(primitives: &[Primitive], renderer: &mut R) {
    for primitive in primitives {
        match primitive {
            Primitive::SetColor(color) => renderer.set_color(*color),
            Primitive::SetLineWidth(w) => renderer.set_line_width(*w),
            Primitive::SelectFont { family, weight } => renderer.select_font(family, *weight),
            Primitive::SetFontSize(size) => renderer.set_font_size(*size),
            Primitive::MoveTo(p) => renderer.move_to(p.x, p.y),
            Primitive::LineTo(p) => renderer.line_to(p.x, p.y),
            Primitive::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => renderer.arc(center.x, center.y, *radius, *start_angle, *end_angle),
            Primitive::Stroke => renderer.stroke(),
            Primitive::Fill => renderer.fill(),
            Primitive::ShowText(text) => renderer.show_text(text),
        }
    }
}
