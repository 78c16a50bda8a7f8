//! SVG generation
//!
//! [`SvgSurface`] is a [`Renderer`] that keeps a current path the way a 2-D
//! drawing context does and writes one SVG element each time the path is
//! stroked or filled, or text is shown.

use std::f64::consts::TAU;

use glam::{DVec2, dvec2};

use super::Renderer;
use crate::layout::{Canvas, FontWeight};
use crate::types::Rgb;

/// Drawing surface that produces an SVG document.
///
/// Created for one canvas and consumed by [`SvgSurface::finish`].
#[derive(Debug)]
pub struct SvgSurface {
    canvas: Canvas,
    body: String,
    path: String,
    current: Option<DVec2>,
    color: Rgb,
    line_width: f64,
    font_family: String,
    font_weight: FontWeight,
    font_size: f64,
}

impl SvgSurface {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            body: String::new(),
            path: String::new(),
            current: None,
            color: Rgb::BLACK,
            line_width: 2.0,
            font_family: "sans-serif".to_string(),
            font_weight: FontWeight::Normal,
            font_size: 10.0,
        }
    }

    /// Close the document and return it.
    pub fn finish(self) -> String {
        let (w, h) = (self.canvas.width, self.canvas.height);
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{}</svg>\n",
            self.body
        )
    }

    fn push_path_cmd(&mut self, cmd: &str) {
        if !self.path.is_empty() {
            self.path.push(' ');
        }
        self.path.push_str(cmd);
    }

    fn take_path(&mut self) -> Option<String> {
        self.current = None;
        if self.path.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.path))
        }
    }
}

impl Renderer for SvgSurface {
    fn move_to(&mut self, x: f64, y: f64) {
        self.push_path_cmd(&format!("M{},{}", num(x), num(y)));
        self.current = Some(dvec2(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        if self.current.is_none() {
            self.move_to(x, y);
            return;
        }
        self.push_path_cmd(&format!("L{},{}", num(x), num(y)));
        self.current = Some(dvec2(x, y));
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64) {
        let center = dvec2(cx, cy);
        let point_at = |angle: f64| center + radius * dvec2(angle.cos(), angle.sin());

        let mut end_angle = end_angle;
        while end_angle < start_angle {
            end_angle += TAU;
        }

        // A path connects to the start of the arc with a straight line.
        let start = point_at(start_angle);
        if self.current.is_some() {
            self.line_to(start.x, start.y);
        } else {
            self.move_to(start.x, start.y);
        }

        // SVG cannot express a full turn in one elliptical arc command.
        let mut from = start_angle;
        while end_angle - from > 0.0 {
            let to = end_angle.min(from + std::f64::consts::PI);
            let end = point_at(to);
            let r = num(radius);
            self.push_path_cmd(&format!("A{r},{r} 0 0 1 {},{}", num(end.x), num(end.y)));
            self.current = Some(end);
            from = to;
        }
    }

    fn stroke(&mut self) {
        if let Some(d) = self.take_path() {
            self.body.push_str(&format!(
                "<path d=\"{d}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" />\n",
                self.color.to_rgb_string(),
                num(self.line_width)
            ));
        }
    }

    fn fill(&mut self) {
        if let Some(d) = self.take_path() {
            self.body.push_str(&format!(
                "<path d=\"{d} Z\" fill=\"{}\" />\n",
                self.color.to_rgb_string()
            ));
        }
    }

    fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn select_font(&mut self, family: &str, weight: FontWeight) {
        self.font_family = family.to_string();
        self.font_weight = weight;
    }

    fn set_font_size(&mut self, size: f64) {
        self.font_size = size;
    }

    fn show_text(&mut self, text: &str) {
        let at = self.current.unwrap_or(DVec2::ZERO);
        self.body.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-weight=\"{}\" font-size=\"{}\" fill=\"{}\" xml:space=\"preserve\">{}</text>\n",
            num(at.x),
            num(at.y),
            escape_xml(&self.font_family),
            self.font_weight.as_str(),
            num(self.font_size),
            self.color.to_rgb_string(),
            escape_xml(text)
        ));
    }
}

/// Format a coordinate with at most three decimals.
fn num(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        // avoids "-0"
        "0".to_string()
    } else {
        format!("{rounded}")
    }
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
