//! Dependency-syntax diagrams.
//!
//! A sentence in the ten-column CoNLL format is drawn as its words on one line
//! with a labelled arc over the words for every head/dependent relation:
//!
//! ```text
//! parse ──► Sentence ──► layout ──► Diagram (primitives) ──► SvgSurface ──► Rasterizer
//! ```
//!
//! [`layout_sentence`] is pure and deterministic; drawing happens by replaying
//! its primitives against a [`render::Renderer`].

use pest_derive::Parser;

pub mod errors;
pub mod input;
pub mod layout;
mod log;
pub mod parse;
pub mod render;
pub mod sentence;
pub mod types;

pub use errors::{Error, ParseError, RenderError, StructuralError};
pub use input::{Block, BlockReader};
pub use layout::{ArrowPlacement, Diagram, Geometry, Options, TagField, layout_sentence};
pub use parse::parse_sentence;
pub use render::{Rasterizer, Renderer, SvgSurface};
pub use sentence::{Head, Sentence, Token};
pub use types::WordId;

#[derive(Parser)]
#[grammar = "conll.pest"]
pub struct ConllParser;

/// Lay out `sentence` and draw it as an SVG document.
pub fn render_svg(sentence: &Sentence, options: &Options) -> Result<String, Error> {
    let diagram = layout_sentence(sentence, options)?;
    Ok(diagram_to_svg(&diagram))
}

/// Draw an already laid out diagram as SVG.
pub fn diagram_to_svg(diagram: &Diagram) -> String {
    let mut surface = SvgSurface::new(diagram.canvas);
    render::replay(&diagram.primitives, &mut surface);
    surface.finish()
}

/// Lay out `sentence` and rasterize it to PNG bytes.
pub fn render_png(
    sentence: &Sentence,
    options: &Options,
    rasterizer: &Rasterizer,
) -> Result<Vec<u8>, Error> {
    let svg = render_svg(sentence, options)?;
    Ok(rasterizer.encode_png(&svg)?)
}

/// Like [`render_png`], returning the image as base64 text.
pub fn render_png_base64(
    sentence: &Sentence,
    options: &Options,
    rasterizer: &Rasterizer,
) -> Result<String, Error> {
    let svg = render_svg(sentence, options)?;
    Ok(rasterizer.encode_png_base64(&svg)?)
}
