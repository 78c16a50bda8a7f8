//! PNG output through resvg.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use camino::Utf8Path;
use resvg::tiny_skia::{Color, Pixmap, Transform};
use resvg::usvg;

use crate::errors::RenderError;
use crate::layout::defaults;
use crate::log::{debug, trace};

/// Turns SVG documents into PNG images.
///
/// Loading the system font database is slow, so one rasterizer is meant to be
/// built once and reused for every sentence.
pub struct Rasterizer {
    options: usvg::Options<'static>,
}

impl std::fmt::Debug for Rasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rasterizer")
            .field("fonts", &self.options.fontdb.len())
            .finish()
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    /// A rasterizer backed by the fonts installed on this system.
    pub fn new() -> Self {
        let mut options = usvg::Options {
            font_family: defaults::FONT_FAMILY.to_string(),
            ..usvg::Options::default()
        };
        options.fontdb_mut().load_system_fonts();
        debug!("loaded {} font faces", options.fontdb.len());
        Self { options }
    }

    /// Render `svg` onto a white pixmap of the document's size.
    pub fn rasterize(&self, svg: &str) -> Result<Pixmap, RenderError> {
        let tree = usvg::Tree::from_str(svg, &self.options).map_err(|err| RenderError::Svg {
            message: err.to_string(),
        })?;

        let size = tree.size().to_int_size();
        let (width, height) = (size.width(), size.height());
        let mut pixmap =
            Pixmap::new(width, height).ok_or(RenderError::EmptyCanvas { width, height })?;
        pixmap.fill(Color::WHITE);
        resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());
        trace!("rasterized {}x{}", width, height);
        Ok(pixmap)
    }

    /// Rasterize and encode as PNG bytes.
    pub fn encode_png(&self, svg: &str) -> Result<Vec<u8>, RenderError> {
        self.rasterize(svg)?
            .encode_png()
            .map_err(|err| RenderError::Encode {
                message: err.to_string(),
            })
    }

    /// Rasterize and encode as base64 PNG.
    pub fn encode_png_base64(&self, svg: &str) -> Result<String, RenderError> {
        Ok(STANDARD.encode(self.encode_png(svg)?))
    }

    /// Rasterize and write the PNG to `path`.
    pub fn save_png(&self, svg: &str, path: &Utf8Path) -> Result<(), RenderError> {
        let png = self.encode_png(svg)?;
        std::fs::write(path, png).map_err(|source| RenderError::Io {
            path: path.to_string(),
            source,
        })?;
        debug!("wrote {}", path);
        Ok(())
    }
}
