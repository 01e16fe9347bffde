//! Glyph rasterization using swash
//!
//! Converts glyph outlines to 8-bit coverage bitmaps. Antialiasing quality
//! is swash's concern; this module only positions the result.

use crate::font::FontFace;
use crate::{Result, TextError};
use swash::scale::{Render, ScaleContext, Source};
use swash::zeno::Format;

/// An 8-bit coverage bitmap for one glyph
#[derive(Debug, Clone)]
pub struct GlyphImage {
    /// Coverage values, row-major, `width * height` bytes
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Offset from the pen position to the left edge
    pub left: i32,
    /// Offset from the baseline up to the top edge
    pub top: i32,
}

impl GlyphImage {
    fn empty() -> Self {
        Self {
            data: Vec::new(),
            width: 0,
            height: 0,
            left: 0,
            top: 0,
        }
    }
}

/// Glyph rasterizer wrapping a cached swash scale context
pub struct GlyphRasterizer {
    scale_context: ScaleContext,
}

impl GlyphRasterizer {
    pub fn new() -> Self {
        Self {
            scale_context: ScaleContext::new(),
        }
    }

    /// Rasterize one glyph at the given pixel size
    ///
    /// Ink-less glyphs (spaces) come back as an empty image, not an error.
    pub fn rasterize(&mut self, font: &FontFace, glyph_id: u16, size: f32) -> Result<GlyphImage> {
        let swash_font = swash::FontRef::from_index(font.data(), font.face_index() as usize)
            .ok_or(TextError::InvalidFontData)?;

        let mut scaler = self.scale_context.builder(swash_font).size(size).build();

        let mut render = Render::new(&[Source::Outline]);
        render.format(Format::Alpha);

        match render.render(&mut scaler, glyph_id) {
            Some(img) => Ok(GlyphImage {
                left: img.placement.left,
                top: img.placement.top,
                width: img.placement.width,
                height: img.placement.height,
                data: img.data,
            }),
            None => Ok(GlyphImage::empty()),
        }
    }
}

impl Default for GlyphRasterizer {
    fn default() -> Self {
        Self::new()
    }
}
