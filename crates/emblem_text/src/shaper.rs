//! Text shaping using rustybuzz (HarfBuzz)
//!
//! Turns a string into positioned glyphs with kerning and ligatures applied.
//! Positions come back in font units; callers scale by `size / units_per_em`.

use crate::font::FontFace;
use rustybuzz::{Face, UnicodeBuffer};

/// A shaped glyph with font-unit positioning
#[derive(Debug, Clone, Copy)]
pub struct ShapedGlyph {
    /// Glyph ID in the font
    pub glyph_id: u16,
    /// Character this glyph came from (for degradation logging)
    pub codepoint: char,
    /// X offset from the pen position
    pub x_offset: i32,
    /// Y offset from the baseline
    pub y_offset: i32,
    /// Horizontal advance to the next pen position
    pub x_advance: i32,
}

/// Result of shaping one string
#[derive(Debug, Clone)]
pub struct ShapedText {
    /// Glyphs in visual order
    pub glyphs: Vec<ShapedGlyph>,
    /// Units per em of the shaped font
    pub units_per_em: u16,
}

impl ShapedText {
    /// Pixels per font unit at the given size
    pub fn px_scale(&self, size: f32) -> f32 {
        size / self.units_per_em as f32
    }
}

/// Text shaper over rustybuzz
///
/// Stateless; the rustybuzz face borrows the font data, so it is built per
/// call rather than cached.
#[derive(Default)]
pub struct TextShaper;

impl TextShaper {
    pub fn new() -> Self {
        Self
    }

    /// Shape `text` with the given face
    pub fn shape(&self, text: &str, font: &FontFace) -> ShapedText {
        let face = match Face::from_slice(font.data(), font.face_index()) {
            Some(f) => f,
            None => {
                tracing::warn!(
                    family = font.family_name(),
                    "rustybuzz rejected face, using unshaped advances"
                );
                return self.fallback_shape(text, font);
            }
        };

        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(text);
        let output = rustybuzz::shape(&face, &[], buffer);

        let infos = output.glyph_infos();
        let positions = output.glyph_positions();

        let mut glyphs = Vec::with_capacity(infos.len());
        for (info, pos) in infos.iter().zip(positions.iter()) {
            let codepoint = text
                .char_indices()
                .find(|(i, _)| *i as u32 == info.cluster)
                .map(|(_, c)| c)
                .unwrap_or('\u{FFFD}');

            glyphs.push(ShapedGlyph {
                glyph_id: info.glyph_id as u16,
                codepoint,
                x_offset: pos.x_offset,
                y_offset: pos.y_offset,
                x_advance: pos.x_advance,
            });
        }

        ShapedText {
            glyphs,
            units_per_em: font.metrics().units_per_em,
        }
    }

    /// Per-character advances when shaping is unavailable
    fn fallback_shape(&self, text: &str, font: &FontFace) -> ShapedText {
        let glyphs = text
            .chars()
            .map(|c| {
                let glyph_id = font.glyph_id(c).unwrap_or(0);
                ShapedGlyph {
                    glyph_id,
                    codepoint: c,
                    x_offset: 0,
                    y_offset: 0,
                    x_advance: font.glyph_advance(glyph_id).unwrap_or(500) as i32,
                }
            })
            .collect();

        ShapedText {
            glyphs,
            units_per_em: font.metrics().units_per_em,
        }
    }
}
