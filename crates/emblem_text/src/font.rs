//! Font loading and metric extraction
//!
//! Parses TTF/OTF data via ttf-parser and keeps the raw bytes alive for the
//! shaper and rasterizer, which each re-parse on demand.

use crate::{Result, TextError};
use std::sync::Arc;

/// Raw font bytes, either owned or shared with the font database
///
/// fontdb hands back memory-mapped or binary sources behind an
/// `Arc<dyn AsRef<[u8]>>`; wrapping them avoids copying multi-megabyte font
/// files into fresh allocations.
#[derive(Clone)]
pub struct FontData(Arc<dyn AsRef<[u8]> + Send + Sync>);

impl FontData {
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self(Arc::new(data))
    }

    pub fn from_shared(data: Arc<dyn AsRef<[u8]> + Send + Sync>) -> Self {
        Self(data)
    }

    pub fn as_slice(&self) -> &[u8] {
        (*self.0).as_ref()
    }
}

/// Vertical font metrics in font units
#[derive(Debug, Clone, Copy)]
pub struct FontMetrics {
    /// Units per em (typically 1000 or 2048)
    pub units_per_em: u16,
    /// Distance from baseline to top of the em box
    pub ascender: i16,
    /// Distance from baseline to bottom (typically negative)
    pub descender: i16,
}

impl FontMetrics {
    /// Scale a font-unit value to pixels at the given size
    pub fn scale(&self, value: i16, size: f32) -> f32 {
        value as f32 * size / self.units_per_em as f32
    }

    pub fn ascender_px(&self, size: f32) -> f32 {
        self.scale(self.ascender, size)
    }
}

/// Tight ink bounds of a rendered string, relative to the draw origin
///
/// `left`/`top` inclusive, `right`/`bottom` exclusive, so `width()` and
/// `height()` are simple differences. An empty or ink-less string reports
/// all zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl TextBounds {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }
}

/// A parsed font face
pub struct FontFace {
    /// Raw font data (kept alive for the shaper and rasterizer)
    data: FontData,
    /// Face index within the font file (for TTC collections)
    face_index: u32,
    metrics: FontMetrics,
    family_name: String,
}

impl FontFace {
    /// Parse a face from raw TTF/OTF data (face index 0)
    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        Self::from_font_data(FontData::from_vec(data), 0)
    }

    /// Parse a face from font data with a specific face index
    pub fn from_font_data(data: FontData, face_index: u32) -> Result<Self> {
        let face = ttf_parser::Face::parse(data.as_slice(), face_index)
            .map_err(|e| TextError::FontParse(format!("{e:?}")))?;

        let metrics = FontMetrics {
            units_per_em: face.units_per_em(),
            ascender: face.ascender(),
            descender: face.descender(),
        };

        let family_name = face
            .names()
            .into_iter()
            .find(|n| n.name_id == ttf_parser::name_id::FAMILY)
            .and_then(|n| n.to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        Ok(Self {
            data,
            face_index,
            metrics,
            family_name,
        })
    }

    /// Load a face from a file path
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let data = std::fs::read(path)
            .map_err(|e| TextError::FontLoad(format!("{}: {e}", path.display())))?;
        Self::from_data(data)
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Raw font bytes for shaping and rasterization
    pub fn data(&self) -> &[u8] {
        self.data.as_slice()
    }

    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    /// Re-parse as a ttf-parser face for glyph queries
    pub(crate) fn as_ttf_face(&self) -> Option<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(self.data.as_slice(), self.face_index).ok()
    }

    /// Glyph ID for a character, if the font covers it
    pub fn glyph_id(&self, c: char) -> Option<u16> {
        self.as_ttf_face()
            .and_then(|face| face.glyph_index(c))
            .map(|id| id.0)
    }

    /// Horizontal advance for a glyph in font units
    pub fn glyph_advance(&self, glyph_id: u16) -> Option<u16> {
        self.as_ttf_face()
            .and_then(|face| face.glyph_hor_advance(ttf_parser::GlyphId(glyph_id)))
    }
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family_name", &self.family_name)
            .field("face_index", &self.face_index)
            .finish()
    }
}
