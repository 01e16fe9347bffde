//! Font resolution and glyph mask rendering for Emblem
//!
//! This crate provides:
//! - Font loading and parsing (TTF/OTF via ttf-parser)
//! - System font discovery and a deterministic fallback chain (fontdb)
//! - Text shaping (HarfBuzz via rustybuzz)
//! - Glyph rasterization to alpha coverage (swash)
//! - Canvas-sized glyph masks with tight text bounds
//!
//! The resolver is total: [`FontResolver::resolve`] always returns a usable
//! [`FontHandle`], falling back to an embedded reference glyph set when no
//! scalable font exists on the host.

pub mod builtin;
pub mod font;
pub mod mask;
pub mod rasterizer;
pub mod resolver;
pub mod shaper;

pub use font::{FontData, FontFace, FontMetrics, TextBounds};
pub use mask::MaskRenderer;
pub use rasterizer::{GlyphImage, GlyphRasterizer};
pub use resolver::{FontEntry, FontHandle, FontResolver, DEFAULT_LOCATOR};
pub use shaper::{ShapedGlyph, ShapedText, TextShaper};

use thiserror::Error;

/// Text stack errors
///
/// These stay internal to the fallback chain; `FontResolver::resolve` never
/// surfaces them.
#[derive(Error, Debug)]
pub enum TextError {
    #[error("failed to load font: {0}")]
    FontLoad(String),

    #[error("failed to parse font: {0}")]
    FontParse(String),

    #[error("invalid font data")]
    InvalidFontData,
}

pub type Result<T> = std::result::Result<T, TextError>;
