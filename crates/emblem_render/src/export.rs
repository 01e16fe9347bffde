//! PNG export
//!
//! The pixmap is encoded fully in memory and written with a single call, so
//! an export failure never leaves a truncated file behind.

use crate::error::ExportError;
use emblem_core::Pixmap;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::path::Path;

/// Write a flattened pixmap to `path` as a PNG
pub fn export_png(pixmap: &Pixmap, path: &Path) -> Result<(), ExportError> {
    let mut encoded = Vec::new();
    PngEncoder::new(&mut encoded).write_image(
        pixmap.data(),
        pixmap.width(),
        pixmap.height(),
        ExtendedColorType::Rgba8,
    )?;

    std::fs::write(path, &encoded).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = encoded.len(), "exported PNG");
    Ok(())
}
