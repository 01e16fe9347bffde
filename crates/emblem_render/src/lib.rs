//! Emblem render pipeline
//!
//! Combines the core primitives and the text stack into the full render
//! path: background fill, optional pseudo-3D extrusion, mask-clipped text
//! fill, alpha compositing, and PNG export. The same [`pipeline::render`]
//! call backs both interactive previews and file export, so the two can
//! never disagree.

pub mod compose;
pub mod error;
pub mod export;
pub mod extrude;
pub mod pipeline;

pub use error::{ExportError, RenderError, Result};
pub use export::export_png;
pub use extrude::ExtrusionLayer;
pub use pipeline::{render, RenderRequest};
