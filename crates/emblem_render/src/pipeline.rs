//! The render pipeline
//!
//! One synchronous pass from a [`RenderRequest`] to a flattened RGBA
//! pixmap. Every caller, interactive preview and file export alike, goes
//! through [`render`], so what is previewed is exactly what is exported. Each run
//! allocates fresh buffers and shares nothing with other runs; only the
//! font resolver persists across calls.

use crate::compose;
use crate::error::{RenderError, Result};
use crate::extrude;
use emblem_core::{gradient, Axis, Paint, Pixmap};
use emblem_text::{FontResolver, MaskRenderer};

/// Everything one render needs, supplied by the caller
///
/// Constructed per render call and consumed within it; never persisted.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// The text to draw
    pub text: String,
    /// Opaque font locator, passed verbatim to the resolver
    pub font: String,
    /// Point size; the resolver floors this to 10
    pub size: u32,
    /// Extrusion depth when the pseudo-3D effect is on; `None` renders flat
    pub extrude: Option<u32>,
    /// Background fill, horizontal gradient axis
    pub background: Paint,
    /// Text fill, vertical gradient axis over the text bounding box
    pub fill: Paint,
    pub width: u32,
    pub height: u32,
}

/// Run the full pipeline: background, extrusion, masked text fill,
/// composite, flatten
pub fn render(request: &RenderRequest, fonts: &mut FontResolver) -> Result<Pixmap> {
    if request.width < 1 || request.height < 1 {
        return Err(RenderError::DegenerateGeometry {
            width: request.width,
            height: request.height,
        });
    }
    let (width, height) = (request.width, request.height);

    let background = gradient::fill(width, height, &request.background, Axis::Horizontal);

    let font = fonts.resolve(&request.font, request.size);
    let mut masker = MaskRenderer::new();

    // Center on the bounding box with integer division; oversized text may
    // land partially off-canvas and simply clips
    let bounds = font.measure(&request.text);
    let origin = (
        (width as i32 - bounds.width()) / 2,
        (height as i32 - bounds.height()) / 2,
    );
    let (mask, bounds) = masker.render(&request.text, &font, width, height, origin);

    let extrusion = request.extrude.map(|depth| {
        let mut layer = Pixmap::new(width, height);
        for stamp in extrude::layers(request.fill.start(), depth.max(1)) {
            let offset = (stamp.offset, stamp.offset);
            compose::over(&mut layer, &compose::tint_mask(&mask, stamp.color, offset));
        }
        layer
    });

    let text_fill = match request.fill {
        Paint::Solid(color) => compose::tint_mask(&mask, color, (0, 0)),
        Paint::Gradient { start, end } => {
            // The vertical gradient spans the text bounding-box height from
            // the draw origin downward, unlike the background which spans
            // the full canvas width
            let mut layer = gradient::fill_vertical_span(
                width,
                height,
                start,
                end,
                origin.1,
                bounds.height().max(0) as u32,
            );
            compose::apply_mask(&mut layer, &mask);
            layer
        }
    };

    tracing::debug!(
        text = %request.text,
        width,
        height,
        extrude = ?request.extrude,
        "composited render"
    );

    Ok(compose::compose(background, extrusion, text_fill))
}
