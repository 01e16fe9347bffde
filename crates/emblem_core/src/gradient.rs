//! Axis-aligned two-stop linear gradient fills
//!
//! Each pixel's color is a pure function of its coordinate and the two
//! endpoint colors, so fills could be parallelized row-by-row without
//! changing the output.

use crate::color::Color;
use crate::paint::{Axis, Paint};
use crate::raster::Pixmap;

/// Interpolated color at position `pos` along a run of `len` pixels
///
/// Channel formula: `c = start + (end - start) * pos / len`, truncated.
#[inline]
pub fn color_at(start: Color, end: Color, pos: u32, len: u32) -> Color {
    debug_assert!(len >= 1);
    let lerp = |a: u8, b: u8| -> u8 {
        (a as i32 + (b as i32 - a as i32) * pos as i32 / len as i32) as u8
    };
    Color {
        r: lerp(start.r, end.r),
        g: lerp(start.g, end.g),
        b: lerp(start.b, end.b),
    }
}

/// Fill a full surface with a paint
///
/// Solid paints ignore the axis. Gradients interpolate along the given axis
/// over the full width (horizontal) or height (vertical); every pixel is
/// opaque.
pub fn fill(width: u32, height: u32, paint: &Paint, axis: Axis) -> Pixmap {
    let (start, end) = match *paint {
        Paint::Solid(color) => return Pixmap::filled(width, height, color),
        Paint::Gradient { start, end } => (start, end),
    };

    let mut pixmap = Pixmap::new(width, height);
    match axis {
        Axis::Horizontal => {
            for y in 0..height {
                let row = pixmap.row_mut(y);
                for x in 0..width {
                    let c = color_at(start, end, x, width);
                    row[x as usize * 4..x as usize * 4 + 4]
                        .copy_from_slice(&[c.r, c.g, c.b, 255]);
                }
            }
        }
        Axis::Vertical => {
            for y in 0..height {
                let c = color_at(start, end, y, height);
                for px in pixmap.row_mut(y).chunks_exact_mut(4) {
                    px.copy_from_slice(&[c.r, c.g, c.b, 255]);
                }
            }
        }
    }
    pixmap
}

/// Vertical gradient over a row span, transparent elsewhere
///
/// The gradient runs top-to-bottom across `span_len` rows starting at
/// `span_top` (text fills interpolate over the text bounding-box height, not
/// the canvas). Rows outside the canvas are skipped. A zero-length span
/// degrades to a solid fill of the start color so there is no division by
/// zero; the glyph mask clips it to nothing visible anyway.
pub fn fill_vertical_span(
    width: u32,
    height: u32,
    start: Color,
    end: Color,
    span_top: i32,
    span_len: u32,
) -> Pixmap {
    if span_len == 0 {
        tracing::debug!("zero-height gradient span, degrading to solid start color");
        return Pixmap::filled(width, height, start);
    }

    let mut pixmap = Pixmap::new(width, height);
    for i in 0..span_len {
        let y = span_top + i as i32;
        if y < 0 || y >= height as i32 {
            continue;
        }
        let c = color_at(start, end, i, span_len);
        for px in pixmap.row_mut(y as u32).chunks_exact_mut(4) {
            px.copy_from_slice(&[c.r, c.g, c.b, 255]);
        }
    }
    pixmap
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_fill_ignores_axis() {
        let paint = Paint::Solid(Color::rgb(9, 8, 7));
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let pixmap = fill(5, 3, &paint, axis);
            assert_eq!(pixmap.pixel(4, 2), [9, 8, 7, 255]);
        }
    }

    #[test]
    fn gradient_endpoints() {
        let paint = Paint::gradient(Color::rgb(10, 200, 30), Color::rgb(250, 0, 130));
        let pixmap = fill(100, 2, &paint, Axis::Horizontal);
        assert_eq!(pixmap.pixel(0, 0), [10, 200, 30, 255]);
        // Last column is within rounding distance of the end color
        let [r, g, b, a] = pixmap.pixel(99, 0);
        assert!((r as i32 - 250).abs() <= 3);
        assert!((g as i32).abs() <= 2);
        assert!((b as i32 - 130).abs() <= 2);
        assert_eq!(a, 255);
    }

    #[test]
    fn red_to_blue_over_ten_columns_is_monotonic() {
        let paint = Paint::gradient(Color::RED, Color::BLUE);
        let pixmap = fill(10, 1, &paint, Axis::Horizontal);

        assert_eq!(pixmap.pixel(0, 0), [255, 0, 0, 255]);
        let [r, _, b, _] = pixmap.pixel(9, 0);
        assert!(255 - b <= 26 && r <= 26);

        let mut prev = pixmap.pixel(0, 0);
        for x in 1..10 {
            let cur = pixmap.pixel(x, 0);
            assert!(cur[0] <= prev[0], "red must not increase at column {x}");
            assert!(cur[2] >= prev[2], "blue must not decrease at column {x}");
            prev = cur;
        }
    }

    #[test]
    fn vertical_fill_varies_by_row() {
        let paint = Paint::gradient(Color::BLACK, Color::WHITE);
        let pixmap = fill(2, 8, &paint, Axis::Vertical);
        assert_eq!(pixmap.pixel(0, 0), [0, 0, 0, 255]);
        assert_eq!(pixmap.pixel(1, 0), pixmap.pixel(0, 0));
        assert!(pixmap.pixel(0, 7)[0] > 200);
    }

    #[test]
    fn span_fill_leaves_outside_rows_transparent() {
        let pixmap = fill_vertical_span(4, 10, Color::RED, Color::BLUE, 3, 4);
        assert_eq!(pixmap.pixel(0, 2)[3], 0);
        assert_eq!(pixmap.pixel(0, 3), [255, 0, 0, 255]);
        assert_eq!(pixmap.pixel(0, 7)[3], 0);
    }

    #[test]
    fn span_fill_clips_offscreen_rows() {
        let pixmap = fill_vertical_span(2, 4, Color::RED, Color::BLUE, -2, 8);
        // Rows -2 and -1 are skipped; row 0 is 2/8 of the way along
        assert_eq!(pixmap.pixel(0, 0)[3], 255);
        assert!(pixmap.pixel(0, 0)[0] < 255);
    }

    #[test]
    fn zero_span_degrades_to_solid_start() {
        let pixmap = fill_vertical_span(3, 3, Color::RED, Color::BLUE, 0, 0);
        assert_eq!(pixmap.pixel(1, 1), [255, 0, 0, 255]);
    }
}
