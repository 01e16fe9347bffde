//! Alpha compositing
//!
//! Straight-alpha "over" blending plus the mask operations the text layer
//! needs. Layers combine strictly back-to-front: background, extrusion,
//! masked text fill.

use emblem_core::{AlphaMask, Color, Pixmap};

/// Blend `src` over `dst`, pixel-wise
///
/// Standard straight-alpha over: `a = as + ab * (1 - as)` with color
/// channels weighted by their alphas. Both buffers must share dimensions.
pub fn over(dst: &mut Pixmap, src: &Pixmap) {
    debug_assert_eq!(dst.width(), src.width());
    debug_assert_eq!(dst.height(), src.height());

    let src_data = src.data();
    for (d, s) in dst.data_mut().chunks_exact_mut(4).zip(src_data.chunks_exact(4)) {
        let sa = s[3] as u32;
        if sa == 255 {
            d.copy_from_slice(s);
            continue;
        }
        if sa == 0 {
            continue;
        }
        let da = d[3] as u32;
        let out_a = sa * 255 + da * (255 - sa);
        if out_a == 0 {
            d.fill(0);
            continue;
        }
        for c in 0..3 {
            let sc = s[c] as u32;
            let dc = d[c] as u32;
            d[c] = ((sc * sa * 255 + dc * da * (255 - sa) + out_a / 2) / out_a) as u8;
        }
        d[3] = ((out_a + 127) / 255) as u8;
    }
}

/// Color a glyph mask, shifted by `offset`, into a transparent layer
///
/// The mask's coverage becomes the layer's alpha; this is how solid text
/// and each extrusion stamp are drawn.
pub fn tint_mask(mask: &AlphaMask, color: Color, offset: (i32, i32)) -> Pixmap {
    let mut layer = Pixmap::new(mask.width(), mask.height());
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            let coverage = mask.coverage(x, y);
            if coverage == 0 {
                continue;
            }
            let tx = x as i64 + offset.0 as i64;
            let ty = y as i64 + offset.1 as i64;
            if tx < 0 || ty < 0 || tx >= layer.width() as i64 || ty >= layer.height() as i64 {
                continue;
            }
            layer.set_pixel(tx as u32, ty as u32, [color.r, color.g, color.b, coverage]);
        }
    }
    layer
}

/// Clip a color layer to glyph coverage by scaling its alpha channel
pub fn apply_mask(layer: &mut Pixmap, mask: &AlphaMask) {
    debug_assert_eq!(layer.width(), mask.width());
    debug_assert_eq!(layer.height(), mask.height());

    for y in 0..mask.height() {
        let row = layer.row_mut(y);
        for x in 0..mask.width() {
            let a = &mut row[x as usize * 4 + 3];
            *a = ((*a as u32 * mask.coverage(x, y) as u32 + 127) / 255) as u8;
        }
    }
}

/// Force every pixel opaque before export
pub fn flatten(pixmap: &mut Pixmap) {
    for px in pixmap.data_mut().chunks_exact_mut(4) {
        px[3] = 255;
    }
}

/// Flatten the layer stack in fixed back-to-front order
///
/// Consumes the background as the base; the extrusion (if any) and the
/// masked text fill go over it, then the result is forced opaque.
pub fn compose(background: Pixmap, extrusion: Option<Pixmap>, text_fill: Pixmap) -> Pixmap {
    let mut out = background;
    if let Some(layer) = extrusion {
        over(&mut out, &layer);
    }
    over(&mut out, &text_fill);
    flatten(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, rgba: [u8; 4]) -> Pixmap {
        let mut p = Pixmap::new(w, h);
        for y in 0..h {
            for x in 0..w {
                p.set_pixel(x, y, rgba);
            }
        }
        p
    }

    #[test]
    fn opaque_source_replaces_destination() {
        let mut dst = solid(2, 2, [10, 10, 10, 255]);
        let src = solid(2, 2, [200, 0, 0, 255]);
        over(&mut dst, &src);
        assert_eq!(dst.pixel(1, 1), [200, 0, 0, 255]);
    }

    #[test]
    fn transparent_source_leaves_destination() {
        let mut dst = solid(2, 2, [10, 20, 30, 255]);
        let src = Pixmap::new(2, 2);
        over(&mut dst, &src);
        assert_eq!(dst.pixel(0, 0), [10, 20, 30, 255]);
    }

    #[test]
    fn half_coverage_blends_half_way() {
        let mut dst = solid(1, 1, [0, 0, 0, 255]);
        let src = solid(1, 1, [255, 255, 255, 128]);
        over(&mut dst, &src);
        let [r, _, _, a] = dst.pixel(0, 0);
        assert!((r as i32 - 128).abs() <= 1);
        assert_eq!(a, 255);
    }

    #[test]
    fn layer_order_is_not_commutative() {
        let base = solid(1, 1, [255, 255, 255, 255]);
        let red = solid(1, 1, [255, 0, 0, 255]);
        let blue = solid(1, 1, [0, 0, 255, 255]);

        let mut a = base.clone();
        over(&mut a, &red);
        over(&mut a, &blue);

        let mut b = base;
        over(&mut b, &blue);
        over(&mut b, &red);

        assert_ne!(a.pixel(0, 0), b.pixel(0, 0));
        assert_eq!(a.pixel(0, 0), [0, 0, 255, 255]);
        assert_eq!(b.pixel(0, 0), [255, 0, 0, 255]);
    }

    #[test]
    fn tint_mask_uses_coverage_as_alpha() {
        let mut mask = AlphaMask::new(3, 3);
        mask.add_coverage(1, 1, 200);
        let layer = tint_mask(&mask, Color::rgb(5, 6, 7), (0, 0));
        assert_eq!(layer.pixel(1, 1), [5, 6, 7, 200]);
        assert_eq!(layer.pixel(0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn tint_mask_offsets_and_clips() {
        let mut mask = AlphaMask::new(3, 3);
        mask.add_coverage(2, 2, 255);
        mask.add_coverage(0, 0, 255);
        let layer = tint_mask(&mask, Color::RED, (1, 1));
        // (2,2) shifts off-canvas, (0,0) lands at (1,1)
        assert_eq!(layer.pixel(1, 1), [255, 0, 0, 255]);
        assert_eq!(layer.pixel(2, 2)[3], 255);
        assert_eq!(layer.pixel(0, 0)[3], 0);
    }

    #[test]
    fn apply_mask_scales_alpha() {
        let mut layer = solid(2, 1, [9, 9, 9, 255]);
        let mut mask = AlphaMask::new(2, 1);
        mask.add_coverage(0, 0, 128);
        apply_mask(&mut layer, &mask);
        assert_eq!(layer.pixel(0, 0)[3], 128);
        assert_eq!(layer.pixel(1, 0)[3], 0);
    }

    #[test]
    fn compose_flattens_to_opaque() {
        let background = solid(2, 2, [1, 2, 3, 255]);
        let text = Pixmap::new(2, 2);
        let out = compose(background, None, text);
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(out.pixel(x, y)[3], 255);
            }
        }
    }

    #[test]
    fn swapping_extrusion_and_text_changes_overlap() {
        let background = solid(1, 1, [255, 255, 255, 255]);
        let extrusion = solid(1, 1, [40, 40, 40, 255]);
        let text = solid(1, 1, [200, 0, 0, 255]);

        let correct = compose(background.clone(), Some(extrusion.clone()), text.clone());
        let swapped = compose(background, Some(text), extrusion);
        assert_ne!(correct.pixel(0, 0), swapped.pixel(0, 0));
    }
}
