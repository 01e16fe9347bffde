//! Embedded reference glyph set
//!
//! The last link of the font fallback chain: a fixed-size bitmap glyph set
//! that needs no font file at all. Glyphs live in an 8x16 cell with seven
//! ink rows; requested sizes are reached by scaling the reference cell, so
//! edges go blocky but reported dimensions stay predictable.

/// Size the reference glyphs are authored at, in pixels
pub const REFERENCE_SIZE: f32 = 16.0;

/// Horizontal advance per glyph cell at reference size
pub const ADVANCE: i32 = 8;

/// Cell row where glyph ink begins
pub const INK_TOP: i32 = 4;

/// Ink rows per glyph
pub const INK_ROWS: usize = 7;

/// Shown for characters the set has no pattern for
const NOTDEF: [u8; INK_ROWS] = [0x7E, 0x42, 0x42, 0x42, 0x42, 0x42, 0x7E];

/// Row bit patterns for a character, most significant bit leftmost
///
/// Lowercase letters reuse the uppercase patterns; anything unmapped gets
/// the notdef box so every string still produces visible ink.
pub fn glyph_rows(c: char) -> [u8; INK_ROWS] {
    match c.to_ascii_uppercase() {
        ' ' => [0x00; INK_ROWS],
        'A' => [0x3C, 0x66, 0x66, 0x7E, 0x66, 0x66, 0x66],
        'B' => [0x7C, 0x66, 0x7C, 0x66, 0x66, 0x66, 0x7C],
        'C' => [0x3C, 0x66, 0x60, 0x60, 0x60, 0x66, 0x3C],
        'D' => [0x78, 0x6C, 0x66, 0x66, 0x66, 0x6C, 0x78],
        'E' => [0x7E, 0x60, 0x7C, 0x60, 0x60, 0x60, 0x7E],
        'F' => [0x7E, 0x60, 0x7C, 0x60, 0x60, 0x60, 0x60],
        'G' => [0x3C, 0x66, 0x60, 0x6E, 0x66, 0x66, 0x3E],
        'H' => [0x66, 0x66, 0x66, 0x7E, 0x66, 0x66, 0x66],
        'I' => [0x3C, 0x18, 0x18, 0x18, 0x18, 0x18, 0x3C],
        'J' => [0x1E, 0x0C, 0x0C, 0x0C, 0x0C, 0x6C, 0x38],
        'K' => [0x66, 0x6C, 0x78, 0x70, 0x78, 0x6C, 0x66],
        'L' => [0x60, 0x60, 0x60, 0x60, 0x60, 0x60, 0x7E],
        'M' => [0x63, 0x77, 0x7F, 0x6B, 0x63, 0x63, 0x63],
        'N' => [0x66, 0x76, 0x7E, 0x7E, 0x6E, 0x66, 0x66],
        'O' => [0x3C, 0x66, 0x66, 0x66, 0x66, 0x66, 0x3C],
        'P' => [0x7C, 0x66, 0x66, 0x7C, 0x60, 0x60, 0x60],
        'Q' => [0x3C, 0x66, 0x66, 0x66, 0x6A, 0x6C, 0x36],
        'R' => [0x7C, 0x66, 0x66, 0x7C, 0x6C, 0x66, 0x66],
        'S' => [0x3C, 0x66, 0x60, 0x3C, 0x06, 0x66, 0x3C],
        'T' => [0x7E, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18],
        'U' => [0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x3C],
        'V' => [0x66, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x18],
        'W' => [0x63, 0x63, 0x63, 0x6B, 0x7F, 0x77, 0x63],
        'X' => [0x66, 0x66, 0x3C, 0x18, 0x3C, 0x66, 0x66],
        'Y' => [0x66, 0x66, 0x66, 0x3C, 0x18, 0x18, 0x18],
        'Z' => [0x7E, 0x06, 0x0C, 0x18, 0x30, 0x60, 0x7E],
        '0' => [0x3C, 0x66, 0x6E, 0x7E, 0x76, 0x66, 0x3C],
        '1' => [0x18, 0x38, 0x18, 0x18, 0x18, 0x18, 0x7E],
        '2' => [0x3C, 0x66, 0x06, 0x0C, 0x18, 0x30, 0x7E],
        '3' => [0x3C, 0x66, 0x06, 0x1C, 0x06, 0x66, 0x3C],
        '4' => [0x0C, 0x1C, 0x3C, 0x6C, 0x7E, 0x0C, 0x0C],
        '5' => [0x7E, 0x60, 0x7C, 0x06, 0x06, 0x66, 0x3C],
        '6' => [0x3C, 0x66, 0x60, 0x7C, 0x66, 0x66, 0x3C],
        '7' => [0x7E, 0x06, 0x0C, 0x18, 0x18, 0x18, 0x18],
        '8' => [0x3C, 0x66, 0x66, 0x3C, 0x66, 0x66, 0x3C],
        '9' => [0x3C, 0x66, 0x66, 0x3E, 0x06, 0x66, 0x3C],
        '!' => [0x18, 0x18, 0x18, 0x18, 0x18, 0x00, 0x18],
        '?' => [0x3C, 0x66, 0x06, 0x0C, 0x18, 0x00, 0x18],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x30],
        ':' => [0x00, 0x18, 0x18, 0x00, 0x18, 0x18, 0x00],
        ';' => [0x00, 0x18, 0x18, 0x00, 0x18, 0x18, 0x30],
        '-' => [0x00, 0x00, 0x00, 0x7E, 0x00, 0x00, 0x00],
        '_' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x7E],
        '+' => [0x00, 0x18, 0x18, 0x7E, 0x18, 0x18, 0x00],
        '\'' => [0x18, 0x18, 0x30, 0x00, 0x00, 0x00, 0x00],
        _ => NOTDEF,
    }
}

/// Tight ink bounds of `text` at reference scale, relative to the cell
/// grid origin
///
/// Returns `None` when nothing inks (empty string or all spaces).
pub fn ink_bounds(text: &str) -> Option<(i32, i32, i32, i32)> {
    let mut bounds: Option<(i32, i32, i32, i32)> = None;
    for (i, c) in text.chars().enumerate() {
        let rows = glyph_rows(c);
        let cell_x = i as i32 * ADVANCE;
        for (row, bits) in rows.iter().enumerate() {
            if *bits == 0 {
                continue;
            }
            let y = INK_TOP + row as i32;
            let left = cell_x + bits.leading_zeros() as i32;
            let right = cell_x + 8 - bits.trailing_zeros() as i32;
            bounds = Some(match bounds {
                None => (left, y, right, y + 1),
                Some((l, t, r, b)) => (l.min(left), t.min(y), r.max(right), b.max(y + 1)),
            });
        }
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_have_ink_and_spaces_do_not() {
        assert!(glyph_rows('A').iter().any(|r| *r != 0));
        assert!(glyph_rows(' ').iter().all(|r| *r == 0));
        // Unknown characters fall back to the notdef box
        assert_eq!(glyph_rows('€'), NOTDEF);
    }

    #[test]
    fn lowercase_reuses_uppercase() {
        assert_eq!(glyph_rows('a'), glyph_rows('A'));
    }

    #[test]
    fn ink_bounds_spans_all_cells() {
        assert_eq!(ink_bounds(""), None);
        assert_eq!(ink_bounds("   "), None);

        let (l, t, r, b) = ink_bounds("HI").unwrap();
        assert!(l >= 0 && l < ADVANCE);
        assert_eq!(t, INK_TOP);
        assert!(r > ADVANCE && r <= 2 * ADVANCE);
        assert_eq!(b, INK_TOP + INK_ROWS as i32);
    }
}
