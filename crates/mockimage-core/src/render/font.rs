//! Built-in 5x7 bitmap font and glyph drawing.
//!
//! Covers upper-case ASCII, digits and the punctuation used by the label
//! bar. Lower-case input is drawn upper-case. Anything else (emoji and
//! other symbols used for the watermark) falls back to a procedural
//! four-pointed star.

use super::surface::Surface;
use super::types::Rgb;

/// Glyph cell width in font units.
pub const GLYPH_COLUMNS: u32 = 5;
/// Glyph cell height in font units.
pub const GLYPH_ROWS: u32 = 7;

/// Rows top to bottom; bit 4 is the leftmost column.
fn bitmap(ch: char) -> Option<[u8; 7]> {
    let rows = match ch.to_ascii_uppercase() {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        ' ' => [0x00; 7],
        '(' => [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
        ')' => [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '×' => [0x00, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x00],
        '•' => [0x00, 0x00, 0x0E, 0x0E, 0x0E, 0x00, 0x00],
        _ => return None,
    };
    Some(rows)
}

/// Whether `ch` has a bitmap (as opposed to the star fallback).
pub fn has_bitmap(ch: char) -> bool {
    bitmap(ch).is_some()
}

/// Coverage of a glyph at local coordinates normalized to the glyph box
/// (`u`, `v` in -0.5..0.5, origin at the glyph centre).
fn coverage(ch: char, u: f32, v: f32) -> bool {
    if !(-0.5..0.5).contains(&u) || !(-0.5..0.5).contains(&v) {
        return false;
    }
    match bitmap(ch) {
        Some(rows) => {
            let col = ((u + 0.5) * GLYPH_COLUMNS as f32) as usize;
            let row = ((v + 0.5) * GLYPH_ROWS as f32) as usize;
            let col = col.min(GLYPH_COLUMNS as usize - 1);
            let row = row.min(GLYPH_ROWS as usize - 1);
            rows[row] & (0x10 >> col) != 0
        }
        // Astroid |x|^(1/2) + |y|^(1/2) <= r^(1/2)
        None => (u.abs() * 2.0).sqrt() + (v.abs() * 2.0).sqrt() <= 1.0,
    }
}

/// Placement of a single glyph.
#[derive(Debug, Clone, Copy)]
pub struct GlyphPlacement {
    /// Centre of the glyph box in surface pixels.
    pub center: (f32, f32),
    /// Glyph box height in pixels; width follows the 5:7 cell ratio for
    /// bitmap glyphs, the star fallback is square.
    pub size: f32,
    /// Rotation in radians (positive = clockwise).
    pub rotation: f32,
}

/// Draw one glyph with inverse-mapped sampling so rotation leaves no holes.
pub fn draw_glyph(surface: &mut Surface, ch: char, at: GlyphPlacement, color: Rgb, alpha: f32) {
    let box_h = at.size.max(1.0);
    let box_w = if has_bitmap(ch) {
        box_h * GLYPH_COLUMNS as f32 / GLYPH_ROWS as f32
    } else {
        box_h
    };

    // Bounding radius of the rotated box.
    let reach = (box_w * box_w + box_h * box_h).sqrt() / 2.0;
    let (cx, cy) = at.center;
    let (sin, cos) = at.rotation.sin_cos();

    let x0 = (cx - reach).floor() as i64;
    let x1 = (cx + reach).ceil() as i64;
    let y0 = (cy - reach).floor() as i64;
    let y1 = (cy + reach).ceil() as i64;

    for py in y0..=y1 {
        for px in x0..=x1 {
            let dx = px as f32 + 0.5 - cx;
            let dy = py as f32 + 0.5 - cy;
            let lx = dx * cos + dy * sin;
            let ly = -dx * sin + dy * cos;
            if coverage(ch, lx / box_w, ly / box_h) {
                surface.blend_pixel(px, py, color, alpha);
            }
        }
    }
}

/// Horizontal advance for one glyph of the given height, in pixels.
#[inline]
pub fn advance(size: f32, letter_spacing: f32) -> f32 {
    size * (GLYPH_COLUMNS + 1) as f32 / GLYPH_ROWS as f32 + letter_spacing
}

/// Draw a single line of text centred on `center`.
pub fn draw_text_centered(
    surface: &mut Surface,
    text: &str,
    center: (f32, f32),
    size: f32,
    letter_spacing: f32,
    color: Rgb,
    alpha: f32,
) {
    let step = advance(size, letter_spacing);
    let count = text.chars().count();
    if count == 0 {
        return;
    }
    // The trailing gap of the last glyph is not part of the visible width.
    let total = step * count as f32 - (step - size * GLYPH_COLUMNS as f32 / GLYPH_ROWS as f32);
    let mut x = center.0 - total / 2.0 + size * GLYPH_COLUMNS as f32 / GLYPH_ROWS as f32 / 2.0;

    for ch in text.chars() {
        let placement = GlyphPlacement {
            center: (x, center.1),
            size,
            rotation: 0.0,
        };
        draw_glyph(surface, ch, placement, color, alpha);
        x += step;
    }
}
