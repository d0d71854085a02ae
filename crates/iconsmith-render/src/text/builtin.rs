//! Built-in 5x7 bitmap font.
//!
//! The last resort when no outline font can be loaded. It covers ASCII
//! letters, digits and a handful of punctuation marks; everything else
//! (emoji included) is drawn as a hollow replacement box.

use super::raster::{GlyphPixelFormat, RasterizedGlyph};

/// Width of a glyph cell in font units.
pub const CELL_WIDTH: u32 = 5;
/// Height of a glyph cell in font units.
pub const CELL_HEIGHT: u32 = 7;
/// Horizontal advance of one glyph, including spacing.
const ADVANCE: u32 = CELL_WIDTH + 1;

/// Rows of a glyph, top to bottom. Bit 4 is the leftmost column.
type Bitmap = [u8; CELL_HEIGHT as usize];

const REPLACEMENT: Bitmap = [0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F];

fn bitmap(c: char) -> Option<Bitmap> {
    let rows = match c.to_ascii_uppercase() {
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
        'Y' => [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
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
        '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
        '?' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '+' => [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00],
        '=' => [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00],
        '/' => [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00],
        '#' => [0x0A, 0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x0A],
        '$' => [0x04, 0x0F, 0x14, 0x0E, 0x05, 0x1E, 0x04],
        '%' => [0x18, 0x19, 0x02, 0x04, 0x08, 0x13, 0x03],
        '&' => [0x0C, 0x12, 0x14, 0x08, 0x15, 0x12, 0x0D],
        _ => return None,
    };
    Some(rows)
}

/// Characters that take no cell of their own.
fn is_zero_width(c: char) -> bool {
    matches!(c, '\u{200B}'..='\u{200D}' | '\u{FE00}'..='\u{FE0F}' | '\u{20E3}')
        || c.is_control()
}

/// Integer scale factor for a requested pixel size.
///
/// Cap height of an outline font is roughly 70% of its em size, so the
/// 7-unit cell is scaled to about that.
pub fn scale_for(px: f32) -> u32 {
    ((px * 0.7 / CELL_HEIGHT as f32).round() as u32).max(1)
}

/// Rasterize `text` with the built-in font.
///
/// Glyph offsets are relative to a baseline at `y = 0`, so every glyph has
/// a negative `offset_y`.
pub fn rasterize(text: &str, px: f32) -> Vec<RasterizedGlyph> {
    let scale = scale_for(px);
    let width = CELL_WIDTH * scale;
    let height = CELL_HEIGHT * scale;

    let mut glyphs = Vec::new();
    let mut pen_x = 0i32;
    for c in text.chars().filter(|c| !is_zero_width(*c)) {
        if c.is_whitespace() {
            pen_x += (ADVANCE * scale) as i32;
            continue;
        }

        let rows = bitmap(c).unwrap_or(REPLACEMENT);
        let mut data = vec![0u8; (width * height) as usize];
        for y in 0..height {
            let row = rows[(y / scale) as usize];
            for x in 0..width {
                let bit = CELL_WIDTH - 1 - x / scale;
                if row & (1 << bit) != 0 {
                    data[(y * width + x) as usize] = 255;
                }
            }
        }

        glyphs.push(RasterizedGlyph {
            data,
            width,
            height,
            offset_x: pen_x,
            offset_y: -(height as i32),
            format: GlyphPixelFormat::Alpha,
            is_color: false,
        });
        pen_x += (ADVANCE * scale) as i32;
    }
    glyphs
}
