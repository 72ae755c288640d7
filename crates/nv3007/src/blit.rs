//! Bitmap and glyph blitter
//!
//! Two 1-bit packings are in play and must not be confused:
//!
//! - **Band-packed mask** ([`draw_bitmap`]): rows grouped in bands of eight.
//!   Byte `(row / 8) * width + col` holds column `col` of the band, row
//!   `row % 8` in bit `7 - row % 8` (MSB is the top row).
//! - **Glyph** ([`draw_text`]): row-major, MSB-first, `ceil(width / 8)` bytes
//!   per row (see [`platform::Glyph`]).
//!
//! RGB565 bitmaps ([`draw_bitmap_rgb565`]) are row-major big-endian pixels
//! with a stride of exactly `width * 2`, copied opaquely.

// Offsets are products of u16 dimensions and fit usize; signed destination
// coordinates saturate and are clipped before narrowing.
#![allow(
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use embedded_graphics::pixelcolor::Rgb565;
use platform::Font;

use crate::framebuffer::{clamp_span, Framebuffer, BYTES_PER_PIXEL};

/// Paint the set bits of a band-packed mask in `color` at `(x, y)`.
///
/// Unset bits are transparent. Bytes missing from a short `bitmap` read as
/// unset.
pub fn draw_bitmap(
    fb: &mut Framebuffer<'_>,
    x: i32,
    y: i32,
    bitmap: &[u8],
    width: u16,
    height: u16,
    color: Rgb565,
) {
    let w = usize::from(width);
    for row in 0..height {
        let dy = y.saturating_add(i32::from(row));
        if dy < 0 || dy >= i32::from(fb.height()) {
            continue;
        }
        let band = usize::from(row / 8) * w;
        let mask = 0x80u8 >> (row % 8);
        for col in 0..width {
            let Some(byte) = bitmap.get(band + usize::from(col)) else {
                break;
            };
            if byte & mask != 0 {
                fb.set(x.saturating_add(i32::from(col)), dy, color);
            }
        }
    }
}

/// Opaque copy of a row-major RGB565 image to `(x, y)`.
///
/// Destination pixels outside the buffer are skipped. Rows the source is too
/// short to supply are left untouched.
pub fn draw_bitmap_rgb565(
    fb: &mut Framebuffer<'_>,
    x: i32,
    y: i32,
    bitmap: &[u8],
    width: u16,
    height: u16,
) {
    if width == 0 {
        return;
    }
    let Some((x0, x1)) = clamp_span(x, x.saturating_add(i32::from(width) - 1), fb.width()) else {
        return;
    };
    // First source column that lands on-screen.
    let skip = if x < 0 { x.unsigned_abs() as usize } else { 0 };
    let stride = usize::from(width) * BYTES_PER_PIXEL;
    let run = (x1 - x0 + 1) * BYTES_PER_PIXEL;

    for row in 0..height {
        let dy = y.saturating_add(i32::from(row));
        if dy < 0 || dy >= i32::from(fb.height()) {
            continue;
        }
        let from = usize::from(row) * stride + skip * BYTES_PER_PIXEL;
        let Some(src) = bitmap.get(from..from + run) else {
            continue;
        };
        if let Some(dst) = fb.row_bytes_mut(x0, x1, dy as usize) {
            dst.copy_from_slice(src);
        }
    }
}

/// Render `text` left to right starting at `(x, y)` (top-left of the first
/// glyph). Returns the x coordinate after the last glyph.
///
/// Each glyph advances the cursor by its own width. There is no kerning,
/// wrapping or newline handling. Characters the font lacks are skipped
/// without advancing.
pub fn draw_text<F: Font + ?Sized>(
    fb: &mut Framebuffer<'_>,
    x: i32,
    y: i32,
    text: &str,
    font: &F,
    color: Rgb565,
) -> i32 {
    let mut cursor = x;
    for ch in text.chars() {
        let Some(glyph) = font.glyph(ch) else {
            continue;
        };
        for row in 0..glyph.height {
            for col in 0..glyph.width {
                if glyph.is_set(col, row) {
                    fb.set(
                        cursor.saturating_add(i32::from(col)),
                        y.saturating_add(i32::from(row)),
                        color,
                    );
                }
            }
        }
        cursor = cursor.saturating_add(i32::from(glyph.width));
    }
    cursor
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
