//! Font capability
//!
//! Glyph storage lives outside the driver. The drawing core only needs a
//! bitmap, its width and its height for each character.

/// One rendered character.
///
/// `bitmap` is row-major and MSB-first with `ceil(width / 8)` bytes per row.
/// This is NOT the band-packed layout used by generic 1-bit bitmaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph<'a> {
    /// Packed glyph rows.
    pub bitmap: &'a [u8],
    /// Glyph width in pixels; also the cursor advance.
    pub width: u16,
    /// Glyph height in pixels.
    pub height: u16,
}

impl<'a> Glyph<'a> {
    /// Create a glyph view over `bitmap`.
    pub const fn new(bitmap: &'a [u8], width: u16, height: u16) -> Self {
        Self {
            bitmap,
            width,
            height,
        }
    }

    /// Bytes per glyph row: `ceil(width / 8)`.
    pub const fn row_stride(&self) -> usize {
        (self.width as usize).div_ceil(8)
    }

    /// Whether the pixel at (`col`, `row`) is set.
    ///
    /// Returns `false` outside the glyph or past the end of a short bitmap.
    pub fn is_set(&self, col: u16, row: u16) -> bool {
        if col >= self.width || row >= self.height {
            return false;
        }
        // row < height <= u16::MAX and stride <= 8192, so the product fits usize.
        #[allow(clippy::arithmetic_side_effects)]
        let index = usize::from(row) * self.row_stride() + usize::from(col / 8);
        self.bitmap
            .get(index)
            .is_some_and(|byte| byte & (0x80 >> (col % 8)) != 0)
    }
}

/// Glyph lookup capability.
pub trait Font {
    /// Vertical distance between consecutive text lines, in pixels.
    fn line_height(&self) -> u16;

    /// Look up the glyph for `ch`, or `None` if the font does not cover it.
    fn glyph(&self, ch: char) -> Option<Glyph<'_>>;
}

impl<F: Font + ?Sized> Font for &F {
    fn line_height(&self) -> u16 {
        (**self).line_height()
    }

    fn glyph(&self, ch: char) -> Option<Glyph<'_>> {
        (**self).glyph(ch)
    }
}
