//! Pixel store
//!
//! Packed RGB565 framebuffer in logical (post-rotation) coordinates.
//! Pixel `(x, y)` occupies bytes `(y * width + x) * 2 ..+2`, high byte first,
//! which is exactly the byte order the panel expects on the wire, so a flush
//! streams the buffer without any conversion.
//!
//! # Memory layout
//!
//! The storage is borrowed, not owned: at 142×428 the buffer is 121 552
//! bytes, far too large for a task stack. On hardware it normally lives in a
//! `static`:
//! ```text
//! static FRAMEBUFFER: StaticCell<[u8; FRAMEBUFFER_SIZE]> = StaticCell::new();
//! ```
//!
//! # Dirty tracking
//!
//! A single flag covers the whole buffer. Any successful write sets it; only
//! a completed flush clears it. There is no dirty-rectangle tracking.

// Coordinates arrive as i32 from the rasterizer and are narrowed to usize
// only after the clamp helpers have proven them to lie in [0, width) ×
// [0, height). Offsets are bounded by width * height * 2 <= 2^33, which fits
// usize on every supported target.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::arithmetic_side_effects
)]

use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use platform::{DisplayError, DisplayInfo};

use crate::color;

/// Bytes per pixel (RGB565).
pub const BYTES_PER_PIXEL: usize = 2;

/// Framebuffer size for the stock 142×428 panel in any rotation.
pub const FRAMEBUFFER_SIZE: usize = 142 * 428 * BYTES_PER_PIXEL;

// ---------------------------------------------------------------------------
// Clamping
// ---------------------------------------------------------------------------

/// A rectangle that has been clipped to the buffer and is known non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampedRect {
    /// Left column (inclusive).
    pub x: usize,
    /// Top row (inclusive).
    pub y: usize,
    /// Width in pixels, `>= 1`.
    pub w: usize,
    /// Height in pixels, `>= 1`.
    pub h: usize,
}

/// Clip `(x, y, w, h)` to `[0, width) × [0, height)`.
///
/// Negative origins shift the origin to 0 and shrink the extent by the same
/// amount. Returns `None` if nothing remains.
pub fn clamp_rect(x: i32, y: i32, w: i32, h: i32, width: u16, height: u16) -> Option<ClampedRect> {
    let (x0, x1) = clamp_extent(x, w, width)?;
    let (y0, y1) = clamp_extent(y, h, height)?;
    Some(ClampedRect {
        x: x0,
        y: y0,
        w: x1 - x0,
        h: y1 - y0,
    })
}

/// Half-open clip of `[origin, origin + len)` to `[0, limit)`.
fn clamp_extent(origin: i32, len: i32, limit: u16) -> Option<(usize, usize)> {
    if len <= 0 {
        return None;
    }
    let start = i64::from(origin).max(0);
    let end = (i64::from(origin) + i64::from(len)).min(i64::from(limit));
    (start < end).then_some((start as usize, end as usize))
}

/// Clip the inclusive span `a..=b` (either order) to `[0, limit)`.
///
/// Returns the inclusive `(start, end)` pair, or `None` if the span lies
/// entirely outside.
pub fn clamp_span(a: i32, b: i32, limit: u16) -> Option<(usize, usize)> {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let start = lo.max(0);
    let end = hi.min(i32::from(limit) - 1);
    (start <= end).then_some((start as usize, end as usize))
}

// ---------------------------------------------------------------------------
// Framebuffer
// ---------------------------------------------------------------------------

/// RGB565 pixel store with a coarse dirty flag.
pub struct Framebuffer<'a> {
    buffer: &'a mut [u8],
    width: u16,
    height: u16,
    dirty: bool,
}

impl<'a> Framebuffer<'a> {
    /// Wrap `buffer` as a `size.width × size.height` framebuffer.
    ///
    /// The store starts dirty so the first flush always paints the panel.
    ///
    /// # Errors
    ///
    /// [`DisplayError::InvalidConfig`] for a zero dimension,
    /// [`DisplayError::InvalidBuffer`] if `buffer.len() != width * height * 2`.
    pub fn new(buffer: &'a mut [u8], size: DisplayInfo) -> Result<Self, DisplayError> {
        if size.width == 0 || size.height == 0 {
            return Err(DisplayError::InvalidConfig);
        }
        if buffer.len() != size.pixel_count() * BYTES_PER_PIXEL {
            return Err(DisplayError::InvalidBuffer);
        }
        Ok(Self {
            buffer,
            width: size.width,
            height: size.height,
            dirty: true,
        })
    }

    /// Logical width in pixels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Logical height in pixels.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Logical dimensions.
    pub fn info(&self) -> DisplayInfo {
        DisplayInfo {
            width: self.width,
            height: self.height,
        }
    }

    /// Raw packed bytes, exactly as transmitted.
    pub fn as_bytes(&self) -> &[u8] {
        &*self.buffer
    }

    /// Whether any pixel changed since the last completed flush.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Record that the buffer now matches the panel.
    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Whether `(x, y)` lies inside the buffer.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < i32::from(self.width) && y < i32::from(self.height)
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        (y * usize::from(self.width) + x) * BYTES_PER_PIXEL
    }

    /// Bounds-checked write. Out-of-range coordinates are dropped and leave
    /// the dirty flag untouched.
    pub fn set(&mut self, x: i32, y: i32, color: Rgb565) {
        if self.contains(x, y) {
            self.set_unchecked(x as usize, y as usize, color);
        }
    }

    /// Write without clipping.
    ///
    /// Precondition: `x < width && y < height`. Only called from loops whose
    /// coordinate range has already been clamped. Violating the precondition
    /// is a logic error; it panics on the slice index (or on the
    /// `debug_assert!` in debug builds) rather than writing out of bounds.
    #[inline]
    pub fn set_unchecked(&mut self, x: usize, y: usize, color: Rgb565) {
        debug_assert!(x < usize::from(self.width) && y < usize::from(self.height));
        let offset = self.offset(x, y);
        // Caller guarantees x < width, y < height, so offset + 2 <= len.
        #[allow(clippy::indexing_slicing)]
        self.buffer[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&color::to_be_bytes(color));
        self.dirty = true;
    }

    /// Read back the colour at `(x, y)`, or `None` outside the buffer.
    pub fn get(&self, x: i32, y: i32) -> Option<Rgb565> {
        if !self.contains(x, y) {
            return None;
        }
        let offset = self.offset(x as usize, y as usize);
        let pair = self.buffer.get(offset..offset + BYTES_PER_PIXEL)?;
        let raw = u16::from_be_bytes([*pair.first()?, *pair.get(1)?]);
        Some(color::from_raw(raw))
    }

    /// Paint every pixel with `color`.
    pub fn fill(&mut self, color: Rgb565) {
        fill_cells(self.buffer, color);
        self.dirty = true;
    }

    /// Fill `(x, y, w, h)` after clipping it to the buffer. No-op if the
    /// clipped rectangle is empty.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565) {
        let Some(rect) = clamp_rect(x, y, w, h, self.width, self.height) else {
            return;
        };
        for row in rect.y..rect.y + rect.h {
            let start = self.offset(rect.x, row);
            let end = start + rect.w * BYTES_PER_PIXEL;
            if let Some(cells) = self.buffer.get_mut(start..end) {
                fill_cells(cells, color);
            }
        }
        self.dirty = true;
    }

    /// Fill the inclusive row span `x1..=x2` at `y` (either order), clipped.
    pub fn fill_h_span(&mut self, x1: i32, x2: i32, y: i32, color: Rgb565) {
        if y < 0 || y >= i32::from(self.height) {
            return;
        }
        let Some((start, end)) = clamp_span(x1, x2, self.width) else {
            return;
        };
        let from = self.offset(start, y as usize);
        let to = self.offset(end, y as usize) + BYTES_PER_PIXEL;
        if let Some(cells) = self.buffer.get_mut(from..to) {
            fill_cells(cells, color);
            self.dirty = true;
        }
    }

    /// Fill the inclusive column span `y1..=y2` at `x` (either order), clipped.
    pub fn fill_v_span(&mut self, x: i32, y1: i32, y2: i32, color: Rgb565) {
        if x < 0 || x >= i32::from(self.width) {
            return;
        }
        let Some((start, end)) = clamp_span(y1, y2, self.height) else {
            return;
        };
        for row in start..=end {
            self.set_unchecked(x as usize, row, color);
        }
    }

    /// Mutable bytes of the inclusive row span `x0..=x1` at `y`, marking the
    /// store dirty. The caller must have clamped the span.
    pub(crate) fn row_bytes_mut(&mut self, x0: usize, x1: usize, y: usize) -> Option<&mut [u8]> {
        let from = self.offset(x0, y);
        let to = self.offset(x1, y) + BYTES_PER_PIXEL;
        self.dirty = true;
        self.buffer.get_mut(from..to)
    }
}

/// Write `color` into every 2-byte cell of `cells`.
fn fill_cells(cells: &mut [u8], color: Rgb565) {
    let bytes = color::to_be_bytes(color);
    for cell in cells.chunks_exact_mut(BYTES_PER_PIXEL) {
        cell.copy_from_slice(&bytes);
    }
}

// ---------------------------------------------------------------------------
// embedded-graphics interop
// ---------------------------------------------------------------------------

impl DrawTarget for Framebuffer<'_> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set(point.x, point.y, color);
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let w = i32::try_from(area.size.width).unwrap_or(i32::MAX);
        let h = i32::try_from(area.size.height).unwrap_or(i32::MAX);
        self.fill_rect(area.top_left.x, area.top_left.y, w, h, color);
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}

impl OriginDimensions for Framebuffer<'_> {
    fn size(&self) -> Size {
        Size::new(u32::from(self.width), u32::from(self.height))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
