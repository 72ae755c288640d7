//! Public drawing surface
//!
//! [`Lcd`] ties the pixel store, the flush controller and a panel together.
//! Every drawing entry point runs with auto-flush suspended, restores the
//! caller's mode, then flushes once if auto-flush is on. A shape therefore
//! reaches the panel whole or not at all, never half drawn.
//!
//! [`Lcd::batch`] exposes the same scoped override to callers: draws inside
//! the closure accumulate and at most one transmission follows.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::Point;

use platform::{DisplayError, DisplayInfo, Font, PanelInterface};

use crate::blit;
use crate::flush::{DrawMode, FlushController, FlushState};
use crate::framebuffer::Framebuffer;
use crate::raster;

/// Framebuffered NV3007 drawing surface over panel `P`.
pub struct Lcd<'a, P: PanelInterface> {
    framebuffer: Framebuffer<'a>,
    flush: FlushController,
    panel: P,
    font: Option<&'a dyn Font>,
}

impl<'a, P: PanelInterface> Lcd<'a, P> {
    /// Wrap `panel` with a framebuffer over `buffer` of logical size `size`.
    ///
    /// Auto-flush starts enabled. The buffer starts dirty; its contents are
    /// whatever `buffer` held.
    ///
    /// # Errors
    ///
    /// See [`Framebuffer::new`].
    pub fn new(panel: P, buffer: &'a mut [u8], size: DisplayInfo) -> Result<Self, DisplayError> {
        Ok(Self {
            framebuffer: Framebuffer::new(buffer, size)?,
            flush: FlushController::new(DrawMode::default()),
            panel,
            font: None,
        })
    }

    // -----------------------------------------------------------------------
    // Draw mode
    // -----------------------------------------------------------------------

    /// Run `paint` on the pixel store with auto-flush suspended, then apply
    /// the trailing flush check.
    fn draw(&mut self, paint: impl FnOnce(&mut Framebuffer<'a>)) -> Result<(), P::Error> {
        let prior = self.flush.suspend();
        paint(&mut self.framebuffer);
        self.flush.restore(prior);
        self.flush.finish(&mut self.framebuffer, &mut self.panel)
    }

    /// Run several draws as one unit.
    ///
    /// Auto-flush is off inside `f`; the prior mode is restored afterwards
    /// and, if it was on, one flush follows. Batches nest.
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> Result<R, P::Error> {
        let prior = self.flush.suspend();
        let out = f(self);
        self.flush.restore(prior);
        self.flush.finish(&mut self.framebuffer, &mut self.panel)?;
        Ok(out)
    }

    /// Enable or disable auto-flush. Never transmits by itself.
    pub fn set_auto_flush(&mut self, enabled: bool) {
        self.flush.set_auto_flush(enabled);
    }

    /// Whether drawing calls flush on return.
    pub fn auto_flush(&self) -> bool {
        self.flush.auto_flush()
    }

    /// Transmit the whole buffer if it changed since the last flush.
    ///
    /// Returns whether anything was sent.
    pub fn flush(&mut self) -> Result<bool, P::Error> {
        self.flush.flush(&mut self.framebuffer, &mut self.panel)
    }

    /// `Idle` or `Dirty`.
    pub fn flush_state(&self) -> FlushState {
        FlushController::state(&self.framebuffer)
    }

    /// Whether the buffer differs from what was last transmitted.
    pub fn is_dirty(&self) -> bool {
        self.framebuffer.is_dirty()
    }

    /// Completed full-buffer transmissions.
    pub fn transmissions(&self) -> u32 {
        self.flush.transmissions()
    }

    // -----------------------------------------------------------------------
    // Primitives
    // -----------------------------------------------------------------------

    /// Fill the whole buffer with `color`.
    pub fn clear(&mut self, color: Rgb565) -> Result<(), P::Error> {
        self.draw(|fb| fb.fill(color))
    }

    /// Single pixel. Out-of-range coordinates are ignored.
    pub fn draw_pixel(&mut self, x: i32, y: i32, color: Rgb565) -> Result<(), P::Error> {
        self.draw(|fb| raster::pixel(fb, x, y, color))
    }

    /// Line between two points, both inclusive.
    pub fn draw_line(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Rgb565,
    ) -> Result<(), P::Error> {
        self.draw(|fb| raster::line(fb, x1, y1, x2, y2, color))
    }

    /// Rectangle with optional rounded corners.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_rect(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        radius: i32,
        filled: bool,
        color: Rgb565,
    ) -> Result<(), P::Error> {
        self.draw(|fb| raster::rect(fb, x, y, w, h, radius, filled, color))
    }

    /// Circle of radius `r`.
    pub fn draw_circle(
        &mut self,
        xc: i32,
        yc: i32,
        r: i32,
        filled: bool,
        color: Rgb565,
    ) -> Result<(), P::Error> {
        self.draw(|fb| raster::circle(fb, xc, yc, r, filled, color))
    }

    /// Axis-aligned ellipse. The outline is dotted.
    pub fn draw_ellipse(
        &mut self,
        xc: i32,
        yc: i32,
        rx: i32,
        ry: i32,
        filled: bool,
        color: Rgb565,
    ) -> Result<(), P::Error> {
        self.draw(|fb| raster::ellipse(fb, xc, yc, rx, ry, filled, color))
    }

    /// Arc from `start` to `end` radians; filled arcs close through the
    /// centre.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_arc(
        &mut self,
        xc: i32,
        yc: i32,
        r: i32,
        start: f32,
        end: f32,
        filled: bool,
        color: Rgb565,
    ) -> Result<(), P::Error> {
        self.draw(|fb| raster::arc(fb, xc, yc, r, start, end, filled, color))
    }

    /// Triangle through three points.
    pub fn draw_triangle(
        &mut self,
        p1: Point,
        p2: Point,
        p3: Point,
        filled: bool,
        color: Rgb565,
    ) -> Result<(), P::Error> {
        self.draw(|fb| raster::triangle(fb, p1, p2, p3, filled, color))
    }

    /// Closed polygon. Fewer than three vertices draw nothing.
    pub fn draw_polygon(
        &mut self,
        vertices: &[Point],
        filled: bool,
        color: Rgb565,
    ) -> Result<(), P::Error> {
        self.draw(|fb| raster::polygon(fb, vertices, filled, color))
    }

    // -----------------------------------------------------------------------
    // Bitmaps and text
    // -----------------------------------------------------------------------

    /// Band-packed 1-bit mask; set bits paint `color`, unset bits are
    /// transparent.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_bitmap(
        &mut self,
        x: i32,
        y: i32,
        bitmap: &[u8],
        width: u16,
        height: u16,
        color: Rgb565,
    ) -> Result<(), P::Error> {
        self.draw(|fb| blit::draw_bitmap(fb, x, y, bitmap, width, height, color))
    }

    /// Opaque row-major RGB565 image (big-endian, stride `width * 2`).
    pub fn draw_bitmap_rgb565(
        &mut self,
        x: i32,
        y: i32,
        bitmap: &[u8],
        width: u16,
        height: u16,
    ) -> Result<(), P::Error> {
        self.draw(|fb| blit::draw_bitmap_rgb565(fb, x, y, bitmap, width, height))
    }

    /// Render `text` with the configured font. No-op without a font.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Rgb565) -> Result<(), P::Error> {
        let Some(font) = self.font else {
            return Ok(());
        };
        self.draw(|fb| {
            blit::draw_text(fb, x, y, text, font, color);
        })
    }

    /// Use `font` for [`Lcd::draw_text`].
    pub fn set_font(&mut self, font: &'a dyn Font) {
        self.font = Some(font);
    }

    /// Drop the configured font; text drawing becomes a no-op.
    pub fn clear_font(&mut self) {
        self.font = None;
    }

    /// Line height of the configured font, for caller-side multi-line layout.
    pub fn line_height(&self) -> Option<u16> {
        self.font.map(Font::line_height)
    }

    // -----------------------------------------------------------------------
    // Access
    // -----------------------------------------------------------------------

    /// Colour currently stored at `(x, y)`.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb565> {
        self.framebuffer.get(x, y)
    }

    /// Logical size of the drawing area.
    pub fn size(&self) -> DisplayInfo {
        self.framebuffer.info()
    }

    /// The pixel store.
    pub fn framebuffer(&self) -> &Framebuffer<'a> {
        &self.framebuffer
    }

    /// The pixel store, e.g. as an embedded-graphics `DrawTarget`. Writes
    /// made here are sent on the next [`Lcd::flush`].
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer<'a> {
        &mut self.framebuffer
    }

    /// Switch the backlight.
    pub fn set_backlight(&mut self, on: bool) -> Result<(), P::Error> {
        self.panel.set_backlight(on)
    }

    /// The underlying panel.
    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// The underlying panel, e.g. for controller `sleep` / `wake`.
    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    /// Give the panel back.
    pub fn release(self) -> P {
        self.panel
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
