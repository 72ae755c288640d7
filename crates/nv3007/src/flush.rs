//! Flush controller
//!
//! Decides when the framebuffer is pushed to the panel.
//!
//! ```text
//!            any pixel write
//!   Idle ───────────────────────▶ Dirty
//!    ▲                             │
//!    └──────── flush() ────────────┘
//!          (full buffer sent)
//! ```
//!
//! A flush in `Idle` is a no-op. There is no region flush: the payload is
//! always the whole buffer, addressed as one window covering the panel.
//!
//! The draw mode only decides whether drawing entry points flush on return.
//! Compound shapes suspend auto-flush for their sub-draws and restore the
//! prior mode before their own trailing check (see [`crate::Lcd::batch`]).

use platform::PanelInterface;

use crate::framebuffer::Framebuffer;

/// Observable flush state, derived from the store's dirty flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlushState {
    /// Buffer matches the panel.
    Idle,
    /// Buffer modified since the last flush.
    Dirty,
}

/// Per-session drawing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrawMode {
    /// Flush after every top-level drawing call.
    pub auto_flush: bool,
}

impl Default for DrawMode {
    fn default() -> Self {
        Self { auto_flush: true }
    }
}

/// Owns the draw mode and performs full-buffer transmissions.
#[derive(Debug, Default)]
pub struct FlushController {
    mode: DrawMode,
    transmissions: u32,
}

impl FlushController {
    /// Controller starting in `mode`.
    pub const fn new(mode: DrawMode) -> Self {
        Self {
            mode,
            transmissions: 0,
        }
    }

    /// Current draw mode.
    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    /// Whether drawing calls flush on return.
    pub fn auto_flush(&self) -> bool {
        self.mode.auto_flush
    }

    /// Toggle auto-flush. Never flushes by itself.
    pub fn set_auto_flush(&mut self, enabled: bool) {
        self.mode.auto_flush = enabled;
    }

    /// Force auto-flush off and hand back the mode to restore afterwards.
    pub fn suspend(&mut self) -> DrawMode {
        let prior = self.mode;
        self.mode.auto_flush = false;
        prior
    }

    /// Reinstate a mode returned by [`FlushController::suspend`].
    pub fn restore(&mut self, prior: DrawMode) {
        self.mode = prior;
    }

    /// State of `framebuffer` relative to the panel.
    pub fn state(framebuffer: &Framebuffer<'_>) -> FlushState {
        if framebuffer.is_dirty() {
            FlushState::Dirty
        } else {
            FlushState::Idle
        }
    }

    /// Completed full-buffer transmissions since construction.
    pub fn transmissions(&self) -> u32 {
        self.transmissions
    }

    /// Transmit the whole buffer if it is dirty.
    ///
    /// Returns `Ok(true)` if a transmission happened. On a transport error
    /// the buffer stays dirty, so the next flush resends it.
    pub fn flush<P: PanelInterface>(
        &mut self,
        framebuffer: &mut Framebuffer<'_>,
        panel: &mut P,
    ) -> Result<bool, P::Error> {
        if !framebuffer.is_dirty() {
            return Ok(false);
        }

        // Framebuffer dimensions are non-zero (checked at construction).
        let x1 = framebuffer.width().saturating_sub(1);
        let y1 = framebuffer.height().saturating_sub(1);

        let sent = panel
            .set_window(0, 0, x1, y1)
            .and_then(|()| panel.write_pixels(framebuffer.as_bytes()));
        if let Err(e) = sent {
            #[cfg(feature = "defmt")]
            defmt::warn!("flush failed, buffer kept dirty");
            return Err(e);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(bytes = framebuffer.as_bytes().len(), "full-buffer flush");

        framebuffer.mark_clean();
        self.transmissions = self.transmissions.saturating_add(1);
        Ok(true)
    }

    /// Trailing check for a drawing entry point: flush if auto-flush is on.
    pub fn finish<P: PanelInterface>(
        &mut self,
        framebuffer: &mut Framebuffer<'_>,
        panel: &mut P,
    ) -> Result<(), P::Error> {
        if self.mode.auto_flush {
            self.flush(framebuffer, panel)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
