//! NV3007 hardware driver
//!
//! Blocking driver for the NV3007 TFT controller on the 142×428 RGB565
//! module, over an embedded-hal 1.0 [`SpiDevice`].
//!
//! # Wiring
//!
//! | Signal | Direction | Notes |
//! |--------|-----------|-------|
//! | SCK / MOSI | Host → Display | SPI mode 3 (CPOL = 1, CPHA = 1) |
//! | CS     | Host → Display | Managed by `SpiDevice` |
//! | DC     | Host → Display | Low = command, high = data |
//! | RST    | Host → Display | Active low |
//! | BLK    | Host → Display | Backlight enable |
//!
//! # Address offsets
//!
//! The controller RAM is wider than the visible glass, so every window is
//! shifted by a per-rotation constant on one axis (see
//! [`Rotation::window_offset`]). Callers always pass logical coordinates.

// Window coordinates are bounded by the panel (< 2^10) plus an offset of at
// most 14, so the u16 additions cannot overflow for in-range input; the
// saturating forms cover the rest.
#![allow(clippy::arithmetic_side_effects)]

use embedded_graphics::pixelcolor::Rgb565;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use platform::{DisplayError, DisplayInfo, PanelConfig, PanelInterface, Rotation, WindowOffset};

use super::init_sequence::INIT_SEQUENCE;
use crate::color;

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// NV3007 command codes used outside the init table.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Sleep in: wait 50 ms before the next command.
    SleepIn = 0x10,
    /// Sleep out: wait 120 ms (220 ms at power-on).
    SleepOut = 0x11,
    /// Display off.
    DisplayOff = 0x28,
    /// Display on.
    DisplayOn = 0x29,
    /// Column address set: 4 data bytes (start, end; big-endian).
    ColumnAddressSet = 0x2A,
    /// Row address set: 4 data bytes (start, end; big-endian).
    RowAddressSet = 0x2B,
    /// Memory write: pixel data follows.
    MemoryWrite = 0x2C,
    /// Memory access control: 1 data byte (rotation).
    MemoryAccessControl = 0x36,
}

/// Largest stack buffer used by [`Nv3007::fill_window`].
const FILL_CHUNK: usize = 512;

// ---------------------------------------------------------------------------
// Driver struct
// ---------------------------------------------------------------------------

/// NV3007 display driver.
///
/// Generic over:
/// - `SPI`: a blocking [`SpiDevice`] (manages CS).
/// - `DC`, `RST`, `BLK`: [`OutputPin`]s for data/command, reset and
///   backlight.
/// - `DELAY`: [`DelayNs`] for reset and sleep timing.
///
/// In host tests supply `embedded_hal_mock::eh1::delay::NoopDelay`.
pub struct Nv3007<SPI, DC, RST, BLK, DELAY> {
    spi: SPI,
    dc: DC,
    rst: RST,
    blk: BLK,
    delay: DELAY,
    config: PanelConfig,
}

impl<SPI, DC, RST, BLK, DELAY> Nv3007<SPI, DC, RST, BLK, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BLK: OutputPin,
    DELAY: DelayNs,
{
    /// Create a driver. No bus traffic happens until [`Nv3007::init`].
    ///
    /// # Errors
    ///
    /// [`DisplayError::InvalidConfig`] if `config` fails validation.
    pub fn new(
        spi: SPI,
        dc: DC,
        rst: RST,
        blk: BLK,
        delay: DELAY,
        config: PanelConfig,
    ) -> Result<Self, DisplayError> {
        config.validate()?;
        Ok(Self {
            spi,
            dc,
            rst,
            blk,
            delay,
            config,
        })
    }

    /// Panel configuration.
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Logical dimensions for the configured rotation.
    pub fn size(&self) -> DisplayInfo {
        self.config.logical_size()
    }

    /// Give back the owned peripherals.
    pub fn release(self) -> (SPI, DC, RST, BLK, DELAY) {
        (self.spi, self.dc, self.rst, self.blk, self.delay)
    }

    // -----------------------------------------------------------------------
    // Low-level SPI helpers
    // -----------------------------------------------------------------------

    /// DC low, one command byte, DC back high.
    fn send_command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.dc.set_low().map_err(|_| DisplayError::Gpio)?;
        self.spi
            .write(&[cmd])
            .map_err(|_| DisplayError::Communication)?;
        self.dc.set_high().map_err(|_| DisplayError::Gpio)
    }

    /// DC high and send bytes in one transaction.
    fn send_data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        if data.is_empty() {
            return Ok(());
        }
        self.dc.set_high().map_err(|_| DisplayError::Gpio)?;
        self.spi.write(data).map_err(|_| DisplayError::Communication)
    }

    fn cmd_data(&mut self, cmd: Command, data: &[u8]) -> Result<(), DisplayError> {
        self.send_command(cmd as u8)?;
        self.send_data(data)
    }

    // -----------------------------------------------------------------------
    // Reset / power
    // -----------------------------------------------------------------------

    /// Hardware reset sequence.
    ///
    /// RST HIGH 50 ms → LOW 50 ms → HIGH 120 ms.
    fn hardware_reset(&mut self) -> Result<(), DisplayError> {
        self.rst.set_high().map_err(|_| DisplayError::Gpio)?;
        self.delay.delay_ms(50);
        self.rst.set_low().map_err(|_| DisplayError::Gpio)?;
        self.delay.delay_ms(50);
        self.rst.set_high().map_err(|_| DisplayError::Gpio)?;
        self.delay.delay_ms(120);
        Ok(())
    }

    /// Full power-on sequence.
    ///
    /// Reset, backlight on, register table, MADCTL for the rotation, then
    /// sleep-out and display-on with their settle times.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        #[cfg(feature = "defmt")]
        defmt::info!("NV3007: init, rotation {}", self.config.rotation);

        self.hardware_reset()?;
        self.blk.set_high().map_err(|_| DisplayError::Gpio)?;

        for &(cmd, data) in INIT_SEQUENCE {
            self.send_command(cmd)?;
            self.send_data(data)?;
        }

        self.cmd_data(Command::MemoryAccessControl, &[self.config.rotation.madctl()])?;
        self.send_command(Command::SleepOut as u8)?;
        self.delay.delay_ms(220);
        self.send_command(Command::DisplayOn as u8)?;
        self.delay.delay_ms(200);

        #[cfg(feature = "defmt")]
        defmt::info!("NV3007: ready");
        Ok(())
    }

    /// Display off, then sleep in. RAM is retained.
    pub fn sleep(&mut self) -> Result<(), DisplayError> {
        #[cfg(feature = "defmt")]
        defmt::info!("NV3007: sleep");
        self.send_command(Command::DisplayOff as u8)?;
        self.delay.delay_ms(120);
        self.send_command(Command::SleepIn as u8)?;
        self.delay.delay_ms(50);
        Ok(())
    }

    /// Sleep out, then display on.
    pub fn wake(&mut self) -> Result<(), DisplayError> {
        #[cfg(feature = "defmt")]
        defmt::info!("NV3007: wake");
        self.send_command(Command::SleepOut as u8)?;
        self.delay.delay_ms(120);
        self.send_command(Command::DisplayOn as u8)
    }

    // -----------------------------------------------------------------------
    // Direct fills
    // -----------------------------------------------------------------------

    /// Paint `(x, y, w, h)` directly on the panel, bypassing any framebuffer.
    ///
    /// Used for a fast initial clear. Empty rectangles send nothing.
    pub fn fill_window(
        &mut self,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        if w == 0 || h == 0 {
            return Ok(());
        }
        self.set_window(
            x,
            y,
            x.saturating_add(w - 1),
            y.saturating_add(h - 1),
        )?;

        let [hi, lo] = color::to_be_bytes(color);
        let mut chunk = [0u8; FILL_CHUNK];
        for cell in chunk.chunks_exact_mut(2) {
            cell.copy_from_slice(&[hi, lo]);
        }
        // Keep whole pixels per transaction and honour the configured limit.
        let step = (self.config.chunk_size.min(FILL_CHUNK) & !1).max(2);

        self.dc.set_high().map_err(|_| DisplayError::Gpio)?;
        let mut remaining = usize::from(w) * usize::from(h) * 2;
        while remaining > 0 {
            let len = remaining.min(step);
            let payload = chunk.get(..len).ok_or(DisplayError::InvalidConfig)?;
            self.spi
                .write(payload)
                .map_err(|_| DisplayError::Communication)?;
            remaining -= len;
        }
        Ok(())
    }

    /// Controller address for a logical window on the offset axis.
    fn offset_window(&self, x0: u16, y0: u16, x1: u16, y1: u16) -> [u16; 4] {
        match self.config.rotation.window_offset() {
            WindowOffset::X(dx) => [x0.saturating_add(dx), x1.saturating_add(dx), y0, y1],
            WindowOffset::Y(dy) => [x0, x1, y0.saturating_add(dy), y1.saturating_add(dy)],
        }
    }

    /// Rotation currently programmed into MADCTL.
    pub fn rotation(&self) -> Rotation {
        self.config.rotation
    }
}

// ---------------------------------------------------------------------------
// PanelInterface implementation
// ---------------------------------------------------------------------------

impl<SPI, DC, RST, BLK, DELAY> PanelInterface for Nv3007<SPI, DC, RST, BLK, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BLK: OutputPin,
    DELAY: DelayNs,
{
    type Error = DisplayError;

    fn write_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.send_command(command)
    }

    fn write_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.send_data(data)
    }

    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), Self::Error> {
        let [cx0, cx1, ry0, ry1] = self.offset_window(x0, y0, x1, y1);
        let [a, b] = cx0.to_be_bytes();
        let [c, d] = cx1.to_be_bytes();
        self.cmd_data(Command::ColumnAddressSet, &[a, b, c, d])?;
        let [a, b] = ry0.to_be_bytes();
        let [c, d] = ry1.to_be_bytes();
        self.cmd_data(Command::RowAddressSet, &[a, b, c, d])?;
        self.send_command(Command::MemoryWrite as u8)
    }

    /// DC high, then one SPI transaction per `chunk_size` slice.
    fn write_pixels(&mut self, pixels: &[u8]) -> Result<(), Self::Error> {
        if pixels.is_empty() {
            return Ok(());
        }
        self.dc.set_high().map_err(|_| DisplayError::Gpio)?;
        for chunk in pixels.chunks(self.config.chunk_size) {
            self.spi
                .write(chunk)
                .map_err(|_| DisplayError::Communication)?;
        }
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), Self::Error> {
        let driven = if on {
            self.blk.set_high()
        } else {
            self.blk.set_low()
        };
        driven.map_err(|_| DisplayError::Gpio)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
