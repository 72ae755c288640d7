//! Display abstraction layer

use thiserror_no_std::Error;

/// Byte-oriented panel transport with an addressable pixel window.
///
/// This is the only surface through which the drawing core talks to the
/// panel. Implementations own chip-select / data-command sequencing and any
/// controller- or rotation-specific address offsets.
pub trait PanelInterface {
    /// Error type for transport operations. Propagated to callers unmodified.
    type Error: core::fmt::Debug;

    /// Send one command (register) byte.
    fn write_command(&mut self, command: u8) -> Result<(), Self::Error>;

    /// Send parameter bytes for the most recent command.
    fn write_data(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Establish the inclusive target region `(x0, y0)..=(x1, y1)` for the
    /// next pixel stream, in logical (post-rotation) coordinates.
    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), Self::Error>;

    /// Stream raw big-endian RGB565 bytes into the current window.
    ///
    /// Implementations may split the payload into chunks of any size `>= 1`;
    /// the on-panel result must not depend on the chunk size.
    fn write_pixels(&mut self, pixels: &[u8]) -> Result<(), Self::Error>;

    /// Switch the backlight on or off.
    fn set_backlight(&mut self, on: bool) -> Result<(), Self::Error>;
}

impl<P: PanelInterface + ?Sized> PanelInterface for &mut P {
    type Error = P::Error;

    fn write_command(&mut self, command: u8) -> Result<(), Self::Error> {
        (**self).write_command(command)
    }

    fn write_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write_data(data)
    }

    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), Self::Error> {
        (**self).set_window(x0, y0, x1, y1)
    }

    fn write_pixels(&mut self, pixels: &[u8]) -> Result<(), Self::Error> {
        (**self).write_pixels(pixels)
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), Self::Error> {
        (**self).set_backlight(on)
    }
}

/// Logical panel dimensions after rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayInfo {
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
}

impl DisplayInfo {
    /// Number of pixels on the panel.
    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// SPI write failed.
    #[error("SPI communication error")]
    Communication,
    /// A control pin (DC / RST / BLK) could not be driven.
    #[error("GPIO error")]
    Gpio,
    /// Framebuffer storage does not hold exactly `width * height * 2` bytes.
    #[error("Invalid framebuffer size")]
    InvalidBuffer,
    /// Zero panel dimension or zero transfer chunk size.
    #[error("Invalid panel configuration")]
    InvalidConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_count_is_width_times_height() {
        let info = DisplayInfo {
            width: 142,
            height: 428,
        };
        assert_eq!(info.pixel_count(), 60_776);
    }

    #[test]
    fn error_messages_are_distinct() {
        let all = [
            DisplayError::Communication,
            DisplayError::Gpio,
            DisplayError::InvalidBuffer,
            DisplayError::InvalidConfig,
        ];
        let rendered: Vec<String> = all.iter().map(ToString::to_string).collect();
        for (i, a) in rendered.iter().enumerate() {
            for b in rendered.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
        assert_eq!(DisplayError::Communication.to_string(), "SPI communication error");
    }
}
