//! Mock panel for host-side testing
//!
//! Implements [`PanelInterface`] without any hardware dependency. Pixel data
//! lands in an emulated controller GRAM honouring the address window, so tests
//! can compare what the panel would show against the framebuffer, and every
//! call is counted for assertions.

use heapless::Vec;
use platform::{DisplayError, DisplayInfo, PanelInterface};

/// Inclusive address window `(x0, y0, x1, y1)`.
pub type Window = (u16, u16, u16, u16);

/// Maximum windows / commands remembered; later ones are counted only.
pub const HISTORY: usize = 32;

/// Records panel calls and emulates GRAM writes.
pub struct MockPanel<'a> {
    gram: &'a mut [u8],
    size: DisplayInfo,
    window: Window,
    cursor: (u16, u16),
    pending_high: Option<u8>,
    windows: Vec<Window, HISTORY>,
    commands: Vec<u8, HISTORY>,
    pixel_calls: u32,
    bytes_written: usize,
    backlight: bool,
}

impl<'a> MockPanel<'a> {
    /// Mock panel whose GRAM is `gram` (`size.width * size.height * 2` bytes).
    pub fn new(gram: &'a mut [u8], size: DisplayInfo) -> Self {
        Self {
            gram,
            size,
            window: (0, 0, 0, 0),
            cursor: (0, 0),
            pending_high: None,
            windows: Vec::new(),
            commands: Vec::new(),
            pixel_calls: 0,
            bytes_written: 0,
            backlight: false,
        }
    }

    /// Emulated panel memory.
    pub fn gram(&self) -> &[u8] {
        &*self.gram
    }

    /// Windows set so far (first [`HISTORY`]).
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    /// Command bytes sent so far (first [`HISTORY`]).
    pub fn commands(&self) -> &[u8] {
        &self.commands
    }

    /// Number of `write_pixels` calls, i.e. transmissions.
    pub fn transmissions(&self) -> u32 {
        self.pixel_calls
    }

    /// Total pixel bytes received.
    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Last backlight state requested.
    pub fn backlight(&self) -> bool {
        self.backlight
    }

    fn store(&mut self, high: u8, low: u8) {
        let (x, y) = self.cursor;
        if x < self.size.width && y < self.size.height {
            let offset = (usize::from(y) * usize::from(self.size.width) + usize::from(x)) * 2;
            if let Some(cell) = self.gram.get_mut(offset..offset.saturating_add(2)) {
                cell.copy_from_slice(&[high, low]);
            }
        }
        self.advance();
    }

    /// Step the cursor like the controller: along the row, then wrap to the
    /// next row, then back to the top of the window.
    fn advance(&mut self) {
        let (x0, y0, x1, y1) = self.window;
        let (x, y) = self.cursor;
        self.cursor = if x < x1 {
            (x.saturating_add(1), y)
        } else if y < y1 {
            (x0, y.saturating_add(1))
        } else {
            (x0, y0)
        };
    }
}

impl PanelInterface for MockPanel<'_> {
    type Error = DisplayError;

    fn write_command(&mut self, command: u8) -> Result<(), Self::Error> {
        let _ = self.commands.push(command);
        Ok(())
    }

    fn write_data(&mut self, _data: &[u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), Self::Error> {
        self.window = (x0, y0, x1, y1);
        self.cursor = (x0, y0);
        self.pending_high = None;
        let _ = self.windows.push(self.window);
        Ok(())
    }

    fn write_pixels(&mut self, pixels: &[u8]) -> Result<(), Self::Error> {
        self.pixel_calls = self.pixel_calls.saturating_add(1);
        self.bytes_written = self.bytes_written.saturating_add(pixels.len());
        for &byte in pixels {
            match self.pending_high.take() {
                Some(high) => self.store(high, byte),
                None => self.pending_high = Some(byte),
            }
        }
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), Self::Error> {
        self.backlight = on;
        Ok(())
    }
}

/// Panel whose transport always fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingPanel;

impl PanelInterface for FailingPanel {
    type Error = DisplayError;

    fn write_command(&mut self, _command: u8) -> Result<(), Self::Error> {
        Err(DisplayError::Communication)
    }

    fn write_data(&mut self, _data: &[u8]) -> Result<(), Self::Error> {
        Err(DisplayError::Communication)
    }

    fn set_window(&mut self, _x0: u16, _y0: u16, _x1: u16, _y1: u16) -> Result<(), Self::Error> {
        Err(DisplayError::Communication)
    }

    fn write_pixels(&mut self, _pixels: &[u8]) -> Result<(), Self::Error> {
        Err(DisplayError::Communication)
    }

    fn set_backlight(&mut self, _on: bool) -> Result<(), Self::Error> {
        Err(DisplayError::Gpio)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn size() -> DisplayInfo {
        DisplayInfo {
            width: 3,
            height: 2,
        }
    }

    #[test]
    fn window_writes_wrap_rows() {
        let mut gram = [0u8; 12];
        let mut panel = MockPanel::new(&mut gram, size());
        panel.set_window(1, 0, 2, 1).unwrap();
        panel.write_pixels(&[1, 1, 2, 2, 3, 3, 4, 4]).unwrap();
        assert_eq!(panel.gram(), &[0, 0, 1, 1, 2, 2, 0, 0, 3, 3, 4, 4]);
        assert_eq!(panel.windows(), &[(1, 0, 2, 1)]);
        assert_eq!(panel.transmissions(), 1);
    }

    #[test]
    fn pixel_split_across_calls_is_latched() {
        let mut gram = [0u8; 12];
        let mut panel = MockPanel::new(&mut gram, size());
        panel.set_window(0, 0, 2, 1).unwrap();
        panel.write_pixels(&[0xAB]).unwrap();
        panel.write_pixels(&[0xCD, 0x12]).unwrap();
        panel.write_pixels(&[0x34]).unwrap();
        assert_eq!(&panel.gram()[..4], &[0xAB, 0xCD, 0x12, 0x34]);
        assert_eq!(panel.bytes_written(), 4);
    }

    #[test]
    fn commands_are_recorded_in_order() {
        let mut gram = [0u8; 12];
        let mut panel = MockPanel::new(&mut gram, size());
        panel.write_command(0x11).unwrap();
        panel.write_data(&[0x05]).unwrap();
        panel.write_command(0x29).unwrap();
        assert_eq!(panel.commands(), &[0x11, 0x29]);
        assert_eq!(panel.transmissions(), 0);
    }
}
