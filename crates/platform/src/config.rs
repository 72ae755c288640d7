//! Panel geometry and orientation configuration
//!
//! The NV3007 glass is 142×428 pixels but its controller RAM is wider than
//! the visible area, so every rotation carries a constant address offset.
//! These values are configuration data, not algorithm.

use crate::display::{DisplayError, DisplayInfo};

/// Physical panel width (portrait).
pub const PANEL_WIDTH: u16 = 142;

/// Physical panel height (portrait).
pub const PANEL_HEIGHT: u16 = 428;

/// Default pixel transfer chunk in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Panel orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// Portrait, connector at the bottom.
    #[default]
    Deg0,
    /// Portrait, flipped.
    Deg180,
    /// Landscape.
    Deg90,
    /// Landscape, flipped.
    Deg270,
}

/// Constant added to window coordinates on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WindowOffset {
    /// Added to both column addresses (CASET).
    X(u16),
    /// Added to both row addresses (RASET).
    Y(u16),
}

impl Rotation {
    /// Map the conventional `0..=3` index (0/1 portrait, 2/3 landscape).
    ///
    /// Values above 3 fall back to [`Rotation::Deg270`].
    pub const fn from_index(index: u8) -> Self {
        match index {
            0 => Self::Deg0,
            1 => Self::Deg180,
            2 => Self::Deg90,
            _ => Self::Deg270,
        }
    }

    /// Memory access control (MADCTL, 0x36) parameter for this orientation.
    pub const fn madctl(self) -> u8 {
        match self {
            Self::Deg0 => 0x00,
            Self::Deg180 => 0xC0,
            Self::Deg90 => 0x60,
            Self::Deg270 => 0xA0,
        }
    }

    /// Whether logical width and height are swapped relative to the glass.
    pub const fn is_landscape(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }

    /// Controller RAM offset for this orientation.
    pub const fn window_offset(self) -> WindowOffset {
        match self {
            Self::Deg0 => WindowOffset::X(12),
            Self::Deg180 => WindowOffset::X(14),
            Self::Deg90 => WindowOffset::Y(14),
            Self::Deg270 => WindowOffset::Y(12),
        }
    }
}

/// Panel configuration used at driver construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelConfig {
    /// Physical (portrait) width in pixels.
    pub width: u16,
    /// Physical (portrait) height in pixels.
    pub height: u16,
    /// Orientation applied at init.
    pub rotation: Rotation,
    /// Maximum bytes per SPI transaction when streaming pixels.
    pub chunk_size: usize,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            width: PANEL_WIDTH,
            height: PANEL_HEIGHT,
            rotation: Rotation::Deg0,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl PanelConfig {
    /// Default geometry with the given orientation.
    pub fn with_rotation(rotation: Rotation) -> Self {
        Self {
            rotation,
            ..Self::default()
        }
    }

    /// Logical dimensions after rotation.
    pub const fn logical_size(&self) -> DisplayInfo {
        if self.rotation.is_landscape() {
            DisplayInfo {
                width: self.height,
                height: self.width,
            }
        } else {
            DisplayInfo {
                width: self.width,
                height: self.height,
            }
        }
    }

    /// Framebuffer length in bytes (`width * height * 2`).
    pub const fn framebuffer_len(&self) -> usize {
        self.width as usize * self.height as usize * 2
    }

    /// Reject zero dimensions and a zero chunk size.
    pub fn validate(&self) -> Result<(), DisplayError> {
        if self.width == 0 || self.height == 0 || self.chunk_size == 0 {
            return Err(DisplayError::InvalidConfig);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_rotations_swap_axes() {
        let portrait = PanelConfig::with_rotation(Rotation::Deg180).logical_size();
        assert_eq!((portrait.width, portrait.height), (142, 428));

        let landscape = PanelConfig::with_rotation(Rotation::Deg90).logical_size();
        assert_eq!((landscape.width, landscape.height), (428, 142));
        let landscape = PanelConfig::with_rotation(Rotation::Deg270).logical_size();
        assert_eq!((landscape.width, landscape.height), (428, 142));
    }

    #[test]
    fn madctl_and_offsets_per_rotation() {
        assert_eq!(Rotation::Deg0.madctl(), 0x00);
        assert_eq!(Rotation::Deg180.madctl(), 0xC0);
        assert_eq!(Rotation::Deg90.madctl(), 0x60);
        assert_eq!(Rotation::Deg270.madctl(), 0xA0);

        assert_eq!(Rotation::Deg0.window_offset(), WindowOffset::X(12));
        assert_eq!(Rotation::Deg180.window_offset(), WindowOffset::X(14));
        assert_eq!(Rotation::Deg90.window_offset(), WindowOffset::Y(14));
        assert_eq!(Rotation::Deg270.window_offset(), WindowOffset::Y(12));
    }

    #[test]
    fn rotation_index_mapping() {
        assert_eq!(Rotation::from_index(0), Rotation::Deg0);
        assert_eq!(Rotation::from_index(1), Rotation::Deg180);
        assert_eq!(Rotation::from_index(2), Rotation::Deg90);
        assert_eq!(Rotation::from_index(3), Rotation::Deg270);
        assert_eq!(Rotation::from_index(9), Rotation::Deg270);
    }

    #[test]
    fn framebuffer_len_is_two_bytes_per_pixel() {
        assert_eq!(PanelConfig::default().framebuffer_len(), 121_552);
    }

    #[test]
    fn validate_rejects_degenerate_config() {
        assert!(PanelConfig::default().validate().is_ok());
        let zero_chunk = PanelConfig {
            chunk_size: 0,
            ..PanelConfig::default()
        };
        assert_eq!(zero_chunk.validate(), Err(DisplayError::InvalidConfig));
        let zero_width = PanelConfig {
            width: 0,
            ..PanelConfig::default()
        };
        assert_eq!(zero_width.validate(), Err(DisplayError::InvalidConfig));
    }
}
