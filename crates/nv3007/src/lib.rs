//! NV3007 RGB565 SPI LCD driver
//!
//! Framebuffer rasterizer and flush engine for the 142×428 NV3007 TFT
//! module. Drawing happens in an in-memory RGB565 buffer; whole-buffer
//! transmissions go out through a [`PanelInterface`].
//!
//! # Architecture
//!
//! ```text
//! Lcd (public drawing surface, draw mode)
//!         ↓
//! raster / blit (stateless scan conversion)
//!         ↓
//! Framebuffer (pixel store + dirty flag)
//!         ↓
//! FlushController → PanelInterface (Nv3007 over SPI, or MockPanel)
//! ```
//!
//! # Features
//!
//! - `std` - Enable standard library (host builds)
//! - `defmt` - Hardware logging and `defmt::Format` derives
//! - `tracing` - Host-side flush events
//!
//! # Example
//!
//! ```no_run
//! use nv3007::{color, DisplayInfo, Lcd, MockPanel};
//!
//! let size = DisplayInfo { width: 32, height: 16 };
//! let mut gram = [0u8; 32 * 16 * 2];
//! let mut buffer = [0u8; 32 * 16 * 2];
//! let mut lcd = Lcd::new(MockPanel::new(&mut gram, size), &mut buffer, size)?;
//!
//! lcd.set_auto_flush(false);
//! lcd.clear(color::BLACK)?;
//! lcd.draw_circle(16, 8, 6, true, color::RED)?;
//! lcd.flush()?;
//! # Ok::<(), nv3007::DisplayError>(())
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
// Logging discipline
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![warn(clippy::dbg_macro)]
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // errors come from the panel transport
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod blit;
pub mod color;
pub mod display;
pub mod flush;
pub mod framebuffer;
pub mod lcd;
pub mod raster;

pub use display::{FailingPanel, MockPanel, Nv3007};
pub use flush::{DrawMode, FlushController, FlushState};
pub use framebuffer::{Framebuffer, BYTES_PER_PIXEL, FRAMEBUFFER_SIZE};
pub use lcd::Lcd;

pub use platform::{DisplayError, DisplayInfo, Font, Glyph, PanelConfig, PanelInterface, Rotation};

// Re-exported so callers can name colours and points without a direct
// embedded-graphics dependency.
pub use embedded_graphics::pixelcolor::Rgb565;
pub use embedded_graphics::prelude::Point;
