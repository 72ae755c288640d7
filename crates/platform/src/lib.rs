//! Hardware Abstraction Layer (HAL) for the NV3007 LCD driver
//!
//! This crate provides the trait-based seams between the drawing core and
//! everything that is not algorithmic: the byte-oriented panel transport,
//! font glyph storage, and panel geometry configuration. Keeping them here
//! lets the driver crate be exercised on the host without any hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Drawing surface (nv3007::Lcd)
//!         ↓
//! Rasterizer / Blitter / Flush controller (nv3007)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Controller + SPI transport (nv3007::display, embedded-hal)
//! ```
//!
//! # Abstractions
//!
//! - [`PanelInterface`] - address window + command/data/pixel byte sink
//! - [`Font`] - glyph bitmap lookup
//! - [`config`] - rotation and panel geometry
//!
//! # Features
//!
//! - `std`: Enable standard library support (for testing)
//! - `defmt`: Enable defmt::Format derives
//!
//! # Example
//!
//! ```no_run
//! use platform::PanelInterface;
//!
//! fn blank<P: PanelInterface>(panel: &mut P, row: &[u8]) -> Result<(), P::Error> {
//!     panel.set_window(0, 0, 141, 0)?;
//!     panel.write_pixels(row)
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::doc_markdown)] // register names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors, callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod display;
pub mod font;

pub use config::{PanelConfig, Rotation, WindowOffset};
pub use display::{DisplayError, DisplayInfo, PanelInterface};
pub use font::{Font, Glyph};
