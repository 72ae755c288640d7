//! Panel transports
//!
//! - [`driver`] - NV3007 controller over embedded-hal SPI
//! - [`init_sequence`] - vendor register table written at power-on
//! - [`mock`] - host-side panels for tests

pub mod driver;
pub mod init_sequence;
pub mod mock;

pub use driver::{Command, Nv3007};
pub use mock::{FailingPanel, MockPanel};
