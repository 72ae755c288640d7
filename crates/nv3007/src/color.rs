//! RGB565 palette
//!
//! Named colours used by the NV3007 module vendor, expressed as
//! [`Rgb565`] constants with their exact raw 16-bit values.

// Palette names are self-describing.
#![allow(missing_docs)]

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

/// Build an [`Rgb565`] from its packed 16-bit value (`RRRRRGGG GGGBBBBB`).
pub const fn from_raw(raw: u16) -> Rgb565 {
    // Each field is masked to its width before narrowing, so the casts are lossless.
    #[allow(clippy::cast_possible_truncation)]
    Rgb565::new(
        (raw >> 11) as u8,
        ((raw >> 5) & 0x3F) as u8,
        (raw & 0x1F) as u8,
    )
}

/// Packed 16-bit value of `color`.
pub fn to_raw(color: Rgb565) -> u16 {
    color.into_storage()
}

/// Big-endian byte pair as stored in the framebuffer and sent on the wire.
pub fn to_be_bytes(color: Rgb565) -> [u8; 2] {
    to_raw(color).to_be_bytes()
}

pub const WHITE: Rgb565 = from_raw(0xFFFF);
pub const BLACK: Rgb565 = from_raw(0x0000);
pub const BLUE: Rgb565 = from_raw(0x001F);
pub const BRED: Rgb565 = from_raw(0xF81F);
pub const GRED: Rgb565 = from_raw(0xFFE0);
pub const GBLUE: Rgb565 = from_raw(0x07FF);
pub const RED: Rgb565 = from_raw(0xF800);
pub const MAGENTA: Rgb565 = from_raw(0xF81F);
pub const GREEN: Rgb565 = from_raw(0x07E0);
pub const CYAN: Rgb565 = from_raw(0x7FFF);
pub const YELLOW: Rgb565 = from_raw(0xFFE0);
pub const BROWN: Rgb565 = from_raw(0xBC40);
pub const BRRED: Rgb565 = from_raw(0xFC07);
pub const GRAY: Rgb565 = from_raw(0x8430);
pub const DARKBLUE: Rgb565 = from_raw(0x01CF);
pub const LIGHTBLUE: Rgb565 = from_raw(0x7D7C);
pub const GRAYBLUE: Rgb565 = from_raw(0x5458);
pub const LIGHTGREEN: Rgb565 = from_raw(0x841F);
pub const LGRAY: Rgb565 = from_raw(0xC618);
pub const LGRAYBLUE: Rgb565 = from_raw(0xA651);
pub const LBBLUE: Rgb565 = from_raw(0x2B12);
