//! NV3007 register initialisation table
//!
//! Vendor-supplied power, gamma and timing register values for the 142×428
//! module, written once after hardware reset. Each entry is a command byte
//! followed by its data bytes. The table unlocks the extended command set
//! (`0xFF = 0xA5`), programs the panel, relocks it (`0xFF = 0x00`) and ends
//! with the pixel format (`0x3A = 0x05`, 16 bpp RGB565).
//!
//! Memory access control (`0x36`), sleep-out and display-on are sent by
//! [`super::Nv3007::init`] after the table, since MADCTL depends on the
//! rotation.

/// Command byte plus data bytes.
pub type RegisterWrite = (u8, &'static [u8]);

/// Pixel format register.
pub const COLMOD: u8 = 0x3A;

/// 16 bits per pixel.
pub const COLMOD_RGB565: u8 = 0x05;

/// Register writes in transmission order.
pub const INIT_SEQUENCE: &[RegisterWrite] = &[
    (0xFF, &[0xA5]),
    (0x9A, &[0x08]),
    (0x9B, &[0x08]),
    (0x9C, &[0xB0]),
    (0x9D, &[0x16]),
    (0x9E, &[0xC4]),
    (0x8F, &[0x55, 0x04]),
    (0x84, &[0x90]),
    (0x83, &[0x7B]),
    (0x85, &[0x33]),
    (0x60, &[0x00]),
    (0x70, &[0x00]),
    (0x61, &[0x02]),
    (0x71, &[0x02]),
    (0x62, &[0x04]),
    (0x72, &[0x04]),
    (0x6C, &[0x29]),
    (0x7C, &[0x29]),
    (0x6D, &[0x31]),
    (0x7D, &[0x31]),
    (0x6E, &[0x0F]),
    (0x7E, &[0x0F]),
    (0x66, &[0x21]),
    (0x76, &[0x21]),
    (0x68, &[0x3A]),
    (0x78, &[0x3A]),
    (0x63, &[0x07]),
    (0x73, &[0x07]),
    (0x64, &[0x05]),
    (0x74, &[0x05]),
    (0x65, &[0x02]),
    (0x75, &[0x02]),
    (0x67, &[0x23]),
    (0x77, &[0x23]),
    (0x69, &[0x08]),
    (0x79, &[0x08]),
    (0x6A, &[0x13]),
    (0x7A, &[0x13]),
    (0x6B, &[0x13]),
    (0x7B, &[0x13]),
    (0x6F, &[0x00]),
    (0x7F, &[0x00]),
    (0x50, &[0x00]),
    (0x52, &[0xD6]),
    (0x53, &[0x08]),
    (0x54, &[0x08]),
    (0x55, &[0x1E]),
    (0x56, &[0x1C]),
    (0xA0, &[0x2B, 0x24, 0x00]),
    (0xA1, &[0x87]),
    (0xA2, &[0x86]),
    (0xA5, &[0x00]),
    (0xA6, &[0x00]),
    (0xA7, &[0x00]),
    (0xA8, &[0x36]),
    (0xA9, &[0x7E]),
    (0xAA, &[0x7E]),
    (0xB9, &[0x85]),
    (0xBA, &[0x84]),
    (0xBB, &[0x83]),
    (0xBC, &[0x82]),
    (0xBD, &[0x81]),
    (0xBE, &[0x80]),
    (0xBF, &[0x01]),
    (0xC0, &[0x02]),
    (0xC1, &[0x00]),
    (0xC2, &[0x00]),
    (0xC3, &[0x00]),
    (0xC4, &[0x33]),
    (0xC5, &[0x7E]),
    (0xC6, &[0x7E]),
    (0xC8, &[0x33, 0x33]),
    (0xC9, &[0x68]),
    (0xCA, &[0x69]),
    (0xCB, &[0x6A]),
    (0xCC, &[0x6B]),
    (0xCD, &[0x33, 0x33]),
    (0xCE, &[0x6C]),
    (0xCF, &[0x6D]),
    (0xD0, &[0x6E]),
    (0xD1, &[0x6F]),
    (0xAB, &[0x03, 0x67]),
    (0xAC, &[0x03, 0x6B]),
    (0xAD, &[0x03, 0x68]),
    (0xAE, &[0x03, 0x6C]),
    (0xB3, &[0x00]),
    (0xB4, &[0x00]),
    (0xB5, &[0x00]),
    (0xB6, &[0x32]),
    (0xB7, &[0x7E]),
    (0xB8, &[0x7E]),
    (0xE0, &[0x00]),
    (0xE1, &[0x03, 0x0F]),
    (0xE2, &[0x04]),
    (0xE3, &[0x01]),
    (0xE4, &[0x0E]),
    (0xE5, &[0x01]),
    (0xE6, &[0x19]),
    (0xE7, &[0x10]),
    (0xE8, &[0x10]),
    (0xEA, &[0x12]),
    (0xEB, &[0xD0]),
    (0xEC, &[0x04]),
    (0xED, &[0x07]),
    (0xEE, &[0x07]),
    (0xEF, &[0x09]),
    (0xF0, &[0xD0]),
    (0xF1, &[0x0E]),
    (0xF9, &[0x17]),
    (0xF2, &[0x2C, 0x1B, 0x0B, 0x20]),
    (0xE9, &[0x29]),
    (0xEC, &[0x04]),
    (0x35, &[0x00]),
    (0x44, &[0x00, 0x10]),
    (0x46, &[0x10]),
    (0xFF, &[0x00]),
    (0x3A, &[0x05]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_unlocks_first_and_ends_with_pixel_format() {
        const UNLOCK: RegisterWrite = (0xFF, &[0xA5]);
        const RELOCK: RegisterWrite = (0xFF, &[0x00]);
        const FORMAT: RegisterWrite = (COLMOD, &[COLMOD_RGB565]);
        assert_eq!(INIT_SEQUENCE.first(), Some(&UNLOCK));
        assert_eq!(INIT_SEQUENCE.last(), Some(&FORMAT));
        assert!(INIT_SEQUENCE.contains(&RELOCK));
    }

    #[test]
    fn every_entry_carries_data() {
        assert_eq!(INIT_SEQUENCE.len(), 117);
        assert!(INIT_SEQUENCE.iter().all(|(_, data)| !data.is_empty()));
    }
}
