//! Reference transmissions with known readings

use ookstation_core::Reading;

/// Device code 0x4, channel nibble 0x8, +26.6 °C, 90 %RH
pub const POSITIVE_FRAME: [u8; 5] = [0x45, 0x81, 0x0A, 0x5A, 0xAD];
pub const POSITIVE_READING: Reading = Reading::new(266, 90);

/// Same sensor with the sign bit set
pub const NEGATIVE_FRAME: [u8; 5] = [0x45, 0x89, 0x0A, 0x5A, 0xFF];
pub const NEGATIVE_READING: Reading = Reading::new(-266, 90);

/// Positive frame with the checksum LSB flipped
pub const CORRUPT_FRAME: [u8; 5] = [0x45, 0x81, 0x0A, 0x5A, 0xAC];

/// A few more payloads spanning the temperature range
pub const PAYLOADS: [([u8; 4], Reading); 4] = [
    ([0x45, 0x80, 0x00, 0x00], Reading::new(0, 0)),
    ([0x45, 0x87, 0xFF, 0x64], Reading::new(2047, 100)),
    ([0x45, 0x88, 0x05, 0x32], Reading::new(-5, 50)),
    ([0x4C, 0x30, 0xC8, 0x2D], Reading::new(200, 45)),
];
