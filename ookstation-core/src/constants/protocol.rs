//! Wire Format Constants
//!
//! A transmission is 48 bits. Its leading bits are a preamble whose first bit
//! is often swallowed by the receiver's AGC settling, so only the trailing
//! eight symbols are matched. The 5-byte frame begins half way through the
//! matched preamble:
//!
//! ```text
//! symbols:  1 1 1 1 0 1 0 0 │ i i i i │ s t t t │ T T T T T T T T │ H ... │ C ...
//!           └─── PREAMBLE ──┘
//!                   └──── byte0 ──────┘└ byte1 ┘ └──── byte2 ────┘  byte3   byte4
//! ```
//!
//! - byte0: preamble remainder and high bits of the random device code
//! - byte1: low nibble of the device code, temperature sign and bits 10..8
//! - byte2: temperature bits 7..0 (tenths of a degree)
//! - byte3: relative humidity in percent
//! - byte4: CRC-8 over bytes 0..4

use crate::pulse::Symbol;

/// Number of symbols in the matched preamble.
pub const PREAMBLE_LEN: usize = 8;

/// Trailing preamble symbols as seen on air.
pub const PREAMBLE: [Symbol; PREAMBLE_LEN] = [
    Symbol::ShortOff,
    Symbol::ShortOff,
    Symbol::ShortOff,
    Symbol::ShortOff,
    Symbol::LongOff,
    Symbol::ShortOff,
    Symbol::LongOff,
    Symbol::LongOff,
];

/// Offset of the first frame bit from the preamble match.
pub const FRAME_OFFSET: usize = PREAMBLE_LEN / 2;

/// Frame length in bytes, checksum included.
pub const FRAME_LEN: usize = 5;

/// Frame length in symbols.
pub const FRAME_BITS: usize = FRAME_LEN * 8;

/// Bytes covered by the checksum.
pub const CHECKSUMMED_LEN: usize = FRAME_LEN - 1;

/// Fine Offset CRC-8 polynomial (x^8 + x^5 + x^4 + 1), MSB-first.
pub const CRC_POLYNOMIAL: u8 = 0x31;

/// Mask for the temperature magnitude bits in byte1.
pub const TEMPERATURE_HIGH_MASK: u8 = 0x07;

/// Sign flag for the temperature in byte1.
pub const TEMPERATURE_SIGN_MASK: u8 = 0x08;
