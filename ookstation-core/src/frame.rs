//! Frame Assembler
//!
//! Folds the 40 symbols following the frame start into five bytes,
//! most significant bit first, with `ShortOff` as 1 and `LongOff` as 0.

use core::fmt;

use crate::constants::protocol::{FRAME_BITS, FRAME_LEN};
use crate::errors::{DecodeResult, Rejection};
use crate::pulse::Symbol;

/// One received frame, checksum byte included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    bytes: [u8; FRAME_LEN],
}

impl Frame {
    /// Wrap raw frame bytes
    pub const fn new(bytes: [u8; FRAME_LEN]) -> Self {
        Self { bytes }
    }

    /// Raw bytes
    pub const fn bytes(&self) -> &[u8; FRAME_LEN] {
        &self.bytes
    }

    /// Checksum byte as transmitted
    pub const fn checksum(&self) -> u8 {
        self.bytes[FRAME_LEN - 1]
    }

    /// Low nibble of the random code the sensor picks at power-up
    ///
    /// Not used for decoding; exposed for diagnostics.
    pub const fn device_code(&self) -> u8 {
        self.bytes[1] >> 4
    }
}

/// Colon separated hex, e.g. `45:81:0A:5A:AD`
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.bytes.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

/// Build a frame from the symbols at `start..`
///
/// Rejects unless exactly [`FRAME_BITS`] symbols remain after `start`.
pub fn assemble(symbols: &[Symbol], start: usize) -> DecodeResult<Frame> {
    let bits = symbols.len().saturating_sub(start);
    if bits != FRAME_BITS {
        return Err(Rejection::FrameLength { bits, expected: FRAME_BITS });
    }

    let mut bytes = [0u8; FRAME_LEN];
    for (byte, chunk) in bytes.iter_mut().zip(symbols[start..].chunks_exact(8)) {
        *byte = chunk.iter().fold(0u8, |acc, symbol| {
            (acc << 1) | u8::from(*symbol == Symbol::ShortOff)
        });
    }

    Ok(Frame::new(bytes))
}

/// Symbols for `bytes`, MSB first
///
/// Inverse of [`assemble`]; used by signal generators and tests.
pub fn symbols_for(bytes: &[u8]) -> impl Iterator<Item = Symbol> + '_ {
    bytes.iter().flat_map(|byte| {
        (0..8u32).rev().map(move |bit| Symbol::from_bit((*byte >> bit) & 1 == 1))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use Symbol::{LongOff as L, ShortOff as S};

    fn encode(bytes: &[u8]) -> heapless::Vec<Symbol, 64> {
        symbols_for(bytes).collect()
    }

    #[test]
    fn folds_msb_first() {
        let mut symbols = encode(&[0x00, 0x00, 0x00, 0x00, 0x00]);
        symbols[0] = S;
        symbols[15] = S;
        let frame = assemble(&symbols, 0).unwrap();
        assert_eq!(frame.bytes(), &[0x80, 0x01, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn respects_start_offset() {
        let mut symbols: heapless::Vec<Symbol, 64> = heapless::Vec::new();
        symbols.extend_from_slice(&[S, S, S, S]).unwrap();
        symbols.extend(symbols_for(&[0x45, 0x81, 0x0A, 0x5A, 0xAD]));

        let frame = assemble(&symbols, 4).unwrap();
        assert_eq!(frame.bytes(), &[0x45, 0x81, 0x0A, 0x5A, 0xAD]);
        assert_eq!(frame.checksum(), 0xAD);
        assert_eq!(frame.device_code(), 0x8);
    }

    #[test]
    fn rejects_wrong_length() {
        let symbols = encode(&[0xFF; 5]);
        assert_eq!(
            assemble(&symbols[..39], 0),
            Err(Rejection::FrameLength { bits: 39, expected: 40 })
        );
        assert_eq!(
            assemble(&symbols, 8),
            Err(Rejection::FrameLength { bits: 32, expected: 40 })
        );

        let long = encode(&[0xFF; 6]);
        assert_eq!(
            assemble(&long, 0),
            Err(Rejection::FrameLength { bits: 48, expected: 40 })
        );
    }

    #[test]
    fn start_past_end_is_rejected() {
        let symbols = [L; 4];
        assert_eq!(
            assemble(&symbols, 10),
            Err(Rejection::FrameLength { bits: 0, expected: 40 })
        );
    }

    #[test]
    fn display_as_hex() {
        let frame = Frame::new([0x45, 0x81, 0x0A, 0x5A, 0xAD]);
        assert_eq!(format!("{}", frame), "45:81:0A:5A:AD");
    }
}
