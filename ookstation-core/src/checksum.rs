//! Checksum Validator
//!
//! CRC-8 as computed by Fine Offset transmitters: polynomial 0x31, zero
//! seed, bits fed most significant first, no final XOR. This is the OneWire
//! CRC-8 with the shift direction and polynomial reversed.

use crate::constants::protocol::{CHECKSUMMED_LEN, CRC_POLYNOMIAL};
use crate::errors::{DecodeResult, Rejection};
use crate::frame::Frame;

/// CRC-8 over `data`
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    for &byte in data {
        let mut inbyte = byte;
        for _ in 0..8 {
            let mix = (crc ^ inbyte) & 0x80;
            crc <<= 1;
            if mix != 0 {
                crc ^= CRC_POLYNOMIAL;
            }
            inbyte <<= 1;
        }
    }
    crc
}

/// Check the frame's checksum byte against its payload
pub fn check(frame: &Frame) -> DecodeResult<()> {
    let computed = crc8(&frame.bytes()[..CHECKSUMMED_LEN]);
    let expected = frame.checksum();
    if computed == expected {
        Ok(())
    } else {
        Err(Rejection::ChecksumMismatch { expected, computed })
    }
}

/// Whether the frame's checksum is valid
pub fn verify(frame: &Frame) -> bool {
    check(frame).is_ok()
}
