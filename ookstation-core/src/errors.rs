//! Error Types for the Decoding Pipeline
//!
//! ## Design Philosophy
//!
//! Errors here are kept small and `Copy`, no heap and no `String`, since they
//! are produced on every rejected transmission in a noisy RF environment.
//!
//! ## Error Categories
//!
//! ### Rejections
//! A [`Rejection`] is a routine outcome, not a fault. The pure pipeline stages
//! return it so the state machine can count it, but it never reaches the
//! caller of [`EdgeDecoder::push`](crate::decoder::EdgeDecoder::push):
//! - `BufferOverflow`: pulse train longer than any valid transmission
//! - `FrameLength`: preamble found but the trailing bit count is not 40
//! - `ChecksumMismatch`: structurally valid frame, corrupted in transit
//!
//! ### Configuration
//! [`TimingError`] is returned when custom pulse timings would make the
//! classifier ambiguous.
//!
//! ```rust
//! use ookstation_core::checksum::check;
//! use ookstation_core::frame::Frame;
//! use ookstation_core::Rejection;
//!
//! let frame = Frame::new([0xF8, 0x00, 0x00, 0x32, 0x00]);
//! match check(&frame) {
//!     Ok(()) => {}
//!     Err(Rejection::ChecksumMismatch { expected, computed }) => {
//!         assert_eq!(expected, 0x00);
//!         assert_eq!(computed, 0xE2);
//!     }
//!     Err(_) => unreachable!(),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for pipeline stages
pub type DecodeResult<T> = Result<T, Rejection>;

/// Reasons a buffered pulse train does not yield a reading
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// More symbols arrived than the buffer can hold without a noise boundary
    #[error("Pulse train exceeds {capacity} symbols")]
    BufferOverflow {
        /// Buffer capacity in symbols
        capacity: usize,
    },

    /// Symbols after the frame start do not form exactly one frame
    #[error("Frame has {bits} bits, expected {expected}")]
    FrameLength {
        /// Symbols available after the frame start
        bits: usize,
        /// Symbols in a complete frame
        expected: usize,
    },

    /// Transmitted checksum disagrees with the computed one
    #[error("Checksum mismatch: frame carries {expected:#04x}, computed {computed:#04x}")]
    ChecksumMismatch {
        /// Checksum byte carried by the frame
        expected: u8,
        /// Checksum computed over the payload
        computed: u8,
    },
}

/// Invalid pulse timing configuration
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingError {
    /// A nominal width does not exceed the jitter window
    #[error("Nominal width {nominal_us}us must exceed jitter {jitter_us}us")]
    WidthBelowJitter {
        /// Offending nominal width
        nominal_us: u64,
        /// Configured jitter
        jitter_us: u64,
    },

    /// Short and long 'off' windows overlap, so a gap would be ambiguous
    #[error("Off windows overlap: short ends at {short_upper_us}us, long starts at {long_lower_us}us")]
    OverlappingWindows {
        /// Upper edge of the short 'off' window
        short_upper_us: u64,
        /// Lower edge of the long 'off' window
        long_lower_us: u64,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for Rejection {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::BufferOverflow { capacity } =>
                defmt::write!(fmt, "Pulse train exceeds {} symbols", capacity),
            Self::FrameLength { bits, expected } =>
                defmt::write!(fmt, "Frame has {} bits, expected {}", bits, expected),
            Self::ChecksumMismatch { expected, computed } =>
                defmt::write!(fmt, "Checksum {=u8:#x} != {=u8:#x}", expected, computed),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TimingError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::WidthBelowJitter { nominal_us, jitter_us } =>
                defmt::write!(fmt, "Width {}us <= jitter {}us", nominal_us, jitter_us),
            Self::OverlappingWindows { short_upper_us, long_lower_us } =>
                defmt::write!(fmt, "Off windows overlap: {}us >= {}us", short_upper_us, long_lower_us),
        }
    }
}
