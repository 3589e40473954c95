//! Constants for the OOK decoder
//!
//! All protocol numbers live here so the pipeline stages never carry
//! magic values of their own.
//!
//! ## Organization
//!
//! - **Timing**: nominal pulse widths and the jitter tolerance
//! - **Protocol**: preamble, frame layout and checksum polynomial
//! - **Buffers**: fixed capacities for symbol storage and edge capture
//! - **Time**: unit conversions for kernel and replay timestamps
//!
//! The timings were measured on a ClimeMET CM7-TX remote unit transmitting
//! on 433.92 MHz to a CM9088 master unit.

/// Nominal pulse widths and jitter tolerance.
pub mod timing;

/// Wire format of the sensor frame.
pub mod protocol;

/// Buffer sizes for symbol storage and edge capture.
pub mod buffers;

/// Time unit conversions.
pub mod time;

// Re-export commonly used constants for convenience
pub use timing::{ON_PULSE_US, SHORT_OFF_PULSE_US, LONG_OFF_PULSE_US, JITTER_WINDOW_US};

pub use protocol::{
    PREAMBLE, PREAMBLE_LEN, FRAME_OFFSET, FRAME_LEN, FRAME_BITS,
    CHECKSUMMED_LEN, CRC_POLYNOMIAL,
};

pub use buffers::{SYMBOL_BUFFER_CAPACITY, CAPTURE_QUEUE_CAPACITY};
