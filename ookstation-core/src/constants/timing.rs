//! Pulse Timing Constants
//!
//! The transmitter keys the carrier on for a fixed width between every data
//! bit; the bit value is carried by the width of the following gap.
//!
//! ```text
//!  ┌────────┐     ┌────────┐               ┌────────
//!  │  ON    │ 1   │  ON    │      0        │  ON
//! ─┘ 1000µs └─────┘ 1000µs └───────────────┘
//!            500µs            1500µs
//! ```

/// Width of an 'on' pulse (carrier keyed) in microseconds.
pub const ON_PULSE_US: u64 = 1000;

/// Width of a short 'off' gap in microseconds. Encodes a binary 1.
pub const SHORT_OFF_PULSE_US: u64 = 500;

/// Width of a long 'off' gap in microseconds. Encodes a binary 0.
pub const LONG_OFF_PULSE_US: u64 = 1500;

/// Symmetric tolerance applied around every nominal width.
///
/// Edge timestamps are taken on a non-realtime kernel, so a reading can be
/// late by a few hundred microseconds under load. Window endpoints are
/// inclusive: a 750µs gap is still a short 'off'.
pub const JITTER_WINDOW_US: u64 = 250;
