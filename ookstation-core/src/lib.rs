//! Core decoding engine for ookstation
//!
//! Turns the edges seen on a 433 MHz OOK receiver output into temperature
//! and humidity readings from ClimeMET-style wireless sensors.
//!
//! Key constraints:
//! - Runs without an allocator (`no_std` with default features off)
//! - No heap allocation in the decode path
//! - One independent decoder per receiver line
//!
//! ```rust
//! use ookstation_core::{EdgeDecoder, EdgeEvent};
//!
//! let mut decoder = EdgeDecoder::new();
//!
//! // Edges from the receiver, timestamps in microseconds
//! for edge in [EdgeEvent::low(30_000), EdgeEvent::high(31_000)] {
//!     if let Some(reading) = decoder.push(edge) {
//!         println!("Temp: {}, RH: {}", reading.temperature, reading.humidity);
//!     }
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod buffer;
pub mod checksum;
pub mod constants;
pub mod decoder;
pub mod errors;
pub mod events;
pub mod frame;
pub mod preamble;
pub mod pulse;
pub mod queue;
pub mod reading;
pub mod stream;
pub mod time;
pub mod traits;

// Public API
pub use decoder::{DecoderStats, EdgeDecoder};
pub use errors::{DecodeResult, Rejection, TimingError};
pub use events::{EdgeEvent, Level};
pub use frame::Frame;
pub use pulse::{PulseTimings, Symbol};
pub use queue::EdgeQueue;
pub use reading::{DeciCelsius, Reading};
pub use traits::{ReadingSink, Stream};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
