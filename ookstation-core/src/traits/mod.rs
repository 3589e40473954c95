//! Core Traits
//!
//! The decoder itself is a concrete type; traits sit only at the two seams
//! where the outside world plugs in:
//!
//! - [`stream`] - where edge events come from (GPIO, capture queue, replay)
//! - [`sink`] - where decoded readings go (file, console, anything else)
//!
//! ```rust
//! use ookstation_core::traits::{ReadingSink, Stream};
//! use ookstation_core::stream::{MemoryStream, DecodingStream};
//! use ookstation_core::Reading;
//!
//! struct Latest(Option<Reading>);
//!
//! impl ReadingSink for Latest {
//!     type Error = core::convert::Infallible;
//!
//!     fn emit(&mut self, reading: &Reading) -> Result<(), Self::Error> {
//!         self.0 = Some(*reading);
//!         Ok(())
//!     }
//! }
//!
//! let mut readings = DecodingStream::new(MemoryStream::new(&[]));
//! let mut sink = Latest(None);
//! while let Ok(reading) = readings.poll_next() {
//!     sink.emit(&reading).unwrap();
//! }
//! assert!(sink.0.is_none());
//! ```

pub mod stream;
pub mod sink;

pub use stream::Stream;
pub use sink::ReadingSink;
