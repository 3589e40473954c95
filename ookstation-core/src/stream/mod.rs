//! Edge and reading streams
//!
//! ## Module Organization
//!
//! - Core error type (this file)
//! - `memory` - In-memory edge replay for tests and simulations
//! - `file` - Recorded edge files and the recorder producing them (requires `std`)
//! - `decoded` - Adapter turning an edge stream into a reading stream

use core::fmt;

#[cfg(feature = "stream-memory")]
pub mod memory;

#[cfg(feature = "std")]
pub mod file;

pub mod decoded;

#[cfg(feature = "stream-memory")]
pub use memory::MemoryStream;

#[cfg(feature = "std")]
pub use file::{EdgeRecorder, FileStream, FileStreamStats};

pub use decoded::DecodingStream;

/// Errors that can occur while pulling from a stream
#[derive(Debug, Clone, PartialEq)]
pub enum StreamError<E> {
    /// Transport-level error (e.g., I/O error)
    Transport(E),
    /// End of stream reached
    EndOfStream,
}

impl<E> StreamError<E> {
    /// True when the stream is exhausted rather than failing
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Self::EndOfStream)
    }
}

impl<E: fmt::Display> fmt::Display for StreamError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "Transport error: {}", e),
            Self::EndOfStream => write!(f, "End of stream"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug + fmt::Display> std::error::Error for StreamError<E> {}

// Re-export the trait for convenience
pub use crate::traits::Stream;
