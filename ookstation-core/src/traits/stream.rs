//! Stream Processing Traits
//!
//! Edge sources follow a pull-based model using the `nb` crate for
//! non-blocking I/O, so the same decoder loop runs on a bare-metal target
//! draining an interrupt-fed queue and on Linux replaying a recording.
//!
//! ## Design Philosophy
//!
//! - **Pull-based**: the consumer decides when to take the next edge
//! - **Non-blocking**: `nb::Error::WouldBlock` means "nothing yet"
//! - **Memory-efficient**: no hidden allocations
//!
//! ## Common Patterns
//!
//! ```rust
//! use ookstation_core::traits::Stream;
//! use ookstation_core::stream::{MemoryStream, StreamError};
//! use ookstation_core::EdgeEvent;
//!
//! fn count_edges<S: Stream<Item = EdgeEvent>>(stream: &mut S) -> usize {
//!     let mut count = 0;
//!     loop {
//!         match stream.poll_next() {
//!             Ok(_) => count += 1,
//!             // No data available, a real consumer would come back later
//!             Err(nb::Error::WouldBlock) => return count,
//!             Err(nb::Error::Other(_)) => return count,
//!         }
//!     }
//! }
//!
//! let edges = [EdgeEvent::high(1_000), EdgeEvent::low(1_500)];
//! assert_eq!(count_edges(&mut MemoryStream::new(&edges)), 2);
//! ```

/// Core stream trait for edge and reading sources
///
/// ## Error Handling
///
/// Streams use a two-level error model:
/// - `nb::Error::WouldBlock` - Temporary unavailability
/// - `nb::Error::Other(E)` - Actual stream errors, including end of stream
///
/// ## Contract
///
/// - `poll_next` must not block indefinitely
/// - Items are produced in timestamp order
/// - End of stream is sticky: once reported it is reported forever
pub trait Stream {
    /// Type of items produced by the stream
    type Item;

    /// Type of errors that can occur
    type Error;

    /// Attempt to pull the next item from the stream
    fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error>;

    /// Returns bounds on remaining items
    ///
    /// Default implementation returns `(0, None)` indicating unknown size.
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, None)
    }
}

impl<S: Stream + ?Sized> Stream for &mut S {
    type Item = S::Item;
    type Error = S::Error;

    fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error> {
        (**self).poll_next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (**self).size_hint()
    }
}
