//! Memory-based edge stream for testing and replay

use super::{Stream, StreamError};
use crate::events::EdgeEvent;

/// Replays a slice of edge events
///
/// ## Example
///
/// ```rust
/// use ookstation_core::stream::{MemoryStream, Stream};
/// use ookstation_core::EdgeEvent;
///
/// let edges = [EdgeEvent::high(1_000), EdgeEvent::low(1_500)];
/// let mut stream = MemoryStream::new(&edges);
/// while let Ok(edge) = stream.poll_next() {
///     // Feed a decoder
///     let _ = edge;
/// }
/// assert!(stream.is_exhausted());
/// ```
pub struct MemoryStream<'a> {
    events: &'a [EdgeEvent],
    position: usize,
}

impl<'a> MemoryStream<'a> {
    /// Create new memory stream from slice
    pub fn new(events: &'a [EdgeEvent]) -> Self {
        Self { events, position: 0 }
    }

    /// Reset to beginning
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Get current position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Check if stream is exhausted
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.events.len()
    }
}

impl<'a> Stream for MemoryStream<'a> {
    type Item = EdgeEvent;
    type Error = StreamError<()>;

    fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error> {
        let event = *self
            .events
            .get(self.position)
            .ok_or(nb::Error::Other(StreamError::EndOfStream))?;
        self.position += 1;
        Ok(event)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.events.len() - self.position;
        (remaining, Some(remaining))
    }
}
