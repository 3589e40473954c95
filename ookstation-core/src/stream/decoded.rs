//! Decoding adapter
//!
//! Wraps any edge stream and yields readings instead of edges. Each adapter
//! owns its [`EdgeDecoder`], so two adapters never share decoding state.

use super::Stream;
use crate::decoder::{DecoderStats, EdgeDecoder};
use crate::events::EdgeEvent;
use crate::reading::Reading;

/// Stream of readings decoded from an edge stream
///
/// ```rust
/// use ookstation_core::stream::{DecodingStream, MemoryStream, Stream};
/// use ookstation_core::EdgeEvent;
///
/// let edges = [EdgeEvent::low(20_000), EdgeEvent::high(21_000)];
/// let mut readings = DecodingStream::new(MemoryStream::new(&edges));
/// assert!(readings.poll_next().is_err());
/// assert_eq!(readings.stats().edges, 2);
/// ```
pub struct DecodingStream<S> {
    edges: S,
    decoder: EdgeDecoder,
}

impl<S> DecodingStream<S>
where
    S: Stream<Item = EdgeEvent>,
{
    /// Decode `edges` with a fresh default decoder
    pub fn new(edges: S) -> Self {
        Self::with_decoder(edges, EdgeDecoder::new())
    }

    /// Decode `edges` with a preconfigured decoder
    pub fn with_decoder(edges: S, decoder: EdgeDecoder) -> Self {
        Self { edges, decoder }
    }

    /// Decoder counters
    pub fn stats(&self) -> &DecoderStats {
        self.decoder.stats()
    }

    /// Underlying edge stream
    pub fn edges(&self) -> &S {
        &self.edges
    }

    /// Split back into the edge stream and the decoder
    pub fn into_parts(self) -> (S, EdgeDecoder) {
        (self.edges, self.decoder)
    }
}

impl<S> Stream for DecodingStream<S>
where
    S: Stream<Item = EdgeEvent>,
{
    type Item = Reading;
    type Error = S::Error;

    fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error> {
        loop {
            let edge = self.edges.poll_next()?;
            if let Some(reading) = self.decoder.push(edge) {
                return Ok(reading);
            }
        }
    }
}

#[cfg(all(test, feature = "stream-memory"))]
mod tests {
    use super::*;
    use crate::stream::{MemoryStream, StreamError};

    #[test]
    fn end_of_stream_passes_through() {
        let mut readings = DecodingStream::new(MemoryStream::new(&[]));
        match readings.poll_next() {
            Err(nb::Error::Other(StreamError::EndOfStream)) => {}
            _ => panic!("Expected EndOfStream"),
        }
    }

    #[test]
    fn edges_are_consumed_until_a_reading() {
        let edges = [EdgeEvent::low(20_000), EdgeEvent::high(21_000), EdgeEvent::low(21_500)];
        let mut readings = DecodingStream::new(MemoryStream::new(&edges));
        assert!(readings.poll_next().is_err());
        assert!(readings.edges().is_exhausted());
        assert_eq!(readings.stats().edges, 3);
    }
}
