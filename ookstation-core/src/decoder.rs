//! Edge Stream State Machine
//!
//! ## Overview
//!
//! [`EdgeDecoder`] turns a sequence of timestamped edges from one receiver
//! line into zero or more [`Reading`]s. It owns all decoding state, so each
//! monitored line gets its own instance and nothing is shared:
//!
//! ```text
//! EdgeEvent ─→ duration ─→ classify ─┬─ Noise ──→ scan preamble ─→ assemble ─→ check ─→ decode ─→ Reading
//!                                    │              (then clear buffer)
//!                                    └─ On/Off ─→ append 'off' after 'on'
//! ```
//!
//! ## Synchronization
//!
//! The receiver outputs noise whenever no transmitter is keyed. Every edge
//! whose duration matches no window is a resynchronization point: whatever
//! was buffered is searched for a preamble and then discarded. A transmission
//! is therefore decoded on the first noise edge that follows it.
//!
//! ## Pulse pairing
//!
//! Only an 'off' gap directly following an 'on' pulse carries a bit. Two
//! 'on' pulses in a row cannot happen on the wire but do show up on real
//! hardware; the second is ignored and the decoder keeps waiting for a gap,
//! without losing what it has buffered.
//!
//! ## Rejections
//!
//! Buffer overflow, frame length mismatch and checksum mismatch are routine
//! in a noisy RF band. They never reach the caller: they are counted in
//! [`DecoderStats`] and traced, and decoding continues from a clean state.
//!
//! ```rust
//! use ookstation_core::{EdgeDecoder, EdgeEvent};
//!
//! let mut decoder = EdgeDecoder::new();
//! // A lone edge is noise and produces nothing
//! assert_eq!(decoder.push(EdgeEvent::low(40_000)), None);
//! assert_eq!(decoder.stats().noise_boundaries, 1);
//! ```

use crate::buffer::SymbolBuffer;
use crate::checksum;
use crate::constants::buffers::SYMBOL_BUFFER_CAPACITY;
use crate::constants::protocol::FRAME_OFFSET;
use crate::errors::{DecodeResult, Rejection};
use crate::events::EdgeEvent;
use crate::frame::{self, Frame};
use crate::preamble;
use crate::pulse::{PulseTimings, Symbol};
use crate::reading::{self, Reading};
use crate::time::{self, Timestamp};

/// Counters describing what the decoder has seen
///
/// Purely observational; none of these influence decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecoderStats {
    /// Edges processed
    pub edges: u64,
    /// Edges classified as noise
    pub noise_boundaries: u64,
    /// Noise boundaries at which a preamble was found
    pub preambles_found: u64,
    /// Buffers discarded for exceeding capacity
    pub overflows: u64,
    /// Frames rejected for not being exactly 40 bits
    pub length_mismatches: u64,
    /// Frames rejected by the checksum
    pub checksum_failures: u64,
    /// Readings produced
    pub readings: u64,
}

impl DecoderStats {
    fn record(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::BufferOverflow { .. } => self.overflows += 1,
            Rejection::FrameLength { .. } => self.length_mismatches += 1,
            Rejection::ChecksumMismatch { .. } => self.checksum_failures += 1,
        }
    }
}

/// Assemble, verify and decode the frame starting at `start`
///
/// The pure tail of the pipeline, run once a preamble has been located.
pub fn decode_frame_at(symbols: &[Symbol], start: usize) -> DecodeResult<(Frame, Reading)> {
    let frame = frame::assemble(symbols, start)?;
    checksum::check(&frame)?;
    Ok((frame, reading::decode(&frame)))
}

/// Decoding state for one receiver line
#[derive(Debug, Clone)]
pub struct EdgeDecoder<const N: usize = SYMBOL_BUFFER_CAPACITY> {
    timings: PulseTimings,
    last_timestamp: Timestamp,
    previous: Symbol,
    buffer: SymbolBuffer<N>,
    stats: DecoderStats,
}

impl EdgeDecoder {
    /// Decoder with the default timings and a 128-symbol buffer
    pub fn new() -> Self {
        Self::with_timings(PulseTimings::default())
    }
}

impl Default for EdgeDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> EdgeDecoder<N> {
    /// Decoder with custom pulse timings
    pub fn with_timings(timings: PulseTimings) -> Self {
        Self {
            timings,
            last_timestamp: 0,
            previous: Symbol::Noise,
            buffer: SymbolBuffer::new(),
            stats: DecoderStats::default(),
        }
    }

    /// Feed one edge; returns a reading when it completes a valid frame
    pub fn push(&mut self, event: EdgeEvent) -> Option<Reading> {
        let duration = time::elapsed(self.last_timestamp, event.timestamp);
        self.last_timestamp = event.timestamp;
        self.stats.edges += 1;

        let symbol = self.timings.classify(event.level, duration);
        if symbol == Symbol::Noise {
            return self.synchronize();
        }

        if self.previous == Symbol::On {
            if symbol == Symbol::On {
                // Double 'on': keep waiting for the gap
                return None;
            }

            if let Err(rejection) = self.buffer.push(symbol) {
                log_trace!("{}; discarding buffer", rejection);
                self.stats.record(rejection);
                self.buffer.clear();
                return None;
            }
        }

        self.previous = symbol;
        None
    }

    /// Search the buffer for a transmission, then start over
    fn synchronize(&mut self) -> Option<Reading> {
        self.stats.noise_boundaries += 1;

        let outcome = if self.buffer.is_empty() {
            None
        } else {
            preamble::scan(self.buffer.as_slice()).map(|index| {
                decode_frame_at(self.buffer.as_slice(), index + FRAME_OFFSET)
            })
        };

        self.buffer.clear();
        self.previous = Symbol::Noise;

        match outcome? {
            Ok((frame, reading)) => {
                self.stats.preambles_found += 1;
                self.stats.readings += 1;
                log_debug!("Frame {} decoded: {}", frame, reading);
                Some(reading)
            }
            Err(rejection) => {
                self.stats.preambles_found += 1;
                self.stats.record(rejection);
                log_trace!("Frame rejected: {}", rejection);
                None
            }
        }
    }

    /// Forget any partial transmission and restart timing from zero
    ///
    /// Statistics are kept.
    pub fn reset(&mut self) {
        self.last_timestamp = 0;
        self.previous = Symbol::Noise;
        self.buffer.clear();
    }

    /// Counters accumulated since construction
    pub fn stats(&self) -> &DecoderStats {
        &self.stats
    }

    /// Timings used for classification
    pub fn timings(&self) -> &PulseTimings {
        &self.timings
    }

    /// Symbols buffered since the last noise boundary
    pub fn buffered(&self) -> &[Symbol] {
        self.buffer.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::protocol::PREAMBLE;
    use crate::events::EdgeEvent;

    /// Edge generator with a running clock
    struct Signal {
        now: Timestamp,
        events: heapless::Vec<EdgeEvent, 512>,
    }

    impl Signal {
        fn new() -> Self {
            Self { now: 0, events: heapless::Vec::new() }
        }

        fn edge_high(&mut self, width: u64) -> &mut Self {
            self.now += width;
            self.events.push(EdgeEvent::high(self.now)).unwrap();
            self
        }

        fn edge_low(&mut self, width: u64) -> &mut Self {
            self.now += width;
            self.events.push(EdgeEvent::low(self.now)).unwrap();
            self
        }

        fn gap(&mut self) -> &mut Self {
            self.edge_low(10_000)
        }

        fn bit(&mut self, symbol: Symbol) -> &mut Self {
            let width = if symbol == Symbol::ShortOff { 500 } else { 1500 };
            self.edge_high(1000).edge_low(width)
        }

        fn symbols(&mut self, symbols: impl IntoIterator<Item = Symbol>) -> &mut Self {
            for symbol in symbols {
                self.bit(symbol);
            }
            self
        }

        /// Leading preamble half plus the five frame bytes
        fn transmission(&mut self, bytes: [u8; 5]) -> &mut Self {
            self.symbols(PREAMBLE[..FRAME_OFFSET].iter().copied())
                .symbols(frame::symbols_for(&bytes))
        }

        fn run(&self, decoder: &mut EdgeDecoder) -> heapless::Vec<Reading, 8> {
            self.events.iter().filter_map(|e| decoder.push(*e)).collect()
        }
    }

    #[test]
    fn decodes_transmission_on_trailing_noise() {
        let mut signal = Signal::new();
        signal.gap().transmission([0x45, 0x81, 0x0A, 0x5A, 0xAD]).gap();

        let mut decoder = EdgeDecoder::new();
        let readings = signal.run(&mut decoder);
        assert_eq!(&readings[..], &[Reading::new(266, 90)]);
        assert_eq!(decoder.stats().readings, 1);
        assert!(decoder.buffered().is_empty());
    }

    #[test]
    fn nothing_emitted_before_noise() {
        let mut signal = Signal::new();
        signal.gap().transmission([0x45, 0x81, 0x0A, 0x5A, 0xAD]);

        let mut decoder = EdgeDecoder::new();
        assert!(signal.run(&mut decoder).is_empty());
        assert_eq!(decoder.buffered().len(), 44);
    }

    #[test]
    fn off_without_on_is_not_buffered() {
        let mut decoder = EdgeDecoder::new();
        decoder.push(EdgeEvent::low(20_000)); // noise
        decoder.push(EdgeEvent::low(20_500)); // short gap, no 'on' before
        assert!(decoder.buffered().is_empty());
    }

    #[test]
    fn double_on_is_ignored() {
        let mut signal = Signal::new();
        signal.gap().bit(Symbol::ShortOff);
        // A stray second 'on' before the gap
        signal.edge_high(1000).edge_high(1000).edge_low(1500);

        let mut decoder = EdgeDecoder::new();
        signal.run(&mut decoder);
        assert_eq!(decoder.buffered(), &[Symbol::ShortOff, Symbol::LongOff]);
    }

    #[test]
    fn checksum_failure_counted() {
        let mut signal = Signal::new();
        signal.gap().transmission([0x45, 0x81, 0x0A, 0x5A, 0xAC]).gap();

        let mut decoder = EdgeDecoder::new();
        assert!(signal.run(&mut decoder).is_empty());
        assert_eq!(decoder.stats().checksum_failures, 1);
        assert_eq!(decoder.stats().preambles_found, 1);
    }

    #[test]
    fn truncated_frame_counted() {
        let mut signal = Signal::new();
        signal
            .gap()
            .symbols(PREAMBLE[..FRAME_OFFSET].iter().copied())
            .symbols(frame::symbols_for(&[0x45, 0x81, 0x0A, 0x5A]))
            .gap();

        let mut decoder = EdgeDecoder::new();
        assert!(signal.run(&mut decoder).is_empty());
        assert_eq!(decoder.stats().length_mismatches, 1);
    }

    #[test]
    fn overflow_discards_buffer() {
        let mut signal = Signal::new();
        signal.gap();
        for _ in 0..129 {
            signal.bit(Symbol::ShortOff);
        }

        let mut decoder = EdgeDecoder::new();
        signal.run(&mut decoder);
        assert_eq!(decoder.stats().overflows, 1);
        assert!(decoder.buffered().is_empty());
    }

    #[test]
    fn full_buffer_is_not_overflow() {
        let mut signal = Signal::new();
        signal.gap();
        for _ in 0..SYMBOL_BUFFER_CAPACITY {
            signal.bit(Symbol::ShortOff);
        }

        let mut decoder = EdgeDecoder::new();
        signal.run(&mut decoder);
        assert_eq!(decoder.buffered().len(), SYMBOL_BUFFER_CAPACITY);
        assert_eq!(decoder.stats().overflows, 0);

        // One more symbol tips it over
        signal.bit(Symbol::ShortOff);
        let last = signal.events.len() - 2;
        for event in &signal.events[last..] {
            decoder.push(*event);
        }
        assert_eq!(decoder.stats().overflows, 1);
        assert!(decoder.buffered().is_empty());
    }

    #[test]
    fn small_buffer_overflows_sooner() {
        let mut signal = Signal::new();
        signal.gap().transmission([0x45, 0x81, 0x0A, 0x5A, 0xAD]).gap();

        let mut decoder: EdgeDecoder<32> = EdgeDecoder::with_timings(PulseTimings::default());
        let readings: heapless::Vec<Reading, 4> =
            signal.events.iter().filter_map(|e| decoder.push(*e)).collect();
        assert!(readings.is_empty());
        assert_eq!(decoder.stats().overflows, 1);
    }

    #[test]
    fn reset_drops_partial_transmission() {
        let mut signal = Signal::new();
        signal.gap().transmission([0x45, 0x81, 0x0A, 0x5A, 0xAD]);

        let mut decoder = EdgeDecoder::new();
        signal.run(&mut decoder);
        decoder.reset();
        assert!(decoder.buffered().is_empty());
        assert_eq!(decoder.push(EdgeEvent::low(signal.now + 10_000)), None);
    }
}
