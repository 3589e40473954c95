//! Common test utilities for integration tests
//!
//! This module provides:
//! - A signal generator producing receiver edges for given frames
//! - Reference frames with known readings
//! - A deterministic RNG for timing jitter

#![allow(dead_code)]

pub mod scenarios;

use ookstation_core::{
    checksum,
    constants::{LONG_OFF_PULSE_US, ON_PULSE_US, PREAMBLE, FRAME_OFFSET, SHORT_OFF_PULSE_US},
    frame,
    EdgeDecoder, EdgeEvent, Reading, Symbol,
};

/// Gap long enough to classify as noise on any level
pub const NOISE_GAP_US: u64 = 10_000;

/// Deterministic xorshift generator
pub struct TestRng {
    state: u32,
}

impl TestRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u32(&mut self) -> u32 {
        // Xorshift algorithm
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    /// Uniform offset in `-max..=max`
    pub fn offset(&mut self, max: u64) -> i64 {
        if max == 0 {
            return 0;
        }
        let span = 2 * max + 1;
        (self.next_u32() as u64 % span) as i64 - max as i64
    }
}

/// Builds the edge sequence a receiver would report
///
/// Keeps a running clock; every method appends one or more edges.
pub struct SignalBuilder {
    now: u64,
    edges: Vec<EdgeEvent>,
    jitter_us: u64,
    rng: TestRng,
}

impl SignalBuilder {
    pub fn new(start_us: u64) -> Self {
        Self {
            now: start_us,
            edges: Vec::new(),
            jitter_us: 0,
            rng: TestRng::new(42),
        }
    }

    /// Perturb every pulse width by up to `jitter_us`
    pub fn with_jitter(mut self, jitter_us: u64, seed: u32) -> Self {
        self.jitter_us = jitter_us;
        self.rng = TestRng::new(seed);
        self
    }

    fn width(&mut self, nominal_us: u64) -> u64 {
        let offset = self.rng.offset(self.jitter_us);
        (nominal_us as i64 + offset) as u64
    }

    pub fn high_after(&mut self, width_us: u64) -> &mut Self {
        self.now += width_us;
        self.edges.push(EdgeEvent::high(self.now));
        self
    }

    pub fn low_after(&mut self, width_us: u64) -> &mut Self {
        self.now += width_us;
        self.edges.push(EdgeEvent::low(self.now));
        self
    }

    /// Idle receiver output
    pub fn noise(&mut self) -> &mut Self {
        self.low_after(NOISE_GAP_US)
    }

    /// One 'on' pulse followed by the gap for `symbol`
    pub fn pair(&mut self, symbol: Symbol) -> &mut Self {
        let on = self.width(ON_PULSE_US);
        let nominal_off = match symbol {
            Symbol::ShortOff => SHORT_OFF_PULSE_US,
            Symbol::LongOff => LONG_OFF_PULSE_US,
            other => panic!("{:?} is not an 'off' symbol", other),
        };
        let off = self.width(nominal_off);
        self.high_after(on).low_after(off)
    }

    pub fn symbols(&mut self, symbols: impl IntoIterator<Item = Symbol>) -> &mut Self {
        for symbol in symbols {
            self.pair(symbol);
        }
        self
    }

    /// What goes on air: the leading preamble half, then the frame bits
    ///
    /// The trailing preamble half is carried by the frame's first nibble.
    pub fn transmission(&mut self, bytes: &[u8; 5]) -> &mut Self {
        self.symbols(PREAMBLE[..FRAME_OFFSET].iter().copied())
            .symbols(frame::symbols_for(bytes))
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn edges(&self) -> &[EdgeEvent] {
        &self.edges
    }

    pub fn into_edges(self) -> Vec<EdgeEvent> {
        self.edges
    }
}

/// Complete a four-byte payload with its checksum
pub fn with_checksum(payload: [u8; 4]) -> [u8; 5] {
    let crc = checksum::crc8(&payload);
    [payload[0], payload[1], payload[2], payload[3], crc]
}

/// Run edges through a fresh decoder and collect readings
pub fn decode_all(edges: &[EdgeEvent]) -> Vec<Reading> {
    let mut decoder = EdgeDecoder::new();
    edges.iter().filter_map(|edge| decoder.push(*edge)).collect()
}
