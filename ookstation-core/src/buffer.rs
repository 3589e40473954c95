//! Fixed-Capacity Symbol Buffer
//!
//! ## Overview
//!
//! Holds the data-bearing symbols received since the last noise boundary.
//! Storage is a `heapless::Vec` sized at compile time, so the decoder never
//! touches the heap.
//!
//! ## Why not a ring buffer?
//!
//! A ring buffer would silently keep the newest symbols on overflow. Here an
//! overflow means the pulse train cannot be one of our transmissions, and
//! the frame start is only meaningful relative to the first buffered symbol,
//! so the whole buffer is discarded instead.
//!
//! ## Invariants
//!
//! - Only `ShortOff` and `LongOff` are ever stored
//! - `len() <= N`
//!
//! ```rust
//! use ookstation_core::buffer::SymbolBuffer;
//! use ookstation_core::pulse::Symbol;
//!
//! let mut buffer: SymbolBuffer<2> = SymbolBuffer::new();
//! assert!(buffer.push(Symbol::ShortOff).is_ok());
//! assert!(buffer.push(Symbol::LongOff).is_ok());
//! assert!(buffer.push(Symbol::ShortOff).is_err());
//! ```

use heapless::Vec;

use crate::constants::buffers::SYMBOL_BUFFER_CAPACITY;
use crate::errors::{DecodeResult, Rejection};
use crate::pulse::Symbol;

/// Bounded sequence of 'off' symbols
#[derive(Debug, Clone)]
pub struct SymbolBuffer<const N: usize = SYMBOL_BUFFER_CAPACITY> {
    symbols: Vec<Symbol, N>,
}

impl<const N: usize> SymbolBuffer<N> {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self { symbols: Vec::new() }
    }

    /// Append an 'off' symbol
    ///
    /// Fails with [`Rejection::BufferOverflow`] when the buffer is full; the
    /// caller decides whether to discard. `On` and `Noise` are never stored
    /// and are ignored here.
    pub fn push(&mut self, symbol: Symbol) -> DecodeResult<()> {
        debug_assert!(symbol.is_off(), "only 'off' symbols carry data");
        if !symbol.is_off() {
            return Ok(());
        }
        self.symbols
            .push(symbol)
            .map_err(|_| Rejection::BufferOverflow { capacity: N })
    }

    /// Buffered symbols, oldest first
    pub fn as_slice(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Number of buffered symbols
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Check if buffer is full
    pub fn is_full(&self) -> bool {
        self.symbols.is_full()
    }

    /// Maximum number of symbols
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Discard all symbols
    pub fn clear(&mut self) {
        self.symbols.clear();
    }
}

impl<const N: usize> Default for SymbolBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
