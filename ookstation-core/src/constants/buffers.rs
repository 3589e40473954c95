//! Buffer Sizes
//!
//! Everything is sized at compile time so the decoder never allocates.

/// Maximum symbols held between two noise boundaries.
///
/// A full transmission is well under 64 symbols. Anything longer is not a
/// frame from this sensor and the buffer is discarded.
pub const SYMBOL_BUFFER_CAPACITY: usize = 128;

/// Slots in the edge capture queue (one slot is kept free by the ring).
///
/// At one edge per ~500µs this holds more than 100ms of signal, which covers
/// scheduler stalls of the decoding thread on a loaded Raspberry Pi.
pub const CAPTURE_QUEUE_CAPACITY: usize = 256;

/// Longest line accepted by the edge replay reader.
pub const REPLAY_LINE_CAPACITY: usize = 64;

/// Read chunk used by the edge replay reader.
pub const REPLAY_READ_CHUNK: usize = 4096;
