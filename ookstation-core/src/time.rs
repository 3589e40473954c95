//! Timestamp handling for edge events
//!
//! Edge timestamps come from different clocks depending on the source:
//! - Linux GPIO character device: nanoseconds, kernel monotonic clock
//! - Recorded replays: microseconds as written by [`EdgeRecorder`](crate::stream::EdgeRecorder)
//! - Tests: arbitrary microsecond counters
//!
//! The decoder only ever looks at differences between consecutive edges, so
//! the epoch is irrelevant. Everything is normalized to microseconds.

use crate::constants::time::NS_PER_US;

/// Timestamp in microseconds since an arbitrary epoch
pub type Timestamp = u64;

/// Convert a nanosecond timestamp (as reported by the kernel) to microseconds
pub const fn micros_from_nanos(nanos: u64) -> Timestamp {
    nanos / NS_PER_US
}

/// Elapsed microseconds between two edges
///
/// Wraps rather than panics if the clock steps backwards; the resulting
/// huge duration classifies as noise and resynchronizes the decoder.
pub const fn elapsed(earlier: Timestamp, later: Timestamp) -> u64 {
    later.wrapping_sub(earlier)
}
