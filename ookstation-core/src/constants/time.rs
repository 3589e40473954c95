//! Time Unit Conversions

/// Nanoseconds per microsecond.
pub const NS_PER_US: u64 = 1_000;
