//! Edge events delivered by the GPIO collaborator
//!
//! An edge event is the only input of the decoder: the line level reported
//! with the edge and the instant it happened. Events are small `Copy` values
//! so they can be pushed through the capture queue from a callback without
//! allocation.
//!
//! ```text
//! EdgeEvent size:
//! ├── timestamp: 8 bytes
//! ├── level: 1 byte
//! └── padding: 7 bytes
//! Total: 16 bytes
//! ```

use core::fmt;

use crate::time::Timestamp;

/// Line level reported with an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Level {
    /// Line low (falling edge)
    Low = 0,
    /// Line high (rising edge)
    High = 1,
}

impl Level {
    /// Level from the `0|1` integer used in recordings
    pub const fn from_bit(bit: u8) -> Option<Self> {
        match bit {
            0 => Some(Level::Low),
            1 => Some(Level::High),
            _ => None,
        }
    }

    /// Level as a `0|1` integer
    pub const fn as_bit(self) -> u8 {
        self as u8
    }
}

/// A single timestamped edge on the receiver line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeEvent {
    /// Level reported with the edge
    pub level: Level,
    /// Edge instant in microseconds
    pub timestamp: Timestamp,
}

impl EdgeEvent {
    /// Create an edge event
    pub const fn new(level: Level, timestamp: Timestamp) -> Self {
        Self { level, timestamp }
    }

    /// Rising edge at `timestamp`
    pub const fn high(timestamp: Timestamp) -> Self {
        Self::new(Level::High, timestamp)
    }

    /// Falling edge at `timestamp`
    pub const fn low(timestamp: Timestamp) -> Self {
        Self::new(Level::Low, timestamp)
    }
}

/// Recording line format: `level,timestamp_us`
impl fmt::Display for EdgeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.level.as_bit(), self.timestamp)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for EdgeEvent {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}@{}us", self.level.as_bit(), self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_bits() {
        assert_eq!(Level::from_bit(0), Some(Level::Low));
        assert_eq!(Level::from_bit(1), Some(Level::High));
        assert_eq!(Level::from_bit(2), None);
        assert_eq!(Level::High.as_bit(), 1);
    }

    #[test]
    fn display_matches_recording_format() {
        assert_eq!(format!("{}", EdgeEvent::high(1_250)), "1,1250");
        assert_eq!(format!("{}", EdgeEvent::low(0)), "0,0");
    }
}
