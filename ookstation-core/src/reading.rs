//! Field Decoder
//!
//! Extracts the measured quantities from a frame whose checksum has already
//! been verified.
//!
//! ## Temperature
//!
//! Sign and magnitude, in tenths of a degree Celsius:
//!
//! ```text
//! byte1: i i i i s m m m     byte2: m m m m m m m m
//!                │ └─┬─┘            └──────┬──────┘
//!              sign  └──── 11-bit magnitude ┘
//! ```
//!
//! The range is therefore -204.7..=204.7 °C. The value is kept as an integer
//! number of tenths so that formatting and comparisons are exact.
//!
//! ## Humidity
//!
//! byte3 is relative humidity in percent. A healthy sensor never sends more
//! than 100, but the value is passed through unclamped; range checks belong
//! to whoever consumes the reading.

use core::fmt;

use crate::constants::protocol::{TEMPERATURE_HIGH_MASK, TEMPERATURE_SIGN_MASK};
use crate::frame::Frame;

/// Temperature in tenths of a degree Celsius
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeciCelsius(pub i16);

impl DeciCelsius {
    /// Largest magnitude the wire format can carry
    pub const MAX_MAGNITUDE: i16 = 0x07FF;

    /// Value in degrees Celsius
    pub fn celsius(self) -> f32 {
        self.0 as f32 * 0.1
    }

    /// Raw tenths
    pub const fn tenths(self) -> i16 {
        self.0
    }
}

/// One decimal digit, like `%.1f`
impl fmt::Display for DeciCelsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        write!(f, "{}{}.{}", sign, magnitude / 10, magnitude % 10)
    }
}

/// A decoded sensor measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Air temperature
    pub temperature: DeciCelsius,
    /// Relative humidity in percent, unclamped
    pub humidity: u8,
}

impl Reading {
    /// Create a reading from tenths of a degree and percent humidity
    pub const fn new(temperature_tenths: i16, humidity: u8) -> Self {
        Self {
            temperature: DeciCelsius(temperature_tenths),
            humidity,
        }
    }

    /// Temperature in degrees Celsius
    pub fn temperature_celsius(&self) -> f32 {
        self.temperature.celsius()
    }

    /// Relative humidity in percent
    pub const fn relative_humidity(&self) -> u8 {
        self.humidity
    }
}

/// Output line format: `temperature,humidity`, e.g. `26.6,90`
impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.temperature, self.humidity)
    }
}

/// Extract temperature and humidity from a verified frame
pub fn decode(frame: &Frame) -> Reading {
    let bytes = frame.bytes();

    let magnitude = (((bytes[1] & TEMPERATURE_HIGH_MASK) as i16) << 8) + bytes[2] as i16;
    let tenths = if bytes[1] & TEMPERATURE_SIGN_MASK != 0 {
        -magnitude
    } else {
        magnitude
    };

    Reading::new(tenths, bytes[3])
}
