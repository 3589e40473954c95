//! Pulse Classifier
//!
//! Maps the width of the interval that ended at an edge to a protocol symbol.
//! The level reported with the edge selects which windows apply: `High`
//! edges are checked against the 'on' window, `Low` edges against the two
//! 'off' windows.
//!
//! ```text
//!         Low                                  High
//!  ──┬─────────┬─────┬─────────┬──     ──┬─────────┬──
//!    │ShortOff │     │ LongOff │         │   On    │
//!   250       750  1250      1750       750      1250   µs
//! ```
//!
//! Window endpoints are inclusive. Anything outside every window is `Noise`,
//! which the state machine treats as a resynchronization point.

use crate::constants::timing::{
    JITTER_WINDOW_US, LONG_OFF_PULSE_US, ON_PULSE_US, SHORT_OFF_PULSE_US,
};
use crate::errors::TimingError;
use crate::events::Level;

/// Classified pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Symbol {
    /// Duration matched no window
    Noise,
    /// Short gap, binary 1
    ShortOff,
    /// Long gap, binary 0
    LongOff,
    /// Carrier keyed on
    On,
}

impl Symbol {
    /// Bit carried by an 'off' symbol (`ShortOff` → 1, `LongOff` → 0)
    pub const fn bit(self) -> Option<bool> {
        match self {
            Symbol::ShortOff => Some(true),
            Symbol::LongOff => Some(false),
            Symbol::On | Symbol::Noise => None,
        }
    }

    /// 'Off' symbol encoding `bit`
    pub const fn from_bit(bit: bool) -> Self {
        if bit {
            Symbol::ShortOff
        } else {
            Symbol::LongOff
        }
    }

    /// True for the two data-bearing symbols
    pub const fn is_off(self) -> bool {
        matches!(self, Symbol::ShortOff | Symbol::LongOff)
    }
}

/// Inclusive duration window in microseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Shortest accepted duration
    pub lower_us: u64,
    /// Longest accepted duration
    pub upper_us: u64,
}

impl Window {
    /// Window of `nominal ± jitter`
    pub const fn around(nominal_us: u64, jitter_us: u64) -> Self {
        Self {
            lower_us: nominal_us.saturating_sub(jitter_us),
            upper_us: nominal_us.saturating_add(jitter_us),
        }
    }

    /// Whether `duration_us` falls inside the window, endpoints included
    #[inline]
    pub const fn contains(&self, duration_us: u64) -> bool {
        duration_us >= self.lower_us && duration_us <= self.upper_us
    }
}

/// Pulse widths the classifier accepts
///
/// The defaults match the ClimeMET CM7-TX. Custom timings are validated so
/// that every duration maps to at most one 'off' symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseTimings {
    on: Window,
    short_off: Window,
    long_off: Window,
}

impl Default for PulseTimings {
    fn default() -> Self {
        Self {
            on: Window::around(ON_PULSE_US, JITTER_WINDOW_US),
            short_off: Window::around(SHORT_OFF_PULSE_US, JITTER_WINDOW_US),
            long_off: Window::around(LONG_OFF_PULSE_US, JITTER_WINDOW_US),
        }
    }
}

impl PulseTimings {
    /// Create timings from nominal widths and a shared jitter tolerance
    pub fn new(
        on_us: u64,
        short_off_us: u64,
        long_off_us: u64,
        jitter_us: u64,
    ) -> Result<Self, TimingError> {
        for nominal_us in [on_us, short_off_us, long_off_us] {
            if nominal_us <= jitter_us {
                return Err(TimingError::WidthBelowJitter { nominal_us, jitter_us });
            }
        }

        let timings = Self {
            on: Window::around(on_us, jitter_us),
            short_off: Window::around(short_off_us, jitter_us),
            long_off: Window::around(long_off_us, jitter_us),
        };

        if timings.short_off.upper_us >= timings.long_off.lower_us {
            return Err(TimingError::OverlappingWindows {
                short_upper_us: timings.short_off.upper_us,
                long_lower_us: timings.long_off.lower_us,
            });
        }

        Ok(timings)
    }

    /// Default nominal widths with a different jitter tolerance
    pub fn with_jitter(jitter_us: u64) -> Result<Self, TimingError> {
        Self::new(ON_PULSE_US, SHORT_OFF_PULSE_US, LONG_OFF_PULSE_US, jitter_us)
    }

    /// Window for 'on' pulses
    pub const fn on(&self) -> Window {
        self.on
    }

    /// Window for short 'off' gaps
    pub const fn short_off(&self) -> Window {
        self.short_off
    }

    /// Window for long 'off' gaps
    pub const fn long_off(&self) -> Window {
        self.long_off
    }

    /// Classify a pulse that ended with an edge at `level`
    pub fn classify(&self, level: Level, duration_us: u64) -> Symbol {
        match level {
            Level::Low => {
                if self.short_off.contains(duration_us) {
                    Symbol::ShortOff
                } else if self.long_off.contains(duration_us) {
                    Symbol::LongOff
                } else {
                    Symbol::Noise
                }
            }
            Level::High => {
                if self.on.contains(duration_us) {
                    Symbol::On
                } else {
                    Symbol::Noise
                }
            }
        }
    }
}

/// Classify a pulse with the default timings
pub fn classify(level: Level, duration_us: u64) -> Symbol {
    PulseTimings::default().classify(level, duration_us)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nominal_widths() {
        assert_eq!(classify(Level::High, 1000), Symbol::On);
        assert_eq!(classify(Level::Low, 500), Symbol::ShortOff);
        assert_eq!(classify(Level::Low, 1500), Symbol::LongOff);
    }

    #[test]
    fn window_endpoints_are_inclusive() {
        assert_eq!(classify(Level::Low, 250), Symbol::ShortOff);
        assert_eq!(classify(Level::Low, 750), Symbol::ShortOff);
        assert_eq!(classify(Level::Low, 1250), Symbol::LongOff);
        assert_eq!(classify(Level::Low, 1750), Symbol::LongOff);
        assert_eq!(classify(Level::High, 750), Symbol::On);
        assert_eq!(classify(Level::High, 1250), Symbol::On);
    }

    #[test]
    fn one_past_endpoints_is_noise() {
        assert_eq!(classify(Level::Low, 249), Symbol::Noise);
        assert_eq!(classify(Level::Low, 751), Symbol::Noise);
        assert_eq!(classify(Level::Low, 1249), Symbol::Noise);
        assert_eq!(classify(Level::Low, 1751), Symbol::Noise);
        assert_eq!(classify(Level::High, 749), Symbol::Noise);
        assert_eq!(classify(Level::High, 1251), Symbol::Noise);
    }

    #[test]
    fn level_selects_windows() {
        // An 'on' width on a falling edge is not an 'off' symbol
        assert_eq!(classify(Level::Low, 1000), Symbol::Noise);
        // An 'off' width on a rising edge is not an 'on' pulse
        assert_eq!(classify(Level::High, 500), Symbol::Noise);
        assert_eq!(classify(Level::High, 1500), Symbol::Noise);
    }

    #[test]
    fn extreme_durations_are_noise() {
        assert_eq!(classify(Level::Low, 0), Symbol::Noise);
        assert_eq!(classify(Level::High, u64::MAX), Symbol::Noise);
    }

    #[test]
    fn custom_jitter() {
        let tight = PulseTimings::with_jitter(100).unwrap();
        assert_eq!(tight.classify(Level::Low, 600), Symbol::ShortOff);
        assert_eq!(tight.classify(Level::Low, 650), Symbol::Noise);
        assert_eq!(tight.on(), Window { lower_us: 900, upper_us: 1100 });
    }

    #[test]
    fn overlapping_windows_rejected() {
        assert_eq!(
            PulseTimings::with_jitter(500),
            Err(TimingError::WidthBelowJitter { nominal_us: 500, jitter_us: 500 })
        );
        assert!(matches!(
            PulseTimings::new(1000, 900, 1100, 150),
            Err(TimingError::OverlappingWindows { .. })
        ));
    }

    #[test]
    fn symbol_bits() {
        assert_eq!(Symbol::ShortOff.bit(), Some(true));
        assert_eq!(Symbol::LongOff.bit(), Some(false));
        assert_eq!(Symbol::On.bit(), None);
        assert_eq!(Symbol::from_bit(true), Symbol::ShortOff);
        assert!(!Symbol::Noise.is_off());
    }
}
