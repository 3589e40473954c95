//! ookstation receiver
//!
//! Listens on a Linux GPIO line wired to a 433 MHz OOK receiver and decodes
//! ClimeMET-style temperature/humidity transmissions.
//!
//! # Usage
//!
//! ```bash
//! # Decode live transmissions on line 27, keeping the latest reading in a file
//! ookstation listen 27 /var/lib/ookstation/latest.csv
//!
//! # Same, but also record raw edges for later analysis
//! ookstation listen 27 --record edges.txt
//!
//! # Decode a recording, printing readings to the console
//! ookstation replay edges.txt
//! ```

use clap::{Parser, Subcommand};

use ookstation_core::constants::JITTER_WINDOW_US;

pub mod app;
pub mod config;
#[cfg(feature = "gpio")]
pub mod gpio;
pub mod sink;

pub use config::{ListenArgs, ReplayArgs};

/// ookstation command line interface
#[derive(Parser, Debug)]
#[command(name = "ookstation")]
#[command(author, version, about = "Decoder for 433MHz OOK temperature/humidity sensors")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Tolerance around nominal pulse widths, in microseconds
    #[arg(long, global = true, default_value_t = JITTER_WINDOW_US)]
    pub jitter_us: u64,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode live transmissions from a GPIO line
    Listen(ListenArgs),

    /// Decode a recorded edge file
    Replay(ReplayArgs),
}
