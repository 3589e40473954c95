//! Command arguments

use std::path::PathBuf;

use clap::Args;

/// Highest GPIO line offset on a Raspberry Pi header chip
pub const MAX_GPIO_LINE: u32 = 53;

/// Default GPIO character device
pub const DEFAULT_CHIP: &str = "/dev/gpiochip0";

/// Arguments for the listen command
#[derive(Args, Debug, Clone)]
pub struct ListenArgs {
    /// GPIO line offset the receiver data pin is wired to
    #[arg(value_parser = clap::value_parser!(u32).range(0..=MAX_GPIO_LINE as i64))]
    pub line: u32,

    /// File rewritten with the latest reading (printed to stdout if omitted)
    pub outfile: Option<PathBuf>,

    /// GPIO character device
    #[arg(long, default_value = DEFAULT_CHIP)]
    pub chip: PathBuf,

    /// Also record raw edges to this file
    #[arg(long, value_name = "FILE")]
    pub record: Option<PathBuf>,
}

/// Arguments for the replay command
#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// Edge recording produced by `listen --record`
    pub file: PathBuf,

    /// File rewritten with the latest reading (printed to stdout if omitted)
    pub outfile: Option<PathBuf>,
}
