//! Reading outputs
//!
//! The file sink keeps exactly one line, the most recent reading, so other
//! programs can poll it without parsing a growing log.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use ookstation_core::{Reading, ReadingSink};
use thiserror::Error;

/// Sink failures
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to write {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write to console: {0}")]
    Console(#[source] io::Error),
}

/// Rewrites a file with the latest reading as `temp,rh`
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReadingSink for FileSink {
    type Error = SinkError;

    fn emit(&mut self, reading: &Reading) -> Result<(), Self::Error> {
        fs::write(&self.path, format!("{}\n", reading)).map_err(|source| SinkError::File {
            path: self.path.clone(),
            source,
        })?;
        log::info!(
            "Data written to file: Temp: {}, RH: {}",
            reading.temperature,
            reading.humidity
        );
        Ok(())
    }
}

/// Prints `Temp: 26.6, RH: 90` lines
pub struct ConsoleSink<W = io::Stdout> {
    out: W,
}

impl ConsoleSink {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReadingSink for ConsoleSink<W> {
    type Error = SinkError;

    fn emit(&mut self, reading: &Reading) -> Result<(), Self::Error> {
        writeln!(self.out, "Temp: {}, RH: {}", reading.temperature, reading.humidity)
            .and_then(|()| self.out.flush())
            .map_err(SinkError::Console)
    }
}

/// Where readings go, picked from the command line
pub enum Output {
    File(FileSink),
    Console(ConsoleSink),
}

impl Output {
    /// File sink when a path is given, console otherwise
    pub fn new(outfile: Option<&Path>) -> Self {
        match outfile {
            Some(path) => Output::File(FileSink::new(path)),
            None => Output::Console(ConsoleSink::stdout()),
        }
    }
}

impl ReadingSink for Output {
    type Error = SinkError;

    fn emit(&mut self, reading: &Reading) -> Result<(), Self::Error> {
        match self {
            Output::File(sink) => sink.emit(reading),
            Output::Console(sink) => sink.emit(reading),
        }
    }
}
