//! Recorded edge files
//!
//! Raw edges captured from a receiver can be written to disk and replayed
//! later through the same decoder, which makes field problems reproducible
//! on a desk.
//!
//! ## Format
//!
//! One edge per line, level then timestamp in microseconds:
//!
//! ```text
//! # level,timestamp_us
//! 0,1712345678000
//! 1,1712345679002
//! 0,1712345679497
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Malformed lines are
//! counted in [`FileStreamStats::parse_errors`] and skipped, so one bad line
//! does not end a replay.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use super::{Stream, StreamError};
use crate::constants::buffers::{REPLAY_LINE_CAPACITY, REPLAY_READ_CHUNK};
use crate::events::{EdgeEvent, Level};

/// Statistics for file streaming
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileStreamStats {
    /// Total events read successfully
    pub events_read: usize,
    /// Total lines processed
    pub lines_processed: usize,
    /// Lines that could not be parsed
    pub parse_errors: usize,
    /// Bytes read from the source
    pub bytes_read: usize,
}

/// Edge stream reading the recording format
///
/// ```rust
/// use ookstation_core::stream::{FileStream, Stream};
/// use ookstation_core::EdgeEvent;
///
/// let recording = b"# level,timestamp_us\n1,1000\n0,1500\n";
/// let mut stream = FileStream::new(&recording[..]);
/// assert_eq!(stream.poll_next().unwrap(), EdgeEvent::high(1000));
/// assert_eq!(stream.poll_next().unwrap(), EdgeEvent::low(1500));
/// assert!(stream.poll_next().is_err());
/// ```
pub struct FileStream<R = File> {
    source: R,
    buffer: [u8; REPLAY_READ_CHUNK],
    buffer_pos: usize,
    buffer_len: usize,
    line_buffer: heapless::String<REPLAY_LINE_CAPACITY>,
    /// Current line exceeded the line buffer; drop it at the newline
    overlong: bool,
    eof: bool,
    skip_lines: usize,
    lines_skipped: usize,
    stats: FileStreamStats,
}

impl FileStream<File> {
    /// Open a recording on disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StreamError<io::Error>> {
        let file = File::open(path).map_err(StreamError::Transport)?;
        Ok(Self::new(file))
    }
}

impl<R: Read> FileStream<R> {
    /// Stream edges from any reader
    pub fn new(source: R) -> Self {
        Self {
            source,
            buffer: [0; REPLAY_READ_CHUNK],
            buffer_pos: 0,
            buffer_len: 0,
            line_buffer: heapless::String::new(),
            overlong: false,
            eof: false,
            skip_lines: 0,
            lines_skipped: 0,
            stats: FileStreamStats::default(),
        }
    }

    /// Skip first N lines (useful for headers without a `#`)
    pub fn with_skip_lines(mut self, lines: usize) -> Self {
        self.skip_lines = lines;
        self
    }

    /// Get statistics
    pub fn stats(&self) -> &FileStreamStats {
        &self.stats
    }

    /// Refill buffer from the source
    fn refill_buffer(&mut self) -> Result<bool, StreamError<io::Error>> {
        if self.eof {
            return Ok(false);
        }

        self.buffer_pos = 0;
        self.buffer_len = 0;

        let bytes_read = loop {
            match self.source.read(&mut self.buffer) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(StreamError::Transport(e)),
            }
        };

        if bytes_read == 0 {
            self.eof = true;
            return Ok(false);
        }

        self.buffer_len = bytes_read;
        self.stats.bytes_read += bytes_read;
        Ok(true)
    }

    /// Read next line into the line buffer, `false` at end of input
    fn read_line(&mut self) -> Result<bool, StreamError<io::Error>> {
        self.line_buffer.clear();
        self.overlong = false;

        loop {
            while self.buffer_pos < self.buffer_len {
                let byte = self.buffer[self.buffer_pos];
                self.buffer_pos += 1;

                if byte == b'\n' {
                    self.stats.lines_processed += 1;

                    if self.lines_skipped < self.skip_lines {
                        self.lines_skipped += 1;
                        self.line_buffer.clear();
                        self.overlong = false;
                        continue;
                    }

                    return Ok(true);
                } else if byte != b'\r' && !self.overlong
                    && self.line_buffer.push(byte as char).is_err()
                {
                    self.overlong = true;
                }
            }

            if !self.refill_buffer()? {
                if !self.line_buffer.is_empty() || self.overlong {
                    self.stats.lines_processed += 1;
                    return Ok(true);
                }
                return Ok(false);
            }
        }
    }
}

/// Parse one `level,timestamp_us` line
fn parse_edge(line: &str) -> Result<EdgeEvent, &'static str> {
    let (level, timestamp) = line.split_once(',').ok_or("Missing separator")?;

    let level = level
        .trim()
        .parse::<u8>()
        .ok()
        .and_then(Level::from_bit)
        .ok_or("Invalid level")?;

    let timestamp = timestamp
        .trim()
        .parse::<u64>()
        .map_err(|_| "Invalid timestamp")?;

    Ok(EdgeEvent::new(level, timestamp))
}

impl<R: Read> Stream for FileStream<R> {
    type Item = EdgeEvent;
    type Error = StreamError<io::Error>;

    fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error> {
        loop {
            if !self.read_line()? {
                return Err(nb::Error::Other(StreamError::EndOfStream));
            }

            let parsed = if self.overlong {
                Err("Line too long")
            } else {
                let line = self.line_buffer.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                parse_edge(line)
            };

            match parsed {
                Ok(event) => {
                    self.stats.events_read += 1;
                    return Ok(event);
                }
                Err(reason) => {
                    self.stats.parse_errors += 1;
                    log_warn!("Skipping line {}: {}", self.stats.lines_processed, reason);
                }
            }
        }
    }
}

/// Writes edges in the recording format
///
/// ```rust
/// use ookstation_core::stream::EdgeRecorder;
/// use ookstation_core::EdgeEvent;
///
/// let mut recorder = EdgeRecorder::new(Vec::new()).unwrap();
/// recorder.record(&EdgeEvent::high(1000)).unwrap();
/// let bytes = recorder.into_inner();
/// assert_eq!(bytes, b"# level,timestamp_us\n1,1000\n");
/// ```
pub struct EdgeRecorder<W: Write> {
    sink: W,
    recorded: usize,
}

impl EdgeRecorder<io::BufWriter<File>> {
    /// Create (or truncate) a recording on disk
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Self::new(io::BufWriter::new(File::create(path)?))
    }
}

impl<W: Write> EdgeRecorder<W> {
    /// Start a recording on `sink`, writing the header comment
    pub fn new(mut sink: W) -> io::Result<Self> {
        writeln!(sink, "# level,timestamp_us")?;
        Ok(Self { sink, recorded: 0 })
    }

    /// Append one edge
    pub fn record(&mut self, event: &EdgeEvent) -> io::Result<()> {
        writeln!(self.sink, "{}", event)?;
        self.recorded += 1;
        Ok(())
    }

    /// Edges recorded so far
    pub fn recorded(&self) -> usize {
        self.recorded
    }

    /// Flush buffered output
    pub fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }

    /// Finish and return the underlying writer
    pub fn into_inner(self) -> W {
        self.sink
    }
}
