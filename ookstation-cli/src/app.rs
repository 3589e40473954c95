//! Command execution
//!
//! ```text
//! listen:  GPIO thread ──push──→ EdgeQueue ──poll──→ decoder thread ──→ sink
//! replay:  FileStream ───────────────────────poll──→ decoder ─────────→ sink
//! ```
//!
//! Both commands share the same decoding loop; only the edge source differs.

use std::fmt;
use std::io::Write;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

use ookstation_core::stream::{DecodingStream, EdgeRecorder, FileStream, StreamError};
use ookstation_core::time::{self, Timestamp};
use ookstation_core::{
    DecoderStats, EdgeDecoder, EdgeEvent, PulseTimings, Reading, ReadingSink, Stream,
};

use crate::config::{ListenArgs, ReplayArgs};
use crate::sink::Output;
use crate::{Cli, Commands};

/// Longest the decoder sleeps on an empty queue before polling again
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Most signal time a recording holds in memory before it is flushed
const RECORDING_FLUSH_US: u64 = 1_000_000;

/// Execute the parsed command line
pub fn run(cli: Cli) -> Result<()> {
    let timings = PulseTimings::with_jitter(cli.jitter_us)
        .with_context(|| format!("Invalid --jitter-us {}", cli.jitter_us))?;

    match cli.command {
        Commands::Listen(args) => listen(&args, timings),
        Commands::Replay(args) => replay(&args, timings).map(|_| ()),
    }
}

/// Hand a reading to the sink; a failing sink never stops decoding
fn deliver<K>(sink: &mut K, reading: &Reading)
where
    K: ReadingSink,
    K::Error: fmt::Display,
{
    if let Err(e) = sink.emit(reading) {
        log::error!("{}", e);
    }
}

/// Decode until the edge source ends
///
/// `WouldBlock` parks the thread; capture unparks it after every edge.
fn drain<S, E, K>(readings: &mut DecodingStream<S>, sink: &mut K) -> Result<(), StreamError<E>>
where
    S: Stream<Item = EdgeEvent, Error = StreamError<E>>,
    K: ReadingSink,
    K::Error: fmt::Display,
{
    loop {
        match readings.poll_next() {
            Ok(reading) => deliver(sink, &reading),
            Err(nb::Error::WouldBlock) => thread::park_timeout(IDLE_POLL),
            Err(nb::Error::Other(e)) if e.is_end_of_stream() => return Ok(()),
            Err(nb::Error::Other(e)) => return Err(e),
        }
    }
}

fn log_summary(stats: &DecoderStats) {
    log::info!(
        "Processed {} edges: {} readings, {} preambles, {} checksum failures, {} length mismatches, {} overflows",
        stats.edges,
        stats.readings,
        stats.preambles_found,
        stats.checksum_failures,
        stats.length_mismatches,
        stats.overflows,
    );
}

/// Edge source that copies every edge into a recording
///
/// The recording is flushed whenever the source runs dry and at least once
/// per [`RECORDING_FLUSH_US`] of signal, so a killed receiver loses at most
/// the last second of edges. A failing recorder is logged and dropped;
/// decoding carries on.
pub struct Recording<S, W: Write> {
    inner: S,
    recorder: Option<EdgeRecorder<W>>,
    last_flush: Option<Timestamp>,
}

impl<S, W: Write> Recording<S, W> {
    pub fn new(inner: S, recorder: Option<EdgeRecorder<W>>) -> Self {
        Self { inner, recorder, last_flush: None }
    }

    fn flush(&mut self) {
        if let Some(recorder) = self.recorder.as_mut() {
            if let Err(e) = recorder.flush() {
                log::error!("Edge recording stopped: {}", e);
                self.recorder = None;
            }
        }
    }

    fn record(&mut self, edge: &EdgeEvent) {
        let Some(recorder) = self.recorder.as_mut() else {
            return;
        };
        if let Err(e) = recorder.record(edge) {
            log::error!("Edge recording stopped: {}", e);
            self.recorder = None;
            return;
        }

        let since = *self.last_flush.get_or_insert(edge.timestamp);
        if time::elapsed(since, edge.timestamp) >= RECORDING_FLUSH_US {
            self.flush();
            self.last_flush = Some(edge.timestamp);
        }
    }

    /// Flush and return the recorder, if it is still alive
    pub fn finish(mut self) -> Option<EdgeRecorder<W>> {
        if let Some(recorder) = self.recorder.as_mut() {
            if let Err(e) = recorder.flush() {
                log::error!("Failed to flush edge recording: {}", e);
            }
        }
        self.recorder
    }
}

impl<S, W> Stream for Recording<S, W>
where
    S: Stream<Item = EdgeEvent>,
    W: Write,
{
    type Item = EdgeEvent;
    type Error = S::Error;

    fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error> {
        let edge = match self.inner.poll_next() {
            Ok(edge) => edge,
            Err(nb::Error::WouldBlock) => {
                // Idle line: a good moment to get the recording onto disk
                self.flush();
                return Err(nb::Error::WouldBlock);
            }
            Err(e) => return Err(e),
        };

        self.record(&edge);
        Ok(edge)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Decode a recorded edge file
pub fn replay(args: &ReplayArgs, timings: PulseTimings) -> Result<DecoderStats> {
    let stream = FileStream::open(&args.file)
        .with_context(|| format!("Failed to open recording {}", args.file.display()))?;
    log::info!("Replaying {}", args.file.display());

    let mut sink = Output::new(args.outfile.as_deref());
    let mut readings = DecodingStream::with_decoder(stream, EdgeDecoder::with_timings(timings));

    drain(&mut readings, &mut sink)
        .with_context(|| format!("Failed to read recording {}", args.file.display()))?;

    let (stream, decoder) = readings.into_parts();
    let file_stats = stream.stats();
    if file_stats.parse_errors > 0 {
        log::warn!("Skipped {} malformed lines", file_stats.parse_errors);
    }
    log_summary(decoder.stats());

    Ok(*decoder.stats())
}

/// Decode live edges from a GPIO line
#[cfg(feature = "gpio")]
pub fn listen(args: &ListenArgs, timings: PulseTimings) -> Result<()> {
    use ookstation_core::EdgeQueue;

    use crate::gpio::EdgeCapture;

    let capture = EdgeCapture::open(&args.chip, args.line)?;

    let recorder = match &args.record {
        Some(path) => {
            let recorder = EdgeRecorder::create(path)
                .with_context(|| format!("Failed to create recording {}", path.display()))?;
            log::info!("Recording edges to {}", path.display());
            Some(recorder)
        }
        None => None,
    };

    let mut sink = Output::new(args.outfile.as_deref());
    let mut queue: EdgeQueue = EdgeQueue::new();
    let (producer, consumer) = queue.split();
    let decoder_thread = thread::current();

    let captured = thread::scope(|scope| {
        let capture_thread = scope.spawn(|| capture.run(producer, &decoder_thread));

        let edges = Recording::new(consumer, recorder);
        let mut readings = DecodingStream::with_decoder(edges, EdgeDecoder::with_timings(timings));
        if let Err(e) = drain(&mut readings, &mut sink) {
            log::error!("Capture queue failed: {}", e);
        }

        let (edges, decoder) = readings.into_parts();
        edges.finish();
        log_summary(decoder.stats());

        capture_thread.join()
    });

    let queue_stats = queue.stats().snapshot();
    if queue_stats.dropped > 0 {
        log::warn!(
            "{} edges dropped by a full capture queue (max depth {})",
            queue_stats.dropped,
            queue_stats.max_depth
        );
    }

    match captured {
        Ok(result) => result,
        Err(_) => Err(anyhow::anyhow!("GPIO capture thread panicked")),
    }
}

/// Decode live edges from a GPIO line
#[cfg(not(feature = "gpio"))]
pub fn listen(_args: &ListenArgs, _timings: PulseTimings) -> Result<()> {
    anyhow::bail!("ookstation was built without GPIO support (feature `gpio`)")
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io::{self, BufWriter};
    use std::rc::Rc;

    use ookstation_core::stream::MemoryStream;

    use super::*;

    /// Writer whose contents stay visible after it is moved into a recorder
    #[derive(Clone, Default)]
    struct Shared(Rc<RefCell<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn recording_flushes_during_continuous_signal() {
        let edges = [
            EdgeEvent::low(10_000),
            EdgeEvent::high(500_000),
            EdgeEvent::low(1_010_000),
        ];
        let disk = Shared::default();
        let recorder = EdgeRecorder::new(BufWriter::new(disk.clone())).unwrap();
        let mut recording = Recording::new(MemoryStream::new(&edges), Some(recorder));

        recording.poll_next().unwrap();
        recording.poll_next().unwrap();
        assert!(disk.0.borrow().is_empty());

        recording.poll_next().unwrap();
        let written = String::from_utf8(disk.0.borrow().clone()).unwrap();
        assert_eq!(written, "# level,timestamp_us\n0,10000\n1,500000\n0,1010000\n");
    }

    #[test]
    fn finish_flushes_the_tail() {
        let edges = [EdgeEvent::high(1_000), EdgeEvent::low(1_500)];
        let disk = Shared::default();
        let recorder = EdgeRecorder::new(BufWriter::new(disk.clone())).unwrap();
        let mut recording = Recording::new(MemoryStream::new(&edges), Some(recorder));

        while recording.poll_next().is_ok() {}
        let recorder = recording.finish().unwrap();
        assert_eq!(recorder.recorded(), 2);
        assert!(String::from_utf8(disk.0.borrow().clone()).unwrap().ends_with("0,1500\n"));
    }
}
