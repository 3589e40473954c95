//! Example 02: Recording and Replaying Edges
//!
//! This example demonstrates how to:
//! - Record edges in the replay file format
//! - Stream them back with `FileStream`
//! - Decode a whole stream with `DecodingStream`

use ookstation_core::{
    constants::{FRAME_OFFSET, PREAMBLE},
    frame,
    stream::{DecodingStream, EdgeRecorder, FileStream, Stream, StreamError},
    EdgeEvent, Symbol,
};

fn main() -> Result<(), StreamError<std::io::Error>> {
    println!("=== ookstation Record and Replay Example ===\n");

    let path = std::env::temp_dir().join("ookstation-example-edges.txt");

    // Record one transmission
    let mut recorder = EdgeRecorder::create(&path).map_err(StreamError::Transport)?;
    let mut now = 10_000;
    recorder.record(&EdgeEvent::low(now)).map_err(StreamError::Transport)?;

    let bytes = [0x45, 0x81, 0x0A, 0x5A, 0xAD];
    let symbols = PREAMBLE[..FRAME_OFFSET]
        .iter()
        .copied()
        .chain(frame::symbols_for(&bytes));
    for symbol in symbols {
        now += 1_000;
        recorder.record(&EdgeEvent::high(now)).map_err(StreamError::Transport)?;
        now += if symbol == Symbol::ShortOff { 500 } else { 1_500 };
        recorder.record(&EdgeEvent::low(now)).map_err(StreamError::Transport)?;
    }
    recorder.record(&EdgeEvent::low(now + 10_000)).map_err(StreamError::Transport)?;
    recorder.flush().map_err(StreamError::Transport)?;
    println!("Recorded {} edges to {}", recorder.recorded(), path.display());
    drop(recorder);

    // Replay
    let mut readings = DecodingStream::new(FileStream::open(&path)?);
    loop {
        match readings.poll_next() {
            Ok(reading) => println!("Temp: {}, RH: {}", reading.temperature, reading.humidity),
            Err(nb::Error::Other(StreamError::EndOfStream)) => break,
            Err(nb::Error::Other(e)) => return Err(e),
            Err(nb::Error::WouldBlock) => continue,
        }
    }

    let (stream, decoder) = readings.into_parts();
    println!("\nLines processed: {}", stream.stats().lines_processed);
    println!("Readings:        {}", decoder.stats().readings);

    let _ = std::fs::remove_file(&path);
    Ok(())
}
