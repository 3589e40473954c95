//! Example 01: Decoding Edges
//!
//! This example demonstrates how to:
//! - Build the edge sequence of one sensor transmission
//! - Feed edges to an `EdgeDecoder` one at a time
//! - Read the decoder statistics afterwards

use ookstation_core::{
    constants::{FRAME_OFFSET, PREAMBLE},
    frame, EdgeDecoder, EdgeEvent, Symbol,
};

/// Edges for one transmission framed by noise gaps
fn transmission(bytes: &[u8; 5]) -> Vec<EdgeEvent> {
    let mut now = 10_000;
    let mut edges = vec![EdgeEvent::low(now)];

    let symbols = PREAMBLE[..FRAME_OFFSET]
        .iter()
        .copied()
        .chain(frame::symbols_for(bytes));
    for symbol in symbols {
        now += 1_000;
        edges.push(EdgeEvent::high(now));
        now += if symbol == Symbol::ShortOff { 500 } else { 1_500 };
        edges.push(EdgeEvent::low(now));
    }

    now += 10_000;
    edges.push(EdgeEvent::low(now));
    edges
}

fn main() {
    println!("=== ookstation Edge Decoding Example ===\n");

    let mut decoder = EdgeDecoder::new();

    for bytes in [
        [0x45, 0x81, 0x0A, 0x5A, 0xAD], // +26.6 °C, 90 %RH
        [0x45, 0x89, 0x0A, 0x5A, 0xFF], // -26.6 °C, 90 %RH
        [0x45, 0x81, 0x0A, 0x5A, 0xAC], // corrupted checksum
    ] {
        let frame = frame::Frame::new(bytes);
        println!("Transmitting frame {}", frame);

        for edge in transmission(&bytes) {
            if let Some(reading) = decoder.push(edge) {
                println!("  Temp: {}, RH: {}", reading.temperature, reading.humidity);
            }
        }
    }

    let stats = decoder.stats();
    println!("\nEdges processed:   {}", stats.edges);
    println!("Readings:          {}", stats.readings);
    println!("Checksum failures: {}", stats.checksum_failures);
}
