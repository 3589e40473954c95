//! Edge capture from the Linux GPIO character device
//!
//! The kernel timestamps each edge when the interrupt fires, so the
//! widths seen by the decoder are unaffected by how late this thread gets
//! scheduled. The capture loop does nothing but convert and enqueue.

use std::path::Path;
use std::thread::Thread;

use anyhow::{Context, Result};
use gpio_cdev::{Chip, EventRequestFlags, EventType, LineEventHandle, LineRequestFlags};

use ookstation_core::queue::CaptureProducer;
use ookstation_core::time::micros_from_nanos;
use ookstation_core::EdgeEvent;

/// Consumer label shown by `gpioinfo`
const CONSUMER: &str = "ookstation";

/// Edge event for a kernel line event
pub fn edge_from(event_type: EventType, timestamp_ns: u64) -> EdgeEvent {
    let timestamp = micros_from_nanos(timestamp_ns);
    match event_type {
        EventType::RisingEdge => EdgeEvent::high(timestamp),
        EventType::FallingEdge => EdgeEvent::low(timestamp),
    }
}

/// A GPIO line requested for both edges
pub struct EdgeCapture {
    events: LineEventHandle,
    line: u32,
}

impl EdgeCapture {
    /// Open `chip_path` and request edge events on `line`
    pub fn open(chip_path: &Path, line: u32) -> Result<Self> {
        let mut chip = Chip::new(chip_path)
            .with_context(|| format!("Failed to open GPIO chip {}", chip_path.display()))?;
        log::info!("Opened GPIO chip {}", chip_path.display());

        let handle = chip
            .get_line(line)
            .with_context(|| format!("Failed to get line {} on {}", line, chip_path.display()))?;
        log::info!("Got GPIO line {}", line);

        let events = handle
            .events(LineRequestFlags::INPUT, EventRequestFlags::BOTH_EDGES, CONSUMER)
            .with_context(|| format!("Failed to request events on GPIO line {}", line))?;
        log::info!("Requested events on GPIO line {}", line);

        Ok(Self { events, line })
    }

    /// Forward edges into the queue until the line fails
    ///
    /// `decoder` is unparked after every edge. Dropping the producer on
    /// return closes the queue, which ends the decoding loop.
    pub fn run<const N: usize>(
        mut self,
        mut producer: CaptureProducer<'_, N>,
        decoder: &Thread,
    ) -> Result<()> {
        log::info!("Starting event loop, waiting for GPIO events...");

        for event in &mut self.events {
            let event = event.with_context(|| format!("GPIO line {} event read failed", self.line))?;
            if !producer.push(edge_from(event.event_type(), event.timestamp())) {
                log::warn!("Capture queue full, edge dropped");
            }
            decoder.unpark();
        }

        Ok(())
    }
}
