//! Capture Queue
//!
//! ## Overview
//!
//! Edges arrive from an interrupt handler or a GPIO reader thread and must be
//! handed to the decoder without ever stalling the capture side. The queue is
//! a bounded single-producer single-consumer ring (`heapless::spsc`), so both
//! ends are lock-free and the storage is fixed at compile time.
//!
//! ```text
//! Capture (ISR / thread)                 Decoder (task / thread)
//!          │                                      │
//!   CaptureProducer::push ──→ ring buffer ──→ CaptureConsumer::poll_next
//!          │                                      │
//!   never blocks, drops                  WouldBlock when empty,
//!   when full                            EndOfStream once closed
//! ```
//!
//! A dropped edge corrupts at most the transmission in flight: the decoder
//! sees one wrong duration, classifies it as noise and resynchronizes.
//!
//! ## Statistics
//!
//! Counters are plain atomics with relaxed ordering; they are diagnostics
//! and never gate correctness. The `closed` flag uses acquire/release so the
//! consumer drains every edge pushed before the producer went away.
//!
//! ## Example Usage
//!
//! ```rust
//! use ookstation_core::queue::EdgeQueue;
//! use ookstation_core::stream::Stream;
//! use ookstation_core::EdgeEvent;
//!
//! let mut queue: EdgeQueue<8> = EdgeQueue::new();
//! let (mut producer, mut consumer) = queue.split();
//!
//! assert!(producer.push(EdgeEvent::high(1_000)));
//! assert_eq!(consumer.poll_next().unwrap(), EdgeEvent::high(1_000));
//! assert!(matches!(consumer.poll_next(), Err(nb::Error::WouldBlock)));
//!
//! producer.close();
//! assert!(consumer.poll_next().is_err());
//! ```

use core::convert::Infallible;
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use heapless::spsc::{Consumer, Producer, Queue};

use crate::constants::buffers::CAPTURE_QUEUE_CAPACITY;
use crate::events::EdgeEvent;
use crate::stream::{Stream, StreamError};

/// Queue health counters
///
/// Track queue health without impacting capture latency
#[derive(Debug)]
pub struct QueueStats {
    /// Total edges accepted
    pub pushed: AtomicU32,
    /// Edges dropped because the queue was full
    pub dropped: AtomicU32,
    /// Maximum queue depth seen
    pub max_depth: AtomicU32,
    closed: AtomicBool,
}

/// Point-in-time copy of [`QueueStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueStatsSnapshot {
    /// Total edges accepted
    pub pushed: u32,
    /// Edges dropped because the queue was full
    pub dropped: u32,
    /// Maximum queue depth seen
    pub max_depth: u32,
}

impl QueueStats {
    const fn new() -> Self {
        Self {
            pushed: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
            max_depth: AtomicU32::new(0),
            closed: AtomicBool::new(false),
        }
    }

    /// Update max depth if current is higher
    fn update_max_depth(&self, current: u32) {
        let mut max = self.max_depth.load(Ordering::Relaxed);
        while current > max {
            match self.max_depth.compare_exchange_weak(
                max,
                current,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(actual) => max = actual,
            }
        }
    }

    /// Whether the producer has finished
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Copy the counters
    pub fn snapshot(&self) -> QueueStatsSnapshot {
        QueueStatsSnapshot {
            pushed: self.pushed.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            max_depth: self.max_depth.load(Ordering::Relaxed),
        }
    }
}

/// Bounded edge queue between capture and decoding
///
/// Holds at most `N - 1` edges.
pub struct EdgeQueue<const N: usize = CAPTURE_QUEUE_CAPACITY> {
    queue: Queue<EdgeEvent, N>,
    stats: QueueStats,
}

impl<const N: usize> EdgeQueue<N> {
    /// Create an empty queue
    ///
    /// Can be used in static context
    pub const fn new() -> Self {
        Self {
            queue: Queue::new(),
            stats: QueueStats::new(),
        }
    }

    /// Split into the capture and decoding ends
    pub fn split(&mut self) -> (CaptureProducer<'_, N>, CaptureConsumer<'_, N>) {
        let Self { queue, stats } = self;
        let (producer, consumer) = queue.split();
        let stats = &*stats;
        (
            CaptureProducer { inner: producer, stats },
            CaptureConsumer { inner: consumer, stats },
        )
    }

    /// Get queue statistics
    pub fn stats(&self) -> &QueueStats {
        &self.stats
    }
}

impl<const N: usize> Default for EdgeQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Capture end of an [`EdgeQueue`]
///
/// Dropping the producer closes the queue.
pub struct CaptureProducer<'a, const N: usize> {
    inner: Producer<'a, EdgeEvent, N>,
    stats: &'a QueueStats,
}

impl<'a, const N: usize> CaptureProducer<'a, N> {
    /// Push an edge, returns false if the queue is full
    ///
    /// Never blocks; a full queue drops the edge and counts it.
    pub fn push(&mut self, event: EdgeEvent) -> bool {
        match self.inner.enqueue(event) {
            Ok(()) => {
                self.stats.pushed.fetch_add(1, Ordering::Relaxed);
                self.stats.update_max_depth(self.inner.len() as u32);
                true
            }
            Err(_) => {
                self.stats.dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }

    /// Signal that no more edges will follow
    pub fn close(&mut self) {
        self.stats.closed.store(true, Ordering::Release);
    }

    /// Get queue statistics
    pub fn stats(&self) -> &QueueStats {
        self.stats
    }
}

impl<const N: usize> Drop for CaptureProducer<'_, N> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Decoding end of an [`EdgeQueue`]
pub struct CaptureConsumer<'a, const N: usize> {
    inner: Consumer<'a, EdgeEvent, N>,
    stats: &'a QueueStats,
}

impl<'a, const N: usize> CaptureConsumer<'a, N> {
    /// Edges waiting to be decoded
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if no edges are waiting
    pub fn is_empty(&self) -> bool {
        !self.inner.ready()
    }

    /// Get queue statistics
    pub fn stats(&self) -> &QueueStats {
        self.stats
    }
}

impl<const N: usize> Stream for CaptureConsumer<'_, N> {
    type Item = EdgeEvent;
    type Error = StreamError<Infallible>;

    fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error> {
        if let Some(event) = self.inner.dequeue() {
            return Ok(event);
        }

        if self.stats.is_closed() {
            // Edges pushed right before closing are visible now
            return match self.inner.dequeue() {
                Some(event) => Ok(event),
                None => Err(nb::Error::Other(StreamError::EndOfStream)),
            };
        }

        Err(nb::Error::WouldBlock)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let waiting = self.inner.len();
        if self.stats.is_closed() {
            (waiting, Some(waiting))
        } else {
            (waiting, None)
        }
    }
}
