//! Seams between the session logic and the outside world.
//!
//! `RecordSink` is implemented by `pagedrill-report`; `Stopwatch` lets tests
//! drive the fast-window logic with synthetic timestamps.

use std::time::{Duration, Instant};

use anyhow::Result;

use crate::model::LogRecord;

// ---------------------------------------------------------------------------
// Record sink
// ---------------------------------------------------------------------------

/// Destination for per-page log records.
pub trait RecordSink {
    /// Persist one record. Failures are fatal to the run.
    fn append(&mut self, record: &LogRecord) -> Result<()>;
}

/// Sink that keeps records in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<LogRecord>,
}

impl RecordSink for MemorySink {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Stopwatch
// ---------------------------------------------------------------------------

/// Measures time since the start of a session.
pub trait Stopwatch {
    /// Start (or restart) timing.
    fn start(&mut self);

    /// Time since the last `start`. Zero if never started.
    fn elapsed(&mut self) -> Duration;
}

/// Wall-clock stopwatch backed by `Instant`.
#[derive(Debug, Default)]
pub struct SystemStopwatch {
    started: Option<Instant>,
}

impl Stopwatch for SystemStopwatch {
    fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    fn elapsed(&mut self) -> Duration {
        self.started.map(|s| s.elapsed()).unwrap_or_default()
    }
}

/// Stopwatch that replays a fixed list of elapsed times, one per call.
///
/// Once the list is exhausted the last value repeats.
#[derive(Debug, Clone, Default)]
pub struct ScriptedStopwatch {
    ticks: Vec<Duration>,
    next: usize,
}

impl ScriptedStopwatch {
    pub fn new(ticks: impl IntoIterator<Item = Duration>) -> Self {
        Self {
            ticks: ticks.into_iter().collect(),
            next: 0,
        }
    }

    /// Convenience constructor from whole seconds.
    pub fn from_secs(secs: &[u64]) -> Self {
        Self::new(secs.iter().copied().map(Duration::from_secs))
    }
}

impl Stopwatch for ScriptedStopwatch {
    fn start(&mut self) {
        self.next = 0;
    }

    fn elapsed(&mut self) -> Duration {
        let tick = self
            .ticks
            .get(self.next)
            .or_else(|| self.ticks.last())
            .copied()
            .unwrap_or_default();
        self.next += 1;
        tick
    }
}
