//! Progress tracking for in-flight shelf extractions
//!
//! An extraction run has exactly one writer (the run itself) and arbitrarily
//! many concurrent readers (progress polls). The whole field group lives
//! behind one mutex so a reader never observes `processed` advanced while
//! `total_expected` is stale from a prior run.
//!
//! One tracker instance supports one active run at a time; starting a second
//! run against the same tracker corrupts the first run's reporting.

use serde::Serialize;
use std::sync::{Arc, Mutex};

/// Point-in-time view of an extraction run, as served to pollers
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// Completion percentage, `0..=100`
    pub progress: u8,

    /// Records emitted so far
    pub processed: u64,

    /// Best-effort expected total (corrected to `processed` at run end)
    pub total: u64,

    /// Whether the run has terminated (success or failure)
    pub complete: bool,

    /// Warning or fatal condition, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct ProgressInner {
    total_expected: u64,
    processed: u64,
    complete: bool,
    error: Option<String>,
}

/// Shared handle to the progress of a shelf extraction run
///
/// Cloning is cheap and every clone observes the same state. The extraction
/// call owns the writer side; `snapshot` is the reader side.
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    inner: Arc<Mutex<ProgressInner>>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets all fields to their zero values
    ///
    /// Called at the start of every extraction run, regardless of how the
    /// previous run ended.
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        *inner = ProgressInner::default();
    }

    /// Stores the expected total parsed from the shelf header
    pub fn set_total(&self, total: u64) {
        self.inner.lock().unwrap().total_expected = total;
    }

    /// Records one emitted book record
    ///
    /// Called after every accepted row, not once per page, so pollers see a
    /// smoothly incrementing counter.
    pub fn record_book(&self) {
        self.inner.lock().unwrap().processed += 1;
    }

    /// Records a non-fatal warning without terminating the run
    pub fn warn(&self, message: impl Into<String>) {
        self.inner.lock().unwrap().error = Some(message.into());
    }

    /// Marks the run as terminated
    ///
    /// `total_expected` is corrected down to the processed count so a run
    /// that ended early reports 100% rather than a stuck percentage.
    pub fn finish(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.total_expected = inner.processed;
        inner.complete = true;
    }

    /// Marks the run as terminated by a fatal error
    pub fn fail(&self, message: impl Into<String>) {
        let mut inner = self.inner.lock().unwrap();
        inner.error = Some(message.into());
        inner.complete = true;
    }

    /// Returns the current snapshot, with the percentage derived
    pub fn snapshot(&self) -> ProgressSnapshot {
        let inner = self.inner.lock().unwrap();
        let progress = if inner.total_expected > 0 {
            (inner.processed * 100 / inner.total_expected).min(100) as u8
        } else {
            0
        };

        ProgressSnapshot {
            progress,
            processed: inner.processed,
            total: inner.total_expected,
            complete: inner.complete,
            error: inner.error.clone(),
        }
    }
}
