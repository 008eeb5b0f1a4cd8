//! Submission-velocity tracking over a sliding time window.
//!
//! Records submission timestamps and answers "how many submissions in the
//! trailing window". The log is bounded: entries older than the retention
//! horizon are pruned on every record, so memory stays proportional to the
//! event rate within the horizon rather than growing for the process
//! lifetime.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::debug;

use aegis_core::constants::VELOCITY_WINDOW;

/// Global submission-timestamp log with windowed counting.
pub struct VelocityTracker {
    /// Entries older than this are pruned on record. Must be at least as
    /// long as the largest window callers will count over.
    horizon: Duration,
    /// Append-ordered timestamps. Appends arrive in near-monotonic order;
    /// pruning only inspects the front, which tolerates the slight
    /// reordering concurrent writers can produce.
    log: Mutex<VecDeque<Instant>>,
}

impl VelocityTracker {
    pub fn new(horizon: Duration) -> Self {
        Self { horizon, log: Mutex::new(VecDeque::new()) }
    }

    /// Create a tracker retaining the default signal window.
    pub fn with_defaults() -> Self {
        Self::new(VELOCITY_WINDOW)
    }

    /// Record a submission at `at`, pruning expired entries first.
    pub fn record(&self, at: Instant) {
        let mut log = self.log.lock();
        while log
            .front()
            .is_some_and(|t| at.saturating_duration_since(*t) >= self.horizon)
        {
            log.pop_front();
        }
        log.push_back(at);
        debug!(retained = log.len(), "velocity: submission recorded");
    }

    /// Count entries with `now - t < window`.
    ///
    /// O(retained log). Windows longer than the retention horizon undercount
    /// because older entries have been pruned.
    pub fn count_within(&self, now: Instant, window: Duration) -> usize {
        self.log
            .lock()
            .iter()
            .filter(|t| now.saturating_duration_since(**t) < window)
            .count()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.log.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.lock().is_empty()
    }
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::with_defaults()
    }
}
