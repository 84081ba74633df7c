//! Sliding Log rate limiting.
//!
//! The Sliding Log stores the timestamp of every admitted request within
//! the window, giving an exact rolling limit with no boundary artifact, at
//! the cost of O(window population) memory and a prune step on every call.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::trace;

use crate::clock::{Clock, MonotonicClock};
use crate::error::{ConfigError, Result};
use crate::limiter::Limiter;

/// Sliding Log admission control.
///
/// Admits a request only when fewer than `limit` requests were admitted in
/// the trailing `window` interval, measured continuously relative to now.
/// This is the strict-window alternative to the fixed window counter: the
/// guarantee holds for every trailing interval, not just aligned slices.
#[derive(Debug)]
pub struct SlidingLog<C = MonotonicClock> {
    limit: usize,
    window: Duration,
    log: Mutex<VecDeque<Instant>>,
    clock: C,
}

impl SlidingLog {
    /// Create a new Sliding Log admitting `limit` requests per trailing
    /// `window`.
    ///
    /// # Panics
    ///
    /// Panics if `limit` is 0 or `window` is zero duration.
    pub fn new(limit: usize, window: Duration) -> Self {
        Self::with_clock(limit, window, MonotonicClock)
    }

    /// Try to create a new Sliding Log, returning an error if the
    /// parameters are invalid.
    pub fn try_new(limit: usize, window: Duration) -> Result<Self> {
        if limit == 0 {
            return Err(ConfigError::invalid_limit("limit must be greater than 0"));
        }
        if window.is_zero() {
            return Err(ConfigError::invalid_window("window must be non-zero"));
        }
        Ok(Self::with_clock(limit, window, MonotonicClock))
    }
}

impl<C: Clock> SlidingLog<C> {
    /// Create a new Sliding Log reading time from the given clock.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`SlidingLog::new`].
    pub fn with_clock(limit: usize, window: Duration, clock: C) -> Self {
        assert!(limit > 0, "limit must be greater than 0");
        assert!(!window.is_zero(), "window must be non-zero");

        Self {
            limit,
            window,
            log: Mutex::new(VecDeque::new()),
            clock,
        }
    }

    /// Maximum requests admitted per trailing window.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Duration of the trailing window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Decide whether the current request is admitted.
    ///
    /// Prunes expired timestamps before checking; a rejected call never
    /// appends to the log.
    pub fn allow(&self) -> bool {
        let mut log = self.log.lock();
        let now = self.clock.now();

        // Entries are appended in clock order, so expired timestamps sit at
        // the front. Retain only entries strictly younger than the window.
        while let Some(&oldest) = log.front() {
            if now.saturating_duration_since(oldest) >= self.window {
                log.pop_front();
            } else {
                break;
            }
        }

        if log.len() < self.limit {
            log.push_back(now);
            true
        } else {
            trace!(retained = log.len(), "sliding log saturated");
            false
        }
    }

    /// Snapshot of the number of retained timestamps, taken under the same
    /// lock as [`allow`](SlidingLog::allow).
    pub fn current_log_size(&self) -> usize {
        self.log.lock().len()
    }
}

impl<C: Clock> Limiter for SlidingLog<C> {
    fn name(&self) -> &'static str {
        "sliding_log"
    }

    fn allow(&self) -> bool {
        SlidingLog::allow(self)
    }
}
