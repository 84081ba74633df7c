//! Leaky Bucket rate limiting.
//!
//! The Leaky Bucket smooths out bursty traffic: load accumulates in the
//! bucket and drains at a constant rate, like water leaking out. Unlike the
//! token bucket, admission here *adds* a fixed unit of fill rather than
//! consuming a resource, so the bucket bounds how much outstanding load can
//! pile up at once.

use std::time::Instant;

use parking_lot::Mutex;
use tracing::trace;

use crate::clock::{Clock, MonotonicClock};
use crate::error::{ConfigError, Result};
use crate::limiter::Limiter;

/// Leaky Bucket admission control.
///
/// Each admitted request adds one unit of fill; fill drains at `leak_rate`
/// units per second. A request is admitted only while the current level is
/// strictly below capacity. The bucket starts empty.
#[derive(Debug)]
pub struct LeakyBucket<C = MonotonicClock> {
    capacity: f64,
    leak_rate: f64,
    state: Mutex<BucketState>,
    clock: C,
}

#[derive(Debug)]
struct BucketState {
    level: f64,
    last_leak: Instant,
}

impl LeakyBucket {
    /// Create a new Leaky Bucket with the given capacity and leak rate
    /// (units per second).
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is not a positive finite number or `leak_rate`
    /// is not a non-negative finite number.
    pub fn new(capacity: f64, leak_rate: f64) -> Self {
        Self::with_clock(capacity, leak_rate, MonotonicClock)
    }

    /// Try to create a new Leaky Bucket, returning an error if the
    /// parameters are invalid.
    pub fn try_new(capacity: f64, leak_rate: f64) -> Result<Self> {
        if !capacity.is_finite() || capacity <= 0.0 {
            return Err(ConfigError::invalid_limit(
                "capacity must be a positive finite number",
            ));
        }
        if !leak_rate.is_finite() || leak_rate < 0.0 {
            return Err(ConfigError::invalid_rate(
                "leak_rate must be a non-negative finite number",
            ));
        }
        Ok(Self::with_clock(capacity, leak_rate, MonotonicClock))
    }
}

impl<C: Clock> LeakyBucket<C> {
    /// Create a new Leaky Bucket reading time from the given clock.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`LeakyBucket::new`].
    pub fn with_clock(capacity: f64, leak_rate: f64, clock: C) -> Self {
        assert!(
            capacity.is_finite() && capacity > 0.0,
            "capacity must be a positive finite number"
        );
        assert!(
            leak_rate.is_finite() && leak_rate >= 0.0,
            "leak_rate must be a non-negative finite number"
        );

        let now = clock.now();
        Self {
            capacity,
            leak_rate,
            state: Mutex::new(BucketState {
                level: 0.0,
                last_leak: now,
            }),
            clock,
        }
    }

    /// Maximum fill the bucket can hold.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Units drained per second.
    pub fn leak_rate(&self) -> f64 {
        self.leak_rate
    }

    /// Decide whether the current request is admitted.
    ///
    /// Drains the bucket from elapsed time before checking, on every call
    /// including rejected ones.
    pub fn allow(&self) -> bool {
        let mut state = self.state.lock();
        let now = self.clock.now();

        // Saturating: a clock that moved backwards counts as no time passed.
        let elapsed = now.saturating_duration_since(state.last_leak).as_secs_f64();
        state.level = (state.level - elapsed * self.leak_rate).max(0.0);
        state.last_leak = state.last_leak.max(now);

        if state.level < self.capacity {
            state.level += 1.0;
            true
        } else {
            trace!(level = state.level, "leaky bucket full");
            false
        }
    }

    /// Snapshot of the current fill level, taken under the same lock as
    /// [`allow`](LeakyBucket::allow).
    pub fn current_level(&self) -> f64 {
        self.state.lock().level
    }
}

impl<C: Clock> Limiter for LeakyBucket<C> {
    fn name(&self) -> &'static str {
        "leaky_bucket"
    }

    fn allow(&self) -> bool {
        LeakyBucket::allow(self)
    }
}
