//! Token Bucket rate limiting.

use std::time::Instant;

use parking_lot::Mutex;
use tracing::trace;

use crate::clock::{Clock, MonotonicClock};
use crate::error::{ConfigError, Result};
use crate::limiter::Limiter;

/// Token Bucket admission control.
///
/// Allows controlled bursts while enforcing an average rate limit.
/// Tokens are refilled at a constant rate up to maximum capacity, and each
/// admitted request consumes one token. The bucket starts full, so a fresh
/// instance admits a burst of up to `capacity` requests instantaneously
/// while the sustained rate converges to `fill_rate` per second.
#[derive(Debug)]
pub struct TokenBucket<C = MonotonicClock> {
    capacity: f64,
    fill_rate: f64,
    state: Mutex<BucketState>,
    clock: C,
}

#[derive(Debug)]
struct BucketState {
    tokens: f64,
    last_refill: Instant,
}

impl TokenBucket {
    /// Create a new Token Bucket with the given capacity and fill rate
    /// (tokens per second).
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is not a positive finite number or `fill_rate`
    /// is not a non-negative finite number.
    pub fn new(capacity: f64, fill_rate: f64) -> Self {
        Self::with_clock(capacity, fill_rate, MonotonicClock)
    }

    /// Try to create a new Token Bucket, returning an error if the
    /// parameters are invalid.
    pub fn try_new(capacity: f64, fill_rate: f64) -> Result<Self> {
        if !capacity.is_finite() || capacity <= 0.0 {
            return Err(ConfigError::invalid_limit(
                "capacity must be a positive finite number",
            ));
        }
        if !fill_rate.is_finite() || fill_rate < 0.0 {
            return Err(ConfigError::invalid_rate(
                "fill_rate must be a non-negative finite number",
            ));
        }
        Ok(Self::with_clock(capacity, fill_rate, MonotonicClock))
    }
}

impl<C: Clock> TokenBucket<C> {
    /// Create a new Token Bucket reading time from the given clock.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`TokenBucket::new`].
    pub fn with_clock(capacity: f64, fill_rate: f64, clock: C) -> Self {
        assert!(
            capacity.is_finite() && capacity > 0.0,
            "capacity must be a positive finite number"
        );
        assert!(
            fill_rate.is_finite() && fill_rate >= 0.0,
            "fill_rate must be a non-negative finite number"
        );

        let now = clock.now();
        Self {
            capacity,
            fill_rate,
            state: Mutex::new(BucketState {
                tokens: capacity,
                last_refill: now,
            }),
            clock,
        }
    }

    /// Maximum number of tokens the bucket can hold.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Tokens added per second.
    pub fn fill_rate(&self) -> f64 {
        self.fill_rate
    }

    /// Decide whether the current request is admitted.
    ///
    /// Refills the bucket from elapsed time before checking, on every call
    /// including rejected ones.
    pub fn allow(&self) -> bool {
        let mut state = self.state.lock();
        let now = self.clock.now();

        // Saturating: a clock that moved backwards counts as no time passed.
        let elapsed = now.saturating_duration_since(state.last_refill).as_secs_f64();
        state.tokens = (state.tokens + elapsed * self.fill_rate).min(self.capacity);
        state.last_refill = state.last_refill.max(now);

        if state.tokens >= 1.0 {
            state.tokens -= 1.0;
            true
        } else {
            trace!(tokens = state.tokens, "token bucket saturated");
            false
        }
    }

    /// Snapshot of the current token count, taken under the same lock as
    /// [`allow`](TokenBucket::allow).
    pub fn current_tokens(&self) -> f64 {
        self.state.lock().tokens
    }
}

impl<C: Clock> Limiter for TokenBucket<C> {
    fn name(&self) -> &'static str {
        "token_bucket"
    }

    fn allow(&self) -> bool {
        TokenBucket::allow(self)
    }
}
