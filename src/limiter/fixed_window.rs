//! Fixed Window rate limiting.

use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::debug;

use crate::clock::{Clock, MonotonicClock};
use crate::error::{ConfigError, Result};
use crate::limiter::Limiter;

/// Fixed Window admission control.
///
/// Counts requests in discrete, non-overlapping time slices: up to `limit`
/// requests are admitted per window, and the counter resets when a window
/// boundary is crossed. Crossing collapses any number of elapsed windows
/// into a single reset.
///
/// Requests clustered at the trailing edge of one window and the leading
/// edge of the next can together exceed `limit` within a real-time span
/// much shorter than `window` (up to 2x limit). That boundary artifact is
/// inherent to fixed windows; use the sliding log limiter when a strict
/// rolling guarantee is required.
#[derive(Debug)]
pub struct FixedWindow<C = MonotonicClock> {
    limit: u64,
    window: Duration,
    state: Mutex<WindowState>,
    clock: C,
}

#[derive(Debug)]
struct WindowState {
    count: u64,
    window_start: Instant,
}

impl FixedWindow {
    /// Create a new Fixed Window admitting `limit` requests per `window`.
    ///
    /// # Panics
    ///
    /// Panics if `limit` is 0 or `window` is zero duration.
    pub fn new(limit: u64, window: Duration) -> Self {
        Self::with_clock(limit, window, MonotonicClock)
    }

    /// Try to create a new Fixed Window, returning an error if the
    /// parameters are invalid.
    pub fn try_new(limit: u64, window: Duration) -> Result<Self> {
        if limit == 0 {
            return Err(ConfigError::invalid_limit("limit must be greater than 0"));
        }
        if window.is_zero() {
            return Err(ConfigError::invalid_window("window must be non-zero"));
        }
        Ok(Self::with_clock(limit, window, MonotonicClock))
    }
}

impl<C: Clock> FixedWindow<C> {
    /// Create a new Fixed Window reading time from the given clock.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`FixedWindow::new`].
    pub fn with_clock(limit: u64, window: Duration, clock: C) -> Self {
        assert!(limit > 0, "limit must be greater than 0");
        assert!(!window.is_zero(), "window must be non-zero");

        let now = clock.now();
        Self {
            limit,
            window,
            state: Mutex::new(WindowState {
                count: 0,
                window_start: now,
            }),
            clock,
        }
    }

    /// Maximum requests admitted per window.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Duration of one window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Decide whether the current request is admitted.
    pub fn allow(&self) -> bool {
        let mut state = self.state.lock();
        let now = self.clock.now();

        if now.saturating_duration_since(state.window_start) >= self.window {
            debug!(count = state.count, "fixed window rotated");
            state.window_start = now;
            state.count = 0;
        }

        if state.count < self.limit {
            state.count += 1;
            true
        } else {
            false
        }
    }

    /// Snapshot of the request count in the current window, taken under
    /// the same lock as [`allow`](FixedWindow::allow).
    pub fn current_count(&self) -> u64 {
        self.state.lock().count
    }
}

impl<C: Clock> Limiter for FixedWindow<C> {
    fn name(&self) -> &'static str {
        "fixed_window"
    }

    fn allow(&self) -> bool {
        FixedWindow::allow(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    #[test]
    fn test_fixed_window_admits_up_to_limit() {
        let window = FixedWindow::new(5, Duration::from_secs(1));

        for i in 1..=5 {
            assert!(window.allow(), "Request {} should be allowed", i);
        }
        assert!(!window.allow(), "6th request should be denied");
        assert_eq!(window.current_count(), 5);
    }

    #[test]
    fn test_fixed_window_resets_on_boundary() {
        let clock = ManualClock::new();
        let window = FixedWindow::with_clock(5, Duration::from_secs(1), clock.clone());

        for _ in 0..5 {
            window.allow();
        }
        assert!(!window.allow());

        clock.advance(Duration::from_millis(1100));
        assert!(window.allow());
        assert_eq!(window.current_count(), 1);
    }

    #[test]
    fn test_fixed_window_boundary_burst() {
        let clock = ManualClock::new();
        let window = FixedWindow::with_clock(5, Duration::from_secs(1), clock.clone());

        // Fill the window right before its boundary...
        clock.advance(Duration::from_millis(990));
        let mut admitted = 0;
        for _ in 0..5 {
            if window.allow() {
                admitted += 1;
            }
        }

        // ...and again right after it. 10 admissions land within ~20ms of
        // real time; this is the documented fixed-window artifact.
        clock.advance(Duration::from_millis(20));
        for _ in 0..5 {
            if window.allow() {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 10);
    }

    #[test]
    fn test_fixed_window_collapses_skipped_windows() {
        let clock = ManualClock::new();
        let window = FixedWindow::with_clock(2, Duration::from_secs(1), clock.clone());

        window.allow();
        window.allow();

        // Many windows elapse unobserved; the next call performs a single reset.
        clock.advance(Duration::from_secs(30));
        assert!(window.allow());
        assert!(window.allow());
        assert!(!window.allow());
    }

    #[test]
    fn test_fixed_window_rejection_does_not_increment() {
        let window = FixedWindow::new(3, Duration::from_secs(60));

        for _ in 0..10 {
            window.allow();
        }
        assert_eq!(window.current_count(), 3);
    }

    #[test]
    #[should_panic]
    fn test_fixed_window_zero_limit_panics() {
        FixedWindow::new(0, Duration::from_secs(1));
    }

    #[test]
    #[should_panic]
    fn test_fixed_window_zero_window_panics() {
        FixedWindow::new(5, Duration::ZERO);
    }

    #[test]
    fn test_fixed_window_try_new_validation() {
        assert!(FixedWindow::try_new(5, Duration::from_secs(1)).is_ok());
        assert!(FixedWindow::try_new(0, Duration::from_secs(1)).is_err());
        assert!(FixedWindow::try_new(5, Duration::ZERO).is_err());
    }
}
