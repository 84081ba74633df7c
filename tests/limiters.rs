//! Integration tests for the admission-control limiters.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use rategate::{FixedWindow, ManualClock, TokenBucket};

#[test]
fn test_fixed_window_scenario() {
    let clock = ManualClock::new();
    let limiter = FixedWindow::with_clock(5, Duration::from_secs(1), clock.clone());

    // First 5 requests within the window should be allowed
    for i in 1..=5 {
        assert!(limiter.allow(), "Request {} should be allowed", i);
    }

    // 6th request within the same window should be denied
    assert!(!limiter.allow(), "6th request should be denied");

    // After the window elapses, admissions resume
    clock.advance(Duration::from_millis(1100));
    assert!(limiter.allow(), "Request after window reset should be allowed");
}

#[test]
fn test_token_bucket_admits_exactly_one_after_refill_interval() {
    let clock = ManualClock::new();
    let limiter = TokenBucket::with_clock(4.0, 2.0, clock.clone());

    // Drain the full burst
    for i in 1..=4 {
        assert!(limiter.allow(), "Burst request {} should be allowed", i);
    }
    assert!(!limiter.allow());

    // One refill interval (1 / fill_rate seconds) buys exactly one token
    clock.advance(Duration::from_millis(500));
    assert!(limiter.allow(), "Request after refill interval should be allowed");
    assert!(!limiter.allow(), "Only one token should have refilled");
}

#[cfg(feature = "leaky-bucket")]
#[test]
fn test_leaky_bucket_admits_after_pause() {
    use rategate::LeakyBucket;

    let clock = ManualClock::new();
    let limiter = LeakyBucket::with_clock(5.0, 1.0, clock.clone());

    for i in 1..=5 {
        assert!(limiter.allow(), "Request {} should be allowed", i);
    }
    assert!(!limiter.allow(), "6th immediate request should be denied");

    clock.advance(Duration::from_secs(5));
    assert!(limiter.allow(), "Request after drain pause should be allowed");
    assert!(limiter.current_level() >= 0.0);
}

#[cfg(feature = "sliding-log")]
#[test]
fn test_sliding_log_holds_limit_over_every_trailing_interval() {
    use rategate::SlidingLog;

    let clock = ManualClock::new();
    let limiter = SlidingLog::with_clock(3, Duration::from_secs(1), clock.clone());

    // Drive requests every 200ms and track admissions by elapsed time.
    let mut admitted_at = Vec::new();
    for step in 0..20u64 {
        if limiter.allow() {
            admitted_at.push(step * 200);
        }
        clock.advance(Duration::from_millis(200));
    }

    // Strict rolling guarantee: no trailing 1s interval holds more than 3
    // admissions, boundaries included.
    for &end in &admitted_at {
        let in_window = admitted_at
            .iter()
            .filter(|&&at| at <= end && end - at < 1000)
            .count();
        assert!(
            in_window <= 3,
            "{} admissions in the trailing window ending at {}ms",
            in_window,
            end
        );
    }
}

#[cfg(all(feature = "sliding-log", feature = "leaky-bucket"))]
#[test]
fn test_rejected_calls_do_not_mutate_admission_state() {
    use rategate::SlidingLog;

    let window = FixedWindow::new(2, Duration::from_secs(60));
    let log = SlidingLog::new(2, Duration::from_secs(60));

    for _ in 0..20 {
        window.allow();
        log.allow();
    }

    assert_eq!(window.current_count(), 2);
    assert_eq!(log.current_log_size(), 2);

    // Saturated instances stay live: state is re-evaluated on each call
    // rather than latching into a rejected mode.
    assert!(!window.allow());
    assert!(!log.allow());
}

#[test]
fn test_concurrent_token_bucket_admits_exactly_capacity() {
    // Zero fill rate: the only admissions possible are the initial burst.
    let limiter = Arc::new(TokenBucket::new(50.0, 0.0));
    let admitted = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let limiter = Arc::clone(&limiter);
            let admitted = Arc::clone(&admitted);
            thread::spawn(move || {
                for _ in 0..100 {
                    if limiter.allow() {
                        admitted.fetch_add(1, Ordering::Relaxed);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(
        admitted.load(Ordering::Relaxed),
        50,
        "exactly capacity admissions, never more"
    );
    assert!(limiter.current_tokens() < 1.0);
}

#[test]
fn test_concurrent_fixed_window_never_exceeds_limit() {
    let limiter = Arc::new(FixedWindow::new(25, Duration::from_secs(60)));
    let admitted = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let limiter = Arc::clone(&limiter);
            let admitted = Arc::clone(&admitted);
            thread::spawn(move || {
                for _ in 0..50 {
                    if limiter.allow() {
                        admitted.fetch_add(1, Ordering::Relaxed);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(admitted.load(Ordering::Relaxed), 25);
    assert_eq!(limiter.current_count(), 25);
}
