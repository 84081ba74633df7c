//! Admission-control limiter trait and implementations.
//!
//! This module defines the [`Limiter`] trait and provides one implementing
//! type per rate-limiting strategy. Each type owns its state and guards it
//! with a per-instance lock, so a single instance can be shared across
//! threads (typically behind an `Arc`) without any external locking.
//!
//! # Available Limiters
//!
//! - **Token Bucket** (default): controlled bursts with refilling tokens
//! - **Leaky Bucket** (`leaky-bucket` feature): smooth constant output rate
//! - **Fixed Window** (default): simple counter per time window
//! - **Sliding Log** (`sliding-log` feature): high precision, stores all timestamps

#[cfg(feature = "leaky-bucket")]
mod leaky_bucket;
#[cfg(feature = "sliding-log")]
mod sliding_log;
mod fixed_window;
mod token_bucket;

#[cfg(feature = "leaky-bucket")]
pub use leaky_bucket::LeakyBucket;
#[cfg(feature = "sliding-log")]
pub use sliding_log::SlidingLog;
pub use fixed_window::FixedWindow;
pub use token_bucket::TokenBucket;

/// Admission-control decision interface.
///
/// Every limiter exposes the same capability: decide, in constant or
/// bounded time, whether the current request is admitted. The trait is
/// object-safe, so callers can hold a `Box<dyn Limiter>` and swap
/// strategies without touching the call site.
///
/// # Strategy Comparison
///
/// | Limiter | Accuracy | Memory | Burst | Best For |
/// |---------|----------|--------|-------|----------|
/// | Token Bucket | High | Low | Excellent | Bursty traffic |
/// | Leaky Bucket | High | Low | None | Smooth output |
/// | Fixed Window | Low | Low | Poor (boundary bursts) | Simple use cases |
/// | Sliding Log | Highest | High | Good | Precision critical |
///
/// A rejected call never leaves the limiter in a "rejected" state: the
/// next call is re-evaluated from scratch, and the bucket strategies keep
/// refilling/leaking on every call, admitted or not.
pub trait Limiter: Send + Sync {
    /// Get the limiter name (for logging/metrics).
    fn name(&self) -> &'static str;

    /// Decide whether the current request is admitted.
    ///
    /// Returns `true` to admit, `false` to reject. The call performs the
    /// full read-refill-check-mutate sequence under the instance's lock
    /// and always returns synchronously.
    fn allow(&self) -> bool;
}
