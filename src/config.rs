//! Declarative limiter configuration.
//!
//! Each limiter can be built from a plain-data config struct. The structs
//! derive serde traits so deployments can keep limiter parameters in
//! whatever configuration format they already use; this crate itself never
//! reads configuration files.
//!
//! # Examples
//!
//! ```ignore
//! use rategate::config::TokenBucketConfig;
//!
//! let config = TokenBucketConfig { capacity: 100.0, fill_rate: 10.0 };
//! let bucket = config.build()?;
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
#[cfg(feature = "leaky-bucket")]
use crate::limiter::LeakyBucket;
#[cfg(feature = "sliding-log")]
use crate::limiter::SlidingLog;
use crate::limiter::{FixedWindow, TokenBucket};

/// Parameters for a token bucket limiter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenBucketConfig {
    /// Maximum number of tokens the bucket can hold.
    pub capacity: f64,
    /// Tokens added per second.
    pub fill_rate: f64,
}

impl TokenBucketConfig {
    /// Build the limiter, returning an error if the parameters are invalid.
    pub fn build(&self) -> Result<TokenBucket> {
        TokenBucket::try_new(self.capacity, self.fill_rate)
    }
}

/// Parameters for a leaky bucket limiter.
#[cfg(feature = "leaky-bucket")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeakyBucketConfig {
    /// Maximum fill the bucket can hold.
    pub capacity: f64,
    /// Units drained per second.
    pub leak_rate: f64,
}

#[cfg(feature = "leaky-bucket")]
impl LeakyBucketConfig {
    /// Build the limiter, returning an error if the parameters are invalid.
    pub fn build(&self) -> Result<LeakyBucket> {
        LeakyBucket::try_new(self.capacity, self.leak_rate)
    }
}

/// Parameters for a fixed window limiter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedWindowConfig {
    /// Maximum requests admitted per window.
    pub limit: u64,
    /// Duration of one window.
    pub window: Duration,
}

impl FixedWindowConfig {
    /// Build the limiter, returning an error if the parameters are invalid.
    pub fn build(&self) -> Result<FixedWindow> {
        FixedWindow::try_new(self.limit, self.window)
    }
}

/// Parameters for a sliding log limiter.
#[cfg(feature = "sliding-log")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlidingLogConfig {
    /// Maximum requests admitted per trailing window.
    pub limit: usize,
    /// Duration of the trailing window.
    pub window: Duration,
}

#[cfg(feature = "sliding-log")]
impl SlidingLogConfig {
    /// Build the limiter, returning an error if the parameters are invalid.
    pub fn build(&self) -> Result<SlidingLog> {
        SlidingLog::try_new(self.limit, self.window)
    }
}
