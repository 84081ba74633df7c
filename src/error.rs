//! Error types for limiter construction.
//!
//! The decision operation itself is total: [`allow`](crate::Limiter::allow)
//! always returns a boolean and never fails. The only fallible surface is
//! construction, where parameters are validated up front so that a
//! misconfigured limiter fails fast instead of silently rejecting every
//! request for the lifetime of the process.

use thiserror::Error;

/// Result type for limiter construction.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration errors reported by the fallible constructors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Capacity or request limit is zero, negative, or not finite.
    #[error("Invalid limit: {0}")]
    InvalidLimit(String),

    /// Refill or leak rate is negative or not finite.
    #[error("Invalid rate: {0}")]
    InvalidRate(String),

    /// Window duration is zero.
    #[error("Invalid window: {0}")]
    InvalidWindow(String),
}

impl ConfigError {
    /// Create an invalid-limit error.
    pub fn invalid_limit(message: impl Into<String>) -> Self {
        Self::InvalidLimit(message.into())
    }

    /// Create an invalid-rate error.
    pub fn invalid_rate(message: impl Into<String>) -> Self {
        Self::InvalidRate(message.into())
    }

    /// Create an invalid-window error.
    pub fn invalid_window(message: impl Into<String>) -> Self {
        Self::InvalidWindow(message.into())
    }
}
