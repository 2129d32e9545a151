//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default HTTP method when none is given.
pub const METHOD: &str = "GET";

/// Default per-attempt timeout in milliseconds.
pub const TIMEOUT_MS: u64 = 10_000;

/// Default maximum number of retries after the first attempt.
pub const MAX_RETRIES: u32 = 3;

/// Default delay before the first retry in milliseconds.
pub const RETRY_INITIAL_DELAY_MS: u64 = 300;

/// Default retry backoff multiplier.
pub const RETRY_MULTIPLIER: f64 = 2.0;

/// Default per-attempt timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_millis(TIMEOUT_MS)
}

/// Default initial retry delay as Duration.
#[must_use]
pub const fn retry_initial_delay() -> Duration {
    Duration::from_millis(RETRY_INITIAL_DELAY_MS)
}
