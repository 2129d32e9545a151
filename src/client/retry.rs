//! Retry policy for transient server failures.

use std::time::Duration;

/// Methods considered safe to repeat without duplicating side effects.
pub const IDEMPOTENT_METHODS: [http::Method; 5] = [
    http::Method::GET,
    http::Method::PUT,
    http::Method::DELETE,
    http::Method::HEAD,
    http::Method::OPTIONS,
];

/// Returns true if `method` belongs to [`IDEMPOTENT_METHODS`].
#[must_use]
pub fn is_idempotent(method: &http::Method) -> bool {
    IDEMPOTENT_METHODS.contains(method)
}

/// Configuration for exponential backoff retry behavior.
///
/// Only completed responses with a 5xx status for an idempotent method are
/// retried. Transport failures never are.
///
/// # Defaults
///
/// - `max_retries`: 3
/// - `initial_delay`: 300 milliseconds
/// - `multiplier`: 2.0
///
/// # Example
///
/// ```
/// use api_fetch::client::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new()
///     .with_max_retries(5)
///     .with_initial_delay(Duration::from_millis(100));
///
/// assert_eq!(policy.delay_for_retry(2), Duration::from_millis(400));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt.
    ///
    /// A value of 0 disables retries.
    pub max_retries: u32,

    /// Delay before the first retry.
    pub initial_delay: Duration,

    /// Multiplier applied to the delay after each retry.
    pub multiplier: f64,
}

impl RetryPolicy {
    /// Default maximum retries.
    pub const DEFAULT_MAX_RETRIES: u32 = 3;

    /// Default initial delay (300 milliseconds).
    pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(300);

    /// Default multiplier (2.0).
    pub const DEFAULT_MULTIPLIER: f64 = 2.0;

    /// Creates a new retry policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_retries: Self::DEFAULT_MAX_RETRIES,
            initial_delay: Self::DEFAULT_INITIAL_DELAY,
            multiplier: Self::DEFAULT_MULTIPLIER,
        }
    }

    /// Creates a policy that never retries.
    #[must_use]
    pub const fn none() -> Self {
        Self::new().with_max_retries(0)
    }

    /// Sets the maximum number of retries.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the delay before the first retry.
    ///
    /// Zero delay is supported (useful for testing) but creates a tight
    /// retry loop in production.
    #[must_use]
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the delay multiplier.
    ///
    /// # Panics
    ///
    /// Panics if `multiplier` is not positive (must be > 0.0).
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        assert!(multiplier > 0.0, "multiplier must be positive");
        self.multiplier = multiplier;
        self
    }

    /// Computes the delay to wait after the given attempt (0-indexed).
    ///
    /// With defaults: 300ms, 600ms, 1200ms, ...
    #[must_use]
    pub fn delay_for_retry(&self, attempt: u32) -> Duration {
        // Attempt counts are bounded by max_retries, far below i32::MAX
        #[allow(clippy::cast_possible_wrap)]
        let factor = self.multiplier.powi(attempt as i32);
        // Scale in whole nanoseconds so power-of-two multipliers stay exact
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        let nanos = (self.initial_delay.as_nanos() as f64 * factor).round() as u64;
        Duration::from_nanos(nanos)
    }

    /// Decides whether a completed response warrants another attempt.
    ///
    /// Requires an idempotent method, a 5xx status, and `attempt < max_retries`.
    #[must_use]
    pub fn should_retry(&self, method: &http::Method, status: http::StatusCode, attempt: u32) -> bool {
        is_idempotent(method) && status.is_server_error() && attempt < self.max_retries
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}
