//! Retry policy with exponential backoff.

use std::collections::BTreeSet;
use std::time::Duration;

use rand::Rng;

use crate::error::{Error, ErrorKind};

/// HTTP status codes retried by default.
pub const DEFAULT_RETRYABLE_HTTP_CODES: &[u16] = &[429, 500, 502, 503, 504];

/// API error codes retried by default (transient server-side and
/// concurrency/limit conditions).
pub const DEFAULT_RETRYABLE_ERROR_CODES: &[i64] = &[
    50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61, 62, 63, 64, 65, 66, 67, 68, 69, 70,
];

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts, the first call included.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Backoff strategy to use.
    pub backoff: BackoffStrategy,
    /// HTTP status codes that trigger a retry.
    pub retry_on_http_codes: BTreeSet<u16>,
    /// API error codes that trigger a retry.
    pub retry_on_error_codes: BTreeSet<i64>,
    /// Whether to respect Retry-After headers.
    pub respect_retry_after: bool,
    /// Maximum time to wait from Retry-After header.
    pub max_retry_after: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            backoff: BackoffStrategy::Exponential { factor: 2.0 },
            retry_on_http_codes: DEFAULT_RETRYABLE_HTTP_CODES.iter().copied().collect(),
            retry_on_error_codes: DEFAULT_RETRYABLE_ERROR_CODES.iter().copied().collect(),
            respect_retry_after: true,
            max_retry_after: Duration::from_secs(60),
        }
    }
}

impl RetryConfig {
    /// Set the maximum number of attempts (the first call included).
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Set the delay before the first retry.
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the max delay.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set the backoff strategy.
    pub fn with_backoff(mut self, backoff: BackoffStrategy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Replace the set of retryable HTTP status codes.
    pub fn with_http_codes(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.retry_on_http_codes = codes.into_iter().collect();
        self
    }

    /// Replace the set of retryable API error codes.
    pub fn with_error_codes(mut self, codes: impl IntoIterator<Item = i64>) -> Self {
        self.retry_on_error_codes = codes.into_iter().collect();
        self
    }

    /// A single attempt, no retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    /// Aggressive retry config for important operations.
    pub fn aggressive() -> Self {
        Self {
            max_attempts: 6,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(60),
            backoff: BackoffStrategy::ExponentialWithJitter { factor: 2.0 },
            max_retry_after: Duration::from_secs(120),
            ..Default::default()
        }
    }

    /// Returns true if `err` should be retried under this config.
    pub fn is_retryable(&self, err: &Error) -> bool {
        match &err.kind {
            ErrorKind::Api {
                error_code, status, ..
            } => {
                self.retry_on_error_codes.contains(error_code)
                    || (*status >= 400 && self.retry_on_http_codes.contains(status))
            }
            ErrorKind::Http { status, .. } => self.retry_on_http_codes.contains(status),
            ErrorKind::RateLimited { .. } => self.retry_on_http_codes.contains(&429),
            ErrorKind::Timeout | ErrorKind::Connection(_) => true,
            _ => false,
        }
    }
}

/// Backoff strategy for determining retry delays.
#[derive(Debug, Clone, Copy)]
pub enum BackoffStrategy {
    /// Constant delay between retries.
    Constant,
    /// Linear increase in delay (delay * attempt).
    Linear,
    /// Exponential increase in delay (delay * factor^attempt).
    Exponential { factor: f64 },
    /// Exponential with random jitter to avoid thundering herd.
    ExponentialWithJitter { factor: f64 },
}

impl BackoffStrategy {
    /// Calculate the delay for a given attempt number (0-indexed).
    ///
    /// The result never exceeds `max_delay`, however large `attempt` gets.
    pub fn delay(&self, attempt: u32, initial_delay: Duration, max_delay: Duration) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let secs = match self {
            BackoffStrategy::Constant => return std::cmp::min(initial_delay, max_delay),
            BackoffStrategy::Linear => {
                return initial_delay
                    .checked_mul(attempt.saturating_add(1))
                    .map_or(max_delay, |delay| std::cmp::min(delay, max_delay));
            }
            BackoffStrategy::Exponential { factor } => {
                initial_delay.as_secs_f64() * factor.powi(exponent)
            }
            BackoffStrategy::ExponentialWithJitter { factor } => {
                let base_delay = initial_delay.as_secs_f64() * factor.powi(exponent);
                // jitter in [0, base_delay)
                base_delay + rand::rng().random::<f64>() * base_delay
            }
        };

        // clamp before converting; huge or non-finite values would not fit a Duration
        if !secs.is_finite() || secs >= max_delay.as_secs_f64() {
            max_delay
        } else {
            Duration::from_secs_f64(secs.max(0.0))
        }
    }
}

/// Retry policy that determines when and how to retry.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
    attempt: u32,
}

impl RetryPolicy {
    /// Create a new retry policy from config.
    pub fn new(config: RetryConfig) -> Self {
        Self { config, attempt: 0 }
    }

    /// Number of retries scheduled so far.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// The config this policy runs with.
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Returns true if another attempt is allowed after a failure.
    pub fn should_retry(&self) -> bool {
        self.attempt + 1 < self.config.max_attempts
    }

    /// Record a failed attempt and return the delay before the next one.
    /// Returns None if all attempts are used up.
    pub fn next_delay(&mut self, retry_after: Option<Duration>) -> Option<Duration> {
        if !self.should_retry() {
            return None;
        }

        let delay = match retry_after {
            Some(retry_after) if self.config.respect_retry_after => {
                std::cmp::min(retry_after, self.config.max_retry_after)
            }
            _ => self.config.backoff.delay(
                self.attempt,
                self.config.initial_delay,
                self.config.max_delay,
            ),
        };

        self.attempt += 1;
        Some(delay)
    }

    /// Reset the retry policy for a new request.
    pub fn reset(&mut self) {
        self.attempt = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.initial_delay, Duration::from_secs(1));
        assert_eq!(config.max_delay, Duration::from_secs(30));
        assert!(config.respect_retry_after);
        assert_eq!(config.retry_on_error_codes.len(), 21);
        assert!(config.retry_on_http_codes.contains(&503));
    }

    #[test]
    fn test_no_retry() {
        let policy = RetryPolicy::new(RetryConfig::no_retry());
        assert!(!policy.should_retry());
    }

    #[test]
    fn test_constant_backoff() {
        let delay =
            BackoffStrategy::Constant.delay(0, Duration::from_secs(1), Duration::from_secs(60));
        assert_eq!(delay, Duration::from_secs(1));

        let delay =
            BackoffStrategy::Constant.delay(5, Duration::from_secs(1), Duration::from_secs(60));
        assert_eq!(delay, Duration::from_secs(1));
    }

    #[test]
    fn test_exponential_backoff() {
        let strategy = BackoffStrategy::Exponential { factor: 2.0 };
        let initial = Duration::from_secs(1);
        let max = Duration::from_secs(30);

        assert_eq!(strategy.delay(0, initial, max), Duration::from_secs(1));
        assert_eq!(strategy.delay(1, initial, max), Duration::from_secs(2));
        assert_eq!(strategy.delay(2, initial, max), Duration::from_secs(4));
        assert_eq!(strategy.delay(3, initial, max), Duration::from_secs(8));

        // capped
        assert_eq!(strategy.delay(10, initial, max), Duration::from_secs(30));
    }

    #[test]
    fn test_exponential_with_jitter() {
        let strategy = BackoffStrategy::ExponentialWithJitter { factor: 2.0 };
        let initial = Duration::from_secs(1);
        let max = Duration::from_secs(60);

        let delay = strategy.delay(0, initial, max);
        assert!(delay >= Duration::from_secs(1));
        assert!(delay <= Duration::from_secs(2));

        let delay = strategy.delay(1, initial, max);
        assert!(delay >= Duration::from_secs(2));
        assert!(delay <= Duration::from_secs(4));
    }

    #[test]
    fn test_backoff_saturates_at_large_attempts() {
        let initial = Duration::from_secs(1);
        let max = Duration::from_secs(30);

        for strategy in [
            BackoffStrategy::Exponential { factor: 2.0 },
            BackoffStrategy::ExponentialWithJitter { factor: 2.0 },
        ] {
            assert_eq!(strategy.delay(70, initial, max), max);
            assert_eq!(strategy.delay(2_000, initial, max), max);
            assert_eq!(strategy.delay(u32::MAX, initial, max), max);
        }

        assert_eq!(BackoffStrategy::Linear.delay(70, initial, max), max);
        assert_eq!(
            BackoffStrategy::Linear.delay(u32::MAX, Duration::MAX, Duration::MAX),
            Duration::MAX
        );
    }

    #[test]
    fn test_long_retry_sequence_stays_capped() {
        let mut policy = RetryPolicy::new(RetryConfig::default().with_max_attempts(100));

        let mut delays = Vec::new();
        while let Some(delay) = policy.next_delay(None) {
            delays.push(delay);
        }

        assert_eq!(delays.len(), 99);
        assert_eq!(delays[0], Duration::from_secs(1));
        assert!(delays.iter().all(|d| *d <= Duration::from_secs(30)));
        assert_eq!(delays[98], Duration::from_secs(30));
    }

    #[test]
    fn test_retry_policy_counts_total_attempts() {
        let config = RetryConfig::default().with_max_attempts(3);
        let mut policy = RetryPolicy::new(config);

        assert!(policy.should_retry());
        assert_eq!(policy.next_delay(None), Some(Duration::from_secs(1)));
        assert_eq!(policy.attempt(), 1);
        assert_eq!(policy.next_delay(None), Some(Duration::from_secs(2)));
        assert_eq!(policy.attempt(), 2);

        // first call + two retries = three attempts
        assert!(!policy.should_retry());
        assert!(policy.next_delay(None).is_none());
    }

    #[test]
    fn test_retry_after_header() {
        let mut policy = RetryPolicy::new(RetryConfig::default().with_max_attempts(5));

        let delay = policy.next_delay(Some(Duration::from_secs(20))).unwrap();
        assert_eq!(delay, Duration::from_secs(20));

        let delay = policy.next_delay(Some(Duration::from_secs(120))).unwrap();
        assert_eq!(delay, Duration::from_secs(60));
    }

    #[test]
    fn test_policy_reset() {
        let mut policy = RetryPolicy::new(RetryConfig::default().with_max_attempts(2));

        policy.next_delay(None);
        assert!(!policy.should_retry());

        policy.reset();
        assert!(policy.should_retry());
        assert_eq!(policy.attempt(), 0);
    }

    #[test]
    fn test_config_classifies_errors() {
        let config = RetryConfig::default()
            .with_http_codes([503])
            .with_error_codes([52]);

        let api = |code| {
            Error::new(ErrorKind::Api {
                error_code: code,
                message: "x".into(),
                detail: None,
                request_id: None,
                status: 200,
            })
        };
        let http = |status| {
            Error::new(ErrorKind::Http {
                status,
                message: "x".into(),
                request_id: None,
            })
        };

        assert!(config.is_retryable(&api(52)));
        assert!(!config.is_retryable(&api(53)));
        assert!(config.is_retryable(&Error::new(ErrorKind::Api {
            error_code: 1000,
            message: "Service unavailable".into(),
            detail: None,
            request_id: None,
            status: 503,
        })));
        assert!(config.is_retryable(&http(503)));
        assert!(!config.is_retryable(&http(500)));
        assert!(!config.is_retryable(&Error::new(ErrorKind::RateLimited {
            retry_after: None,
            request_id: None,
        })));
        assert!(config.is_retryable(&Error::new(ErrorKind::Timeout)));
        assert!(!config.is_retryable(&Error::new(ErrorKind::Json("bad".into()))));
    }
}
