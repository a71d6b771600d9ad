//! Exponential backoff for failed reads.

use std::time::Duration;

use store::config::ApiConfig;

use crate::error::ApiError;

const MAX_DELAY: Duration = Duration::from_secs(30);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: MAX_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &ApiConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: config.retry_base_delay(),
            max_delay: MAX_DELAY,
        }
    }

    /// No retries at all.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Delay before retry number `attempt` (0-based): `base * 2^attempt`, capped.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    /// Whether a request that failed with `err` after `attempt` retries gets another go.
    pub fn should_retry(&self, err: &ApiError, attempt: u32) -> bool {
        attempt < self.max_retries && err.is_retryable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_doubles_and_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for(2), Duration::from_secs(4));
        assert_eq!(policy.delay_for(5), Duration::from_secs(30));
        assert_eq!(policy.delay_for(40), Duration::from_secs(30));
    }

    #[test]
    fn test_should_retry() {
        let policy = RetryPolicy::default();
        let server = ApiError::Server {
            status: 503,
            message: "down".into(),
        };
        assert!(policy.should_retry(&server, 0));
        assert!(policy.should_retry(&server, 2));
        assert!(!policy.should_retry(&server, 3));

        let client = ApiError::from_response(400, "{}");
        assert!(!policy.should_retry(&client, 0));
        assert!(!RetryPolicy::none().should_retry(&ApiError::Timeout, 0));
    }

    #[test]
    fn test_from_config() {
        let config = ApiConfig {
            max_retries: 1,
            retry_base_delay_ms: 250,
            ..ApiConfig::default()
        };
        let policy = RetryPolicy::from_config(&config);
        assert_eq!(policy.max_retries, 1);
        assert_eq!(policy.delay_for(1), Duration::from_millis(500));
    }
}
