//! Retry configuration for outbound provider requests.

use backon::ExponentialBuilder;
use reqwest::StatusCode;
use std::time::Duration;

/// HTTP statuses treated as transient by the transport retry loop.
pub const TRANSIENT_STATUSES: [StatusCode; 5] = [
    StatusCode::TOO_MANY_REQUESTS,
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// Returns true if a response with this status should be sent again.
pub fn is_transient_status(status: StatusCode) -> bool {
    TRANSIENT_STATUSES.contains(&status)
}

/// Configuration for transport-level retry behavior.
///
/// Applied independently to every token and SMS request. Use the builder
/// pattern to customize retry settings:
///
/// ```rust
/// use n2p_relay::RetryConfig;
/// use std::time::Duration;
///
/// let config = RetryConfig::default()
///     .with_min_delay(Duration::from_millis(250))
///     .with_max_delay(Duration::from_secs(10))
///     .with_factor(1.5)
///     .with_max_retries(5);
/// ```
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Delay before the first retry (default: 500 milliseconds).
    pub min_delay: Duration,
    /// Maximum delay between retries (default: 30 seconds).
    pub max_delay: Duration,
    /// Exponential backoff factor (default: 2.0).
    pub factor: f32,
    /// Maximum number of retry attempts (default: 3).
    pub max_retries: usize,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            factor: 2.0,
            max_retries: 3,
        }
    }
}

impl RetryConfig {
    /// Set the delay before the first retry.
    pub fn with_min_delay(mut self, delay: Duration) -> Self {
        self.min_delay = delay;
        self
    }

    /// Set the maximum delay between retries.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set the exponential backoff factor.
    pub fn with_factor(mut self, factor: f32) -> Self {
        self.factor = factor;
        self
    }

    /// Set the maximum number of retry attempts.
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Build a backoff strategy from this configuration.
    pub fn build_strategy(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_delay(self.max_delay)
            .with_factor(self.factor)
            .with_max_times(self.max_retries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_transport_policy() {
        let config = RetryConfig::default();
        assert_eq!(config.min_delay, Duration::from_millis(500));
        assert_eq!(config.factor, 2.0);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_transient_statuses() {
        for status in [429, 500, 502, 503, 504] {
            assert!(is_transient_status(StatusCode::from_u16(status).unwrap()));
        }
        for status in [200, 400, 401, 403, 404, 501] {
            assert!(!is_transient_status(StatusCode::from_u16(status).unwrap()));
        }
    }
}
