//! Gateway configuration types.

use crate::config::ConfigError;
use crate::utils::quiet_hours::{DEFAULT_END_HOUR, DEFAULT_START_HOUR};

/// Default brand prefix for outbound messages.
pub const DEFAULT_BRAND_TAG: &str = "PLS N2P";

/// Sender used when a request does not name one.
pub const DEFAULT_SENDER: &str = "+17543050540";

/// Settings for the inbound gateway.
///
/// Controls message decoration, the sending window and mock mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Tag placed in brackets before every message.
    pub brand_tag: String,
    /// Sender used when the request has none.
    pub default_sender: String,
    /// First Eastern hour (inclusive) sending is allowed.
    pub allowed_start_hour: u8,
    /// Eastern hour (exclusive) sending stops.
    pub allowed_end_hour: u8,
    /// Log sends instead of contacting the provider.
    pub mock_send: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            brand_tag: DEFAULT_BRAND_TAG.to_string(),
            default_sender: DEFAULT_SENDER.to_string(),
            allowed_start_hour: DEFAULT_START_HOUR,
            allowed_end_hour: DEFAULT_END_HOUR,
            mock_send: true,
        }
    }
}

impl GatewayConfig {
    /// Set the brand tag.
    pub fn with_brand_tag(mut self, tag: impl Into<String>) -> Self {
        self.brand_tag = tag.into();
        self
    }

    /// Set the default sender.
    pub fn with_default_sender(mut self, sender: impl Into<String>) -> Self {
        self.default_sender = sender.into();
        self
    }

    /// Set the allowed sending window `[start, end)` in Eastern hours.
    pub fn with_allowed_hours(mut self, start: u8, end: u8) -> Self {
        self.allowed_start_hour = start;
        self.allowed_end_hour = end;
        self
    }

    /// Enable or disable mock mode.
    pub fn with_mock_send(mut self, mock: bool) -> Self {
        self.mock_send = mock;
        self
    }

    /// Check the sending window.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (start, end) = (self.allowed_start_hour, self.allowed_end_hour);
        if start >= end || end > 24 {
            return Err(ConfigError::InvalidHours { start, end });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = GatewayConfig::default();
        assert_eq!(config.brand_tag, "PLS N2P");
        assert_eq!(config.default_sender, "+17543050540");
        assert_eq!((config.allowed_start_hour, config.allowed_end_hour), (8, 21));
        assert!(config.mock_send);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_methods() {
        let config = GatewayConfig::default()
            .with_brand_tag("ACME")
            .with_default_sender("+15550000000")
            .with_allowed_hours(0, 24)
            .with_mock_send(false);
        assert_eq!(config.brand_tag, "ACME");
        assert_eq!(config.default_sender, "+15550000000");
        assert!(!config.mock_send);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_window() {
        assert!(GatewayConfig::default().with_allowed_hours(9, 9).validate().is_err());
        assert!(GatewayConfig::default().with_allowed_hours(10, 9).validate().is_err());
        assert!(GatewayConfig::default().with_allowed_hours(0, 25).validate().is_err());
    }
}
