//! Process configuration loaded from the environment.

use crate::gateway::GatewayConfig;
use crate::providers::net2phone::Net2PhoneConfig;
use std::net::{IpAddr, SocketAddr};
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("Invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// A URL variable cannot be parsed.
    #[error("Invalid URL '{value}' for {key}: {source}")]
    InvalidUrl {
        key: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    /// The sending window is empty or out of range.
    #[error("Invalid allowed hours {start}-{end}: expected 0 <= start < end <= 24")]
    InvalidHours { start: u8, end: u8 },
}

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Inbound gateway settings.
    pub gateway: GatewayConfig,
    /// net2phone settings; `None` in mock mode without credentials.
    pub provider: Option<Net2PhoneConfig>,
    /// Address the HTTP server binds to.
    pub listen_addr: SocketAddr,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// ```rust
    /// use n2p_relay::AppConfig;
    ///
    /// let config = AppConfig::from_lookup(|key| match key {
    ///     "MOCK_SEND" => Some("true".to_string()),
    ///     "BRAND_TAG" => Some("ACME".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    ///
    /// assert_eq!(config.gateway.brand_tag, "ACME");
    /// assert!(config.provider.is_none());
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let mut gateway = GatewayConfig::default();
        if let Some(tag) = get("BRAND_TAG") {
            gateway.brand_tag = tag;
        }
        if let Some(sender) = get("DEFAULT_SENDER") {
            gateway.default_sender = sender;
        }
        if let Some(start) = get("ALLOWED_HOURS_START") {
            gateway.allowed_start_hour = parse_hour("ALLOWED_HOURS_START", &start)?;
        }
        if let Some(end) = get("ALLOWED_HOURS_END") {
            gateway.allowed_end_hour = parse_hour("ALLOWED_HOURS_END", &end)?;
        }
        if let Some(mock) = get("MOCK_SEND") {
            gateway.mock_send = mock.trim().eq_ignore_ascii_case("true");
        }
        gateway.validate()?;

        let provider = match (get("N2P_CLIENT_ID"), get("N2P_CLIENT_SECRET")) {
            (Some(id), Some(secret)) => {
                let mut builder = Net2PhoneConfig::builder(id, secret);
                if let Some(base) = get("N2P_BASE_URL") {
                    builder = builder.base_url(base);
                }
                if let Some(token_url) = get("N2P_TOKEN_URL") {
                    builder = builder.token_url(token_url);
                }
                if let Some(sms_url) = get("N2P_SMS_URL") {
                    builder = builder.sms_url(sms_url);
                }
                if let Some(scope) = get("N2P_SCOPE") {
                    builder = builder.scope(scope);
                }
                Some(builder.build()?)
            }
            (id, _) if gateway.mock_send => {
                if id.is_some() {
                    tracing::warn!("N2P_CLIENT_SECRET not set, provider client disabled");
                }
                None
            }
            (None, _) => return Err(ConfigError::Missing("N2P_CLIENT_ID")),
            (Some(_), None) => return Err(ConfigError::Missing("N2P_CLIENT_SECRET")),
        };

        let host = match get("HOST") {
            Some(host) => host.parse::<IpAddr>().map_err(|e| ConfigError::Invalid {
                key: "HOST",
                value: host.clone(),
                reason: e.to_string(),
            })?,
            None => IpAddr::from([0, 0, 0, 0]),
        };
        let port = match get("PORT") {
            Some(port) => port.parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: "PORT",
                value: port.clone(),
                reason: e.to_string(),
            })?,
            None => 8000,
        };

        Ok(Self {
            gateway,
            provider,
            listen_addr: SocketAddr::new(host, port),
        })
    }
}

fn parse_hour(key: &'static str, value: &str) -> Result<u8, ConfigError> {
    value.trim().parse::<u8>().map_err(|e| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_are_mock_mode() {
        let config = load(&[]).unwrap();
        assert!(config.gateway.mock_send);
        assert_eq!(config.gateway.brand_tag, "PLS N2P");
        assert_eq!(config.gateway.default_sender, "+17543050540");
        assert_eq!(config.gateway.allowed_start_hour, 8);
        assert_eq!(config.gateway.allowed_end_hour, 21);
        assert!(config.provider.is_none());
        assert_eq!(config.listen_addr, "0.0.0.0:8000".parse().unwrap());
    }

    #[test]
    fn test_mock_send_parsing() {
        let live = load(&[
            ("MOCK_SEND", "false"),
            ("N2P_CLIENT_ID", "a"),
            ("N2P_CLIENT_SECRET", "b"),
        ])
        .unwrap();
        assert!(!live.gateway.mock_send);
        assert!(load(&[("MOCK_SEND", "TRUE")]).unwrap().gateway.mock_send);
        // Anything but "true" disables mock mode.
        assert!(matches!(
            load(&[("MOCK_SEND", "yes")]),
            Err(ConfigError::Missing("N2P_CLIENT_ID"))
        ));
    }

    #[test]
    fn test_credentials_required_when_live() {
        assert!(matches!(
            load(&[("MOCK_SEND", "false"), ("N2P_CLIENT_ID", "a")]),
            Err(ConfigError::Missing("N2P_CLIENT_SECRET"))
        ));
    }

    #[test]
    fn test_provider_urls() {
        let config = load(&[
            ("MOCK_SEND", "false"),
            ("N2P_CLIENT_ID", "a"),
            ("N2P_CLIENT_SECRET", "b"),
            ("N2P_BASE_URL", "https://example.test/api/"),
            ("N2P_SCOPE", "sms"),
        ])
        .unwrap();
        let provider = config.provider.unwrap();
        assert_eq!(provider.base_url.as_str(), "https://example.test/api");
        assert_eq!(provider.sms_url.as_str(), "https://example.test/api/messaging/sms");
        assert_eq!(provider.scope.as_deref(), Some("sms"));
    }

    #[test]
    fn test_invalid_hours() {
        assert!(matches!(
            load(&[("ALLOWED_HOURS_START", "eight")]),
            Err(ConfigError::Invalid { key: "ALLOWED_HOURS_START", .. })
        ));
        assert!(matches!(
            load(&[("ALLOWED_HOURS_START", "22")]),
            Err(ConfigError::InvalidHours { start: 22, end: 21 })
        ));
        assert!(matches!(
            load(&[("ALLOWED_HOURS_END", "25")]),
            Err(ConfigError::InvalidHours { .. })
        ));
    }

    #[test]
    fn test_listen_address() {
        let config = load(&[("HOST", "127.0.0.1"), ("PORT", "9090")]).unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:9090".parse().unwrap());
        assert!(matches!(
            load(&[("PORT", "http")]),
            Err(ConfigError::Invalid { key: "PORT", .. })
        ));
    }
}
