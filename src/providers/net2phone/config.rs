//! net2phone client configuration.

use crate::config::ConfigError;
use crate::utils::retry::RetryConfig;
use secrecy::SecretString;
use std::time::Duration;
use url::Url;

/// Default REST API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.n2p.io/v2";

/// Default OAuth2 token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://auth.net2phone.com/connect/token";

/// SMS endpoint path relative to the base URL.
pub const SMS_PATH: &str = "messaging/sms";

/// Per-request timeout applied to every outbound call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Immutable connection settings for the net2phone API.
#[derive(Clone)]
pub struct Net2PhoneConfig {
    /// REST API base URL, without trailing slash.
    pub base_url: Url,
    /// OAuth2 token endpoint.
    pub token_url: Url,
    /// SMS submission endpoint.
    pub sms_url: Url,
    /// OAuth2 client identifier.
    pub client_id: String,
    /// OAuth2 client secret.
    pub client_secret: SecretString,
    /// Optional OAuth2 scope sent with the grant.
    pub scope: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Transport retry policy for token and SMS requests.
    pub retry: RetryConfig,
}

impl std::fmt::Debug for Net2PhoneConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Net2PhoneConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token_url", &self.token_url.as_str())
            .field("sms_url", &self.sms_url.as_str())
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("scope", &self.scope)
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .finish()
    }
}

impl Net2PhoneConfig {
    /// Create a builder with the given client credentials.
    ///
    /// # Example
    ///
    /// ```rust
    /// use n2p_relay::Net2PhoneConfig;
    ///
    /// let config = Net2PhoneConfig::builder("client-id", "client-secret")
    ///     .base_url("https://api.example.test/v2/")
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(config.sms_url.as_str(), "https://api.example.test/v2/messaging/sms");
    /// ```
    pub fn builder(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Net2PhoneConfigBuilder {
        Net2PhoneConfigBuilder::new(client_id, client_secret)
    }
}

/// Builder for [`Net2PhoneConfig`].
#[derive(Debug, Clone)]
pub struct Net2PhoneConfigBuilder {
    client_id: String,
    client_secret: String,
    base_url: Option<String>,
    token_url: Option<String>,
    sms_url: Option<String>,
    scope: Option<String>,
    timeout: Duration,
    retry: RetryConfig,
}

impl Net2PhoneConfigBuilder {
    /// Create a new builder with default endpoints.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            base_url: None,
            token_url: None,
            sms_url: None,
            scope: None,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryConfig::default(),
        }
    }

    /// Set the REST API base URL. A trailing `/` is trimmed.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the OAuth2 token endpoint.
    pub fn token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = Some(url.into());
        self
    }

    /// Set the SMS endpoint. Defaults to `{base_url}/messaging/sms`.
    pub fn sms_url(mut self, url: impl Into<String>) -> Self {
        self.sms_url = Some(url.into());
        self
    }

    /// Set the OAuth2 scope. Empty scopes are ignored.
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        let scope = scope.into();
        self.scope = (!scope.is_empty()).then_some(scope);
        self
    }

    /// Set the per-request timeout.
    ///
    /// Default: 30 seconds
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the transport retry policy.
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Validate the URLs and build the [`Net2PhoneConfig`].
    pub fn build(self) -> Result<Net2PhoneConfig, ConfigError> {
        let base = self
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        let sms = self
            .sms_url
            .unwrap_or_else(|| format!("{base}/{SMS_PATH}"));
        let token = self
            .token_url
            .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string());

        Ok(Net2PhoneConfig {
            base_url: parse_url("N2P_BASE_URL", &base)?,
            token_url: parse_url("N2P_TOKEN_URL", &token)?,
            sms_url: parse_url("N2P_SMS_URL", &sms)?,
            client_id: self.client_id,
            client_secret: SecretString::from(self.client_secret),
            scope: self.scope,
            timeout: self.timeout,
            retry: self.retry,
        })
    }
}

fn parse_url(key: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
        key,
        value: value.to_string(),
        source,
    })
}
