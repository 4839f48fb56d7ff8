//! net2phone HTTP client.

use super::config::Net2PhoneConfig;
use super::errors::{ErrorDetail, Net2PhoneError, Result};
use super::token::{CachedToken, TokenCache, TokenResponse};
use crate::errors::RetryableError;
use crate::types::{SendResult, SmsRequest};
use crate::utils::retry::is_transient_status;
use backon::Retryable;
use reqwest::{Response, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

#[cfg(feature = "otel")]
use opentelemetry::trace::Status;
#[cfg(feature = "otel")]
use tracing::Span;
#[cfg(feature = "otel")]
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// net2phone HTTP client.
///
/// Holds one connection pool and one cached access token. Cloning is cheap
/// and clones share both.
///
/// # Example
///
/// ```rust,ignore
/// use n2p_relay::{Net2Phone, Net2PhoneConfig, SmsRequest};
///
/// let config = Net2PhoneConfig::builder("client-id", "client-secret").build()?;
/// let client = Net2Phone::new(config)?;
///
/// let request = SmsRequest::new("+15551234567", "Hello").with_sender("+17543050540");
/// let result = client.send_sms(&request).await?;
/// println!("Provider answered: {}", result);
/// ```
#[derive(Clone)]
pub struct Net2Phone {
    http_client: ClientWithMiddleware,
    config: Arc<Net2PhoneConfig>,
    token: Arc<TokenCache>,
}

impl std::fmt::Debug for Net2Phone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Net2Phone")
            .field("token_url", &self.config.token_url.as_str())
            .field("sms_url", &self.config.sms_url.as_str())
            .field("client_id", &self.config.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// Builder for configuring a [`Net2Phone`] client.
pub struct Net2PhoneClientBuilder {
    config: Net2PhoneConfig,
    http_client: Option<ClientWithMiddleware>,
}

impl Net2PhoneClientBuilder {
    /// Create a new builder for the given configuration.
    pub fn new(config: Net2PhoneConfig) -> Self {
        Self {
            config,
            http_client: None,
        }
    }

    /// Set a custom HTTP client with middleware.
    pub fn http_client(mut self, client: ClientWithMiddleware) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Build the [`Net2Phone`] client.
    pub fn build(self) -> Result<Net2Phone> {
        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let client = reqwest::Client::builder()
                    .timeout(self.config.timeout)
                    .build()
                    .map_err(Net2PhoneError::BuildHttpClient)?;
                ClientBuilder::new(client).build()
            }
        };

        Ok(Net2Phone {
            http_client,
            config: Arc::new(self.config),
            token: Arc::new(TokenCache::default()),
        })
    }
}

/// Outcome of a single HTTP attempt inside the transport retry loop.
enum Attempt {
    Transport(reqwest_middleware::Error),
    Status(Response),
}

impl RetryableError for Attempt {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(reqwest_middleware::Error::Reqwest(e)) => {
                e.is_connect() || e.is_timeout()
            }
            Self::Transport(_) => false,
            Self::Status(response) => is_transient_status(response.status()),
        }
    }
}

impl Display for Attempt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "{e}"),
            Self::Status(response) => write!(f, "status {}", response.status()),
        }
    }
}

impl Net2Phone {
    /// Create a client with a default HTTP stack.
    pub fn new(config: Net2PhoneConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    /// Create a builder for configuring the client.
    pub fn builder(config: Net2PhoneConfig) -> Net2PhoneClientBuilder {
        Net2PhoneClientBuilder::new(config)
    }

    /// Get reference to the client configuration.
    pub fn config(&self) -> &Net2PhoneConfig {
        &self.config
    }

    /// Forget the cached token so the next call fetches a new one.
    pub fn invalidate_token(&self) {
        self.token.clear();
    }

    /// Send one request, retrying transport failures and transient statuses.
    ///
    /// `build` is called once per attempt. When retries run out on a transient
    /// status, the last response is returned for the caller to classify.
    async fn execute<F>(&self, build: F) -> Result<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let build = &build;
        let timeout = self.config.timeout;

        let outcome = (move || async move {
            let response = build()
                .timeout(timeout)
                .send()
                .await
                .map_err(Attempt::Transport)?;
            if is_transient_status(response.status()) {
                return Err(Attempt::Status(response));
            }
            Ok(response)
        })
        .retry(self.config.retry.build_strategy())
        .when(|attempt: &Attempt| attempt.is_retryable())
        .notify(|attempt, duration| {
            debug!(
                error = %attempt,
                retry_after_secs = %duration.as_secs_f64(),
                "Retrying provider request"
            );
        })
        .await;

        match outcome {
            Ok(response) | Err(Attempt::Status(response)) => Ok(response),
            Err(Attempt::Transport(e)) => {
                warn!(error = %e, "Provider request failed");
                Err(Net2PhoneError::HttpRequest(e))
            }
        }
    }

    /// Get an access token, reusing the cached one unless `force` is set or
    /// it is within 30 seconds of expiry.
    ///
    /// Credentials are sent in the form body first. If the token endpoint
    /// answers 400 or 401, the grant is repeated once with HTTP Basic
    /// credentials instead.
    #[tracing::instrument(name = "Net2Phone::get_token", skip(self))]
    pub async fn get_token(&self, force: bool) -> Result<CachedToken> {
        if !force && let Some(token) = self.token.fresh(Instant::now()) {
            return Ok(token);
        }

        let mut grant = vec![("grant_type", "client_credentials".to_string())];
        if let Some(scope) = &self.config.scope {
            grant.push(("scope", scope.clone()));
        }

        let mut body_credentials = grant.clone();
        body_credentials.push(("client_id", self.config.client_id.clone()));
        body_credentials.push((
            "client_secret",
            self.config.client_secret.expose_secret().to_string(),
        ));

        debug!(url = %self.config.token_url, "Requesting access token");
        let mut response = self
            .execute(|| {
                self.http_client
                    .post(self.config.token_url.clone())
                    .form(&body_credentials)
            })
            .await?;

        if matches!(
            response.status(),
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED
        ) {
            debug!(
                status = %response.status(),
                "Token request rejected, retrying with HTTP Basic credentials"
            );
            response = self
                .execute(|| {
                    self.http_client
                        .post(self.config.token_url.clone())
                        .basic_auth(
                            &self.config.client_id,
                            Some(self.config.client_secret.expose_secret()),
                        )
                        .form(&grant)
                })
                .await?;
        }

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(Net2PhoneError::ParseResponse)?;

        if !status.is_success() {
            warn!(%status, body = %body, "Token request failed");
            return Err(Net2PhoneError::Token { status, body });
        }

        let parsed: TokenResponse = serde_json::from_str(&body)
            .map_err(|_| Net2PhoneError::InvalidTokenResponse { body: body.clone() })?;
        let access_token = parsed
            .access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Net2PhoneError::InvalidTokenResponse { body: body.clone() })?;

        let lifetime = parsed.lifetime();
        let token = CachedToken::new(access_token, lifetime, Instant::now());
        self.token.store(token.clone());
        debug!(expires_in = lifetime, "Access token refreshed");

        Ok(token)
    }

    async fn submit(&self, payload: &Value, token: &CachedToken) -> Result<Response> {
        self.execute(|| {
            self.http_client
                .post(self.config.sms_url.clone())
                .bearer_auth(token.secret())
                .json(payload)
        })
        .await
    }

    /// Submit an SMS.
    ///
    /// A 401 from the SMS endpoint forces one token refresh and one resubmission;
    /// a second 401 is returned as [`Net2PhoneError::SmsSend`].
    #[tracing::instrument(
        name = "Net2Phone::send_sms",
        skip_all,
        fields(to = %request.to, sender = ?request.sender)
    )]
    pub async fn send_sms(&self, request: &SmsRequest) -> Result<SendResult> {
        let payload = request.to_payload();

        let token = self.get_token(false).await?;
        let mut response = self.submit(&payload, &token).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            info!("SMS endpoint rejected the access token, refreshing");
            let token = self.get_token(true).await?;
            response = self.submit(&payload, &token).await?;
        }

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(Net2PhoneError::ParseResponse)?;

        if !status.is_success() {
            let detail = ErrorDetail::from_body(&body);
            warn!(%status, detail = %detail, "SMS submission failed");
            return Err(Net2PhoneError::SmsSend { status, detail });
        }

        let result = if body.is_empty() {
            SendResult::acknowledged()
        } else {
            let value: Value =
                serde_json::from_str(&body).map_err(Net2PhoneError::DeserializeJson)?;
            SendResult::new(value)
        };

        #[cfg(feature = "otel")]
        {
            Span::current()
                .record("to", request.to.as_str())
                .set_status(Status::Ok);
        }

        Ok(result)
    }
}
