//! Error types for the net2phone provider.

use crate::errors::RetryableError;
use crate::utils::retry::is_transient_status;
use reqwest::StatusCode;
use serde_json::Value;
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// Body of a failed SMS submission.
///
/// JSON when the provider returned parseable JSON, raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorDetail {
    Json(Value),
    Text(String),
}

impl ErrorDetail {
    /// Parse a response body, falling back to the raw text.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str(body) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(body.to_string()),
        }
    }
}

impl Display for ErrorDetail {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Errors returned by the net2phone client.
#[derive(Debug, Error)]
pub enum Net2PhoneError {
    /// Failed to build the HTTP client.
    #[error("Failed to build HTTP client: {0}")]
    BuildHttpClient(#[source] reqwest::Error),

    /// Transport failure (connection, timeout) after retries were exhausted.
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[source] reqwest_middleware::Error),

    /// Failed to read a response body.
    #[error("Failed to read response: {0}")]
    ParseResponse(#[source] reqwest::Error),

    /// Token endpoint answered with a non-success status.
    #[error("Token error ({}): {body}", .status.as_u16())]
    Token { status: StatusCode, body: String },

    /// Token endpoint answered 2xx without a usable `access_token`.
    #[error("Invalid token response: {body}")]
    InvalidTokenResponse { body: String },

    /// SMS endpoint answered with a non-success status.
    #[error("N2P SMS failed ({}): {detail}", .status.as_u16())]
    SmsSend { status: StatusCode, detail: ErrorDetail },

    /// SMS endpoint answered 2xx with a body that is not JSON.
    #[error("Failed to decode SMS response: {0}")]
    DeserializeJson(#[source] serde_json::Error),
}

impl RetryableError for Net2PhoneError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::HttpRequest(reqwest_middleware::Error::Reqwest(e)) => {
                e.is_connect() || e.is_timeout()
            }
            Self::Token { status, .. } | Self::SmsSend { status, .. } => {
                is_transient_status(*status)
            }
            Self::HttpRequest(_)
            | Self::BuildHttpClient(_)
            | Self::ParseResponse(_)
            | Self::InvalidTokenResponse { .. }
            | Self::DeserializeJson(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Net2PhoneError>;
