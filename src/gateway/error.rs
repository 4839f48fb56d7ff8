//! Gateway-level error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::error::Error as StdError;
use thiserror::Error;

/// Errors returned by `POST /send-sms`.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Recipient is not a US E.164 number.
    #[error("Invalid US E.164 number (+1XXXXXXXXXX)")]
    Validation { to: String },

    /// Request arrived outside the allowed sending window.
    #[error("Quiet hours in effect (8am–9pm ET by default)")]
    Policy { start: u8, end: u8 },

    /// Provider rejected the send or could not be reached.
    #[error("{source}")]
    Provider {
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// Live sending requested but no provider client is configured.
    #[error("SMS provider is not configured")]
    ProviderUnavailable,
}

impl GatewayError {
    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Policy { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Provider { .. } | Self::ProviderUnavailable => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "detail": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            GatewayError::Validation { to: "x".into() }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::Policy { start: 8, end: 21 }.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            GatewayError::ProviderUnavailable.status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_provider_message_passthrough() {
        let source: Box<dyn StdError + Send + Sync> = "Token error (401): nope".into();
        let err = GatewayError::Provider { source };
        assert_eq!(err.to_string(), "Token error (401): nope");
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_policy_message() {
        assert_eq!(
            GatewayError::Policy { start: 8, end: 21 }.to_string(),
            "Quiet hours in effect (8am–9pm ET by default)"
        );
    }
}
