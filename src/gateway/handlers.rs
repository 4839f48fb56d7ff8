//! HTTP handlers for the inbound gateway.

use super::AppState;
use super::error::GatewayError;
use crate::providers::Provider;
use crate::providers::net2phone::PROVIDER_NAME;
use crate::types::{SendResult, SmsRequest};
use crate::utils::phone::is_valid_us_e164;
use crate::utils::quiet_hours::{Clock, within_quiet_hours};
use crate::utils::text::decorate_text;
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{error, info, warn};

/// Service name reported by `GET /`.
pub const SERVICE_NAME: &str = "kommo-n2p-backend";

/// Body of `POST /send-sms`.
#[derive(Debug, Clone, Deserialize)]
pub struct SendSmsPayload {
    /// Recipient, `+1XXXXXXXXXX`.
    pub to: String,
    /// Message body before decoration.
    pub text: String,
    #[serde(default)]
    pub sender: Option<String>,
    /// CRM account subdomain.
    #[serde(default)]
    pub subdomain: Option<String>,
    /// CRM lead the message belongs to.
    #[serde(default)]
    pub lead_id: Option<i64>,
    /// Free-form CRM metadata. Accepted, not forwarded.
    #[serde(default)]
    pub meta: Option<Map<String, Value>>,
}

/// What would have been sent in mock mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Echo {
    pub to: String,
    pub text: String,
    pub sender: String,
}

/// Successful `POST /send-sms` response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendSmsResponse {
    pub status: &'static str,
    pub provider: &'static str,
    pub mock: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub echo: Option<Echo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<SendResult>,
}

impl SendSmsResponse {
    fn mocked(echo: Echo) -> Self {
        Self {
            status: "queued",
            provider: PROVIDER_NAME,
            mock: true,
            echo: Some(echo),
            result: None,
        }
    }

    fn sent(provider: &'static str, result: SendResult) -> Self {
        Self {
            status: "queued",
            provider,
            mock: false,
            echo: None,
            result: Some(result),
        }
    }
}

/// `POST /send-sms`: validate, gate on quiet hours, decorate and dispatch.
pub async fn send_sms<P: Provider>(
    State(state): State<AppState<P>>,
    Json(payload): Json<SendSmsPayload>,
) -> Result<Json<SendSmsResponse>, GatewayError> {
    let config = &state.config;

    if !is_valid_us_e164(&payload.to) {
        info!(to = %payload.to, "Rejected send to invalid number");
        return Err(GatewayError::Validation { to: payload.to });
    }

    let (start, end) = (config.allowed_start_hour, config.allowed_end_hour);
    if within_quiet_hours(state.clock.now(), start, end) {
        info!(to = %payload.to, start, end, "Rejected send during quiet hours");
        return Err(GatewayError::Policy { start, end });
    }

    let text = decorate_text(&payload.text, &config.brand_tag);
    let sender = payload
        .sender
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| config.default_sender.clone());

    if config.mock_send {
        info!(
            to = %payload.to,
            len = text.chars().count(),
            sender = %sender,
            subdomain = ?payload.subdomain,
            lead_id = ?payload.lead_id,
            "Mock send"
        );
        return Ok(Json(SendSmsResponse::mocked(Echo {
            to: payload.to,
            text,
            sender,
        })));
    }

    let provider = state
        .provider
        .as_ref()
        .ok_or(GatewayError::ProviderUnavailable)?;

    let request = SmsRequest::new(payload.to, text).with_sender(sender);
    match provider.send_sms(&request).await {
        Ok(result) => {
            info!(
                to = %request.to,
                subdomain = ?payload.subdomain,
                lead_id = ?payload.lead_id,
                result = %result,
                "SMS queued"
            );
            Ok(Json(SendSmsResponse::sent(provider.name(), result)))
        }
        Err(e) => {
            error!(error = %e, to = %request.to, "SMS send failed");
            Err(GatewayError::Provider {
                source: Box::new(e),
            })
        }
    }
}

/// `GET /`
pub async fn root<P: Provider>(State(state): State<AppState<P>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "time": state.clock.now().as_second(),
    }))
}

/// `GET /healthz`
pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `GET` probe for `/send-sms` and the webhook routes.
pub async fn probe() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// `POST /webhooks/n2p`: delivery and inbound events from net2phone.
pub async fn n2p_webhook(body: Bytes) -> Json<Value> {
    log_webhook("n2p", &body);
    Json(json!({ "ok": true }))
}

/// `POST /webhooks/dp`: CRM digital pipeline trigger.
pub async fn dp_webhook(body: Bytes) -> Json<Value> {
    log_webhook("dp", &body);
    Json(json!({ "received": true }))
}

/// `POST /webhooks/uninstalled`: CRM integration removed.
pub async fn uninstalled_webhook(body: Bytes) -> Json<Value> {
    log_webhook("uninstalled", &body);
    Json(json!({ "ok": true }))
}

// Content type is not checked; some senders omit it.
fn log_webhook(source: &'static str, body: &[u8]) {
    match serde_json::from_slice::<Value>(body) {
        Ok(payload) => info!(source, payload = %payload, "Webhook received"),
        Err(e) => warn!(
            source,
            error = %e,
            body = %String::from_utf8_lossy(body),
            "Webhook received with non-JSON body"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_minimal() {
        let payload: SendSmsPayload =
            serde_json::from_str(r#"{"to":"+15551234567","text":"Hi"}"#).unwrap();
        assert!(payload.sender.is_none());
        assert!(payload.meta.is_none());
    }

    #[test]
    fn test_payload_full() {
        let payload: SendSmsPayload = serde_json::from_str(
            r#"{"to":"+15551234567","text":"Hi","sender":"+17543050540",
                "subdomain":"acme","lead_id":42,"meta":{"k":"v"}}"#,
        )
        .unwrap();
        assert_eq!(payload.lead_id, Some(42));
        assert_eq!(payload.subdomain.as_deref(), Some("acme"));
        assert_eq!(payload.meta.unwrap()["k"], "v");
    }

    #[test]
    fn test_mocked_response_shape() {
        let response = SendSmsResponse::mocked(Echo {
            to: "+15551234567".into(),
            text: "t".into(),
            sender: "s".into(),
        });
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "status": "queued",
                "provider": "net2phone",
                "mock": true,
                "echo": { "to": "+15551234567", "text": "t", "sender": "s" }
            })
        );
    }

    #[test]
    fn test_sent_response_shape() {
        let response = SendSmsResponse::sent("net2phone", SendResult::acknowledged());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "status": "queued",
                "provider": "net2phone",
                "mock": false,
                "result": { "ok": true }
            })
        );
    }
}
