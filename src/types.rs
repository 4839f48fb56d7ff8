//! Core types for outbound SMS operations.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{self, Display, Formatter};

// =============================================================================
// SmsRequest
// =============================================================================

/// A single outbound SMS as handed to a provider.
///
/// `extra` pairs are merged into the provider payload after `to`, `text`
/// and `from`, so they can override those keys.
///
/// ```rust
/// use n2p_relay::SmsRequest;
///
/// let request = SmsRequest::new("+15551234567", "Hello")
///     .with_sender("+17543050540")
///     .with_extra("campaign", "spring");
///
/// assert_eq!(request.sender.as_deref(), Some("+17543050540"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmsRequest {
    /// Recipient in US E.164 form.
    pub to: String,
    /// Message body, already decorated.
    pub text: String,
    /// Sender number, sent as `from`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    /// Additional payload keys.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl SmsRequest {
    /// Create a request without sender or extra keys.
    pub fn new(to: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            text: text.into(),
            sender: None,
            extra: Map::new(),
        }
    }

    /// Set the sender number.
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Add one extra payload key.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Build the JSON payload submitted to the provider.
    pub fn to_payload(&self) -> Value {
        let mut payload = Map::new();
        payload.insert("to".to_string(), Value::String(self.to.clone()));
        payload.insert("text".to_string(), Value::String(self.text.clone()));
        if let Some(sender) = self.sender.as_deref().filter(|s| !s.is_empty()) {
            payload.insert("from".to_string(), Value::String(sender.to_string()));
        }
        for (key, value) in &self.extra {
            payload.insert(key.clone(), value.clone());
        }
        Value::Object(payload)
    }
}

// =============================================================================
// SendResult
// =============================================================================

/// Provider acknowledgment of a submitted SMS.
///
/// Holds the provider's JSON body verbatim, or `{"ok": true}` when the
/// provider answered with an empty body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SendResult(Value);

impl SendResult {
    /// Wrap a provider response body.
    pub fn new(body: Value) -> Self {
        Self(body)
    }

    /// Synthetic acknowledgment used for empty response bodies.
    pub fn acknowledged() -> Self {
        Self(serde_json::json!({ "ok": true }))
    }

    /// Borrow the response body.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Take the response body.
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl Display for SendResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Value> for SendResult {
    fn from(body: Value) -> Self {
        Self(body)
    }
}
