//! OAuth2 access token handling.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Lifetime assumed when the token response omits `expires_in`.
pub const DEFAULT_EXPIRES_IN: u64 = 3600;

/// A cached token is refreshed once it is this close to expiry.
pub const EXPIRY_MARGIN: Duration = Duration::from_secs(30);

/// Upper bound on a token lifetime taken from the provider.
pub const MAX_EXPIRES_IN: u64 = 86_400;

/// Successful response from the token endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    /// Integer, float or quoted number.
    #[serde(default)]
    pub expires_in: Option<Value>,
}

impl TokenResponse {
    /// Token lifetime in seconds, [`DEFAULT_EXPIRES_IN`] when absent or
    /// unreadable, capped at [`MAX_EXPIRES_IN`].
    pub fn lifetime(&self) -> u64 {
        self.expires_in
            .as_ref()
            .and_then(seconds)
            .unwrap_or(DEFAULT_EXPIRES_IN)
            .min(MAX_EXPIRES_IN)
    }
}

fn seconds(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(whole_seconds)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole_seconds))
        }
        _ => None,
    }
}

fn whole_seconds(secs: f64) -> Option<u64> {
    (secs.is_finite() && secs >= 0.0).then(|| secs.min(u64::MAX as f64) as u64)
}

/// Bearer token with its absolute expiry.
#[derive(Clone)]
pub struct CachedToken {
    token: SecretString,
    expires_at: Instant,
}

impl std::fmt::Debug for CachedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedToken")
            .field("token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl CachedToken {
    /// Token issued at `now` and valid for `expires_in` seconds, at most
    /// [`MAX_EXPIRES_IN`].
    pub fn new(token: impl Into<String>, expires_in: u64, now: Instant) -> Self {
        let lifetime = Duration::from_secs(expires_in.min(MAX_EXPIRES_IN));
        Self {
            token: SecretString::from(token.into()),
            expires_at: now.checked_add(lifetime).unwrap_or(now),
        }
    }

    /// Bearer token value.
    pub fn secret(&self) -> &str {
        self.token.expose_secret()
    }

    /// True while `now` is more than [`EXPIRY_MARGIN`] before expiry.
    pub fn is_fresh(&self, now: Instant) -> bool {
        now + EXPIRY_MARGIN < self.expires_at
    }
}

/// Shared token slot.
///
/// The lock is only held to read or replace the slot, never across a network
/// call. Concurrent refreshes may race; the last one wins.
#[derive(Debug, Default)]
pub(crate) struct TokenCache {
    slot: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    /// Cached token if it is still fresh at `now`.
    pub fn fresh(&self, now: Instant) -> Option<CachedToken> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref().filter(|t| t.is_fresh(now)).cloned()
    }

    /// Replace the cached token.
    pub fn store(&self, token: CachedToken) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    /// Drop the cached token.
    pub fn clear(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
