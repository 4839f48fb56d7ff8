//! Inbound HTTP gateway.
//!
//! Routes CRM webhooks to log-and-acknowledge handlers and exposes
//! `POST /send-sms`, which validates, applies the quiet-hours policy and
//! relays through a [`Provider`].

pub mod config;
pub mod error;
pub mod handlers;

use crate::providers::Provider;
use crate::utils::quiet_hours::{Clock, SystemClock};
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use handlers::{Echo, SendSmsPayload, SendSmsResponse};

/// Shared state for gateway handlers.
pub struct AppState<P: Provider> {
    pub config: Arc<GatewayConfig>,
    /// Live provider; `None` when only mock sends are possible.
    pub provider: Option<P>,
    pub clock: Arc<dyn Clock>,
}

impl<P: Provider> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            provider: self.provider.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<P: Provider> AppState<P> {
    /// State backed by the wall clock.
    pub fn new(config: GatewayConfig, provider: Option<P>) -> Self {
        Self {
            config: Arc::new(config),
            provider,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for quiet-hours checks.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }
}

/// Build the gateway router.
pub fn router<P: Provider>(state: AppState<P>) -> Router {
    Router::new()
        .route("/", get(handlers::root::<P>))
        .route("/healthz", get(handlers::healthz))
        .route(
            "/send-sms",
            get(handlers::probe).post(handlers::send_sms::<P>),
        )
        .route(
            "/webhooks/n2p",
            get(handlers::probe).post(handlers::n2p_webhook),
        )
        .route(
            "/webhooks/dp",
            get(handlers::probe).post(handlers::dp_webhook),
        )
        .route(
            "/webhooks/uninstalled",
            get(handlers::probe).post(handlers::uninstalled_webhook),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}
