//! # n2p-relay
//!
//! A thin relay between a CRM and the net2phone SMS API.
//!
//! Inbound CRM webhooks are logged and acknowledged. Outbound SMS requests
//! are validated (US E.164 recipients only), gated by a quiet-hours window
//! in US Eastern time, decorated with a brand tag and opt-out notice, and
//! forwarded to net2phone using an OAuth2 client-credentials token that is
//! cached and refreshed on expiry or rejection.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use n2p_relay::{AppConfig, AppState, Net2Phone, gateway};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::from_env()?;
//!     let provider = config.provider.clone().map(Net2Phone::new).transpose()?;
//!
//!     let app = gateway::router(AppState::new(config.gateway, provider));
//!     let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! gateway::router ── POST /send-sms
//!         │             validate → quiet hours → decorate
//!         ▼
//!     Provider          (trait: Net2Phone, or a fake in tests)
//!         │
//!         ▼
//!     Net2Phone         token cache + 401 refresh
//!         │
//!         ▼
//!  transport retry      (backon: connect errors, 429/5xx)
//! ```
//!
//! ## Features
//!
//! - `otel` - mark successful provider spans with OpenTelemetry status

pub mod config;
pub mod errors;
pub mod gateway;
pub mod providers;
pub mod types;
pub mod utils;

// Re-export commonly used types at the crate root
pub use config::{AppConfig, ConfigError};
pub use errors::RetryableError;
pub use gateway::{AppState, GatewayConfig, GatewayError};
pub use providers::Provider;
pub use providers::net2phone::{Net2Phone, Net2PhoneConfig, Net2PhoneError};
pub use types::{SendResult, SmsRequest};
pub use utils::phone::is_valid_us_e164;
pub use utils::quiet_hours::{Clock, FixedClock, SystemClock, within_quiet_hours};
pub use utils::retry::RetryConfig;
pub use utils::text::decorate_text;
