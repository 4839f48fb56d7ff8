//! net2phone provider implementation.
//!
//! Authenticates with the OAuth2 client-credentials grant and submits SMS
//! through the net2phone REST API.
//!
//! # Example
//!
//! ```rust,ignore
//! use n2p_relay::providers::net2phone::{Net2Phone, Net2PhoneConfig};
//! use n2p_relay::SmsRequest;
//!
//! let config = Net2PhoneConfig::builder("client-id", "client-secret")
//!     .scope("messaging")
//!     .build()?;
//! let client = Net2Phone::new(config)?;
//!
//! // The first call fetches a token; later calls reuse it until it is
//! // within 30 seconds of expiry.
//! let result = client.send_sms(&SmsRequest::new("+15551234567", "Hello")).await?;
//! ```

pub mod client;
pub mod config;
pub mod errors;
pub mod provider;
pub mod token;

// Re-export commonly used types
pub use client::{Net2Phone, Net2PhoneClientBuilder};
pub use config::{Net2PhoneConfig, Net2PhoneConfigBuilder};
pub use errors::{ErrorDetail, Net2PhoneError};
pub use provider::PROVIDER_NAME;
pub use token::CachedToken;
