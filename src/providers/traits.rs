//! Provider trait definition.

use crate::errors::RetryableError;
use crate::types::{SendResult, SmsRequest};
use std::error::Error as StdError;
use std::future::Future;

/// Core trait that SMS providers implement.
///
/// The gateway is generic over this trait, so any transport (the net2phone
/// client, or a fake in tests) can sit behind `POST /send-sms`.
///
/// # Note on async methods
///
/// All async methods in this trait return `Send` futures, making them
/// compatible with multi-threaded executors.
///
/// # Example
///
/// ```rust,ignore
/// use n2p_relay::{Provider, SendResult, SmsRequest};
///
/// #[derive(Clone)]
/// struct EchoProvider;
///
/// impl Provider for EchoProvider {
///     type Error = MyError;
///
///     fn name(&self) -> &'static str {
///         "echo"
///     }
///
///     async fn send_sms(&self, request: &SmsRequest) -> Result<SendResult, Self::Error> {
///         Ok(SendResult::acknowledged())
///     }
/// }
/// ```
#[allow(async_fn_in_trait)]
pub trait Provider: Send + Sync + Clone + 'static {
    /// Error type returned by provider operations.
    type Error: StdError + RetryableError + Send + Sync + 'static;

    /// Short identifier reported back to callers (e.g. `"net2phone"`).
    fn name(&self) -> &'static str;

    /// Submit one SMS.
    fn send_sms(
        &self,
        request: &SmsRequest,
    ) -> impl Future<Output = Result<SendResult, Self::Error>> + Send;
}
