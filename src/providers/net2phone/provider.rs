//! [`Provider`] implementation for the net2phone client.

use super::client::Net2Phone;
use super::errors::{Net2PhoneError, Result};
use crate::providers::traits::Provider;
use crate::types::{SendResult, SmsRequest};

/// Name reported in gateway responses.
pub const PROVIDER_NAME: &str = "net2phone";

impl Provider for Net2Phone {
    type Error = Net2PhoneError;

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn send_sms(&self, request: &SmsRequest) -> Result<SendResult> {
        Net2Phone::send_sms(self, request).await
    }
}
