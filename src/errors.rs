//! Error classification shared by the provider client and the gateway.

/// Trait for errors that can be classified as transient or permanent.
///
/// Transient errors are recovered by the transport retry loop in the
/// provider client (bounded exponential backoff). Permanent errors are
/// surfaced to the caller as-is.
///
/// # Examples
///
/// ```rust
/// use n2p_relay::RetryableError;
///
/// enum MyError {
///     ConnectionReset,     // Retry
///     ServiceUnavailable,  // Retry
///     BadCredentials,      // Don't retry
/// }
///
/// impl RetryableError for MyError {
///     fn is_retryable(&self) -> bool {
///         matches!(self, MyError::ConnectionReset | MyError::ServiceUnavailable)
///     }
/// }
///
/// assert!(MyError::ConnectionReset.is_retryable());
/// assert!(!MyError::BadCredentials.is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error represents a transient failure
    /// that might succeed when the same request is sent again.
    ///
    /// Examples: connection failures, timeouts, 429 and 5xx gateway statuses.
    fn is_retryable(&self) -> bool;
}
