//! Transport port

use std::future::Future;

use rental_admin_domain::{RawResponse, RequestEnvelope};

/// Errors raised when no HTTP response is available at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request did not complete within the configured timeout.
    #[error("timeout of {timeout_ms}ms exceeded")]
    Timeout {
        /// Timeout that elapsed, in milliseconds.
        timeout_ms: u64,
    },

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The final URL could not be built.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request body could not be encoded.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Returns true for timeouts.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Port for sending requests to the admin API.
///
/// Implementations resolve `request.path` against their base URL, send
/// the request with its headers and JSON body, and return the response
/// whatever its status. Only failures without a response are errors.
pub trait Transport: Send + Sync {
    /// Sends a request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, timeout, or an unbuildable
    /// request. Non-2xx statuses are not errors at this level.
    fn send(
        &self,
        request: &RequestEnvelope,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}
