//! Application error types

use std::collections::BTreeMap;

use rental_admin_domain::{DomainError, ErrorBody, StatusCode, response::status_message};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::ports::{SessionStoreError, TransportError};

/// Broad classification of a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// No response was received.
    Transport,
    /// The request timed out.
    Timeout,
    /// A 4xx other than 401 and 403.
    Client,
    /// A 401 that was not recovered.
    Unauthorized,
    /// A 403.
    Forbidden,
    /// A 5xx.
    Server,
    /// A 401 arrived and no refresh token was stored.
    SessionExpired,
    /// The refresh call failed.
    RefreshFailed,
    /// A 2xx body did not match the expected type.
    Decode,
    /// The session store failed.
    Session,
    /// The request was rejected before it was sent.
    InvalidRequest,
}

impl ApiErrorKind {
    /// Classifies a non-2xx status.
    #[must_use]
    pub const fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            code if code >= 500 => Self::Server,
            _ => Self::Client,
        }
    }
}

/// Error returned by every client operation.
///
/// The body always carries `success: false` and a human-readable
/// `message`, plus any fields of the server's own error body.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", .body.message())]
pub struct ApiError {
    kind: ApiErrorKind,
    status: Option<StatusCode>,
    body: ErrorBody,
}

impl ApiError {
    /// Creates an error from its parts.
    #[must_use]
    pub const fn new(kind: ApiErrorKind, status: Option<StatusCode>, body: ErrorBody) -> Self {
        Self { kind, status, body }
    }

    /// Builds the error for a non-2xx response.
    #[must_use]
    pub fn from_response(status: StatusCode, body: Option<&Value>) -> Self {
        let fallback = status_message(status);
        Self::new(
            ApiErrorKind::from_status(status),
            Some(status),
            ErrorBody::from_response(body, Some(&fallback)),
        )
    }

    /// Builds the error for a call that produced no response.
    #[must_use]
    pub fn transport(error: &TransportError) -> Self {
        let kind = if error.is_timeout() {
            ApiErrorKind::Timeout
        } else {
            ApiErrorKind::Transport
        };
        Self::new(kind, None, ErrorBody::from_message(error.to_string()))
    }

    /// Builds the error for a session store failure.
    #[must_use]
    pub fn session(error: &SessionStoreError) -> Self {
        Self::new(
            ApiErrorKind::Session,
            None,
            ErrorBody::from_message(format!("session storage failed: {error}")),
        )
    }

    /// Builds the error for a 2xx body that could not be decoded.
    #[must_use]
    pub fn decode(error: &serde_json::Error) -> Self {
        Self::decode_message(format!("failed to decode response: {error}"))
    }

    /// Builds a decode error with a custom message.
    #[must_use]
    pub fn decode_message(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Decode, None, ErrorBody::from_message(message))
    }

    /// Builds the error for a request rejected before sending.
    #[must_use]
    pub fn invalid_request(error: &DomainError) -> Self {
        Self::new(
            ApiErrorKind::InvalidRequest,
            None,
            ErrorBody::from_message(error.to_string()),
        )
    }

    /// Builds the error for a body that could not be serialized.
    #[must_use]
    pub fn encode(error: &serde_json::Error) -> Self {
        Self::new(
            ApiErrorKind::InvalidRequest,
            None,
            ErrorBody::from_message(format!("failed to encode request body: {error}")),
        )
    }

    /// Returned to waiters whose refresh leader went away before settling.
    #[must_use]
    pub fn refresh_aborted() -> Self {
        Self::new(
            ApiErrorKind::RefreshFailed,
            None,
            ErrorBody::from_message("token refresh aborted"),
        )
    }

    /// Re-labels the error, keeping status and body.
    #[must_use]
    pub const fn with_kind(mut self, kind: ApiErrorKind) -> Self {
        self.kind = kind;
        self
    }

    /// Returns the classification.
    #[must_use]
    pub const fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    /// Returns the HTTP status, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Returns the merged error body.
    #[must_use]
    pub const fn body(&self) -> &ErrorBody {
        &self.body
    }

    /// Returns the normalized message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.body.message()
    }

    /// Returns the `errors` member, if any.
    #[must_use]
    pub fn errors(&self) -> Option<&Value> {
        self.body.errors()
    }

    /// Returns `errors` as field-level validation messages.
    #[must_use]
    pub fn field_errors(&self) -> Option<BTreeMap<String, Vec<String>>> {
        self.body.field_errors()
    }

    /// True when the session ended and the user was sent to login.
    #[must_use]
    pub const fn is_session_ended(&self) -> bool {
        matches!(
            self.kind,
            ApiErrorKind::SessionExpired | ApiErrorKind::RefreshFailed
        )
    }
}

/// Result type alias for client operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_kind_from_status() {
        assert_eq!(ApiErrorKind::from_status(StatusCode(400)), ApiErrorKind::Client);
        assert_eq!(ApiErrorKind::from_status(StatusCode(401)), ApiErrorKind::Unauthorized);
        assert_eq!(ApiErrorKind::from_status(StatusCode(403)), ApiErrorKind::Forbidden);
        assert_eq!(ApiErrorKind::from_status(StatusCode(422)), ApiErrorKind::Client);
        assert_eq!(ApiErrorKind::from_status(StatusCode(503)), ApiErrorKind::Server);
    }

    #[test]
    fn test_from_response_prefers_detail() {
        let error = ApiError::from_response(StatusCode(404), Some(&json!({"detail": "Not found"})));

        assert_eq!(error.kind(), ApiErrorKind::Client);
        assert_eq!(error.status(), Some(StatusCode(404)));
        assert_eq!(error.message(), "Not found");
        assert_eq!(error.to_string(), "Not found");
        assert_eq!(error.body().get("detail"), Some(&json!("Not found")));
        assert_eq!(error.body().get("success"), Some(&json!(false)));
    }

    #[test]
    fn test_from_response_without_body_uses_status_message() {
        let error = ApiError::from_response(StatusCode(500), None);

        assert_eq!(error.kind(), ApiErrorKind::Server);
        assert_eq!(error.message(), "Request failed with status code 500");
    }

    #[test]
    fn test_transport_timeout() {
        let error = ApiError::transport(&TransportError::Timeout { timeout_ms: 10_000 });

        assert_eq!(error.kind(), ApiErrorKind::Timeout);
        assert_eq!(error.status(), None);
        assert_eq!(error.message(), "timeout of 10000ms exceeded");
    }

    #[test]
    fn test_transport_connection_failure() {
        let error = ApiError::transport(&TransportError::ConnectionFailed("refused".to_string()));

        assert_eq!(error.kind(), ApiErrorKind::Transport);
        assert_eq!(error.message(), "connection failed: refused");
    }

    #[test]
    fn test_with_kind_keeps_body() {
        let error = ApiError::from_response(StatusCode(401), Some(&json!({"detail": "expired"})))
            .with_kind(ApiErrorKind::SessionExpired);

        assert_eq!(error.kind(), ApiErrorKind::SessionExpired);
        assert_eq!(error.message(), "expired");
        assert!(error.is_session_ended());
    }

    #[test]
    fn test_field_errors_passthrough() {
        let error = ApiError::from_response(
            StatusCode(422),
            Some(&json!({"message": "Invalid", "errors": {"email": ["taken"]}})),
        );

        let fields = error.field_errors().unwrap();
        assert_eq!(fields["email"], vec!["taken".to_string()]);
    }
}
