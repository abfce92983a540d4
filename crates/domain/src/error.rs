//! Domain error types

use thiserror::Error;

use crate::request::HttpMethod;

/// Domain-level errors that can occur while building requests or
/// interpreting responses.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The request path is empty or malformed.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// A body was attached to a method that does not carry one.
    #[error("{0} requests do not carry a body")]
    UnexpectedBody(HttpMethod),

    /// A session key name is not recognized.
    #[error("unknown session key: {0}")]
    UnknownSessionKey(String),

    /// A page request is out of range.
    #[error("invalid page request: {0}")]
    InvalidPage(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
