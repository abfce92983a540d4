//! Outgoing request descriptor

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::header::{AUTHORIZATION, REQUEST_ID};
use super::{Headers, HttpMethod};
use crate::error::{DomainError, DomainResult};

/// Everything needed to (re)issue a request against the admin API.
///
/// The `retried` flag is set once the request has been resubmitted after
/// an access-token refresh, so a second 401 is reported instead of
/// triggering another refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    /// Identifier of the logical request (stable across resubmissions).
    pub id: Uuid,
    /// HTTP method
    pub method: HttpMethod,
    /// Path relative to the API base URL, or an absolute URL
    pub path: String,
    /// Query parameters, in insertion order
    #[serde(default)]
    pub query: Vec<(String, String)>,
    /// Request headers
    #[serde(default)]
    pub headers: Headers,
    /// JSON body, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    /// Whether this request was already resubmitted after a refresh
    #[serde(default)]
    pub retried: bool,
}

impl RequestEnvelope {
    /// Creates a request with the given method and path.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Headers::new(),
            body: None,
            retried: false,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a POST request with a JSON body.
    #[must_use]
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Post, path).with_body(body)
    }

    /// Creates a PUT request with a JSON body.
    #[must_use]
    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Put, path).with_body(body)
    }

    /// Creates a PATCH request with a JSON body.
    #[must_use]
    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Patch, path).with_body(body)
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Sets a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// Sets `Authorization: Bearer <token>`.
    pub fn set_bearer(&mut self, token: &str) {
        self.headers.set(AUTHORIZATION, format!("Bearer {token}"));
    }

    /// Returns the bearer token currently attached, if any.
    #[must_use]
    pub fn bearer(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|value| value.strip_prefix("Bearer "))
    }

    /// Replaces the correlation id header with a fresh UUID and returns it.
    pub fn assign_request_id(&mut self) -> Uuid {
        let request_id = Uuid::new_v4();
        self.headers.set(REQUEST_ID, request_id.to_string());
        request_id
    }

    /// Returns the correlation id currently attached, if any.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers.get(REQUEST_ID)
    }

    /// Marks the request as resubmitted after a refresh.
    pub const fn mark_retried(&mut self) {
        self.retried = true;
    }

    /// Returns true if the path is an absolute URL rather than an API path.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.path.starts_with("http://") || self.path.starts_with("https://")
    }

    /// Checks the path is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is blank or contains whitespace.
    pub fn validate(&self) -> DomainResult<()> {
        if self.path.trim().is_empty() {
            return Err(DomainError::InvalidPath("path is required".to_string()));
        }
        if self.path.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidPath(format!(
                "path must not contain whitespace: {}",
                self.path
            )));
        }
        if self.body.is_some() && !self.method.has_body() {
            return Err(DomainError::UnexpectedBody(self.method));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_constructors_set_method() {
        assert_eq!(RequestEnvelope::get("/orders").method, HttpMethod::Get);
        assert_eq!(
            RequestEnvelope::post("/orders", json!({})).method,
            HttpMethod::Post
        );
        assert_eq!(RequestEnvelope::delete("/orders/1").method, HttpMethod::Delete);
        assert!(!RequestEnvelope::get("/orders").retried);
    }

    #[test]
    fn test_bearer_roundtrip() {
        let mut request = RequestEnvelope::get("/orders");
        assert_eq!(request.bearer(), None);

        request.set_bearer("A1");
        assert_eq!(request.headers.get("authorization"), Some("Bearer A1"));
        assert_eq!(request.bearer(), Some("A1"));

        request.set_bearer("A2");
        assert_eq!(request.bearer(), Some("A2"));
        assert_eq!(request.headers.len(), 1);
    }

    #[test]
    fn test_request_id_is_fresh_each_time() {
        let mut request = RequestEnvelope::get("/orders");
        let first = request.assign_request_id();
        let second = request.assign_request_id();

        assert_ne!(first, second);
        assert_eq!(request.request_id(), Some(second.to_string().as_str()));
    }

    #[test]
    fn test_validate() {
        assert!(RequestEnvelope::get("/orders").validate().is_ok());
        assert!(RequestEnvelope::get("  ").validate().is_err());
        assert!(RequestEnvelope::get("/orders list").validate().is_err());
        assert_eq!(
            RequestEnvelope::get("/orders").with_body(json!({})).validate(),
            Err(DomainError::UnexpectedBody(HttpMethod::Get))
        );
    }

    #[test]
    fn test_is_absolute() {
        assert!(RequestEnvelope::get("https://other.example.com/x").is_absolute());
        assert!(!RequestEnvelope::get("/orders").is_absolute());
    }
}
