//! Raw transport response.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

use super::StatusCode;

/// A response exactly as the transport received it.
///
/// Non-2xx statuses are represented here too; classification happens in
/// the client, not the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers, lower-cased names.
    pub headers: HashMap<String, String>,
    /// Response body bytes.
    pub body: Vec<u8>,
    /// Time from send to last body byte.
    pub duration: Duration,
}

impl RawResponse {
    /// Creates a new response.
    #[must_use]
    pub fn new(
        status: impl Into<StatusCode>,
        headers: HashMap<String, String>,
        body: Vec<u8>,
        duration: Duration,
    ) -> Self {
        Self {
            status: status.into(),
            headers,
            body,
            duration,
        }
    }

    /// Creates a response carrying a JSON body.
    #[must_use]
    pub fn json(status: impl Into<StatusCode>, body: &Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        Self::new(status, headers, body.to_string().into_bytes(), Duration::ZERO)
    }

    /// Returns the Content-Type header, if present.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str())
    }

    /// Parses the body as JSON.
    ///
    /// An empty body yields `None`. A body that is not valid JSON is kept
    /// as a JSON string so no payload is lost.
    #[must_use]
    pub fn json_body(&self) -> Option<Value> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return None;
        }
        serde_json::from_slice(&self.body).map_or_else(
            |_| Some(Value::String(String::from_utf8_lossy(&self.body).into_owned())),
            Some,
        )
    }
}
