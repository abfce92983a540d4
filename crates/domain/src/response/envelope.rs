//! The normalized `{ success, data, message, errors }` envelope.
//!
//! The admin API answers some endpoints with an already wrapped envelope
//! and others with the bare payload. [`ResponseBody`] tells the two apart
//! once, at the transport boundary, so callers always see an
//! [`ApiResponse`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key whose presence marks a body as already wrapped.
pub const SUCCESS_KEY: &str = "success";

/// Normalized response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T = Value> {
    /// Whether the call succeeded.
    pub success: bool,
    /// Payload; `None` serializes as `null`.
    pub data: Option<T>,
    /// Human-readable message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Structured field errors, usually `{ field: [messages] }`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
}

impl<T> ApiResponse<T> {
    /// Creates a failed envelope.
    #[must_use]
    pub const fn failure(message: String, errors: Option<Value>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            errors,
        }
    }

    /// Consumes the envelope and returns the payload.
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

/// A success body, classified by shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// An object that already carries a `success` field.
    Wrapped(Map<String, Value>),
    /// Any other payload, including an absent body (`null`).
    Raw(Value),
}

impl ResponseBody {
    /// Classifies a parsed body.
    ///
    /// Arrays, scalars and an absent body are wrapped as well, not only
    /// objects, so every success decodes through the same envelope.
    #[must_use]
    pub fn classify(body: Option<Value>) -> Self {
        match body {
            Some(Value::Object(map)) if map.contains_key(SUCCESS_KEY) => Self::Wrapped(map),
            Some(other) => Self::Raw(other),
            None => Self::Raw(Value::Null),
        }
    }

    /// Returns the normalized JSON envelope.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Wrapped(map) => Value::Object(map),
            Self::Raw(data) => {
                let mut map = Map::new();
                map.insert(SUCCESS_KEY.to_string(), Value::Bool(true));
                map.insert("data".to_string(), data);
                Value::Object(map)
            }
        }
    }

    /// Decodes the normalized envelope into a typed [`ApiResponse`].
    ///
    /// # Errors
    ///
    /// Returns an error if the payload does not match `T`.
    pub fn into_envelope<T: DeserializeOwned>(self) -> Result<ApiResponse<T>, serde_json::Error> {
        serde_json::from_value(self.into_value())
    }
}

/// Normalizes a success body into the envelope shape.
///
/// Idempotent: normalizing an already normalized body returns it unchanged.
#[must_use]
pub fn normalize_success(body: Option<Value>) -> Value {
    ResponseBody::classify(body).into_value()
}
