//! Error body: original server fields merged with the normalized envelope.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ApiResponse, StatusCode};

/// Fallback message when nothing better is known.
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

/// Body carried by every failed call.
///
/// Fields of the original response body survive (so callers reading
/// `detail` keep working); `success`, `data`, `message` and `errors` from
/// the normalized envelope override them on collision.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorBody(Map<String, Value>);

impl ErrorBody {
    /// Merges an original body with a normalized failure envelope.
    ///
    /// Only object bodies contribute fields. `errors` is written only when
    /// the envelope has some, so an original `errors` is never blanked.
    #[must_use]
    pub fn merge(original: Option<&Value>, normalized: ApiResponse<Value>) -> Self {
        let mut map = match original {
            Some(Value::Object(fields)) => fields.clone(),
            _ => Map::new(),
        };
        map.insert("success".to_string(), Value::Bool(normalized.success));
        map.insert("data".to_string(), normalized.data.unwrap_or(Value::Null));
        if let Some(message) = normalized.message {
            map.insert("message".to_string(), Value::String(message));
        }
        if let Some(errors) = normalized.errors {
            map.insert("errors".to_string(), errors);
        }
        Self(map)
    }

    /// Builds the error body for a failed response.
    ///
    /// `fallback` is the transport-level message used when the body has
    /// neither `detail` nor `message`.
    #[must_use]
    pub fn from_response(original: Option<&Value>, fallback: Option<&str>) -> Self {
        let message = extract_message(original, fallback);
        let errors = original
            .and_then(Value::as_object)
            .and_then(|fields| fields.get("errors"))
            .filter(|errors| !errors.is_null())
            .cloned();
        Self::merge(original, ApiResponse::failure(message, errors))
    }

    /// Builds an error body with no server payload.
    #[must_use]
    pub fn from_message(message: impl Into<String>) -> Self {
        Self::merge(None, ApiResponse::failure(message.into(), None))
    }

    /// Returns the normalized message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.0
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_ERROR_MESSAGE)
    }

    /// Returns the raw `errors` value, if any.
    #[must_use]
    pub fn errors(&self) -> Option<&Value> {
        self.0.get("errors")
    }

    /// Decodes `errors` as `{ field: [messages] }`.
    ///
    /// Returns `None` when absent or shaped differently.
    #[must_use]
    pub fn field_errors(&self) -> Option<BTreeMap<String, Vec<String>>> {
        self.errors()
            .and_then(|errors| serde_json::from_value(errors.clone()).ok())
    }

    /// Returns any field by name, original or normalized.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the normalized envelope view.
    #[must_use]
    pub fn envelope(&self) -> ApiResponse<Value> {
        ApiResponse {
            success: self.0.get("success").and_then(Value::as_bool).unwrap_or(false),
            data: self.0.get("data").filter(|data| !data.is_null()).cloned(),
            message: Some(self.message().to_string()),
            errors: self.errors().cloned(),
        }
    }

    /// Returns the underlying map.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the body and returns it as a JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Picks the message for a failed response.
///
/// Order: `detail`, `message`, the transport message, then
/// [`DEFAULT_ERROR_MESSAGE`]. Empty strings are skipped. A list-shaped
/// `detail` (FastAPI validation errors) is rendered from its `msg` entries.
#[must_use]
pub fn extract_message(original: Option<&Value>, fallback: Option<&str>) -> String {
    let fields = original.and_then(Value::as_object);
    fields
        .and_then(|f| f.get("detail"))
        .and_then(render_detail)
        .or_else(|| {
            fields
                .and_then(|f| f.get("message"))
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
        })
        .or_else(|| fallback.filter(|m| !m.is_empty()).map(str::to_string))
        .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string())
}

/// Message the transport would report for a non-2xx status.
#[must_use]
pub fn status_message(status: StatusCode) -> String {
    format!("Request failed with status code {}", status.as_u16())
}

fn render_detail(detail: &Value) -> Option<String> {
    match detail {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                Some(detail.to_string())
            } else {
                Some(messages.join("; "))
            }
        }
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_message_prefers_detail() {
        let body = json!({"detail": "Not authenticated", "message": "ignored"});
        assert_eq!(extract_message(Some(&body), Some("fallback")), "Not authenticated");
    }

    #[test]
    fn test_message_falls_back_in_order() {
        let body = json!({"message": "from message"});
        assert_eq!(extract_message(Some(&body), Some("fallback")), "from message");

        let body = json!({"other": 1});
        assert_eq!(extract_message(Some(&body), Some("fallback")), "fallback");

        assert_eq!(extract_message(Some(&body), None), DEFAULT_ERROR_MESSAGE);
        assert_eq!(
            extract_message(Some(&json!("plain text")), Some("")),
            DEFAULT_ERROR_MESSAGE
        );
    }

    #[test]
    fn test_validation_detail_is_rendered() {
        let body = json!({
            "detail": [
                {"loc": ["body", "name"], "msg": "field required"},
                {"loc": ["body", "sku"], "msg": "invalid sku"}
            ]
        });
        assert_eq!(
            extract_message(Some(&body), None),
            "field required; invalid sku"
        );
    }

    #[test]
    fn test_merge_preserves_original_fields() {
        let original = json!({"detail": "Category exists", "code": "DUPLICATE"});
        let body = ErrorBody::from_response(Some(&original), Some("Request failed"));

        assert_eq!(body.get("detail"), Some(&json!("Category exists")));
        assert_eq!(body.get("code"), Some(&json!("DUPLICATE")));
        assert_eq!(body.message(), "Category exists");
        assert_eq!(body.get("success"), Some(&json!(false)));
        assert_eq!(body.get("data"), Some(&Value::Null));
    }

    #[test]
    fn test_merge_normalized_fields_win_on_collision() {
        let original = json!({"success": true, "data": {"id": 1}, "message": "", "detail": "bad"});
        let body = ErrorBody::from_response(Some(&original), None);

        assert_eq!(
            body.into_value(),
            json!({"success": false, "data": null, "message": "bad", "detail": "bad"})
        );
    }

    #[test]
    fn test_merge_keeps_errors() {
        let original = json!({"message": "Validation failed", "errors": {"name": ["required"]}});
        let body = ErrorBody::from_response(Some(&original), None);

        let fields = body.field_errors().unwrap_or_default();
        assert_eq!(fields.get("name"), Some(&vec!["required".to_string()]));
        assert_eq!(body.envelope().errors, Some(json!({"name": ["required"]})));
    }

    #[test]
    fn test_merge_without_errors_adds_no_key() {
        let body = ErrorBody::from_response(Some(&json!({"detail": "x"})), None);
        assert!(body.errors().is_none());
        assert!(body.field_errors().is_none());
    }

    #[test]
    fn test_non_object_original_contributes_nothing() {
        let body = ErrorBody::from_response(Some(&json!("oops")), Some("Request failed"));
        assert_eq!(body.as_map().len(), 3);
        assert_eq!(body.message(), "Request failed");
    }

    #[test]
    fn test_status_message() {
        assert_eq!(
            status_message(StatusCode::new(404)),
            "Request failed with status code 404"
        );
    }
}
