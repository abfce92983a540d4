//! Payloads of the authentication endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::session::SessionCredentials;

/// Path of the login endpoint, relative to the API base URL.
pub const LOGIN_PATH: &str = "/auth/login";

/// Path of the refresh endpoint, relative to the API base URL.
pub const REFRESH_PATH: &str = "/auth/refresh";

/// Body of `POST /auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl LoginRequest {
    /// Creates a login request.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Successful login payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed-in user profile, as returned by the server.
    #[serde(default)]
    pub user: Value,
    /// Bearer access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Token type, usually "bearer".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

impl LoginResponse {
    /// Returns the session credentials carried by this response.
    #[must_use]
    pub fn credentials(&self) -> SessionCredentials {
        SessionCredentials::new(self.access_token.clone(), self.refresh_token.clone())
    }
}

/// Body of `POST /auth/refresh`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    /// The stored refresh token.
    pub refresh_token: String,
}

impl std::fmt::Debug for RefreshTokenRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshTokenRequest")
            .field("refresh_token", &"***")
            .finish()
    }
}

/// Successful refresh payload. Only the access token rotates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenResponse {
    /// New bearer access token.
    pub access_token: String,
    /// Token type, usually "bearer".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_refresh_request_wire_shape() {
        let request = RefreshTokenRequest {
            refresh_token: "R1".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"refresh_token": "R1"})
        );
    }

    #[test]
    fn test_refresh_response_ignores_extra_fields() {
        let response: RefreshTokenResponse =
            serde_json::from_value(json!({"access_token": "A2", "expires_in": 1800})).unwrap();
        assert_eq!(response.access_token, "A2");
        assert_eq!(response.token_type, None);
    }

    #[test]
    fn test_login_response_credentials() {
        let response: LoginResponse = serde_json::from_value(json!({
            "user": {"id": "u1", "email": "admin@example.com"},
            "access_token": "A1",
            "refresh_token": "R1",
            "token_type": "bearer"
        }))
        .unwrap();

        assert_eq!(response.credentials(), SessionCredentials::new("A1", "R1"));
        assert_eq!(response.user["email"], "admin@example.com");
    }

    #[test]
    fn test_login_request_debug_hides_password() {
        let request = LoginRequest::new("admin@example.com", "hunter2");
        assert!(!format!("{request:?}").contains("hunter2"));
    }
}
