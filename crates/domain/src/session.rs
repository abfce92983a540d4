//! Session credentials and the keys they are stored under.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Keys understood by session storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SessionKey {
    /// The bearer access token.
    #[serde(rename = "accessToken")]
    AccessToken,
    /// The refresh token; only ever sent to the refresh endpoint.
    #[serde(rename = "refreshToken")]
    RefreshToken,
}

impl SessionKey {
    /// Both keys, in storage order.
    pub const ALL: [Self; 2] = [Self::AccessToken, Self::RefreshToken];

    /// Returns the storage key name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AccessToken => "accessToken",
            Self::RefreshToken => "refreshToken",
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accessToken" => Ok(Self::AccessToken),
            "refreshToken" => Ok(Self::RefreshToken),
            other => Err(DomainError::UnknownSessionKey(other.to_string())),
        }
    }
}

/// Tokens of an authenticated session.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCredentials {
    /// Bearer token attached to every request.
    pub access_token: String,
    /// Token exchanged for a new access token on 401.
    pub refresh_token: String,
}

impl SessionCredentials {
    /// Creates credentials from both tokens.
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

impl fmt::Debug for SessionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredentials")
            .field("access_token", &token_preview(&self.access_token))
            .field("refresh_token", &token_preview(&self.refresh_token))
            .finish()
    }
}

/// Shortens a token for logs (first 8 chars + ...).
#[must_use]
pub fn token_preview(token: &str) -> String {
    if token.chars().count() > 12 {
        let head: String = token.chars().take(8).collect();
        format!("{head}...")
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_key_names() {
        assert_eq!(SessionKey::AccessToken.as_str(), "accessToken");
        assert_eq!(SessionKey::RefreshToken.to_string(), "refreshToken");
        assert_eq!("refreshToken".parse::<SessionKey>(), Ok(SessionKey::RefreshToken));
        assert!("token".parse::<SessionKey>().is_err());
    }

    #[test]
    fn test_debug_hides_tokens() {
        let credentials = SessionCredentials::new("eyJhbGciOiJIUzI1NiJ9.payload", "short");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("eyJhbGci..."));
        assert!(!debug.contains("payload"));
        assert!(!debug.contains("short"));
    }
}
