//! Session storage port
//!
//! A persistent key-value store holding the access and refresh tokens.

use async_trait::async_trait;
use rental_admin_domain::{SessionCredentials, SessionKey};

/// Errors that can occur during session storage operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Key-value store for session tokens.
///
/// Readers must always see the latest written value; implementations do
/// not cache across calls.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Reads a value.
    async fn get(&self, key: SessionKey) -> Result<Option<String>, SessionStoreError>;

    /// Writes a value.
    async fn set(&self, key: SessionKey, value: &str) -> Result<(), SessionStoreError>;

    /// Removes a value. Removing a missing key is not an error.
    async fn remove(&self, key: SessionKey) -> Result<(), SessionStoreError>;

    /// Returns both tokens, or `None` unless both are present.
    async fn credentials(&self) -> Result<Option<SessionCredentials>, SessionStoreError> {
        let access_token = self.get(SessionKey::AccessToken).await?;
        let refresh_token = self.get(SessionKey::RefreshToken).await?;
        Ok(access_token
            .zip(refresh_token)
            .map(|(access, refresh)| SessionCredentials::new(access, refresh)))
    }

    /// Stores both tokens.
    async fn store_credentials(
        &self,
        credentials: &SessionCredentials,
    ) -> Result<(), SessionStoreError> {
        self.set(SessionKey::AccessToken, &credentials.access_token)
            .await?;
        self.set(SessionKey::RefreshToken, &credentials.refresh_token)
            .await
    }

    /// Removes both tokens.
    async fn clear(&self) -> Result<(), SessionStoreError> {
        for key in SessionKey::ALL {
            self.remove(key).await?;
        }
        Ok(())
    }
}
