//! In-memory session store.

use std::collections::HashMap;

use async_trait::async_trait;
use rental_admin_application::ports::{SessionStore, SessionStoreError};
use rental_admin_domain::{SessionCredentials, SessionKey};
use tokio::sync::RwLock;

/// Session store that lives for the duration of the process.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    values: RwLock<HashMap<SessionKey, String>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given credentials.
    #[must_use]
    pub fn with_credentials(credentials: &SessionCredentials) -> Self {
        let mut values = HashMap::new();
        values.insert(SessionKey::AccessToken, credentials.access_token.clone());
        values.insert(SessionKey::RefreshToken, credentials.refresh_token.clone());
        Self {
            values: RwLock::new(values),
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: SessionKey) -> Result<Option<String>, SessionStoreError> {
        Ok(self.values.read().await.get(&key).cloned())
    }

    async fn set(&self, key: SessionKey, value: &str) -> Result<(), SessionStoreError> {
        self.values.write().await.insert(key, value.to_string());
        Ok(())
    }

    async fn remove(&self, key: SessionKey) -> Result<(), SessionStoreError> {
        self.values.write().await.remove(&key);
        Ok(())
    }
}
