//! Logout use case.

use std::sync::Arc;

use tracing::info;

use crate::ports::{SessionStore, SessionStoreError};

/// Use case for ending the local session.
///
/// Only the stored tokens are removed; no server call is made.
pub struct Logout {
    session: Arc<dyn SessionStore>,
}

impl Logout {
    /// Creates a new `Logout` use case.
    #[must_use]
    pub const fn new(session: Arc<dyn SessionStore>) -> Self {
        Self { session }
    }

    /// Removes both tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn execute(&self) -> Result<(), SessionStoreError> {
        self.session.clear().await?;
        info!("Signed out");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::MemorySession;
    use rental_admin_domain::SessionKey;

    #[tokio::test]
    async fn test_logout_clears_tokens() {
        let session = MemorySession::with(Some("a"), Some("r"));
        let logout = Logout::new(Arc::clone(&session) as Arc<dyn SessionStore>);

        logout.execute().await.unwrap();

        assert_eq!(session.value(SessionKey::AccessToken), None);
        assert_eq!(session.value(SessionKey::RefreshToken), None);
    }

    #[tokio::test]
    async fn test_logout_without_session_is_ok() {
        let session = MemorySession::with(None, None);
        let logout = Logout::new(session);

        assert!(logout.execute().await.is_ok());
    }
}
