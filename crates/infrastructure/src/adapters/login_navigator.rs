//! Navigator that announces login redirects.

use rental_admin_application::ports::Navigator;
use tokio::sync::watch;
use tracing::warn;

use crate::config::DEFAULT_LOGIN_PATH;

/// Navigator for headless hosts.
///
/// Each redirect is logged and bumps a counter published on a watch
/// channel, so the host can show its login prompt.
#[derive(Debug)]
pub struct LoginNavigator {
    login_path: String,
    redirects: watch::Sender<u64>,
}

impl LoginNavigator {
    /// Creates a navigator pointing at `login_path`.
    #[must_use]
    pub fn new(login_path: impl Into<String>) -> Self {
        let (redirects, _) = watch::channel(0);
        Self {
            login_path: login_path.into(),
            redirects,
        }
    }

    /// Returns the login entry point.
    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Subscribes to the redirect counter.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.redirects.subscribe()
    }

    /// Returns how many redirects happened so far.
    #[must_use]
    pub fn redirect_count(&self) -> u64 {
        *self.redirects.borrow()
    }
}

impl Default for LoginNavigator {
    fn default() -> Self {
        Self::new(DEFAULT_LOGIN_PATH)
    }
}

impl Navigator for LoginNavigator {
    fn redirect_to_login(&self) {
        warn!(login_path = %self.login_path, "Session ended, redirecting to login");
        self.redirects.send_modify(|count| *count += 1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_counts_redirects() {
        let navigator = LoginNavigator::default();
        assert_eq!(navigator.login_path(), "/login");
        assert_eq!(navigator.redirect_count(), 0);

        navigator.redirect_to_login();
        navigator.redirect_to_login();

        assert_eq!(navigator.redirect_count(), 2);
    }

    #[tokio::test]
    async fn test_subscribers_are_notified() {
        let navigator = LoginNavigator::new("/signin");
        let mut rx = navigator.subscribe();

        navigator.redirect_to_login();

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 1);
    }
}
