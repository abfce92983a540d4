//! Navigation port

/// Sends the user back to the login entry point.
///
/// Invoked once per unrecoverable authentication failure, after the
/// session has been cleared.
pub trait Navigator: Send + Sync {
    /// Redirects to the login entry point.
    fn redirect_to_login(&self);
}
