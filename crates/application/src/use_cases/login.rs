//! Login use case.

use std::sync::Arc;

use rental_admin_domain::{LOGIN_PATH, LoginRequest, LoginResponse, RequestEnvelope};
use tracing::info;

use crate::client::AuthenticatedClient;
use crate::error::{ApiError, ApiResult};
use crate::ports::Transport;

/// Input for signing in.
#[derive(Debug, Clone)]
pub struct LoginInput {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Use case for signing in and storing the session tokens.
pub struct Login<T: Transport> {
    client: Arc<AuthenticatedClient<T>>,
}

impl<T: Transport> Login<T> {
    /// Creates a new `Login` use case.
    #[must_use]
    pub const fn new(client: Arc<AuthenticatedClient<T>>) -> Self {
        Self { client }
    }

    /// Posts the credentials and stores both returned tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the credentials, the
    /// response carries no tokens, or the tokens cannot be stored.
    pub async fn execute(&self, input: LoginInput) -> ApiResult<LoginResponse> {
        let body = serde_json::to_value(LoginRequest::new(input.email, input.password))
            .map_err(|e| ApiError::encode(&e))?;
        let mut request = RequestEnvelope::post(LOGIN_PATH, body);
        // A 401 here means bad credentials, not an expired access token.
        request.mark_retried();

        let login: LoginResponse = self
            .client
            .send(request)
            .await?
            .into_data()
            .ok_or_else(|| ApiError::decode_message("login response carried no tokens"))?;

        self.client
            .session()
            .store_credentials(&login.credentials())
            .await
            .map_err(|e| ApiError::session(&e))?;
        info!("Signed in");

        Ok(login)
    }
}
