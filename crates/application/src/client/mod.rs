//! Authenticated API client
//!
//! Wraps a [`Transport`] with bearer attachment, response normalization
//! and a single-flight refresh of the access token on 401.

mod refresh_gate;

pub use refresh_gate::{Entry, Follower, RefreshGate, RefreshGuard, RefreshOutcome};

use std::sync::Arc;

use rental_admin_domain::{
    ApiResponse, PageRequest, PaginatedResponse, REFRESH_PATH, RawResponse, RefreshTokenRequest,
    RefreshTokenResponse, RequestEnvelope, ResponseBody, SessionKey,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use crate::error::{ApiError, ApiErrorKind, ApiResult};
use crate::ports::{Navigator, SessionStore, Transport};

/// Client for the admin API.
///
/// Every call reads the stored access token, attaches it as a bearer
/// header and tags the request with a fresh `X-Request-ID`. A 401 on a
/// first attempt triggers at most one refresh across all concurrent
/// callers; the request is then resubmitted once with the new token.
pub struct AuthenticatedClient<T: Transport> {
    transport: Arc<T>,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    gate: RefreshGate,
    refresh_path: String,
}

impl<T: Transport> AuthenticatedClient<T> {
    /// Creates a client over the given transport, session store and navigator.
    pub fn new(
        transport: Arc<T>,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            transport,
            session,
            navigator,
            gate: RefreshGate::new(),
            refresh_path: REFRESH_PATH.to_string(),
        }
    }

    /// Overrides the refresh endpoint path.
    #[must_use]
    pub fn with_refresh_path(mut self, path: impl Into<String>) -> Self {
        self.refresh_path = path.into();
        self
    }

    /// Returns the session store.
    #[must_use]
    pub const fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// Returns true while an access-token refresh is in flight.
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.gate.is_refreshing()
    }

    /// Returns the number of requests parked behind the in-flight refresh.
    #[must_use]
    pub fn pending_refresh_waiters(&self) -> usize {
        self.gate.pending()
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for any non-2xx outcome.
    pub async fn get<D: DeserializeOwned>(&self, path: &str) -> ApiResult<ApiResponse<D>> {
        self.send(RequestEnvelope::get(path)).await
    }

    /// Sends a GET request with query parameters.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for any non-2xx outcome.
    pub async fn get_with_query<D: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ApiResult<ApiResponse<D>> {
        let request = query
            .iter()
            .fold(RequestEnvelope::get(path), |request, (name, value)| {
                request.with_query(*name, *value)
            });
        self.send(request).await
    }

    /// Fetches one page of a paginated collection.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for any non-2xx outcome.
    pub async fn get_page<D: DeserializeOwned>(
        &self,
        path: &str,
        page: PageRequest,
    ) -> ApiResult<ApiResponse<PaginatedResponse<D>>> {
        let mut request = RequestEnvelope::get(path);
        request.query.extend(page.query_pairs());
        self.send(request).await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for any non-2xx outcome.
    pub async fn post<D: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<ApiResponse<D>> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::encode(&e))?;
        self.send(RequestEnvelope::post(path, body)).await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for any non-2xx outcome.
    pub async fn put<D: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<ApiResponse<D>> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::encode(&e))?;
        self.send(RequestEnvelope::put(path, body)).await
    }

    /// Sends a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for any non-2xx outcome.
    pub async fn patch<D: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<ApiResponse<D>> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::encode(&e))?;
        self.send(RequestEnvelope::patch(path, body)).await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for any non-2xx outcome.
    pub async fn delete<D: DeserializeOwned>(&self, path: &str) -> ApiResult<ApiResponse<D>> {
        self.send(RequestEnvelope::delete(path)).await
    }

    /// Sends a request and decodes the normalized envelope.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for any non-2xx outcome, or when the
    /// envelope does not match `D`.
    pub async fn send<D: DeserializeOwned>(
        &self,
        request: RequestEnvelope,
    ) -> ApiResult<ApiResponse<D>> {
        self.execute(request)
            .await?
            .into_envelope()
            .map_err(|e| ApiError::decode(&e))
    }

    /// Sends a request and returns the normalized success body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for any non-2xx outcome.
    pub async fn execute(&self, mut request: RequestEnvelope) -> ApiResult<ResponseBody> {
        request
            .validate()
            .map_err(|e| ApiError::invalid_request(&e))?;

        // Taken before the token is read so a refresh that settles while
        // this request is in flight is seen by `recover`.
        let generation = self.gate.generation();
        let response = self.dispatch(&mut request).await?;
        if response.status.is_unauthorized() && !request.retried {
            return self.recover(request, &response, generation).await;
        }
        Self::classify(&request, &response)
    }

    /// Attaches the stored access token, if any, and sends.
    async fn dispatch(&self, request: &mut RequestEnvelope) -> ApiResult<RawResponse> {
        let token = self
            .session
            .get(SessionKey::AccessToken)
            .await
            .map_err(|e| ApiError::session(&e))?;
        if let Some(token) = token {
            request.set_bearer(&token);
        }
        self.transmit(request).await
    }

    /// Tags the request with a fresh id and hands it to the transport.
    async fn transmit(&self, request: &mut RequestEnvelope) -> ApiResult<RawResponse> {
        let request_id = request.assign_request_id();
        debug!(
            %request_id,
            method = %request.method,
            path = %request.path,
            retried = request.retried,
            "Sending request"
        );

        match self.transport.send(request).await {
            Ok(response) => {
                debug!(
                    %request_id,
                    status = response.status.as_u16(),
                    elapsed = ?response.duration,
                    "Response received"
                );
                Ok(response)
            }
            Err(e) => {
                warn!(%request_id, path = %request.path, error = %e, "Request failed without a response");
                Err(ApiError::transport(&e))
            }
        }
    }

    /// Turns a response into the normalized success body or an error.
    fn classify(request: &RequestEnvelope, response: &RawResponse) -> ApiResult<ResponseBody> {
        let status = response.status;
        let body = response.json_body();
        if status.is_success() {
            return Ok(ResponseBody::classify(body));
        }

        if status.is_server_error() {
            error!(status = status.as_u16(), path = %request.path, "Server error occurred");
        } else if status.is_forbidden() {
            warn!(path = %request.path, "Access forbidden - insufficient permissions");
        }
        Err(ApiError::from_response(status, body.as_ref()))
    }

    /// Recovers a first-attempt 401 by refreshing and resubmitting once.
    async fn recover(
        &self,
        mut request: RequestEnvelope,
        unauthorized: &RawResponse,
        generation: u64,
    ) -> ApiResult<ResponseBody> {
        request.mark_retried();

        let token = match self.gate.enter(generation) {
            Entry::Settled(outcome) => {
                debug!(path = %request.path, "Token refreshed while request was in flight");
                outcome?
            }
            Entry::Follower(follower) => {
                debug!(
                    ticket = follower.ticket(),
                    path = %request.path,
                    "Refresh in flight, queueing request"
                );
                follower.wait().await?
            }
            Entry::Leader(guard) => self.lead_refresh(guard, unauthorized).await?,
        };

        request.set_bearer(&token);
        let response = self.transmit(&mut request).await?;
        Self::classify(&request, &response)
    }

    /// Performs the refresh, settles every waiter and ends the session on
    /// failure.
    async fn lead_refresh(
        &self,
        guard: RefreshGuard<'_>,
        unauthorized: &RawResponse,
    ) -> RefreshOutcome {
        let outcome = self.refresh_access_token(unauthorized).await;
        let released = guard.settle(&outcome);

        match &outcome {
            Ok(_) => info!(waiters = released.len(), "Access token refreshed"),
            Err(e) => {
                warn!(
                    waiters = released.len(),
                    kind = ?e.kind(),
                    error = %e,
                    "Token refresh failed, ending session"
                );
                self.end_session().await;
            }
        }
        outcome
    }

    async fn refresh_access_token(&self, unauthorized: &RawResponse) -> RefreshOutcome {
        let refresh_token = self
            .session
            .get(SessionKey::RefreshToken)
            .await
            .map_err(|e| ApiError::session(&e).with_kind(ApiErrorKind::RefreshFailed))?;

        let Some(refresh_token) = refresh_token else {
            return Err(ApiError::from_response(
                unauthorized.status,
                unauthorized.json_body().as_ref(),
            )
            .with_kind(ApiErrorKind::SessionExpired));
        };

        let body = serde_json::to_value(RefreshTokenRequest { refresh_token })
            .map_err(|e| ApiError::encode(&e).with_kind(ApiErrorKind::RefreshFailed))?;
        // Sent without a bearer header and outside the 401 handling.
        let mut request = RequestEnvelope::post(self.refresh_path.as_str(), body);
        let response = self
            .transmit(&mut request)
            .await
            .map_err(|e| e.with_kind(ApiErrorKind::RefreshFailed))?;

        let body = response.json_body();
        if !response.status.is_success() {
            return Err(ApiError::from_response(response.status, body.as_ref())
                .with_kind(ApiErrorKind::RefreshFailed));
        }

        let refreshed = ResponseBody::classify(body)
            .into_envelope::<RefreshTokenResponse>()
            .ok()
            .and_then(ApiResponse::into_data)
            .ok_or_else(|| {
                ApiError::decode_message("refresh response carried no access token")
                    .with_kind(ApiErrorKind::RefreshFailed)
            })?;

        self.session
            .set(SessionKey::AccessToken, &refreshed.access_token)
            .await
            .map_err(|e| ApiError::session(&e).with_kind(ApiErrorKind::RefreshFailed))?;
        Ok(refreshed.access_token)
    }

    /// Clears stored tokens and sends the user to login.
    async fn end_session(&self) {
        if let Err(e) = self.session.clear().await {
            warn!(error = %e, "Failed to clear session");
        }
        self.navigator.redirect_to_login();
    }
}
