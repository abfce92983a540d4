//! Transport implementation using reqwest.
//!
//! This adapter implements the `Transport` port: it resolves request paths
//! against the configured base URL and returns every response, whatever
//! its status, for the client to classify.

use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};

use rental_admin_application::ports::{Transport, TransportError};
use rental_admin_domain::{HttpMethod, RawResponse, RequestEnvelope};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, Url};

use crate::config::ClientConfig;

/// HTTP transport backed by `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
    timeout_ms: u64,
}

impl ReqwestTransport {
    /// Creates a transport from the client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(default_headers)
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self::with_client(client, &config.base_url, config.timeout_ms))
    }

    /// Creates a transport with a custom reqwest client.
    #[must_use]
    pub fn with_client(client: Client, base_url: &str, timeout_ms: u64) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_ms,
        }
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Builds the final URL: absolute paths pass through, anything else is
    /// appended to the base URL. Query pairs are form-encoded.
    fn resolve_url(&self, request: &RequestEnvelope) -> Result<Url, TransportError> {
        let mut url = if request.is_absolute() {
            request.path.clone()
        } else if request.path.starts_with('/') {
            format!("{}{}", self.base_url, request.path)
        } else {
            format!("{}/{}", self.base_url, request.path)
        };

        if !request.query.is_empty() {
            let query = serde_urlencoded::to_string(&request.query)
                .map_err(|e| TransportError::InvalidUrl(e.to_string()))?;
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&query);
        }

        Url::parse(&url).map_err(|e| TransportError::InvalidUrl(format!("{e}: {url}")))
    }

    /// Maps reqwest errors to `TransportError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout { timeout_ms };
        }
        if error.is_connect() {
            return TransportError::ConnectionFailed(error.to_string());
        }
        if error.is_builder() {
            return TransportError::InvalidUrl(error.to_string());
        }
        TransportError::Other(error.to_string())
    }
}

impl Transport for ReqwestTransport {
    fn send(
        &self,
        request: &RequestEnvelope,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send {
        // Clone what we need to move into the async block
        let url = self.resolve_url(request);
        let method = request.method;
        let headers = request.headers.clone();
        let body = request.body.clone();
        let timeout_ms = self.timeout_ms;

        async move {
            let url = url?;
            let start = Instant::now();

            let mut builder = self.client.request(Self::to_reqwest_method(method), url);
            for header in headers.iter() {
                builder = builder.header(&header.name, &header.value);
            }

            if let Some(body) = body {
                let bytes = serde_json::to_vec(&body)
                    .map_err(|e| TransportError::InvalidBody(e.to_string()))?;
                builder = builder.body(bytes);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| Self::map_error(&e, timeout_ms))?;

            let status = response.status().as_u16();
            let response_headers: HashMap<String, String> = response
                .headers()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
                .collect();

            let body_bytes = response
                .bytes()
                .await
                .map_err(|e| Self::map_error(&e, timeout_ms))?
                .to_vec();

            Ok(RawResponse::new(
                status,
                response_headers,
                body_bytes,
                start.elapsed(),
            ))
        }
    }
}
