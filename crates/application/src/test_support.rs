//! Test doubles shared by the client and use case tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use rental_admin_domain::{REFRESH_PATH, RawResponse, RequestEnvelope, SessionKey};
use serde_json::Value;
use tokio::sync::Notify;

use crate::ports::{Navigator, SessionStore, SessionStoreError, Transport, TransportError};

pub type Handler = dyn Fn(&RequestEnvelope) -> Result<RawResponse, TransportError> + Send + Sync;

/// Transport that answers from a closure and records every request.
pub struct MockTransport {
    handler: Box<Handler>,
    sent: Mutex<Vec<RequestEnvelope>>,
    holds: Mutex<HashMap<String, Arc<Notify>>>,
}

impl MockTransport {
    pub fn new(
        handler: impl Fn(&RequestEnvelope) -> Result<RawResponse, TransportError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            sent: Mutex::new(Vec::new()),
            holds: Mutex::new(HashMap::new()),
        }
    }

    /// Parks the first request to `path` until `release` is notified.
    pub fn holding(self, path: &str, release: Arc<Notify>) -> Self {
        self.holds.lock().insert(path.to_string(), release);
        self
    }

    pub fn holding_refresh(self, release: Arc<Notify>) -> Self {
        self.holding(REFRESH_PATH, release)
    }

    pub fn sent(&self) -> Vec<RequestEnvelope> {
        self.sent.lock().clone()
    }

    pub fn sent_to(&self, path: &str) -> Vec<RequestEnvelope> {
        self.sent().into_iter().filter(|r| r.path == path).collect()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: &RequestEnvelope) -> Result<RawResponse, TransportError> {
        self.sent.lock().push(request.clone());
        let hold = self.holds.lock().remove(&request.path);
        if let Some(release) = hold {
            release.notified().await;
        }
        (self.handler)(request)
    }
}

#[derive(Default)]
pub struct MemorySession {
    values: Mutex<HashMap<SessionKey, String>>,
}

impl MemorySession {
    pub fn with(access: Option<&str>, refresh: Option<&str>) -> Arc<Self> {
        let session = Self::default();
        {
            let mut values = session.values.lock();
            if let Some(access) = access {
                values.insert(SessionKey::AccessToken, access.to_string());
            }
            if let Some(refresh) = refresh {
                values.insert(SessionKey::RefreshToken, refresh.to_string());
            }
        }
        Arc::new(session)
    }

    pub fn value(&self, key: SessionKey) -> Option<String> {
        self.values.lock().get(&key).cloned()
    }
}

#[async_trait]
impl SessionStore for MemorySession {
    async fn get(&self, key: SessionKey) -> Result<Option<String>, SessionStoreError> {
        Ok(self.value(key))
    }

    async fn set(&self, key: SessionKey, value: &str) -> Result<(), SessionStoreError> {
        self.values.lock().insert(key, value.to_string());
        Ok(())
    }

    async fn remove(&self, key: SessionKey) -> Result<(), SessionStoreError> {
        self.values.lock().remove(&key);
        Ok(())
    }
}

#[derive(Default)]
pub struct CountingNavigator {
    redirects: AtomicUsize,
}

impl CountingNavigator {
    pub fn count(&self) -> usize {
        self.redirects.load(Ordering::SeqCst)
    }
}

impl Navigator for CountingNavigator {
    fn redirect_to_login(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
    }
}

/// Builds a JSON response result for a mock handler.
pub fn json_response(status: u16, body: &Value) -> Result<RawResponse, TransportError> {
    Ok(RawResponse::json(status, body))
}
