//! File-based session store.
//!
//! Tokens are kept in a small JSON document, by default
//! `<config dir>/rental-admin/session.json`, so a session survives across
//! CLI invocations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rental_admin_application::ports::{
    FileSystem, FileSystemError, SessionStore, SessionStoreError,
};
use rental_admin_domain::SessionKey;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

/// Current session file schema version.
pub const SESSION_SCHEMA_VERSION: u32 = 1;

/// On-disk layout:
/// ```json
/// {
///   "schema_version": 1,
///   "tokens": {
///     "accessToken": "eyJ...",
///     "refreshToken": "eyJ..."
///   },
///   "updated_at": "2026-01-01T00:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SessionDocument {
    schema_version: u32,
    #[serde(default)]
    tokens: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

impl Default for SessionDocument {
    fn default() -> Self {
        Self {
            schema_version: SESSION_SCHEMA_VERSION,
            tokens: BTreeMap::new(),
            updated_at: None,
        }
    }
}

/// Session store persisted to a JSON file.
///
/// The file is read on every `get`; writes are serialized so concurrent
/// updates of different keys do not lose each other.
#[derive(Debug)]
pub struct FileSessionStore<F> {
    fs: F,
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl<F: FileSystem> FileSessionStore<F> {
    /// Creates a store backed by the file at `path`.
    pub fn new(fs: F, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the default session file location.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rental-admin").join("session.json"))
    }

    /// Returns the session file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<SessionDocument, SessionStoreError> {
        let content = match self.fs.read_file(&self.path).await {
            Ok(content) => content,
            Err(FileSystemError::NotFound(_)) => return Ok(SessionDocument::default()),
            Err(e) => return Err(SessionStoreError::Io(e.into())),
        };

        from_json_bytes(&content).map_err(|e| SessionStoreError::Serialization(e.to_string()))
    }

    async fn save(&self, mut document: SessionDocument) -> Result<(), SessionStoreError> {
        if document.tokens.is_empty() {
            return match self.fs.remove_file(&self.path).await {
                Ok(()) => {
                    debug!(path = %self.path.display(), "Session file removed");
                    Ok(())
                }
                Err(FileSystemError::NotFound(_)) => Ok(()),
                Err(e) => Err(SessionStoreError::Io(e.into())),
            };
        }

        document.schema_version = SESSION_SCHEMA_VERSION;
        document.updated_at = Some(Utc::now());
        let content = to_json_stable_bytes(&document)
            .map_err(|e| SessionStoreError::Serialization(e.to_string()))?;

        self.fs
            .write_file(&self.path, &content)
            .await
            .map_err(|e| SessionStoreError::Io(e.into()))
    }
}

#[async_trait]
impl<F: FileSystem> SessionStore for FileSessionStore<F> {
    async fn get(&self, key: SessionKey) -> Result<Option<String>, SessionStoreError> {
        let mut document = self.load().await?;
        Ok(document.tokens.remove(key.as_str()))
    }

    async fn set(&self, key: SessionKey, value: &str) -> Result<(), SessionStoreError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load().await?;
        document
            .tokens
            .insert(key.as_str().to_string(), value.to_string());
        self.save(document).await
    }

    async fn remove(&self, key: SessionKey) -> Result<(), SessionStoreError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load().await?;
        if document.tokens.remove(key.as_str()).is_none() {
            return Ok(());
        }
        self.save(document).await
    }
}
