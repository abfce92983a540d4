//! Real file system implementation.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use rental_admin_application::ports::{FileSystem, FileSystemError};
use tokio::fs;

/// Real file system implementation using `tokio::fs`.
#[derive(Debug, Clone, Default)]
pub struct TokioFileSystem;

impl TokioFileSystem {
    /// Creates a new `TokioFileSystem`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Unique temp path next to `path`, so the final rename stays on one file system.
fn temp_sibling(path: &Path) -> PathBuf {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let name = path.file_name().unwrap_or_default().to_string_lossy();
    path.with_file_name(format!(".{name}.{}.{n}.tmp", std::process::id()))
}

fn map_io_error(e: std::io::Error, path: &Path) -> FileSystemError {
    match e.kind() {
        std::io::ErrorKind::NotFound => FileSystemError::NotFound(path.to_path_buf()),
        std::io::ErrorKind::PermissionDenied => {
            FileSystemError::PermissionDenied(path.to_path_buf())
        }
        _ => FileSystemError::Io(e),
    }
}

impl FileSystem for TokioFileSystem {
    async fn read_file(&self, path: &Path) -> Result<Vec<u8>, FileSystemError> {
        fs::read(path).await.map_err(|e| map_io_error(e, path))
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), FileSystemError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| map_io_error(e, parent))?;
        }

        // Readers see either the old file or the new one, never a partial write.
        let temp_path = temp_sibling(path);
        if let Err(e) = fs::write(&temp_path, contents).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(map_io_error(e, &temp_path));
        }
        if let Err(e) = fs::rename(&temp_path, path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(map_io_error(e, path));
        }
        Ok(())
    }

    async fn remove_file(&self, path: &Path) -> Result<(), FileSystemError> {
        fs::remove_file(path)
            .await
            .map_err(|e| map_io_error(e, path))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");
        let fs = TokioFileSystem::new();

        fs.write_file(&path, b"{}").await.unwrap();

        assert!(path.exists());
        assert_eq!(fs.read_file(&path).await.unwrap(), b"{}".to_vec());
    }

    #[tokio::test]
    async fn test_write_replaces_file_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let fs = TokioFileSystem::new();

        fs.write_file(&path, b"first").await.unwrap();
        fs.write_file(&path, b"second").await.unwrap();

        assert_eq!(fs.read_file(&path).await.unwrap(), b"second".to_vec());
        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("session.json")]);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let error = TokioFileSystem::new().read_file(&path).await.unwrap_err();

        assert!(matches!(error, FileSystemError::NotFound(p) if p == path));
    }

    #[tokio::test]
    async fn test_remove_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let fs = TokioFileSystem::new();
        fs.write_file(&path, b"{}").await.unwrap();

        fs.remove_file(&path).await.unwrap();

        assert!(!path.exists());
        assert!(matches!(
            fs.remove_file(&path).await,
            Err(FileSystemError::NotFound(_))
        ));
    }
}
