//! File-backed persistence.

mod file_session_store;
mod file_system;

pub use file_session_store::{FileSessionStore, SESSION_SCHEMA_VERSION};
pub use file_system::TokioFileSystem;
