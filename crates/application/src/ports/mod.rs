//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod file_system;
mod navigator;
mod session_store;
mod transport;

pub use file_system::{FileSystem, FileSystemError};
pub use navigator::Navigator;
pub use session_store::{SessionStore, SessionStoreError};
pub use transport::{Transport, TransportError};
