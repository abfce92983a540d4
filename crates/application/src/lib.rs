//! Rental Admin Application - Client core and use cases
//!
//! This crate contains the authenticated client, its refresh
//! coordination, and the port definitions (traits) that infrastructure
//! adapters implement.

pub mod client;
pub mod error;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
mod test_support;

pub use client::AuthenticatedClient;
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use ports::{
    FileSystem, FileSystemError, Navigator, SessionStore, SessionStoreError, Transport,
    TransportError,
};
pub use use_cases::{Login, LoginInput, Logout};
