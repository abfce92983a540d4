//! Rental Admin Domain - Core types of the admin API client
//!
//! This crate defines the request and response model, the normalized
//! response envelope, session credentials and authentication payloads.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod error;
pub mod pagination;
pub mod request;
pub mod response;
pub mod session;

pub use auth::{
    LOGIN_PATH, LoginRequest, LoginResponse, REFRESH_PATH, RefreshTokenRequest,
    RefreshTokenResponse,
};
pub use error::{DomainError, DomainResult};
pub use pagination::{PageRequest, PaginatedResponse};
pub use request::{HttpMethod, RequestEnvelope};
pub use response::{ApiResponse, ErrorBody, RawResponse, ResponseBody, StatusCode};
pub use session::{SessionCredentials, SessionKey, token_preview};
