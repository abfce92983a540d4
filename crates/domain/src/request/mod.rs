//! HTTP Request domain types

mod envelope;
mod header;
mod method;

pub use envelope::RequestEnvelope;
pub use header::{AUTHORIZATION, Header, Headers, REQUEST_ID};
pub use method::HttpMethod;
