//! HTTP Response domain types

mod envelope;
mod error_body;
mod raw;
mod status;

pub use envelope::{ApiResponse, ResponseBody, SUCCESS_KEY, normalize_success};
pub use error_body::{DEFAULT_ERROR_MESSAGE, ErrorBody, extract_message, status_message};
pub use raw::RawResponse;
pub use status::StatusCode;
