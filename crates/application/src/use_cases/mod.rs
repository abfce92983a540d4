//! Application use cases (business logic orchestration).

mod login;
mod logout;

pub use login::{Login, LoginInput};
pub use logout::Logout;
