//! Adapters implementing the application ports.

mod login_navigator;
mod memory_session_store;
mod reqwest_transport;

pub use login_navigator::LoginNavigator;
pub use memory_session_store::InMemorySessionStore;
pub use reqwest_transport::ReqwestTransport;
