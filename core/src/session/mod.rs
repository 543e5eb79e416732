//! Sessions and the manager that hands them out per account

mod account;
mod client_manager;
mod connection_validator;
mod cookie_jar;
mod credentials;
mod remote_session;


pub use account::{Account, AccountStore, MemoryAccountStore};
pub use client_manager::ClientManager;
pub use connection_validator::ConnectionValidator;
pub use cookie_jar::CookieJar;
pub use credentials::Credentials;
pub use remote_session::Session;
