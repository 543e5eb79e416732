//! Remote data sources used by the repositories of the application.
//!
//! Each call resolves a session through the [`ClientManager`](crate::ClientManager)
//! and funnels the remote operation through the executor, so failures reach
//! callers as [`Error`](crate::Error) values.

mod authentication;
mod server_info;
mod user;

pub use authentication::RemoteAuthenticationDataSource;
pub use server_info::{AuthenticationMethod, RemoteServerInfoDataSource, ServerInfo};
pub use user::{RemoteUserDataSource, UserAvatar, UserInfo, UserQuota};
