//! # ocLink Core SDK
//!
//! This crate provides the remote access layer of the ocLink client: the
//! executor every remote call goes through, the closed set of errors callers
//! handle, and the [`ClientManager`] handing out one session per account.

mod api;
mod session;
mod datasource;
pub mod config;
pub mod storage;

pub use api::{
    execute_remote_operation, execute_remote_operation_async, CertificateCombinedError,
    CertificateProblem, DefaultSender, Error, HttpSender, OcServerInfoService, OcUserService,
    RemoteAvatarData, RemoteCause, RemoteFailure, RemoteQuota, RemoteResult, RemoteServerInfo,
    RemoteUserInfo, ResultCode, ServerInfoService, ServerVersion, UserService,
};
pub use config::{ClientConfig, ConfigError};
pub use datasource::{
    AuthenticationMethod, RemoteAuthenticationDataSource, RemoteServerInfoDataSource,
    RemoteUserDataSource, ServerInfo, UserAvatar, UserInfo, UserQuota,
};
pub use session::{
    Account, AccountStore, ClientManager, ConnectionValidator, CookieJar, Credentials,
    MemoryAccountStore, Session,
};
