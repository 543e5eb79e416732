//! Remote operations, their results and the error taxonomy surfaced to callers

mod error;
mod executor;
mod http_sender;
mod responses;
mod result;
mod server_info_service;
mod user_service;

#[cfg(test)]
mod mock_sender;
#[cfg(test)]
mod executor_tests;

pub use error::{CertificateCombinedError, CertificateProblem, Error};
pub use executor::{execute_remote_operation, execute_remote_operation_async};
pub use http_sender::{DefaultSender, HttpSender};
pub use result::{RemoteCause, RemoteFailure, RemoteResult, ResultCode};
pub use server_info_service::{
    OcServerInfoService, RemoteServerInfo, ServerInfoService, ServerVersion,
};
pub use user_service::{OcUserService, RemoteAvatarData, RemoteQuota, RemoteUserInfo, UserService};

#[cfg(test)]
pub(crate) use mock_sender::{
    create_error_response, create_json_response, create_response, create_response_from, MockSender,
};
