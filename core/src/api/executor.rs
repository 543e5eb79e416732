use std::future::Future;

use crate::api::error::Error;
use crate::api::result::{RemoteCause, RemoteFailure, RemoteResult, ResultCode};

/// Runs one remote operation and translates its envelope.
///
/// Every remote data source funnels its calls through here, so callers only
/// ever see the data or a typed [`Error`]. No retry is attempted.
pub fn execute_remote_operation<T, F>(operation: F) -> Result<T, Error>
where
    F: FnOnce() -> RemoteResult<T>,
{
    handle_remote_operation_result(operation())
}

/// Same as [`execute_remote_operation`] for operations that are awaited.
pub async fn execute_remote_operation_async<T, F, Fut>(operation: F) -> Result<T, Error>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = RemoteResult<T>>,
{
    handle_remote_operation_result(operation().await)
}

fn handle_remote_operation_result<T>(result: RemoteResult<T>) -> Result<T, Error> {
    result.into_outcome().map_err(Error::from)
}

impl From<RemoteFailure> for Error {
    fn from(failure: RemoteFailure) -> Self {
        let RemoteFailure { code, cause, http_code, http_phrase } = failure;

        match code {
            ResultCode::WrongConnection => Error::NoConnectionWithServer,
            ResultCode::NoNetworkConnection => Error::NoNetworkConnection,
            ResultCode::Timeout => match cause {
                Some(RemoteCause::SocketTimeout) => Error::ServerResponseTimeout,
                _ => Error::ServerConnectionTimeout,
            },
            ResultCode::HostNotAvailable => Error::ServerNotReachable,
            ResultCode::ServiceUnavailable => Error::ServiceUnavailable,
            ResultCode::SslRecoverablePeerUnverified => match cause {
                Some(RemoteCause::Certificate(certificate_error)) => {
                    Error::SslRecoverablePeerUnverified(certificate_error)
                }
                // Nothing the user could choose to trust.
                _ => Error::SslError,
            },
            ResultCode::BadOcVersion => Error::BadOcVersion,
            ResultCode::IncorrectAddress => Error::IncorrectAddress,
            ResultCode::SslError => Error::SslError,
            ResultCode::Unauthorized => Error::Unauthorized,
            ResultCode::InstanceNotConfigured => Error::InstanceNotConfigured,
            ResultCode::FileNotFound => Error::FileNotFound,
            ResultCode::Oauth2Error => Error::OAuth2Error,
            ResultCode::Oauth2ErrorAccessDenied => Error::OAuth2ErrorAccessDenied,
            ResultCode::AccountNotNew => Error::AccountNotNew,
            ResultCode::AccountNotTheSame => Error::AccountNotTheSame,
            ResultCode::OkRedirectToNonSecureConnection => Error::RedirectToNonSecure,
            ResultCode::UnhandledHttpCode => Error::UnhandledHttpCode(http_code),
            ResultCode::UnknownError => Error::UnknownError,
            ResultCode::Cancelled => Error::Cancelled,
            ResultCode::InvalidLocalFileName => Error::InvalidLocalFileName,
            ResultCode::InvalidOverwrite => Error::InvalidOverwrite,
            ResultCode::Conflict => Error::Conflict,
            ResultCode::SyncConflict => Error::SyncConflict,
            ResultCode::LocalStorageFull => Error::LocalStorageFull,
            ResultCode::LocalStorageNotMoved => Error::LocalStorageNotMoved,
            ResultCode::LocalStorageNotCopied => Error::LocalStorageNotCopied,
            ResultCode::QuotaExceeded => Error::QuotaExceeded,
            ResultCode::AccountNotFound => Error::AccountNotFound,
            ResultCode::AccountException => Error::AccountException,
            ResultCode::InvalidCharacterInName => Error::InvalidCharacterInName,
            ResultCode::LocalStorageNotRemoved => Error::LocalStorageNotRemoved,
            ResultCode::Forbidden => Error::Forbidden,
            ResultCode::SpecificForbidden => Error::SpecificForbidden(http_phrase),
            ResultCode::InvalidMoveIntoDescendant => Error::MoveIntoDescendant,
            ResultCode::InvalidCopyIntoDescendant => Error::CopyIntoDescendant,
            ResultCode::PartialMoveDone => Error::PartialMoveDone,
            ResultCode::PartialCopyDone => Error::PartialCopyDone,
            ResultCode::ShareWrongParameter => Error::ShareWrongParameter,
            ResultCode::WrongServerResponse => Error::WrongServerResponse,
            ResultCode::InvalidCharacterDetectInServer => Error::InvalidCharacter,
            ResultCode::DelayedForWifi => Error::DelayedForWifi,
            ResultCode::LocalFileNotFound => Error::LocalFileNotFound,
            ResultCode::SpecificServiceUnavailable => {
                Error::SpecificServiceUnavailable(http_phrase)
            }
            ResultCode::SpecificUnsupportedMediaType => {
                Error::SpecificUnsupportedMediaType(http_phrase)
            }
            ResultCode::SpecificMethodNotAllowed => Error::SpecificMethodNotAllowed(http_phrase),
            ResultCode::ShareNotFound => Error::ShareNotFound(http_phrase),
            ResultCode::ShareForbidden => Error::ShareForbidden(http_phrase),
            // A success code without data is not something callers can act on.
            ResultCode::Ok | ResultCode::OkSsl | ResultCode::OkNoSsl => Error::UnknownError,
        }
    }
}
