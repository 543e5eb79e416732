use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::*;
use crate::api::error::CertificateProblem;

/// Error each code must turn into. A `match` so that a new code does not
/// compile until it gets a row here.
fn expected_error(code: ResultCode) -> Error {
    let phrase = Some("Server says no".to_string());

    match code {
        ResultCode::Ok => Error::UnknownError,
        ResultCode::OkSsl => Error::UnknownError,
        ResultCode::OkNoSsl => Error::UnknownError,
        ResultCode::OkRedirectToNonSecureConnection => Error::RedirectToNonSecure,
        ResultCode::UnhandledHttpCode => Error::UnhandledHttpCode(Some(418)),
        ResultCode::Unauthorized => Error::Unauthorized,
        ResultCode::FileNotFound => Error::FileNotFound,
        ResultCode::InstanceNotConfigured => Error::InstanceNotConfigured,
        ResultCode::UnknownError => Error::UnknownError,
        ResultCode::WrongConnection => Error::NoConnectionWithServer,
        ResultCode::Timeout => Error::ServerConnectionTimeout,
        ResultCode::IncorrectAddress => Error::IncorrectAddress,
        ResultCode::HostNotAvailable => Error::ServerNotReachable,
        ResultCode::NoNetworkConnection => Error::NoNetworkConnection,
        ResultCode::SslError => Error::SslError,
        ResultCode::SslRecoverablePeerUnverified => Error::SslError,
        ResultCode::BadOcVersion => Error::BadOcVersion,
        ResultCode::Cancelled => Error::Cancelled,
        ResultCode::InvalidLocalFileName => Error::InvalidLocalFileName,
        ResultCode::InvalidOverwrite => Error::InvalidOverwrite,
        ResultCode::Conflict => Error::Conflict,
        ResultCode::Oauth2Error => Error::OAuth2Error,
        ResultCode::Oauth2ErrorAccessDenied => Error::OAuth2ErrorAccessDenied,
        ResultCode::SyncConflict => Error::SyncConflict,
        ResultCode::LocalStorageFull => Error::LocalStorageFull,
        ResultCode::LocalStorageNotMoved => Error::LocalStorageNotMoved,
        ResultCode::LocalStorageNotCopied => Error::LocalStorageNotCopied,
        ResultCode::LocalStorageNotRemoved => Error::LocalStorageNotRemoved,
        ResultCode::QuotaExceeded => Error::QuotaExceeded,
        ResultCode::AccountNotFound => Error::AccountNotFound,
        ResultCode::AccountException => Error::AccountException,
        ResultCode::AccountNotNew => Error::AccountNotNew,
        ResultCode::AccountNotTheSame => Error::AccountNotTheSame,
        ResultCode::InvalidCharacterInName => Error::InvalidCharacterInName,
        ResultCode::InvalidCharacterDetectInServer => Error::InvalidCharacter,
        ResultCode::Forbidden => Error::Forbidden,
        ResultCode::SpecificForbidden => Error::SpecificForbidden(phrase),
        ResultCode::InvalidMoveIntoDescendant => Error::MoveIntoDescendant,
        ResultCode::InvalidCopyIntoDescendant => Error::CopyIntoDescendant,
        ResultCode::PartialMoveDone => Error::PartialMoveDone,
        ResultCode::PartialCopyDone => Error::PartialCopyDone,
        ResultCode::ShareNotFound => Error::ShareNotFound(phrase),
        ResultCode::ShareForbidden => Error::ShareForbidden(phrase),
        ResultCode::ShareWrongParameter => Error::ShareWrongParameter,
        ResultCode::WrongServerResponse => Error::WrongServerResponse,
        ResultCode::DelayedForWifi => Error::DelayedForWifi,
        ResultCode::LocalFileNotFound => Error::LocalFileNotFound,
        ResultCode::ServiceUnavailable => Error::ServiceUnavailable,
        ResultCode::SpecificServiceUnavailable => Error::SpecificServiceUnavailable(phrase),
        ResultCode::SpecificUnsupportedMediaType => Error::SpecificUnsupportedMediaType(phrase),
        ResultCode::SpecificMethodNotAllowed => Error::SpecificMethodNotAllowed(phrase),
    }
}

#[test]
fn execute_remote_operation_maps_every_failure_code_to_its_error() {
    let mut seen = HashSet::new();

    for &code in ResultCode::ALL {
        assert!(seen.insert(code), "{:?} listed twice", code);

        // Arrange
        let result: RemoteResult<String> = RemoteResult::failure(code)
            .with_http_status(418, Some("Server says no".to_string()));

        // Act
        let error = execute_remote_operation(|| result).unwrap_err();

        // Assert
        assert_eq!(error, expected_error(code), "wrong error for {:?}", code);
    }
    assert_eq!(seen.len(), 51);
}

#[test]
fn execute_remote_operation_returns_data_unchanged_on_success() {
    // Arrange
    let mut data = HashMap::new();
    data.insert("quota".to_string(), vec![Some(1024_u64), None, Some(u64::MAX)]);
    let expected = data.clone();

    // Act
    let result = execute_remote_operation(|| RemoteResult::ok(data));

    // Assert
    assert_eq!(result.unwrap(), expected);
}

#[test]
fn execute_remote_operation_allows_empty_success_payload() {
    // Act
    let result = execute_remote_operation(|| {
        RemoteResult::ok_with_code(ResultCode::OkNoSsl, None::<String>)
    });

    // Assert
    assert_eq!(result, Ok(None));
}

#[test]
fn execute_remote_operation_invokes_operation_exactly_once() {
    // Arrange
    let mut calls = 0;

    // Act
    let _ = execute_remote_operation(|| {
        calls += 1;
        RemoteResult::<()>::failure(ResultCode::Timeout)
    });

    // Assert
    assert_eq!(calls, 1, "no retry expected");
}

#[test]
fn timeout_with_socket_timeout_cause_is_response_timeout() {
    // Arrange
    let result: RemoteResult<()> =
        RemoteResult::failure(ResultCode::Timeout).with_cause(RemoteCause::SocketTimeout);

    // Act
    let error = execute_remote_operation(|| result).unwrap_err();

    // Assert
    assert_eq!(error, Error::ServerResponseTimeout);
}

#[test]
fn timeout_with_other_causes_is_connection_timeout() {
    let causes = vec![
        None,
        Some(RemoteCause::ConnectTimeout),
        Some(RemoteCause::Transport(Arc::new(anyhow::anyhow!("connection reset")))),
    ];

    for cause in causes {
        // Arrange
        let mut result: RemoteResult<()> = RemoteResult::failure(ResultCode::Timeout);
        if let Some(cause) = cause.clone() {
            result = result.with_cause(cause);
        }

        // Act
        let error = execute_remote_operation(|| result).unwrap_err();

        // Assert
        assert_eq!(error, Error::ServerConnectionTimeout, "cause {:?}", cause);
    }
}

#[test]
fn peer_unverified_returns_the_original_certificate_error() {
    // Arrange
    let certificate_error = Arc::new(
        CertificateCombinedError::new("cloud.example.com", vec![vec![0x30, 0x82, 0x01]])
            .with_problem(CertificateProblem::UntrustedIssuer)
            .with_problem(CertificateProblem::Expired),
    );
    let result: RemoteResult<()> = RemoteResult::failure(ResultCode::SslRecoverablePeerUnverified)
        .with_cause(RemoteCause::Certificate(Arc::clone(&certificate_error)));

    // Act
    let error = execute_remote_operation(|| result).unwrap_err();

    // Assert
    match error {
        Error::SslRecoverablePeerUnverified(returned) => {
            assert!(
                Arc::ptr_eq(&returned, &certificate_error),
                "certificate error must not be rewrapped"
            );
            assert_eq!(returned.problems.len(), 2);
        }
        other => panic!("Expected Error::SslRecoverablePeerUnverified, got {:?}", other),
    }
}

#[test]
fn specific_errors_carry_missing_phrase_as_none() {
    // Arrange
    let result: RemoteResult<()> = RemoteResult::failure(ResultCode::ShareForbidden);

    // Act
    let error = execute_remote_operation(|| result).unwrap_err();

    // Assert
    assert_eq!(error, Error::ShareForbidden(None));
    assert_eq!(error.to_string(), "Share forbidden: no details");
}

#[tokio::test]
async fn execute_remote_operation_async_translates_like_the_blocking_variant() {
    // Act
    let ok = execute_remote_operation_async(|| async { RemoteResult::ok(42_u32) }).await;
    let failed = execute_remote_operation_async(|| async {
        RemoteResult::<u32>::failure(ResultCode::QuotaExceeded)
    })
    .await;

    // Assert
    assert_eq!(ok, Ok(42));
    assert_eq!(failed, Err(Error::QuotaExceeded));
}
