use std::error::Error as StdError;
use std::io;
use std::sync::Arc;

use http::StatusCode;
use rustls::CertificateError;

use crate::api::error::{CertificateCombinedError, CertificateProblem};

/// Declares [`ResultCode`] together with the list of all its variants.
macro_rules! result_codes {
    ($($code:ident,)*) => {
        /// Symbolic outcome code reported by the protocol layer for one remote call.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ResultCode {
            $($code,)*
        }

        impl ResultCode {
            /// Every code, in declaration order.
            pub const ALL: &'static [ResultCode] = &[$(ResultCode::$code,)*];
        }
    };
}

result_codes! {
    Ok,
    OkSsl,
    OkNoSsl,
    OkRedirectToNonSecureConnection,
    UnhandledHttpCode,
    Unauthorized,
    FileNotFound,
    InstanceNotConfigured,
    UnknownError,
    WrongConnection,
    Timeout,
    IncorrectAddress,
    HostNotAvailable,
    NoNetworkConnection,
    SslError,
    SslRecoverablePeerUnverified,
    BadOcVersion,
    Cancelled,
    InvalidLocalFileName,
    InvalidOverwrite,
    Conflict,
    Oauth2Error,
    Oauth2ErrorAccessDenied,
    SyncConflict,
    LocalStorageFull,
    LocalStorageNotMoved,
    LocalStorageNotCopied,
    LocalStorageNotRemoved,
    QuotaExceeded,
    AccountNotFound,
    AccountException,
    AccountNotNew,
    AccountNotTheSame,
    InvalidCharacterInName,
    InvalidCharacterDetectInServer,
    Forbidden,
    SpecificForbidden,
    InvalidMoveIntoDescendant,
    InvalidCopyIntoDescendant,
    PartialMoveDone,
    PartialCopyDone,
    ShareNotFound,
    ShareForbidden,
    ShareWrongParameter,
    WrongServerResponse,
    DelayedForWifi,
    LocalFileNotFound,
    ServiceUnavailable,
    SpecificServiceUnavailable,
    SpecificUnsupportedMediaType,
    SpecificMethodNotAllowed,
}

impl ResultCode {
    /// Picks the code for a non successful HTTP status.
    ///
    /// `has_message` tells whether the server explained the failure, which turns
    /// a few statuses into their "specific" flavour.
    pub fn from_http_status(status: StatusCode, has_message: bool) -> ResultCode {
        match status.as_u16() {
            401 => ResultCode::Unauthorized,
            403 if has_message => ResultCode::SpecificForbidden,
            403 => ResultCode::Forbidden,
            404 => ResultCode::FileNotFound,
            405 => ResultCode::SpecificMethodNotAllowed,
            409 => ResultCode::Conflict,
            415 => ResultCode::SpecificUnsupportedMediaType,
            500 => ResultCode::InstanceNotConfigured,
            503 if has_message => ResultCode::SpecificServiceUnavailable,
            503 => ResultCode::ServiceUnavailable,
            507 => ResultCode::QuotaExceeded,
            _ => ResultCode::UnhandledHttpCode,
        }
    }
}

/// Underlying cause attached to a remote result.
#[derive(Debug, Clone)]
pub enum RemoteCause {
    /// The connection was open but the server stopped answering.
    SocketTimeout,
    /// The connection could not be established in time.
    ConnectTimeout,
    Certificate(Arc<CertificateCombinedError>),
    Transport(Arc<anyhow::Error>),
}

/// Everything a failed [`RemoteResult`] knows about the failure.
#[derive(Debug, Clone)]
pub struct RemoteFailure {
    pub code: ResultCode,
    pub cause: Option<RemoteCause>,
    pub http_code: Option<u16>,
    pub http_phrase: Option<String>,
}

/// Envelope returned by every protocol level call, before translation.
///
/// A result is successful exactly when it holds data.
#[derive(Debug)]
pub struct RemoteResult<T> {
    code: ResultCode,
    data: Option<T>,
    cause: Option<RemoteCause>,
    http_code: Option<u16>,
    http_phrase: Option<String>,
}

impl<T> RemoteResult<T> {
    pub fn ok(data: T) -> Self {
        Self::ok_with_code(ResultCode::Ok, data)
    }

    /// Successful result carrying a specific success code such as [`ResultCode::OkSsl`].
    pub fn ok_with_code(code: ResultCode, data: T) -> Self {
        Self {
            code,
            data: Some(data),
            cause: None,
            http_code: None,
            http_phrase: None,
        }
    }

    pub fn failure(code: ResultCode) -> Self {
        Self {
            code,
            data: None,
            cause: None,
            http_code: None,
            http_phrase: None,
        }
    }

    /// Failed result for a non successful HTTP response.
    pub fn from_http_failure(status: StatusCode, phrase: Option<String>) -> Self {
        let phrase = phrase.filter(|p| !p.trim().is_empty());
        let code = ResultCode::from_http_status(status, phrase.is_some());
        let phrase = phrase.or_else(|| status.canonical_reason().map(str::to_string));

        Self::failure(code).with_http_status(status.as_u16(), phrase)
    }

    /// Failed result for a request that never produced a response.
    pub fn from_transport_error(error: reqwest::Error) -> Self {
        let host = error.url().and_then(|url| url.host_str()).unwrap_or_default().to_string();
        if let Some(result) = Self::from_tls_error(&error, &host) {
            return result;
        }

        if error.is_timeout() {
            let cause = if error.is_connect() {
                RemoteCause::ConnectTimeout
            } else {
                RemoteCause::SocketTimeout
            };
            return Self::failure(ResultCode::Timeout).with_cause(cause);
        }

        let code = if error.is_connect() {
            ResultCode::WrongConnection
        } else if error.is_decode() {
            ResultCode::WrongServerResponse
        } else if error.is_builder() {
            ResultCode::IncorrectAddress
        } else {
            ResultCode::UnknownError
        };
        Self::failure(code).with_cause(RemoteCause::Transport(Arc::new(error.into())))
    }

    /// Failed result for a TLS handshake failure anywhere in the chain of `error`.
    ///
    /// A certificate the user could still choose to trust gives
    /// [`ResultCode::SslRecoverablePeerUnverified`] with the certificate details
    /// as cause; any other TLS failure gives [`ResultCode::SslError`].
    pub(crate) fn from_tls_error(error: &(dyn StdError + 'static), host: &str) -> Option<Self> {
        let result = match find_tls_error(error)? {
            rustls::Error::InvalidCertificate(problem) => {
                let certificate_error = CertificateCombinedError::new(host, Vec::new())
                    .with_problem(certificate_problem(problem));
                Self::failure(ResultCode::SslRecoverablePeerUnverified)
                    .with_cause(RemoteCause::Certificate(Arc::new(certificate_error)))
            }
            other => Self::failure(ResultCode::SslError)
                .with_cause(RemoteCause::Transport(Arc::new(other.clone().into()))),
        };
        Some(result)
    }

    pub fn with_cause(mut self, cause: RemoteCause) -> Self {
        self.cause = Some(cause);
        self
    }

    pub fn with_http_status(mut self, http_code: u16, http_phrase: Option<String>) -> Self {
        self.http_code = Some(http_code);
        self.http_phrase = http_phrase;
        self
    }

    pub fn is_success(&self) -> bool {
        self.data.is_some()
    }

    pub fn code(&self) -> ResultCode {
        self.code
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn cause(&self) -> Option<&RemoteCause> {
        self.cause.as_ref()
    }

    pub fn http_code(&self) -> Option<u16> {
        self.http_code
    }

    pub fn http_phrase(&self) -> Option<&str> {
        self.http_phrase.as_deref()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RemoteResult<U> {
        RemoteResult {
            code: self.code,
            data: self.data.map(f),
            cause: self.cause,
            http_code: self.http_code,
            http_phrase: self.http_phrase,
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> RemoteResult<U>) -> RemoteResult<U> {
        match self.into_outcome() {
            Ok(data) => f(data),
            Err(failure) => failure.into(),
        }
    }

    /// Splits the envelope into its data or the failure details.
    pub fn into_outcome(self) -> Result<T, RemoteFailure> {
        match self.data {
            Some(data) => Ok(data),
            None => Err(RemoteFailure {
                code: self.code,
                cause: self.cause,
                http_code: self.http_code,
                http_phrase: self.http_phrase,
            }),
        }
    }
}

fn find_tls_error<'a>(error: &'a (dyn StdError + 'static)) -> Option<&'a rustls::Error> {
    let mut current = Some(error);
    while let Some(error) = current {
        if let Some(tls_error) = error.downcast_ref::<rustls::Error>() {
            return Some(tls_error);
        }
        // io::Error::source() skips the error it wraps
        current = match error.downcast_ref::<io::Error>().and_then(io::Error::get_ref) {
            Some(inner) => Some(inner as &(dyn StdError + 'static)),
            None => error.source(),
        };
    }
    None
}

fn certificate_problem(error: &CertificateError) -> CertificateProblem {
    match error {
        CertificateError::Expired | CertificateError::ExpiredContext { .. } => {
            CertificateProblem::Expired
        }
        CertificateError::NotValidYet | CertificateError::NotValidYetContext { .. } => {
            CertificateProblem::NotYetValid
        }
        CertificateError::UnknownIssuer => CertificateProblem::UntrustedIssuer,
        CertificateError::NotValidForName | CertificateError::NotValidForNameContext { .. } => {
            CertificateProblem::HostnameMismatch
        }
        other => CertificateProblem::Other(format!("{:?}", other)),
    }
}

impl<T> From<RemoteFailure> for RemoteResult<T> {
    fn from(failure: RemoteFailure) -> Self {
        Self {
            code: failure.code,
            data: None,
            cause: failure.cause,
            http_code: failure.http_code,
            http_phrase: failure.http_phrase,
        }
    }
}
