use std::sync::Arc;
use thiserror::Error;

/// Typed outcome of a failed remote operation.
///
/// Every failure code reported by the protocol layer is translated into exactly
/// one of these variants by [`execute_remote_operation`](crate::execute_remote_operation).
/// Variants that carry an `Option<String>` hold the server supplied message
/// (the HTTP reason phrase or error body), when there was one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // Connectivity
    #[error("No connection with the server")]
    NoConnectionWithServer,

    #[error("No network connection available")]
    NoNetworkConnection,

    #[error("Server did not respond in time")]
    ServerResponseTimeout,

    #[error("Could not connect to the server in time")]
    ServerConnectionTimeout,

    #[error("Server is not reachable")]
    ServerNotReachable,

    #[error("Service unavailable")]
    ServiceUnavailable,

    #[error("Service unavailable: {}", .0.as_deref().unwrap_or("no details"))]
    SpecificServiceUnavailable(Option<String>),

    // Security
    #[error("SSL error")]
    SslError,

    /// The server certificate could not be verified but the user may still trust it.
    /// The payload is the exact object reported by the protocol layer.
    #[error(transparent)]
    SslRecoverablePeerUnverified(Arc<CertificateCombinedError>),

    #[error("Unauthorized")]
    Unauthorized,

    // Protocol and server version
    #[error("Server version is not supported")]
    BadOcVersion,

    #[error("Wrong server response")]
    WrongServerResponse,

    #[error("Server instance is not configured")]
    InstanceNotConfigured,

    #[error("Incorrect server address")]
    IncorrectAddress,

    #[error("Server redirected to a non secure connection")]
    RedirectToNonSecure,

    #[error("Method not allowed: {}", .0.as_deref().unwrap_or("no details"))]
    SpecificMethodNotAllowed(Option<String>),

    #[error("Unsupported media type: {}", .0.as_deref().unwrap_or("no details"))]
    SpecificUnsupportedMediaType(Option<String>),

    // Resources and files
    #[error("File not found")]
    FileNotFound,

    #[error("Local file not found")]
    LocalFileNotFound,

    #[error("Conflict")]
    Conflict,

    #[error("Synchronization conflict")]
    SyncConflict,

    #[error("Quota exceeded")]
    QuotaExceeded,

    #[error("Forbidden")]
    Forbidden,

    #[error("Forbidden: {}", .0.as_deref().unwrap_or("no details"))]
    SpecificForbidden(Option<String>),

    #[error("Invalid character in name")]
    InvalidCharacterInName,

    #[error("Server detected an invalid character")]
    InvalidCharacter,

    #[error("Invalid local file name")]
    InvalidLocalFileName,

    #[error("Invalid overwrite")]
    InvalidOverwrite,

    #[error("Local storage is full")]
    LocalStorageFull,

    #[error("Local storage could not be moved")]
    LocalStorageNotMoved,

    #[error("Local storage could not be copied")]
    LocalStorageNotCopied,

    #[error("Local storage could not be removed")]
    LocalStorageNotRemoved,

    // Sharing
    #[error("Share not found: {}", .0.as_deref().unwrap_or("no details"))]
    ShareNotFound(Option<String>),

    #[error("Share forbidden: {}", .0.as_deref().unwrap_or("no details"))]
    ShareForbidden(Option<String>),

    #[error("Wrong share parameter")]
    ShareWrongParameter,

    // OAuth
    #[error("OAuth2 error")]
    OAuth2Error,

    #[error("OAuth2 access denied")]
    OAuth2ErrorAccessDenied,

    // Accounts
    #[error("Account is not new")]
    AccountNotNew,

    #[error("Account is not the same")]
    AccountNotTheSame,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Account error")]
    AccountException,

    // Operation lifecycle
    #[error("Operation cancelled")]
    Cancelled,

    #[error("Operation delayed until a Wi-Fi connection is available")]
    DelayedForWifi,

    #[error("Cannot move a folder into one of its descendants")]
    MoveIntoDescendant,

    #[error("Cannot copy a folder into one of its descendants")]
    CopyIntoDescendant,

    #[error("Move was only partially done")]
    PartialMoveDone,

    #[error("Copy was only partially done")]
    PartialCopyDone,

    // Fallbacks
    #[error(
        "Unhandled HTTP code {}",
        .0.map(|code| code.to_string()).unwrap_or_else(|| "(none)".to_string())
    )]
    UnhandledHttpCode(Option<u16>),

    #[error("Unknown error")]
    UnknownError,

    /// The local HTTP client could not be built. Never produced by a remote result.
    #[error("Failed to initialise HTTP client: {0}")]
    ClientInitialization(String),
}

/// Certificate chain failure reported when the server presents a certificate
/// that can't be verified against the trusted roots.
///
/// It carries what a trust dialog needs to show: the host, the DER encoded chain
/// as presented and each problem found while validating it.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("Certificate for {host} could not be verified ({} problem(s))", .problems.len())]
pub struct CertificateCombinedError {
    pub host: String,
    pub chain: Vec<Vec<u8>>,
    pub problems: Vec<CertificateProblem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertificateProblem {
    Expired,
    NotYetValid,
    UntrustedIssuer,
    HostnameMismatch,
    Other(String),
}

impl CertificateCombinedError {
    pub fn new(host: &str, chain: Vec<Vec<u8>>) -> Self {
        Self {
            host: host.to_string(),
            chain,
            problems: Vec::new(),
        }
    }

    pub fn with_problem(mut self, problem: CertificateProblem) -> Self {
        self.problems.push(problem);
        self
    }
}
