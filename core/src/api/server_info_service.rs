use std::sync::Arc;

use async_trait::async_trait;
use http::StatusCode;
use reqwest::header::WWW_AUTHENTICATE;
use reqwest::{Method, Url};

use crate::api::http_sender::{failed_response, DefaultSender, HttpSender};
use crate::api::responses::StatusData;
use crate::api::result::{RemoteCause, RemoteResult, ResultCode};
use crate::session::Session;

const STATUS_PATH: &str = "status.php";
const WEBDAV_PATH: &str = "remote.php/dav/files/";

/// Oldest server release the client talks to.
const MINIMUM_SUPPORTED_VERSION: [u32; 3] = [10, 0, 0];

/// Server release as reported by `status.php`.
///
/// Servers may hide their version, which is accepted as supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerVersion {
    version: String,
    numbers: Vec<u32>,
}

impl ServerVersion {
    pub fn new(version: &str) -> Self {
        let version = version.trim();
        let numbers = version
            .split('.')
            .map(str::parse::<u32>)
            .collect::<Result<Vec<_>, _>>()
            .unwrap_or_default();

        Self {
            version: version.to_string(),
            numbers,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.version
    }

    pub fn is_hidden(&self) -> bool {
        self.version.is_empty()
    }

    pub fn is_supported(&self) -> bool {
        self.is_hidden() || self.numbers.as_slice() >= MINIMUM_SUPPORTED_VERSION.as_slice()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteServerInfo {
    pub version: ServerVersion,
    /// Where the server really lives once redirections were followed.
    pub base_url: String,
    pub is_secure_connection: bool,
}

/// Calls made before any account exists, to learn about a server.
#[async_trait]
pub trait ServerInfoService: Send + Sync {
    /// Reads `status.php`. The success code tells whether the connection is
    /// secure and whether a redirection dropped TLS on the way.
    async fn get_remote_status(&self) -> RemoteResult<RemoteServerInfo>;

    /// Unauthenticated WebDAV request; returns the `WWW-Authenticate` challenges
    /// of the answer, empty when the server let the request through.
    async fn get_authentication_challenges(&self) -> RemoteResult<Vec<String>>;
}

/// [`ServerInfoService`] for ownCloud servers.
pub struct OcServerInfoService<S: HttpSender = DefaultSender> {
    pub(crate) session: Arc<Session>,
    pub(crate) sender: Arc<S>,
}

impl<S: HttpSender> OcServerInfoService<S> {
    pub fn new(session: Arc<Session>, sender: Arc<S>) -> Self {
        Self { session, sender }
    }
}

#[async_trait]
impl<S: HttpSender> ServerInfoService for OcServerInfoService<S> {
    async fn get_remote_status(&self) -> RemoteResult<RemoteServerInfo> {
        let url = match self.session.url_for(STATUS_PATH).into_outcome() {
            Ok(url) => url,
            Err(failure) => return failure.into(),
        };
        let requested_secure = url.scheme() == "https";

        let request = self.session.request_to(Method::GET, url);
        let sent = self.session.execute(self.sender.as_ref(), request).await;
        let response = match sent.into_outcome() {
            Ok(response) => response,
            Err(failure) => return failure.into(),
        };
        if !response.status().is_success() {
            return failed_response(response).await;
        }

        let final_url = response.url().clone();
        let status = match response.json::<StatusData>().await {
            Ok(status) => status,
            Err(e) => {
                return RemoteResult::failure(ResultCode::WrongServerResponse)
                    .with_cause(RemoteCause::Transport(Arc::new(e.into())));
            }
        };

        if !status.installed {
            return RemoteResult::failure(ResultCode::InstanceNotConfigured);
        }
        if status.maintenance {
            return RemoteResult::failure(ResultCode::ServiceUnavailable);
        }
        let version = ServerVersion::new(&status.version);
        if !version.is_supported() {
            return RemoteResult::failure(ResultCode::BadOcVersion);
        }

        let is_secure_connection = final_url.scheme() == "https";
        let code = match (requested_secure, is_secure_connection) {
            (true, false) => ResultCode::OkRedirectToNonSecureConnection,
            (_, true) => ResultCode::OkSsl,
            (false, false) => ResultCode::OkNoSsl,
        };
        RemoteResult::ok_with_code(
            code,
            RemoteServerInfo {
                version,
                base_url: base_url_of(&final_url),
                is_secure_connection,
            },
        )
    }

    async fn get_authentication_challenges(&self) -> RemoteResult<Vec<String>> {
        let propfind = match Method::from_bytes(b"PROPFIND") {
            Ok(method) => method,
            Err(_) => return RemoteResult::failure(ResultCode::UnknownError),
        };
        let request = match self.session.request(propfind, WEBDAV_PATH).into_outcome() {
            Ok(request) => request.header("Depth", "0"),
            Err(failure) => return failure.into(),
        };

        let sent = self.session.execute(self.sender.as_ref(), request).await;
        let response = match sent.into_outcome() {
            Ok(response) => response,
            Err(failure) => return failure.into(),
        };

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            let challenges = response
                .headers()
                .get_all(WWW_AUTHENTICATE)
                .iter()
                .filter_map(|value| value.to_str().ok())
                .map(str::to_string)
                .collect();
            return RemoteResult::ok(challenges);
        }
        if status.is_success() {
            return RemoteResult::ok(Vec::new());
        }
        failed_response(response).await
    }
}

fn base_url_of(status_url: &Url) -> String {
    status_url
        .as_str()
        .trim_end_matches(STATUS_PATH)
        .trim_end_matches('/')
        .to_string()
}
