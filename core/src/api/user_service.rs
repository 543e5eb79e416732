use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderName, CONTENT_TYPE, ETAG};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;

use crate::api::http_sender::{fetch_ocs_response, DefaultSender, HttpSender};
use crate::api::responses::{OcsResponse, UserDetailsData, UserInfoData};
use crate::api::result::{RemoteCause, RemoteResult, ResultCode};
use crate::session::Session;

const USER_INFO_PATH: &str = "ocs/v2.php/cloud/user";
const USERS_PATH: &str = "ocs/v2.php/cloud/users";
const AVATAR_PATH: &str = "index.php/avatar";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUserInfo {
    pub id: String,
    pub display_name: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemoteQuota {
    /// Negative values are the server's markers for "unknown" and "unlimited".
    pub free: i64,
    pub used: i64,
    pub total: i64,
    pub relative: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteAvatarData {
    pub avatar_data: Vec<u8>,
    pub e_tag: String,
    pub mime_type: String,
}

/// User related calls for the account a session belongs to.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn get_user_info(&self) -> RemoteResult<RemoteUserInfo>;
    async fn get_user_quota(&self) -> RemoteResult<RemoteQuota>;
    async fn get_user_avatar(&self, dimension: u32) -> RemoteResult<RemoteAvatarData>;
}

/// [`UserService`] speaking the OCS API.
pub struct OcUserService<S: HttpSender = DefaultSender> {
    pub(crate) session: Arc<Session>,
    pub(crate) sender: Arc<S>,
}

impl<S: HttpSender> OcUserService<S> {
    pub fn new(session: Arc<Session>, sender: Arc<S>) -> Self {
        Self { session, sender }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    async fn fetch(&self, url: Url) -> RemoteResult<Response> {
        fetch_ocs_response(&self.session, self.sender.as_ref(), url).await
    }

    async fn fetch_ocs<T: DeserializeOwned>(&self, url: RemoteResult<Url>) -> RemoteResult<T> {
        let url = match url.into_outcome() {
            Ok(url) => url,
            Err(failure) => return failure.into(),
        };
        let response = match self.fetch(url).await.into_outcome() {
            Ok(response) => response,
            Err(failure) => return failure.into(),
        };

        match response.json::<OcsResponse<T>>().await {
            Ok(parsed) => RemoteResult::ok(parsed.ocs.data),
            Err(e) => RemoteResult::failure(ResultCode::WrongServerResponse)
                .with_cause(RemoteCause::Transport(Arc::new(e.into()))),
        }
    }

    /// URL below `path` ending with the user name, escaped as one path segment.
    fn user_url(&self, path: &str, trailing: &[&str]) -> RemoteResult<Url> {
        let credentials = self.session.credentials();

        self.session.url_for(path).and_then(|mut url| {
            let Some(username) = credentials.username() else {
                return RemoteResult::failure(ResultCode::Unauthorized);
            };
            match url.path_segments_mut() {
                Ok(mut segments) => {
                    segments.pop_if_empty().push(username).extend(trailing);
                }
                Err(()) => return RemoteResult::failure(ResultCode::IncorrectAddress),
            }
            RemoteResult::ok(url)
        })
    }
}

#[async_trait]
impl<S: HttpSender> UserService for OcUserService<S> {
    async fn get_user_info(&self) -> RemoteResult<RemoteUserInfo> {
        let url = self.session.url_for(USER_INFO_PATH).map(with_json_format);

        self.fetch_ocs::<UserInfoData>(url).await.map(|data| RemoteUserInfo {
            id: data.id,
            display_name: data.display_name,
            email: data.email.filter(|email| !email.is_empty()),
        })
    }

    async fn get_user_quota(&self) -> RemoteResult<RemoteQuota> {
        let url = self.user_url(USERS_PATH, &[]).map(with_json_format);

        self.fetch_ocs::<UserDetailsData>(url).await.map(|data| RemoteQuota {
            free: data.quota.free,
            used: data.quota.used,
            total: data.quota.total,
            relative: data.quota.relative,
        })
    }

    async fn get_user_avatar(&self, dimension: u32) -> RemoteResult<RemoteAvatarData> {
        let size = dimension.to_string();
        let url = match self.user_url(AVATAR_PATH, &[&size]).into_outcome() {
            Ok(url) => url,
            Err(failure) => return failure.into(),
        };
        let response = match self.fetch(url).await.into_outcome() {
            Ok(response) => response,
            Err(failure) => return failure.into(),
        };

        let (e_tag, mime_type) = {
            let header = |name: HeaderName| {
                response
                    .headers()
                    .get(name)
                    .and_then(|value| value.to_str().ok())
                    .map(|value| value.trim_matches('"').to_string())
            };
            (
                header(ETAG).unwrap_or_default(),
                header(CONTENT_TYPE).unwrap_or_else(|| "application/octet-stream".to_string()),
            )
        };

        match response.bytes().await {
            Ok(bytes) if !bytes.is_empty() => RemoteResult::ok(RemoteAvatarData {
                avatar_data: bytes.to_vec(),
                e_tag,
                mime_type,
            }),
            // A user without avatar gets an empty body
            Ok(_) => RemoteResult::failure(ResultCode::FileNotFound),
            Err(e) => RemoteResult::from_transport_error(e),
        }
    }
}

fn with_json_format(mut url: Url) -> Url {
    url.query_pairs_mut().append_pair("format", "json");
    url
}
