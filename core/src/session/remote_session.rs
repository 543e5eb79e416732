use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use http::StatusCode;
use log::debug;
use reqwest::cookie::CookieStore;
use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::{Method, RequestBuilder, Response, Url};

use crate::api::{Error, HttpSender, RemoteResult, ResultCode};
use crate::config::ClientConfig;
use crate::session::account::Account;
use crate::session::connection_validator::ConnectionValidator;
use crate::session::cookie_jar::CookieJar;
use crate::session::credentials::Credentials;

/// Connection context for one account, or for one anonymous login attempt.
///
/// Every request built from the same session carries the cookies collected by
/// [`execute`](Session::execute), so a sequence of calls made through one
/// session looks like one conversation to the server.
#[derive(Debug)]
pub struct Session {
    account: Option<Account>,
    base_uri: Option<Url>,
    credentials: RwLock<Credentials>,
    cookies: Arc<CookieJar>,
    http: reqwest::Client,
    validator: ConnectionValidator,
}

impl Session {
    pub(crate) fn build(
        account: Option<Account>,
        base_uri: Option<Url>,
        credentials: Credentials,
        config: &ClientConfig,
    ) -> Result<Self, Error> {
        let cookies = Arc::new(CookieJar::new());
        let validator = config.connection_validator;

        let mut builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs));
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        let http = validator
            .apply(builder)
            .build()
            .map_err(|e| Error::ClientInitialization(e.to_string()))?;

        Ok(Self {
            account,
            base_uri,
            credentials: RwLock::new(credentials),
            cookies,
            http,
            validator,
        })
    }

    /// Account this session belongs to; `None` for anonymous sessions and when no
    /// account could be resolved.
    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    pub fn base_uri(&self) -> Option<&Url> {
        self.base_uri.as_ref()
    }

    pub fn credentials(&self) -> Credentials {
        self.credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_credentials(&self, credentials: Credentials) {
        *self.credentials.write().unwrap_or_else(PoisonError::into_inner) = credentials;
    }

    pub fn cookie_jar(&self) -> &Arc<CookieJar> {
        &self.cookies
    }

    pub fn connection_validator(&self) -> &ConnectionValidator {
        &self.validator
    }

    /// Resets connection state after the server rejected the session.
    pub fn revalidate(&self) {
        if self.validator.clear_cookies_on_validation {
            debug!("Clearing cookies of session for {:?}", self.account.as_ref().map(|a| &a.name));
            self.cookies.clear();
        }
    }

    /// Absolute URL of `path` below the base URI.
    pub fn url_for(&self, path: &str) -> RemoteResult<Url> {
        let Some(base_uri) = &self.base_uri else {
            return RemoteResult::failure(ResultCode::AccountNotFound);
        };

        let joined = format!(
            "{}/{}",
            base_uri.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        match Url::parse(&joined) {
            Ok(url) => RemoteResult::ok(url),
            Err(_) => RemoteResult::failure(ResultCode::IncorrectAddress),
        }
    }

    /// Request against `path` carrying the current credentials.
    pub fn request(&self, method: Method, path: &str) -> RemoteResult<RequestBuilder> {
        self.url_for(path).map(|url| self.request_to(method, url))
    }

    pub fn request_to(&self, method: Method, url: Url) -> RequestBuilder {
        let cookies = self.cookies.cookies(&url);
        let request = self.credentials().apply(self.http.request(method, url));
        match cookies {
            Some(cookies) => request.header(COOKIE, cookies),
            None => request,
        }
    }

    /// Sends `request` through `sender` as part of this session.
    ///
    /// Cookies set by the server are kept for the following requests. An
    /// authenticated request answered with 401 revalidates the session.
    pub async fn execute<S: HttpSender + ?Sized>(
        &self,
        sender: &S,
        request: RequestBuilder,
    ) -> RemoteResult<Response> {
        let (client, request) = request.build_split();
        let request = match request {
            Ok(request) => request,
            Err(e) => return RemoteResult::from_transport_error(e),
        };
        // Cookies are stored against the requested URL, not the one a redirect ended on
        let url = request.url().clone();

        let sent = sender.send(RequestBuilder::from_parts(client, request)).await;
        let response = match sent.into_outcome() {
            Ok(response) => response,
            Err(failure) => return failure.into(),
        };

        let mut set_cookies = response.headers().get_all(SET_COOKIE).iter();
        self.cookies.set_cookies(&mut set_cookies, &url);

        if response.status() == StatusCode::UNAUTHORIZED && !self.credentials().is_anonymous() {
            self.revalidate();
        }
        RemoteResult::ok(response)
    }
}
