use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, Url};

use crate::api::responses::failure_message;
use crate::api::result::RemoteResult;
use crate::session::Session;

/// Seam between the services and the network.
///
/// Implementations only report whether a response came back; turning the
/// response status into a result code is left to the caller.
#[async_trait]
pub trait HttpSender: Send + Sync {
    async fn send(&self, request: RequestBuilder) -> RemoteResult<Response>;
}

pub struct DefaultSender;

#[async_trait]
impl HttpSender for DefaultSender {
    async fn send(&self, request: RequestBuilder) -> RemoteResult<Response> {
        match request.send().await {
            Ok(response) => RemoteResult::ok(response),
            Err(error) => RemoteResult::from_transport_error(error),
        }
    }
}

/// GET against an OCS endpoint of `session`; any non 2xx answer is a failure.
pub(super) async fn fetch_ocs_response<S: HttpSender + ?Sized>(
    session: &Session,
    sender: &S,
    url: Url,
) -> RemoteResult<Response> {
    let request = session
        .request_to(Method::GET, url)
        .header("OCS-APIREQUEST", "true");

    let response = match session.execute(sender, request).await.into_outcome() {
        Ok(response) => response,
        Err(failure) => return failure.into(),
    };

    if response.status().is_success() {
        return RemoteResult::ok(response);
    }
    failed_response(response).await
}

/// Failed result for `response`, keeping the message the server sent with it.
pub(super) async fn failed_response<T>(response: Response) -> RemoteResult<T> {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    RemoteResult::from_http_failure(status, failure_message(&body))
}
