use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use http::StatusCode;
use reqwest::{Request, RequestBuilder, Response, ResponseBuilderExt, Url};
use crate::api::http_sender::HttpSender;
use crate::api::result::RemoteResult;

// Thread-safe mock that captures requests for inspection
pub(crate) struct MockSender {
    pub responses: Arc<Mutex<Vec<RemoteResult<Response>>>>,
    pub captured_requests: Arc<Mutex<Vec<Request>>>,
}

impl MockSender {
    pub fn new(responses: Vec<RemoteResult<Response>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            captured_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_captured_requests(&self) -> std::sync::MutexGuard<'_, Vec<Request>> {
        self.captured_requests.lock().unwrap()
    }
}

#[async_trait]
impl HttpSender for MockSender {
    async fn send(&self, request: RequestBuilder) -> RemoteResult<Response> {
        // Build the request to capture it
        let built_request = request.build().unwrap();
        self.captured_requests.lock().unwrap().push(built_request);

        // Return the mocked response
        self.responses.lock().unwrap().remove(0)
    }
}

// Helper function to create a successful JSON response
pub(crate) fn create_json_response(body: serde_json::Value) -> RemoteResult<Response> {
    let headers = [("Content-Type", "application/json")];
    create_response(StatusCode::OK, &headers, body.to_string().into_bytes())
}

pub(crate) fn create_response(
    status: StatusCode,
    headers: &[(&str, &str)],
    body: Vec<u8>,
) -> RemoteResult<Response> {
    build_response(http::response::Builder::new(), status, headers, body)
}

// Response as served from `url`, for code reading the final URL after redirects
pub(crate) fn create_response_from(
    url: &str,
    status: StatusCode,
    headers: &[(&str, &str)],
    body: Vec<u8>,
) -> RemoteResult<Response> {
    let builder = http::response::Builder::new().url(Url::parse(url).unwrap());
    build_response(builder, status, headers, body)
}

fn build_response(
    mut builder: http::response::Builder,
    status: StatusCode,
    headers: &[(&str, &str)],
    body: Vec<u8>,
) -> RemoteResult<Response> {
    builder = builder.status(status);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    RemoteResult::ok(Response::from(builder.body(body).unwrap()))
}

// Helper function to create an error response
pub(crate) fn create_error_response(status: StatusCode, body: &str) -> RemoteResult<Response> {
    create_response(status, &[], body.as_bytes().to_vec())
}
