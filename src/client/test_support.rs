//! Shared test doubles for the client module.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::time::Sleeper;

use super::{HttpError, HttpRequest, HttpResponse, Transport};

/// Mock transport that returns a scripted sequence of results.
#[derive(Debug)]
pub struct MockTransport {
    responses: Mutex<Vec<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockTransport {
    pub fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Answers every call with the same response.
    pub fn always(response: HttpResponse, times: usize) -> Self {
        Self::new((0..times).map(|_| Ok(response.clone())).collect())
    }

    pub fn ok_json(body: &str) -> Self {
        Self::new(vec![Ok(json(200, body))])
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        self.responses.lock().unwrap().remove(0)
    }
}

/// Transport whose calls never complete, for timeout and cancellation tests.
#[derive(Debug, Default)]
pub struct HangingTransport {
    pub requests: Mutex<Vec<HttpRequest>>,
}

impl Transport for HangingTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(req);
        std::future::pending().await
    }
}

/// Sleeper recording each requested delay without waiting.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

pub fn status(code: u16) -> http::StatusCode {
    http::StatusCode::from_u16(code).unwrap()
}

/// Response with a JSON content type.
pub fn json(code: u16, body: &str) -> HttpResponse {
    with_content_type(code, "application/json; charset=utf-8", body)
}

/// Response with a plain-text content type.
pub fn text(code: u16, body: &str) -> HttpResponse {
    with_content_type(code, "text/plain", body)
}

pub fn with_content_type(code: u16, content_type: &str, body: &str) -> HttpResponse {
    let mut headers = http::HeaderMap::new();
    headers.insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_str(content_type).unwrap(),
    );
    HttpResponse::new(status(code), headers, body.as_bytes().to_vec())
}
