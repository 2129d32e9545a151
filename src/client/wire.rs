//! Transport-level request/response types and the transport trait.

use std::borrow::Cow;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::HttpError;

/// Opaque request payload handed to the transport as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Textual payload (JSON documents, form-encoded text, ...).
    Text(String),
    /// Binary payload (files, multipart bodies, ...).
    Bytes(Vec<u8>),
}

impl Body {
    /// Returns the payload as raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Bytes(bytes) => bytes,
        }
    }

    /// Consumes the body and returns its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Text(text) => text.into_bytes(),
            Self::Bytes(bytes) => bytes,
        }
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

/// A fully resolved request handed to a [`Transport`].
///
/// Built by the executor once per attempt, after headers are merged and
/// request interceptors have run.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method
    pub method: http::Method,
    /// Resolved URL (`base_url + endpoint`)
    pub url: String,
    /// Final merged headers
    pub headers: http::HeaderMap,
    /// Optional request body
    pub body: Option<Body>,
    /// Effective cancellation signal for this attempt
    pub cancel: CancellationToken,
    /// Opaque passthrough values for the transport
    pub extensions: http::Extensions,
}

impl HttpRequest {
    /// Creates a request with no headers, no body, and a fresh cancellation token.
    #[must_use]
    pub fn new(method: http::Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: http::HeaderMap::new(),
            body: None,
            cancel: CancellationToken::new(),
            extensions: http::Extensions::new(),
        }
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds a header to the request.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }
}

/// An HTTP response returned by a [`Transport`].
///
/// The body is fully buffered and belongs to the attempt that produced it.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Response body (fully buffered)
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new HTTP response.
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the `content-type` header, or an empty string when absent.
    #[must_use]
    pub fn content_type(&self) -> &str {
        self.headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    /// Returns true if the content type declares a JSON body.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type().contains("application/json")
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the parser error if the body is not valid JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Decodes the body according to its content type: JSON when the
    /// content type contains `application/json`, otherwise a JSON string
    /// holding the text.
    ///
    /// # Errors
    ///
    /// Returns the parser error if a JSON body is malformed.
    pub fn decode(&self) -> Result<serde_json::Value, serde_json::Error> {
        if self.is_json() {
            self.json()
        } else {
            Ok(serde_json::Value::String(self.text().into_owned()))
        }
    }
}

/// Capability that performs one HTTP request.
///
/// # Design
///
/// The executor depends only on this trait, enabling:
/// - Dependency injection of mock transports in tests
/// - Swapping HTTP libraries without changing the pipeline
///
/// Implementations should observe [`HttpRequest::cancel`] and stop work once
/// it fires. The executor races every call against the same signal, so a
/// transport that ignores it still cannot outlive its deadline.
///
/// # Example
///
/// ```ignore
/// use api_fetch::client::{HttpError, HttpRequest, HttpResponse, Transport};
///
/// struct StaticTransport {
///     response: HttpResponse,
/// }
///
/// impl Transport for StaticTransport {
///     async fn send(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(self.response.clone())
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Sends an HTTP request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when:
    /// - Network connection fails ([`HttpError::Connection`])
    /// - The request times out ([`HttpError::Timeout`])
    /// - The cancellation token fires ([`HttpError::Cancelled`])
    /// - The URL is invalid ([`HttpError::InvalidUrl`])
    fn send(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn send(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send {
        (**self).send(req)
    }
}
