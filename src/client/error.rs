//! Error types for the request pipeline.

use std::fmt;

use thiserror::Error;

/// Boxed error returned by user-supplied interceptors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for transport operations.
///
/// Describes what went wrong while performing a single request without
/// dictating recovery strategy. The executor never retries these.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] BoxError),

    /// The attempt's deadline elapsed before the transport completed.
    #[error("Request timed out")]
    Timeout,

    /// The caller-supplied cancellation token fired.
    #[error("Request cancelled")]
    Cancelled,

    /// The resolved URL is invalid.
    ///
    /// This typically indicates a configuration error (e.g. an empty base URL)
    /// rather than a transient failure.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// A completed HTTP response with a non-success status.
///
/// Built by the executor when a response is not eligible for retry or when
/// retries are exhausted.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// Reason phrase of the status (e.g. "Internal Server Error").
    pub message: String,
    /// HTTP status code of the final attempt.
    pub status: Option<http::StatusCode>,
    /// Best-effort decoded error body. Text bodies are stored as a JSON string.
    pub data: Option<serde_json::Value>,
}

impl ApiError {
    /// Creates an error for the given status, deriving the message from its
    /// canonical reason phrase.
    #[must_use]
    pub fn from_status(status: http::StatusCode, data: Option<serde_json::Value>) -> Self {
        Self {
            message: status.canonical_reason().unwrap_or_default().to_string(),
            status: Some(status),
            data,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP {}: {}", status.as_u16(), self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ApiError {}

/// Error type for a logical call through [`ApiClient`](super::ApiClient).
///
/// Every failure of a call surfaces as exactly one of these variants, after
/// the registered error interceptors have observed it.
#[derive(Debug, Error)]
pub enum Error {
    /// A header name or value is not allowed (e.g. contains a line break).
    ///
    /// Raised before any network I/O.
    #[error("Invalid header value for \"{name}\": {reason}")]
    InvalidHeader {
        /// The offending header name
        name: String,
        /// Reason for rejection
        reason: String,
    },

    /// The injected transport failed.
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// A request or response interceptor failed.
    #[error("Interceptor failed: {0}")]
    Interceptor(#[source] BoxError),

    /// The server answered with a non-success status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A successful response body could not be decoded into the requested type.
    #[error("Failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// A request body could not be serialized to JSON.
    #[error("Failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl Error {
    /// Creates an `InvalidHeader` error.
    #[must_use]
    pub fn invalid_header(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Returns the HTTP status if this error came from a server response.
    #[must_use]
    pub const fn status(&self) -> Option<http::StatusCode> {
        match self {
            Self::Api(api) => api.status,
            _ => None,
        }
    }

    /// Returns the API error if this error came from a server response.
    #[must_use]
    pub const fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(api) => Some(api),
            _ => None,
        }
    }
}
