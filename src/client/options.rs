//! Per-call request options and body encoding.

use std::time::Duration;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::{Body, Error, HeaderSource};

/// Options for one logical call.
///
/// The executor clones these for every attempt; the caller's value is never
/// modified. Request interceptors receive and return an owned copy.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// HTTP method (defaults to GET)
    pub method: http::Method,
    /// Headers merged over the JSON default
    pub headers: Option<HeaderSource>,
    /// Request body
    pub body: Option<Body>,
    /// Per-call timeout overriding the client default
    pub timeout: Option<Duration>,
    /// Caller-owned cancellation; replaces the internal timeout when set
    pub cancel: Option<CancellationToken>,
    /// Passthrough values for the transport
    pub extensions: http::Extensions,
}

impl RequestOptions {
    /// Creates options with all defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn with_method(mut self, method: http::Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the caller headers.
    #[must_use]
    pub fn with_headers(mut self, headers: impl Into<HeaderSource>) -> Self {
        self.headers = Some(headers.into());
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Overrides the client's default timeout for this call.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Supplies a cancellation token. No internal timeout is armed when set.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Stores a passthrough value for the transport.
    #[must_use]
    pub fn with_extension<T: Clone + Send + Sync + 'static>(mut self, value: T) -> Self {
        self.extensions.insert(value);
        self
    }
}

/// Wrapper marking a value to be sent as a JSON document.
#[derive(Debug, Clone, Copy)]
pub struct Json<T>(pub T);

/// Conversion into an optional request body.
///
/// Raw [`Body`] values pass through untouched; structured values are
/// serialized to JSON text.
pub trait IntoBody {
    /// Produces the body to send.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] if JSON serialization fails.
    fn into_body(self) -> Result<Option<Body>, Error>;
}

impl IntoBody for Body {
    fn into_body(self) -> Result<Option<Body>, Error> {
        Ok(Some(self))
    }
}

impl IntoBody for Option<Body> {
    fn into_body(self) -> Result<Option<Body>, Error> {
        Ok(self)
    }
}

impl IntoBody for () {
    fn into_body(self) -> Result<Option<Body>, Error> {
        Ok(None)
    }
}

impl<T: Serialize> IntoBody for Json<T> {
    fn into_body(self) -> Result<Option<Body>, Error> {
        serde_json::to_string(&self.0)
            .map(|text| Some(Body::Text(text)))
            .map_err(Error::Serialize)
    }
}

impl IntoBody for serde_json::Value {
    fn into_body(self) -> Result<Option<Body>, Error> {
        Json(self).into_body()
    }
}
