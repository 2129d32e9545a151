//! Production transport implementation using reqwest.

use super::{HttpError, HttpRequest, HttpResponse, Transport};

/// Production transport using reqwest.
///
/// A thin wrapper around `reqwest::Client` implementing [`Transport`]. It
/// inherits reqwest's defaults including connection pooling; per-attempt
/// deadlines come from the executor through [`HttpRequest::cancel`].
///
/// # Example
///
/// ```no_run
/// use api_fetch::client::{HttpRequest, ReqwestTransport, Transport};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = ReqwestTransport::new();
/// let request = HttpRequest::new(http::Method::POST, "https://api.example.com/echo")
///     .with_body("hello");
/// let response = transport.send(request).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Creates a transport from an existing reqwest client.
    ///
    /// Useful when you need custom configuration (TLS, proxies, etc.).
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }

    async fn perform(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = url::Url::parse(&req.url)
            .map_err(|e| HttpError::InvalidUrl(format!("{}: {e}", req.url)))?;

        let mut builder = self.inner.request(req.method, url).headers(req.headers);

        if let Some(body) = req.body {
            builder = builder.body(body.into_bytes());
        }

        let response = builder.send().await.map_err(classify)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(classify)?.to_vec();

        Ok(HttpResponse::new(status, headers, body))
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let cancel = req.cancel.clone();

        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(HttpError::Cancelled),
            result = self.perform(req) => result,
        }
    }
}

fn classify(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else if e.is_builder() {
        HttpError::InvalidUrl(e.to_string())
    } else {
        HttpError::Connection(Box::new(e))
    }
}
