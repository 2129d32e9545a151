//! Client construction, interceptor registration, and verb helpers.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::time::TokioSleeper;

use super::{
    Error, ErrorInterceptor, Interceptors, IntoBody, RequestInterceptor, RequestLogger,
    RequestOptions, ResponseInterceptor, RetryPolicy,
};

/// Construction-time settings for an [`ApiClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Prefix prepended verbatim to every endpoint
    pub base_url: String,
    /// Default per-attempt timeout
    pub timeout: Duration,
    /// Retry behavior for 5xx responses
    pub retry_policy: RetryPolicy,
}

impl ClientConfig {
    /// Default per-attempt timeout (10 seconds).
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout: Self::DEFAULT_TIMEOUT,
            retry_policy: RetryPolicy::default(),
        }
    }
}

/// HTTP client applying default headers, timeouts, retries, and interceptors
/// on top of an injected [`Transport`](super::Transport).
///
/// Configuration and interceptors are set up through `&mut self` before the
/// client is shared; calls only need `&self`, so everything a call reads is
/// fixed while requests are in flight.
///
/// # Type Parameters
///
/// - `H`: The transport implementation
/// - `S`: The sleeper used between retries (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```no_run
/// use api_fetch::client::{ApiClient, ReqwestTransport, RequestOptions};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), api_fetch::client::Error> {
/// let client = ApiClient::new(ReqwestTransport::new())
///     .with_base_url("https://api.example.com")
///     .with_timeout(Duration::from_secs(5));
///
/// let users: serde_json::Value = client.get("/users", RequestOptions::new()).await?;
/// # Ok(())
/// # }
/// ```
pub struct ApiClient<H, S = TokioSleeper> {
    pub(super) transport: H,
    pub(super) sleeper: S,
    pub(super) config: ClientConfig,
    pub(super) logger: Option<Arc<dyn RequestLogger>>,
    pub(super) interceptors: Interceptors,
}

impl<H> ApiClient<H, TokioSleeper> {
    /// Creates a client with default settings over `transport`.
    ///
    /// Empty base URL, 10 second timeout, 3 retries, no logger, and
    /// [`TokioSleeper`] for backoff.
    #[must_use]
    pub fn new(transport: H) -> Self {
        Self::from_config(transport, ClientConfig::default())
    }

    /// Creates a client from validated configuration.
    #[must_use]
    pub fn from_config(transport: H, config: ClientConfig) -> Self {
        Self {
            transport,
            sleeper: TokioSleeper,
            config,
            logger: None,
            interceptors: Interceptors::new(),
        }
    }
}

impl<H, S> ApiClient<H, S> {
    /// Sets a custom sleeper for retry delays.
    ///
    /// This is primarily useful for testing to avoid actual delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> ApiClient<H, S2> {
        ApiClient {
            transport: self.transport,
            sleeper,
            config: self.config,
            logger: self.logger,
            interceptors: self.interceptors,
        }
    }

    /// Sets the base URL prepended to every endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Sets the default per-attempt timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Sets the maximum number of retries, keeping the backoff schedule.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.config.retry_policy.max_retries = max_retries;
        self
    }

    /// Replaces the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.config.retry_policy = policy;
        self
    }

    /// Installs an observational logger.
    #[must_use]
    pub fn with_logger(mut self, logger: impl RequestLogger + 'static) -> Self {
        self.logger = Some(Arc::new(logger));
        self
    }

    /// Appends a request interceptor. There is no way to remove one.
    pub fn add_request_interceptor(&mut self, interceptor: impl RequestInterceptor + 'static) {
        self.interceptors.push_request(interceptor);
    }

    /// Appends a response interceptor. There is no way to remove one.
    pub fn add_response_interceptor(&mut self, interceptor: impl ResponseInterceptor + 'static) {
        self.interceptors.push_response(interceptor);
    }

    /// Appends an error interceptor. There is no way to remove one.
    pub fn add_response_error_interceptor(&mut self, interceptor: impl ErrorInterceptor + 'static) {
        self.interceptors.push_error(interceptor);
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the registered interceptor chains.
    #[must_use]
    pub const fn interceptors(&self) -> &Interceptors {
        &self.interceptors
    }

    /// Returns the injected transport.
    #[must_use]
    pub const fn transport(&self) -> &H {
        &self.transport
    }
}

impl<H, S> fmt::Debug for ApiClient<H, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("logger", &self.logger.is_some())
            .field("interceptors", &self.interceptors)
            .finish_non_exhaustive()
    }
}

impl<H: super::Transport, S: crate::time::Sleeper> ApiClient<H, S> {
    /// Sends a request with caller-chosen options.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, Error> {
        self.execute(endpoint, options).await
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, Error> {
        self.request(endpoint, options.with_method(http::Method::GET))
            .await
    }

    /// Sends a POST request with `body`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] if the body cannot be encoded; otherwise
    /// see [`ApiClient::execute`].
    pub async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: impl IntoBody,
        options: RequestOptions,
    ) -> Result<T, Error> {
        let options = with_body(options, http::Method::POST, body)?;
        self.request(endpoint, options).await
    }

    /// Sends a PUT request with `body`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] if the body cannot be encoded; otherwise
    /// see [`ApiClient::execute`].
    pub async fn put<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: impl IntoBody,
        options: RequestOptions,
    ) -> Result<T, Error> {
        let options = with_body(options, http::Method::PUT, body)?;
        self.request(endpoint, options).await
    }

    /// Sends a PATCH request with `body`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] if the body cannot be encoded; otherwise
    /// see [`ApiClient::execute`].
    pub async fn patch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: impl IntoBody,
        options: RequestOptions,
    ) -> Result<T, Error> {
        let options = with_body(options, http::Method::PATCH, body)?;
        self.request(endpoint, options).await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn delete<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, Error> {
        self.request(endpoint, options.with_method(http::Method::DELETE))
            .await
    }
}

fn with_body(
    mut options: RequestOptions,
    method: http::Method,
    body: impl IntoBody,
) -> Result<RequestOptions, Error> {
    options.method = method;
    options.body = body.into_body()?;
    Ok(options)
}
