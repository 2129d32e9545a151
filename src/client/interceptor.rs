//! Request, response, and error interceptor chains.
//!
//! Each chain is an append-only sequence run in registration order. Request
//! and response interceptors rewrite their input and may fail, aborting the
//! call. Error interceptors only observe: their signature gives them no way
//! to replace or swallow the error.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use super::{BoxError, Error, HttpResponse, RequestOptions};

/// Rewrites the endpoint and options before each attempt.
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    /// Returns the (possibly rewritten) endpoint and options.
    ///
    /// # Errors
    ///
    /// A failure aborts the attempt; no request is sent.
    async fn intercept(
        &self,
        endpoint: String,
        options: RequestOptions,
    ) -> Result<(String, RequestOptions), BoxError>;
}

/// Rewrites a final, successful response before it is decoded.
#[async_trait]
pub trait ResponseInterceptor: Send + Sync {
    /// Returns the (possibly rewritten) response.
    ///
    /// # Errors
    ///
    /// A failure turns the call into [`Error::Interceptor`].
    async fn intercept(&self, response: HttpResponse) -> Result<HttpResponse, BoxError>;
}

/// Observes a failed call before the error reaches the caller.
///
/// Observers cannot fail or replace the error; the caller always receives
/// the original one. Panics are not caught: a panicking observer unwinds
/// out of the call like any other panic in the task.
#[async_trait]
pub trait ErrorInterceptor: Send + Sync {
    /// Called once per failed call, after retries are exhausted.
    async fn on_error(&self, error: &Error);
}

/// Adapter returned by [`request_fn`].
#[derive(Debug, Clone, Copy)]
pub struct RequestFn<F>(F);

/// Adapter returned by [`response_fn`].
#[derive(Debug, Clone, Copy)]
pub struct ResponseFn<F>(F);

/// Adapter returned by [`error_fn`].
#[derive(Debug, Clone, Copy)]
pub struct ErrorFn<F>(F);

/// Wraps an async closure as a [`RequestInterceptor`].
///
/// # Example
///
/// ```
/// use api_fetch::client::{request_fn, BoxError, RequestOptions};
///
/// let versioned = request_fn(|endpoint: String, options: RequestOptions| async move {
///     Ok::<_, BoxError>((format!("/v1{endpoint}"), options))
/// });
/// ```
pub fn request_fn<F, Fut>(f: F) -> RequestFn<F>
where
    F: Fn(String, RequestOptions) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(String, RequestOptions), BoxError>> + Send + 'static,
{
    RequestFn(f)
}

/// Wraps an async closure as a [`ResponseInterceptor`].
pub fn response_fn<F, Fut>(f: F) -> ResponseFn<F>
where
    F: Fn(HttpResponse) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<HttpResponse, BoxError>> + Send + 'static,
{
    ResponseFn(f)
}

/// Wraps a closure as an [`ErrorInterceptor`].
///
/// The closure borrows the error synchronously and returns a future that
/// owns whatever it copied out of it.
pub fn error_fn<F, Fut>(f: F) -> ErrorFn<F>
where
    F: Fn(&Error) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    ErrorFn(f)
}

#[async_trait]
impl<F, Fut> RequestInterceptor for RequestFn<F>
where
    F: Fn(String, RequestOptions) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(String, RequestOptions), BoxError>> + Send + 'static,
{
    async fn intercept(
        &self,
        endpoint: String,
        options: RequestOptions,
    ) -> Result<(String, RequestOptions), BoxError> {
        (self.0)(endpoint, options).await
    }
}

#[async_trait]
impl<F, Fut> ResponseInterceptor for ResponseFn<F>
where
    F: Fn(HttpResponse) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<HttpResponse, BoxError>> + Send + 'static,
{
    async fn intercept(&self, response: HttpResponse) -> Result<HttpResponse, BoxError> {
        (self.0)(response).await
    }
}

#[async_trait]
impl<F, Fut> ErrorInterceptor for ErrorFn<F>
where
    F: Fn(&Error) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    async fn on_error(&self, error: &Error) {
        (self.0)(error).await;
    }
}

/// The three interceptor sequences owned by a client.
#[derive(Default, Clone)]
pub struct Interceptors {
    request: Vec<Arc<dyn RequestInterceptor>>,
    response: Vec<Arc<dyn ResponseInterceptor>>,
    error: Vec<Arc<dyn ErrorInterceptor>>,
}

impl std::fmt::Debug for Interceptors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interceptors")
            .field("request", &self.request.len())
            .field("response", &self.response.len())
            .field("error", &self.error.len())
            .finish()
    }
}

impl Interceptors {
    /// Creates empty chains.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a request interceptor.
    pub fn push_request(&mut self, interceptor: impl RequestInterceptor + 'static) {
        self.request.push(Arc::new(interceptor));
    }

    /// Appends a response interceptor.
    pub fn push_response(&mut self, interceptor: impl ResponseInterceptor + 'static) {
        self.response.push(Arc::new(interceptor));
    }

    /// Appends an error interceptor.
    pub fn push_error(&mut self, interceptor: impl ErrorInterceptor + 'static) {
        self.error.push(Arc::new(interceptor));
    }

    /// Number of registered interceptors per chain: (request, response, error).
    #[must_use]
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.request.len(), self.response.len(), self.error.len())
    }

    /// Returns true if no interceptor is registered in any chain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.request.is_empty() && self.response.is_empty() && self.error.is_empty()
    }

    /// Folds the request chain over `endpoint` and `options`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interceptor`] from the first failing interceptor.
    pub async fn apply_request(
        &self,
        endpoint: String,
        options: RequestOptions,
    ) -> Result<(String, RequestOptions), Error> {
        let mut current = (endpoint, options);
        for interceptor in &self.request {
            current = interceptor
                .intercept(current.0, current.1)
                .await
                .map_err(Error::Interceptor)?;
        }
        Ok(current)
    }

    /// Folds the response chain over `response`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interceptor`] from the first failing interceptor.
    pub async fn apply_response(&self, response: HttpResponse) -> Result<HttpResponse, Error> {
        let mut current = response;
        for interceptor in &self.response {
            current = interceptor
                .intercept(current)
                .await
                .map_err(Error::Interceptor)?;
        }
        Ok(current)
    }

    /// Notifies every error interceptor in order.
    pub async fn notify_error(&self, error: &Error) {
        for interceptor in &self.error {
            interceptor.on_error(error).await;
        }
    }
}
