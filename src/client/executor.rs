//! Request execution: timeouts, retries, decoding, and error notification.

use std::future::Future;

use serde::de::DeserializeOwned;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::time::Sleeper;

use super::headers::{default_headers, merge_headers, to_header_map};
use super::{
    ApiClient, ApiError, Error, HttpError, HttpRequest, HttpResponse, RequestOptions, Transport,
};

/// Result of a single attempt that did not fail.
enum Attempt<T> {
    /// The call resolved with a decoded value.
    Complete(T),
    /// The server answered with a retryable status.
    Retry(http::StatusCode),
}

/// Cancellation signal scoped to one attempt.
///
/// A caller-supplied token replaces the internal timeout entirely. The
/// timer only lives inside [`AttemptSignal::guard`], so it is released on
/// every path out of the attempt. A timeout too large to express as an
/// instant arms no timer at all.
struct AttemptSignal {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl AttemptSignal {
    fn new(caller: Option<CancellationToken>, deadline: Option<Instant>) -> Self {
        match caller {
            Some(token) => Self {
                token,
                deadline: None,
            },
            None => Self {
                token: CancellationToken::new(),
                deadline,
            },
        }
    }

    /// Drives `send` until it completes, the deadline passes, or the
    /// caller's token fires.
    async fn guard<F>(&self, send: F) -> Result<HttpResponse, HttpError>
    where
        F: Future<Output = Result<HttpResponse, HttpError>>,
    {
        let Some(deadline) = self.deadline else {
            return tokio::select! {
                biased;
                () = self.token.cancelled() => Err(HttpError::Cancelled),
                result = send => result,
            };
        };

        tokio::select! {
            biased;
            result = send => result,
            () = tokio::time::sleep_until(deadline) => {
                self.token.cancel();
                Err(HttpError::Timeout)
            }
        }
    }
}

impl<H: Transport, S: Sleeper> ApiClient<H, S> {
    /// Runs one logical call: attempts, retries, decoding, and error
    /// notification.
    ///
    /// Every attempt starts from the caller's original `endpoint` and
    /// `options`, so request interceptors see the same input each time.
    /// Completed 5xx responses to idempotent methods are retried up to
    /// `max_retries` times with exponential backoff. A 204 response decodes
    /// as JSON `null`, so `T` should accept it (e.g. `Option<_>` or
    /// [`serde_json::Value`]).
    ///
    /// # Errors
    ///
    /// Returns the first failure of the call after every error interceptor
    /// has observed it:
    /// - [`Error::InvalidHeader`] for header values with line breaks
    /// - [`Error::Interceptor`] when an interceptor fails
    /// - [`Error::Transport`] for network failures, timeouts, cancellation
    /// - [`Error::Api`] for non-success statuses
    /// - [`Error::Decode`] when a success body does not decode into `T`
    pub async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, Error> {
        let mut attempt = 0;

        let outcome = loop {
            match self.attempt(endpoint, &options, attempt).await {
                Ok(Attempt::Complete(value)) => break Ok(value),
                Ok(Attempt::Retry(status)) => {
                    let delay = self.config.retry_policy.delay_for_retry(attempt);
                    tracing::warn!(
                        status = status.as_u16(),
                        retry = attempt + 1,
                        max_retries = self.config.retry_policy.max_retries,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "Server error for {endpoint}, retrying"
                    );
                    self.sleeper.sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => break Err(error),
            }
        };

        if let Err(error) = &outcome {
            self.notify(error).await;
        }

        outcome
    }

    /// Performs one send attempt.
    async fn attempt<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: &RequestOptions,
        attempt: u32,
    ) -> Result<Attempt<T>, Error> {
        let timeout = options.timeout.unwrap_or(self.config.timeout);
        let deadline = Instant::now().checked_add(timeout);

        // Reject bad caller headers before interceptors or I/O
        let defaults = default_headers();
        merge_headers(&defaults, options.headers.as_ref())?;

        let (endpoint, options) = self
            .interceptors
            .apply_request(endpoint.to_string(), options.clone())
            .await?;

        let merged = merge_headers(&defaults, options.headers.as_ref())?;
        let headers = to_header_map(&defaults, &merged)?;
        let signal = AttemptSignal::new(options.cancel, deadline);
        let method = options.method;

        let request = HttpRequest {
            method: method.clone(),
            url: format!("{}{endpoint}", self.config.base_url),
            headers,
            body: options.body,
            cancel: signal.token.clone(),
            extensions: options.extensions,
        };

        tracing::debug!(method = %method, url = %request.url, attempt, "Sending request");
        if let Some(logger) = &self.logger {
            logger.debug(&request.url, &request);
        }

        let response = signal.guard(self.transport.send(request)).await?;

        if !response.is_success() {
            if self
                .config
                .retry_policy
                .should_retry(&method, response.status, attempt)
            {
                return Ok(Attempt::Retry(response.status));
            }
            return Err(api_error(&response).into());
        }

        let response = self.interceptors.apply_response(response).await?;
        decode_success(&response).map(Attempt::Complete)
    }

    async fn notify(&self, error: &Error) {
        tracing::debug!(
            interceptors = self.interceptors.counts().2,
            "Notifying error interceptors: {error}"
        );
        self.interceptors.notify_error(error).await;

        if let Some(logger) = &self.logger {
            logger.error(error);
        }
    }
}

/// Builds the error for a final non-success response.
///
/// Body decode failures leave `data` empty so they never mask the status.
fn api_error(response: &HttpResponse) -> ApiError {
    let data = match response.decode() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(
                status = response.status.as_u16(),
                "Discarding undecodable error body: {e}"
            );
            None
        }
    };

    ApiError::from_status(response.status, data)
}

/// Decodes a successful response into `T`.
fn decode_success<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, Error> {
    let value = if response.status == http::StatusCode::NO_CONTENT {
        serde_json::Value::Null
    } else {
        response.decode().map_err(Error::Decode)?
    };

    serde_json::from_value(value).map_err(Error::Decode)
}
