//! Observational request logging.

use super::{Error, HttpRequest};

/// Optional sink that observes traffic without influencing it.
pub trait RequestLogger: Send + Sync {
    /// Called at the start of every transport call.
    fn debug(&self, url: &str, request: &HttpRequest);

    /// Called once when a logical call fails.
    fn error(&self, _error: &Error) {}
}

/// [`RequestLogger`] that forwards to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl RequestLogger for TracingLogger {
    fn debug(&self, url: &str, request: &HttpRequest) {
        tracing::debug!(
            method = %request.method,
            url,
            headers = request.headers.len(),
            has_body = request.body.is_some(),
            "fetch"
        );
    }

    fn error(&self, error: &Error) {
        tracing::error!("Request failed: {error}");
    }
}
