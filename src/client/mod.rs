//! Resilient HTTP request pipeline.
//!
//! This module provides types and traits for:
//! - Abstracting the transport ([`Transport`], [`HttpRequest`], [`HttpResponse`])
//! - Production transport implementation ([`ReqwestTransport`])
//! - Header merging with injection checks ([`merge_headers`])
//! - Request, response, and error interceptor chains ([`Interceptors`])
//! - Retry policy configuration ([`RetryPolicy`])
//! - The client facade and request executor ([`ApiClient`])

mod api;
mod error;
mod executor;
mod headers;
mod interceptor;
mod logger;
mod options;
mod retry;
mod transport;
mod wire;

#[cfg(test)]
mod headers_tests;
#[cfg(test)]
mod interceptor_tests;
#[cfg(test)]
mod test_support;

pub use api::{ApiClient, ClientConfig};
pub use error::{ApiError, BoxError, Error, HttpError};
pub use headers::{HeaderSource, Headers, default_headers, merge_headers, to_header_map};
pub use interceptor::{
    ErrorFn, ErrorInterceptor, Interceptors, RequestFn, RequestInterceptor, ResponseFn,
    ResponseInterceptor, error_fn, request_fn, response_fn,
};
pub use logger::{RequestLogger, TracingLogger};
pub use options::{IntoBody, Json, RequestOptions};
pub use retry::{IDEMPOTENT_METHODS, RetryPolicy, is_idempotent};
pub use transport::ReqwestTransport;
pub use wire::{Body, HttpRequest, HttpResponse, Transport};
