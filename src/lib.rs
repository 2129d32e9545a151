//! api-fetch: resilient HTTP request pipeline
//!
//! A library for issuing JSON API requests with default headers,
//! header-injection checks, per-attempt timeouts, retries for server
//! errors on idempotent methods, and request/response/error interceptors.

pub mod client;
pub mod config;
pub mod time;
