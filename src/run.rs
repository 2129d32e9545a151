//! Application execution logic.
//!
//! Builds the client from validated configuration, issues the configured
//! request, and renders the outcome for the terminal.

use serde_json::Value;
use thiserror::Error;

use api_fetch::client::{
    ApiClient, Error, IntoBody, Json, ReqwestTransport, RequestOptions, TracingLogger, Transport,
};
use api_fetch::config::ValidatedConfig;
use api_fetch::time::Sleeper;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to start the async runtime.
    #[error("Failed to create Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// The request failed.
    #[error("Request failed: {0}")]
    Request(#[from] Error),
}

/// Issues the configured request over the production transport.
///
/// # Errors
///
/// Returns [`RunError::Request`] if the call fails.
pub async fn execute(config: ValidatedConfig) -> Result<Value, RunError> {
    let client = ApiClient::from_config(ReqwestTransport::new(), config.client.clone())
        .with_logger(TracingLogger);

    send(&client, &config).await
}

/// Issues the configured request through `client`.
///
/// The body, if any, is sent as JSON.
pub async fn send<H, S>(client: &ApiClient<H, S>, config: &ValidatedConfig) -> Result<Value, RunError>
where
    H: Transport,
    S: Sleeper,
{
    let mut options = RequestOptions::new()
        .with_method(config.method.clone())
        .with_headers(config.headers.clone());
    if let Some(body) = &config.body {
        options.body = Json(body).into_body()?;
    }

    let value = client.request(&config.endpoint, options).await?;
    Ok(value)
}

/// Formats a decoded response for stdout.
///
/// Text bodies are printed verbatim; everything else as pretty JSON.
#[must_use]
pub fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// Lines describing a failure for stderr.
///
/// Server errors include the status and the decoded error body.
#[must_use]
pub fn describe_failure(error: &RunError) -> Vec<String> {
    let mut lines = vec![format!("Error: {error}")];

    let api = match error {
        RunError::Request(request_error) => request_error.as_api_error(),
        RunError::Runtime(_) => None,
    };

    if let Some(api) = api {
        if let Some(status) = api.status {
            lines.push(format!("Status: {}", status.as_u16()));
        }
        if let Some(data) = &api.data {
            lines.push(format!("Body: {}", render(data)));
        }
    }

    lines
}
