//! Errors raised while loading and validating configuration.

use std::path::PathBuf;

use http::header::{InvalidHeaderName, InvalidHeaderValue};
use thiserror::Error;

/// Reasons the CLI arguments and config file cannot be turned into a request.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file given with `--config` could not be read.
    #[error("Cannot read config file '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unknown keys.
    #[error("Malformed config file: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// `init` could not write the template.
    #[error("Cannot write config file '{}': {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No endpoint argument was given.
    #[error("No endpoint given. Pass the endpoint as the first argument")]
    MissingEndpoint,

    /// Base URL joined with the endpoint is not an absolute URL.
    #[error("'{url}' is not an absolute URL: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A millisecond setting that must be non-zero was zero.
    #[error("{field} must be greater than 0")]
    InvalidDuration { field: &'static str },

    /// Retry backoff multiplier is zero, negative, or not finite.
    #[error("Retry multiplier must be a positive finite number, got {0}")]
    InvalidRetry(f64),

    /// `--method` is not a valid HTTP token.
    #[error("'{0}' is not an HTTP method")]
    InvalidMethod(String),

    /// A `--header` argument has neither `=` nor `:`.
    #[error("Header '{value}' has no separator, expected 'Name=Value' or 'Name: Value'")]
    InvalidHeader { value: String },

    #[error("Bad header name '{name}': {source}")]
    InvalidHeaderName {
        name: String,
        #[source]
        source: InvalidHeaderName,
    },

    #[error("Bad value for header '{name}': {source}")]
    InvalidHeaderValue {
        name: String,
        #[source]
        source: InvalidHeaderValue,
    },

    /// `--data` is not valid JSON.
    #[error("Request body is not valid JSON: {source}")]
    InvalidBody {
        #[source]
        source: serde_json::Error,
    },
}
