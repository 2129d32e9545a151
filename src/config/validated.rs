//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use http::Method;
use http::header::{HeaderName, HeaderValue};
use url::Url;

use crate::client::{ClientConfig, Headers, RetryPolicy};

use super::cli::Cli;
use super::defaults;
use super::error::ConfigError;
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Client settings (base URL, timeout, retry policy)
    pub client: ClientConfig,

    /// Endpoint appended to the base URL (required)
    pub endpoint: String,

    /// HTTP method for the request
    pub method: Method,

    /// Caller headers merged over the client defaults
    pub headers: Headers,

    /// JSON request body (optional)
    pub body: Option<serde_json::Value>,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ url: {}{}, method: {}, timeout: {}ms, retry: {}x/{}ms, headers: {}, body: {} }}",
            self.client.base_url,
            self.endpoint,
            self.method,
            self.client.timeout.as_millis(),
            self.client.retry_policy.max_retries,
            self.client.retry_policy.initial_delay.as_millis(),
            self.headers.len(),
            self.body.is_some(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The endpoint is missing
    /// - Base URL and endpoint do not form an absolute URL
    /// - Method, header, or body syntax is invalid
    /// - The timeout is zero or the retry backoff is not positive
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let endpoint = cli.endpoint.clone().ok_or(ConfigError::MissingEndpoint)?;

        let base_url = cli
            .base_url
            .clone()
            .or_else(|| toml.and_then(|t| t.client.base_url.clone()))
            .unwrap_or_default();
        validate_url(&base_url, &endpoint)?;

        let method = Self::resolve_method(cli)?;
        let headers = Self::resolve_headers(cli, toml)?;
        let body = Self::resolve_body(cli)?;
        let timeout = Self::resolve_timeout(cli, toml)?;
        let retry_policy = Self::build_retry_policy(cli, toml)?;

        Ok(Self {
            client: ClientConfig {
                base_url,
                timeout,
                retry_policy,
            },
            endpoint,
            method,
            headers,
            body,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_method(cli: &Cli) -> Result<Method, ConfigError> {
        let method_str = cli.method.as_deref().unwrap_or(defaults::METHOD);

        method_str
            .to_uppercase()
            .parse::<Method>()
            .map_err(|_| ConfigError::InvalidMethod(method_str.to_string()))
    }

    fn resolve_headers(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Headers, ConfigError> {
        let mut headers = Headers::new();

        // TOML first so CLI entries override
        if let Some(toml) = toml {
            for (name, value) in &toml.client.headers {
                insert_header(&mut headers, name, value)?;
            }
        }

        for header_str in &cli.headers {
            let (name, value) = parse_header_string(header_str)?;
            insert_header(&mut headers, &name, &value)?;
        }

        let bearer = cli
            .bearer
            .as_deref()
            .or_else(|| toml.and_then(|t| t.client.bearer.as_deref()));

        if let Some(token) = bearer {
            insert_header(&mut headers, "Authorization", &format!("Bearer {token}"))?;
        }

        Ok(headers)
    }

    fn resolve_body(cli: &Cli) -> Result<Option<serde_json::Value>, ConfigError> {
        cli.data
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(|source| ConfigError::InvalidBody { source })
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let timeout = cli
            .timeout_ms
            .or_else(|| toml.and_then(|t| t.client.timeout_ms))
            .map_or_else(defaults::timeout, Duration::from_millis);

        if timeout.is_zero() {
            return Err(ConfigError::InvalidDuration { field: "timeout_ms" });
        }

        Ok(timeout)
    }

    fn build_retry_policy(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<RetryPolicy, ConfigError> {
        let retry = toml.map(|t| &t.retry);

        // Zero is allowed and disables retries
        let max_retries = cli
            .max_retries
            .or_else(|| toml.and_then(|t| t.client.max_retries))
            .unwrap_or(defaults::MAX_RETRIES);

        let initial_delay = retry
            .and_then(|r| r.initial_delay_ms)
            .map_or_else(defaults::retry_initial_delay, Duration::from_millis);

        let multiplier = retry
            .and_then(|r| r.multiplier)
            .unwrap_or(defaults::RETRY_MULTIPLIER);

        if multiplier <= 0.0 || !multiplier.is_finite() {
            return Err(ConfigError::InvalidRetry(multiplier));
        }

        Ok(RetryPolicy::new()
            .with_max_retries(max_retries)
            .with_initial_delay(initial_delay)
            .with_multiplier(multiplier))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn validate_url(base_url: &str, endpoint: &str) -> Result<(), ConfigError> {
    let url = format!("{base_url}{endpoint}");
    match Url::parse(&url) {
        Ok(_) => Ok(()),
        Err(source) => Err(ConfigError::InvalidUrl { url, source }),
    }
}

fn parse_header_string(s: &str) -> Result<(String, String), ConfigError> {
    // Try "Key=Value" format first
    if let Some((name, value)) = s.split_once('=') {
        return Ok((name.trim().to_string(), value.trim().to_string()));
    }

    // Try "Key: Value" format
    if let Some((name, value)) = s.split_once(':') {
        return Ok((name.trim().to_string(), value.trim().to_string()));
    }

    Err(ConfigError::InvalidHeader {
        value: s.to_string(),
    })
}

fn insert_header(headers: &mut Headers, name: &str, value: &str) -> Result<(), ConfigError> {
    name.parse::<HeaderName>()
        .map_err(|source| ConfigError::InvalidHeaderName {
            name: name.to_string(),
            source,
        })?;
    HeaderValue::from_str(value).map_err(|source| ConfigError::InvalidHeaderValue {
        name: name.to_string(),
        source,
    })?;

    headers.insert(name.to_string(), value.to_string());
    Ok(())
}
