//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Client configuration section
    #[serde(default)]
    pub client: ClientSection,

    /// Retry policy configuration
    #[serde(default)]
    pub retry: RetrySection,
}

/// Client configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    /// Prefix prepended to every endpoint
    pub base_url: Option<String>,

    /// Per-attempt timeout in milliseconds
    pub timeout_ms: Option<u64>,

    /// Maximum number of retries
    pub max_retries: Option<u32>,

    /// HTTP headers as key-value pairs
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Bearer token for Authorization header
    pub bearer: Option<String>,
}

/// Retry backoff configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    /// Delay before the first retry in milliseconds
    pub initial_delay_ms: Option<u64>,

    /// Backoff multiplier
    pub multiplier: Option<f64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# api-fetch Configuration File

[client]
# Prefix prepended verbatim to every endpoint
# base_url = "http://localhost:3001"

# Per-attempt timeout in milliseconds (default: 10000)
# timeout_ms = 10000

# Maximum retries for 5xx responses to GET/PUT/DELETE/HEAD/OPTIONS (default: 3)
# max_retries = 3

# Bearer token for Authorization header
# bearer = "your-token-here"

# Extra HTTP headers (Content-Type defaults to application/json)
# [client.headers]
# X-Custom-Header = "value"

# Backoff between retries; unset keeps 300ms, 600ms, 1200ms, ...
[retry]
# Delay before the first retry in milliseconds (default: 300)
# initial_delay_ms = 300

# Backoff multiplier applied per retry (default: 2.0)
# multiplier = 2.0
"#
    .to_string()
}
