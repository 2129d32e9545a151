//! Configuration layer for api-fetch.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! Headers merge: TOML headers are applied first, then `--header` entries
//! override them by exact name, then the bearer token sets `Authorization`.
//!
//! # CLI-Only vs TOML-Only Options
//!
//! The method, endpoint, and body describe a single request and are CLI-only.
//! Backoff shape is TOML-only:
//! - `retry.initial_delay_ms` (default: 300)
//! - `retry.multiplier` (default: 2.0)

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{Cli, Command};
pub use error::ConfigError;
pub use toml::{ClientSection, RetrySection, TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
