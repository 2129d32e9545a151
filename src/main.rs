//! api-fetch: resilient JSON API requests
//!
//! Entry point for the api-fetch application.

use api_fetch::config::{Cli, Command, ValidatedConfig, write_default_config};
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};
use run::RunError;

/// Exit code 1 for configuration problems, 2 when the request fails.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    if let Some(Command::Init { output }) = &cli.command {
        return handle_init(output);
    }

    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    setup_tracing(config.verbose);
    tracing::debug!("{config}");

    run_application(config)
}

/// Handles the `init` subcommand.
fn handle_init(output: &std::path::Path) -> ExitCode {
    match write_default_config(output) {
        Ok(()) => {
            println!("Configuration template written to: {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Prints the decoded body to stdout, or the failure to stderr.
#[cfg(not(tarpaulin_include))]
fn run_application(config: ValidatedConfig) -> ExitCode {
    let result = tokio::runtime::Runtime::new()
        .map_err(RunError::Runtime)
        .and_then(|runtime| runtime.block_on(run::execute(config)));

    match result {
        Ok(value) => {
            println!("{}", run::render(&value));
            exit_code::SUCCESS
        }
        Err(e) => {
            for line in run::describe_failure(&e) {
                eprintln!("{line}");
            }
            exit_code::request_error()
        }
    }
}
