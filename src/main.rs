//! gs-provision: Grandstream provisioning file generator
//!
//! Entry point for the gs-provision application.

use gs_provision::config::{
    Cli, Command, ConfigError, ValidatedConfig, write_default_config, write_default_template,
};
use std::path::Path;
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Handle subcommands
    match &cli.command {
        Some(Command::Init { output }) => {
            return handle_generate(output, "Configuration file", write_default_config);
        }
        Some(Command::ExportTemplate { output }) => {
            return handle_generate(output, "Provisioning template", write_default_template);
        }
        None => {}
    }

    // Load and validate configuration
    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    // Setup logging and run
    setup_tracing(config.verbose);
    tracing::info!("{config}");

    run_application(&config)
}

/// Handles the file-generating subcommands.
fn handle_generate(
    output: &Path,
    what: &str,
    generate: fn(&Path) -> Result<(), ConfigError>,
) -> ExitCode {
    match generate(output) {
        Ok(()) => {
            println!("{what} written to: {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Runs the provisioning pipeline with the given configuration.
fn run_application(config: &ValidatedConfig) -> ExitCode {
    match run::execute(config) {
        Ok(summary) if summary.is_clean() => exit_code::SUCCESS,
        Ok(summary) => {
            tracing::error!("{} device(s) failed", summary.failed.len());
            exit_code::runtime_error()
        }
        Err(e) => {
            tracing::error!("{e}");
            exit_code::runtime_error()
        }
    }
}
