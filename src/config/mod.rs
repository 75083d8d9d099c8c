//! Configuration layer for gs-provision.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - File generation for the `init` and `export-template` subcommands
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - `GsBaseConfig.txt`, `MAC.csv`, `provisioning/GrandStream`
//!
//! # Boolean Flag Semantics
//!
//! `--keep-going` uses OR semantics with `run.keep_going`: if either is set,
//! the run continues past failing devices. `--dry-run` and `--verbose` are CLI-only.
//!
//! # Template
//!
//! Without `--template` (or `paths.template`) the built-in Grandstream XML
//! template is used. A custom template is read and syntax-checked during
//! validation, so a broken template fails before any device is processed.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use self::toml::{PathsSection, RunSection, TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config, write_default_template};
