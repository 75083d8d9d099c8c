//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration or template file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write a generated file (for `init` and `export-template`).
    #[error("Failed to write file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A path option was set to an empty string.
    #[error("Empty path for {field}. {hint}")]
    EmptyPath {
        /// Name of the offending field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// Invalid provisioning template (Handlebars syntax error).
    #[error("Invalid provisioning template '{}': {reason}", path.display())]
    InvalidTemplate {
        /// Path to the template file
        path: PathBuf,
        /// Reason for invalidity
        reason: String,
    },
}

/// Well-known field names for `EmptyPath` errors.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The base configuration path.
    pub const BASE_CONFIG: &str = "base_config";
    /// The device roster path.
    pub const DEVICES: &str = "devices";
    /// The output directory.
    pub const OUTPUT_DIR: &str = "output_dir";
    /// The provisioning template path.
    pub const TEMPLATE: &str = "template";
}

impl ConfigError {
    /// Creates an `EmptyPath` error for a path field.
    #[must_use]
    pub const fn empty_path(field: &'static str, hint: &'static str) -> Self {
        Self::EmptyPath { field, hint }
    }
}
