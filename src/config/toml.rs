//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Input and output locations
    #[serde(default)]
    pub paths: PathsSection,

    /// Run behaviour
    #[serde(default)]
    pub run: RunSection,
}

/// Input and output locations.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsSection {
    /// Base configuration file
    pub base_config: Option<PathBuf>,

    /// Device roster CSV file
    pub devices: Option<PathBuf>,

    /// Output directory
    pub output_dir: Option<PathBuf>,

    /// Handlebars provisioning template
    pub template: Option<PathBuf>,
}

/// Run behaviour section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSection {
    /// Keep provisioning remaining devices after a device fails
    #[serde(default)]
    pub keep_going: bool,
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
    r##"# gs-provision Configuration File
#
# Values given on the command line take precedence over this file.

[paths]
# Base configuration: "KEY=VALUE" lines, "#" comments attach to the next key
base_config = "GsBaseConfig.txt"

# Device roster: CSV without header, columns mac,user,password,auth_id
# Only MACs starting with 000B82 are provisioned
devices = "MAC.csv"

# Output directory, created on demand (one cfg<MAC>.xml per device)
output_dir = "provisioning/GrandStream"

# Handlebars provisioning template (default: built-in Grandstream XML)
# Run 'gs-provision export-template' to get a copy of the built-in template
# Available variables: {{dev.mac}}, {{dev.user}}, {{dev.password}}, {{dev.auth_id}},
# {{#each settings}} {{id}} {{value}} {{#each comments}} {{/each}}
# template = "provision.xml.hbs"

[run]
# Keep provisioning remaining devices after a device fails (default: false)
# keep_going = false
"##
    .to_string()
}
