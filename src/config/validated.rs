//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::pipeline::FailurePolicy;
use crate::render::{DEFAULT_TEMPLATE, provisioning_registry};

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Base configuration (settings template) path
    pub base_config: PathBuf,

    /// Device roster path
    pub devices: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Custom provisioning template path; `None` selects the built-in template
    pub template_path: Option<PathBuf>,

    /// Provisioning template source, already syntax-checked
    pub template: String,

    /// What to do when a single device fails
    pub failure_policy: FailurePolicy,

    /// Dry-run mode (render without writing)
    pub dry_run: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let template_str = self
            .template_path
            .as_ref()
            .map_or_else(|| "built-in".to_string(), |p| p.display().to_string());

        write!(
            f,
            "Config {{ base_config: {}, devices: {}, output_dir: {}, template: {}, \
             failure_policy: {:?}, dry_run: {} }}",
            self.base_config.display(),
            self.devices.display(),
            self.output_dir.display(),
            template_str,
            self.failure_policy,
            self.dry_run,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values, which take
    /// precedence over built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A path option is empty
    /// - The template file cannot be read
    /// - The template is not valid Handlebars
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let paths = toml.map(|t| &t.paths);

        let base_config = resolve_path(
            cli.base_config.as_deref(),
            paths.and_then(|p| p.base_config.as_deref()),
            defaults::BASE_CONFIG,
            field::BASE_CONFIG,
            "Use --base-config or set paths.base_config in config file",
        )?;

        let devices = resolve_path(
            cli.devices.as_deref(),
            paths.and_then(|p| p.devices.as_deref()),
            defaults::DEVICES,
            field::DEVICES,
            "Use --devices or set paths.devices in config file",
        )?;

        let output_dir = resolve_path(
            cli.output_dir.as_deref(),
            paths.and_then(|p| p.output_dir.as_deref()),
            defaults::OUTPUT_DIR,
            field::OUTPUT_DIR,
            "Use --output-dir or set paths.output_dir in config file",
        )?;

        let (template_path, template) = Self::resolve_template(cli, toml)?;

        // Either source enables keep-going
        let keep_going = cli.keep_going || toml.is_some_and(|t| t.run.keep_going);
        let failure_policy = if keep_going {
            FailurePolicy::Continue
        } else {
            FailurePolicy::Abort
        };

        Ok(Self {
            base_config,
            devices,
            output_dir,
            template_path,
            template,
            failure_policy,
            dry_run: cli.dry_run,
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

    fn resolve_template(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<(Option<PathBuf>, String), ConfigError> {
        let path = cli
            .template
            .clone()
            .or_else(|| toml.and_then(|t| t.paths.template.clone()));

        let Some(path) = path else {
            return Ok((None, DEFAULT_TEMPLATE.to_string()));
        };

        if path.as_os_str().is_empty() {
            return Err(ConfigError::empty_path(
                field::TEMPLATE,
                "Omit --template to use the built-in template",
            ));
        }

        let source = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileRead {
            path: path.clone(),
            source: e,
        })?;

        Self::validate_template(&path, &source)?;

        Ok((Some(path), source))
    }

    fn validate_template(path: &Path, template: &str) -> Result<(), ConfigError> {
        let hbs = provisioning_registry();
        // Compile and render with an empty context to catch syntax errors and unknown helpers
        hbs.render_template(template, &serde_json::json!({}))
            .map_err(|e| ConfigError::InvalidTemplate {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Ok(())
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    write_file(path, &template)
}

/// Writes the built-in provisioning template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_template(path: &Path) -> Result<(), ConfigError> {
    write_file(path, DEFAULT_TEMPLATE)
}

fn write_file(path: &Path, content: &str) -> Result<(), ConfigError> {
    std::fs::write(path, content).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn resolve_path(
    cli: Option<&Path>,
    toml: Option<&Path>,
    default: &str,
    field: &'static str,
    hint: &'static str,
) -> Result<PathBuf, ConfigError> {
    // Priority: CLI explicit > TOML > default
    let path = cli.or(toml).unwrap_or_else(|| Path::new(default));

    if path.as_os_str().is_empty() {
        return Err(ConfigError::empty_path(field, hint));
    }

    Ok(path.to_path_buf())
}
