//! Default values for configuration options.
//!
//! Centralized constants to avoid magic strings scattered across the codebase.

/// Default base configuration (settings template) path.
pub const BASE_CONFIG: &str = "GsBaseConfig.txt";

/// Default device roster path.
pub const DEVICES: &str = "MAC.csv";

/// Default output directory.
pub const OUTPUT_DIR: &str = "provisioning/GrandStream";

/// Default output path of the `init` subcommand.
pub const CONFIG_FILE: &str = "gs-provision.toml";

/// Default output path of the `export-template` subcommand.
pub const TEMPLATE_FILE: &str = "provision.xml.hbs";
