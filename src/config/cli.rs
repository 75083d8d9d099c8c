//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::defaults;

/// gs-provision: Grandstream provisioning file generator
///
/// Reads a device roster and a base configuration, and writes one
/// XML provisioning file per phone with its SIP credentials filled in.
#[derive(Debug, Parser)]
#[command(name = "gs-provision")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Location of the base configuration file [default: GsBaseConfig.txt]
    #[arg(long = "base-config", short = 'c', value_name = "PATH")]
    pub base_config: Option<PathBuf>,

    /// Location of the devices (MAC roster) CSV file [default: MAC.csv]
    #[arg(long, short = 'd', value_name = "PATH")]
    pub devices: Option<PathBuf>,

    /// Output directory [default: provisioning/GrandStream]
    #[arg(long = "output-dir", short = 'o', value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Handlebars provisioning template (built-in XML template if omitted)
    #[arg(long, short = 't', value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Keep provisioning remaining devices after a device fails
    #[arg(long = "keep-going")]
    pub keep_going: bool,

    /// Test mode - render documents without writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for gs-provision
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },

    /// Write the built-in provisioning template for customization
    ExportTemplate {
        /// Output path for the template
        #[arg(long, short, default_value = defaults::TEMPLATE_FILE)]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}
