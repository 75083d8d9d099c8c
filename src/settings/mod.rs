//! Base configuration parsing and per-device merging.
//!
//! This module provides:
//! - The merged data model ([`Setting`], [`DeviceConfig`])
//! - The credential override table ([`Credential`])
//! - Template line access ([`LineSource`], [`FsLineSource`])
//! - The merge itself ([`SettingsMerger`])
//!
//! # Base configuration format
//!
//! The base configuration is line oriented:
//! - Lines starting with `#` are comments. They attach, verbatim and in order,
//!   to the next key/value line.
//! - Lines containing `=` are key/value lines, split on the first `=`.
//! - Anything else is ignored and leaves pending comments untouched.
//!
//! Comments left pending at end of file have no key to attach to and are dropped.

mod merger;
mod source;

#[cfg(test)]
#[path = "merger_tests.rs"]
mod tests;

pub use merger::{Credential, SettingsMerger, parse_settings};
pub use source::{FsLineSource, LineSource};

#[cfg(test)]
pub use source::mock;

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::device::Device;

/// One configuration entry in a merged device configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Setting {
    /// Setting key, e.g. `P34`.
    pub id: String,

    /// Effective value after overrides.
    pub value: String,

    /// Raw comment lines that preceded this entry in the base configuration.
    pub comments: Vec<String>,
}

impl Setting {
    /// Creates a setting without comments.
    #[must_use]
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            comments: Vec::new(),
        }
    }

    /// Attaches comment lines to this setting.
    #[must_use]
    pub fn with_comments(mut self, comments: Vec<String>) -> Self {
        self.comments = comments;
        self
    }
}

/// A device together with its merged, ordered settings.
///
/// Settings keep base configuration order; duplicates are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceConfig {
    /// The device the settings were merged for.
    #[serde(rename = "dev")]
    pub device: Device,

    /// Settings in base configuration order.
    pub settings: Vec<Setting>,
}

/// Errors produced while merging a device configuration.
#[derive(Debug, Error)]
pub enum MergeError {
    /// The base configuration could not be read.
    #[error("Failed to read base configuration '{}': {source}", path.display())]
    Read {
        /// Path to the base configuration
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
