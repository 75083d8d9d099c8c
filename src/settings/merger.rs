//! Single-pass merge of the base configuration with device credentials.

use std::path::Path;

use crate::device::Device;

use super::{DeviceConfig, FsLineSource, LineSource, MergeError, Setting};

/// Device credential that replaces the template value of certain keys.
///
/// The key groups cover the account settings of every SIP line variant, so
/// whatever placeholder the base configuration holds for them is replaced.
///
/// | Keys                   | Credential   |
/// |------------------------|--------------|
/// | `P34`, `P4120`, `P3120` | password     |
/// | `P35`, `P4060`, `P3060` | user         |
/// | `P36`, `P4090`, `P3090` | auth ID      |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential {
    /// SIP authentication password.
    Password,
    /// SIP user ID.
    User,
    /// SIP authentication ID.
    AuthId,
}

impl Credential {
    /// Returns the credential that overrides `key`, if any.
    ///
    /// Matching is case-sensitive.
    #[must_use]
    pub fn for_key(key: &str) -> Option<Self> {
        match key {
            "P34" | "P4120" | "P3120" => Some(Self::Password),
            "P35" | "P4060" | "P3060" => Some(Self::User),
            "P36" | "P4090" | "P3090" => Some(Self::AuthId),
            _ => None,
        }
    }

    /// Returns this credential's value for `device`.
    #[must_use]
    pub fn value_of(self, device: &Device) -> &str {
        match self {
            Self::Password => &device.password,
            Self::User => &device.user,
            Self::AuthId => &device.auth_id,
        }
    }
}

/// Classification of a single base configuration line.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Comment(&'a str),
    Entry { key: &'a str, value: &'a str },
    Ignored,
}

impl<'a> Line<'a> {
    fn classify(line: &'a str) -> Self {
        if line.starts_with('#') {
            return Self::Comment(line);
        }

        line.split_once('=').map_or(Self::Ignored, |(key, value)| Self::Entry {
            key: key.trim(),
            value: value.trim(),
        })
    }
}

/// Pending comment lines waiting for the next key/value line.
#[derive(Debug, Default)]
enum CommentState {
    #[default]
    Idle,
    Accumulating(Vec<String>),
}

impl CommentState {
    fn push(&mut self, comment: &str) {
        match self {
            Self::Idle => *self = Self::Accumulating(vec![comment.to_owned()]),
            Self::Accumulating(lines) => lines.push(comment.to_owned()),
        }
    }

    /// Hands over pending comments and returns to `Idle`.
    fn take(&mut self) -> Vec<String> {
        match std::mem::take(self) {
            Self::Idle => Vec::new(),
            Self::Accumulating(lines) => lines,
        }
    }

    /// Ends the scan, returning how many comments had nothing to attach to.
    fn finish(self) -> usize {
        match self {
            Self::Idle => 0,
            Self::Accumulating(lines) => lines.len(),
        }
    }
}

/// Parses base configuration lines into settings for `device`.
///
/// Settings come out in line order, duplicates included.
pub fn parse_settings<I, S>(lines: I, device: &Device) -> Vec<Setting>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut comments = CommentState::default();
    let mut settings = Vec::new();

    for line in lines {
        match Line::classify(line.as_ref()) {
            Line::Comment(text) => comments.push(text),
            Line::Entry { key, value } => {
                let value = Credential::for_key(key).map_or(value, |c| c.value_of(device));
                settings.push(Setting::new(key, value).with_comments(comments.take()));
            }
            Line::Ignored => {}
        }
    }

    let dropped = comments.finish();
    if dropped > 0 {
        tracing::debug!("Dropping {dropped} trailing comment line(s) with no following setting");
    }

    settings
}

/// Merges the base configuration with each device's credentials.
///
/// The base configuration is re-read for every merge, so each
/// [`DeviceConfig`] is built from scratch.
#[derive(Debug, Clone, Default)]
pub struct SettingsMerger<S = FsLineSource> {
    source: S,
}

impl SettingsMerger<FsLineSource> {
    /// Creates a merger that reads from the filesystem.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            source: FsLineSource,
        }
    }
}

impl<S: LineSource> SettingsMerger<S> {
    /// Creates a merger with a custom line source.
    #[must_use]
    pub const fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Builds the merged configuration for `device`.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::Read`] if the base configuration cannot be read.
    pub fn merge(&self, base_config: &Path, device: &Device) -> Result<DeviceConfig, MergeError> {
        let lines = self
            .source
            .read_lines(base_config)
            .map_err(|e| MergeError::Read {
                path: base_config.to_path_buf(),
                source: e,
            })?;

        Ok(DeviceConfig {
            device: device.clone(),
            settings: parse_settings(&lines, device),
        })
    }
}
