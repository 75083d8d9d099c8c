//! Provisioning run orchestration.
//!
//! A run loads the roster once, then for every accepted device merges the
//! base configuration, renders the document and writes it. Roster failures
//! always abort the run; per-device failures are handled according to the
//! [`FailurePolicy`]. Files written before an abort are left in place.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::device::Device;
use crate::output::{OutputWriter, WriteError};
use crate::render::{RenderError, Renderer};
use crate::roster::{RosterError, RosterLoader};
use crate::settings::{FsLineSource, LineSource, MergeError, SettingsMerger};

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;

/// What to do when a single device fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the run at the first failing device.
    #[default]
    Abort,
    /// Log the failure and carry on with the remaining devices.
    Continue,
}

/// Failure while provisioning one device.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// Merging the base configuration failed.
    #[error(transparent)]
    Merge(#[from] MergeError),

    /// Rendering the document failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Writing the document failed.
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Errors that abort a provisioning run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The roster could not be loaded.
    #[error(transparent)]
    Roster(#[from] RosterError),

    /// A device failed under [`FailurePolicy::Abort`].
    #[error("Device '{mac}' failed: {source}")]
    Device {
        /// MAC of the failing device
        mac: String,
        /// What went wrong
        #[source]
        source: DeviceError,
    },
}

/// A device that failed under [`FailurePolicy::Continue`].
#[derive(Debug)]
pub struct DeviceFailure {
    /// MAC of the failing device.
    pub mac: String,
    /// What went wrong.
    pub error: DeviceError,
}

/// Outcome of a completed run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Paths of written documents, in roster order.
    pub written: Vec<PathBuf>,

    /// Number of roster rows dropped for a foreign MAC.
    pub rejected: usize,

    /// Devices that failed (only populated with [`FailurePolicy::Continue`]).
    pub failed: Vec<DeviceFailure>,
}

impl RunSummary {
    /// Returns `true` if every accepted device was written.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// The merge, render and write pipeline.
///
/// # Type Parameters
///
/// - `R`: the document renderer
/// - `W`: the output writer
/// - `S`: the base configuration line source (defaults to [`FsLineSource`])
#[derive(Debug)]
pub struct Pipeline<R, W, S = FsLineSource> {
    loader: RosterLoader,
    merger: SettingsMerger<S>,
    renderer: R,
    writer: W,
    output_dir: PathBuf,
    policy: FailurePolicy,
}

impl<R: Renderer, W: OutputWriter> Pipeline<R, W, FsLineSource> {
    /// Creates a pipeline reading the base configuration from disk.
    pub fn new(renderer: R, writer: W, output_dir: impl Into<PathBuf>) -> Self {
        Self::with_source(FsLineSource, renderer, writer, output_dir)
    }
}

impl<R: Renderer, W: OutputWriter, S: LineSource> Pipeline<R, W, S> {
    /// Creates a pipeline with a custom base configuration source.
    pub fn with_source(
        source: S,
        renderer: R,
        writer: W,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            loader: RosterLoader::new(),
            merger: SettingsMerger::with_source(source),
            renderer,
            writer,
            output_dir: output_dir.into(),
            policy: FailurePolicy::default(),
        }
    }

    /// Sets the per-device failure policy.
    #[must_use]
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Runs the whole pipeline: load the roster, then provision every device.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Roster`] if the roster cannot be loaded, and
    /// [`PipelineError::Device`] on the first device failure when the policy
    /// is [`FailurePolicy::Abort`].
    pub fn run(&self, roster: &Path, base_config: &Path) -> Result<RunSummary, PipelineError> {
        let roster = self.loader.load(roster)?;
        tracing::info!(
            "Loaded {} device(s), skipped {} invalid row(s)",
            roster.devices.len(),
            roster.rejected.len()
        );

        let mut summary = self.provision_all(&roster.devices, base_config)?;
        summary.rejected = roster.rejected.len();
        Ok(summary)
    }

    /// Provisions `devices` in order.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Device`] on the first device failure when the
    /// policy is [`FailurePolicy::Abort`].
    pub fn provision_all(
        &self,
        devices: &[Device],
        base_config: &Path,
    ) -> Result<RunSummary, PipelineError> {
        let mut summary = RunSummary::default();

        for device in devices {
            match self.provision(device, base_config) {
                Ok(path) => summary.written.push(path),
                Err(error) => match self.policy {
                    FailurePolicy::Abort => {
                        return Err(PipelineError::Device {
                            mac: device.mac.clone(),
                            source: error,
                        });
                    }
                    FailurePolicy::Continue => {
                        tracing::error!("Device '{}' failed: {error}", device.mac);
                        summary.failed.push(DeviceFailure {
                            mac: device.mac.clone(),
                            error,
                        });
                    }
                },
            }
        }

        Ok(summary)
    }

    /// Merges, renders and writes the document for one device.
    ///
    /// # Errors
    ///
    /// Returns the first failing stage's error.
    pub fn provision(&self, device: &Device, base_config: &Path) -> Result<PathBuf, DeviceError> {
        tracing::debug!("Provisioning device {}", device.mac);

        let config = self.merger.merge(base_config, device)?;
        let document = self.renderer.render(&config)?;
        let path = self
            .writer
            .write(&self.output_dir, &document.file_name, &document.content)?;

        Ok(path)
    }
}
