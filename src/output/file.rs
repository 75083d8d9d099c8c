//! Filesystem-backed output writers.

use std::path::{Path, PathBuf};

use super::{OutputWriter, WriteError};

/// Writes documents into a directory on the local filesystem.
///
/// The directory is created on first use together with any missing parents.
/// Existing files are overwritten without backup.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileOutputWriter;

impl FileOutputWriter {
    /// Creates a new filesystem writer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn ensure_dir(dir: &Path) -> Result<(), WriteError> {
        if dir.as_os_str().is_empty() || dir.is_dir() {
            return Ok(());
        }

        std::fs::create_dir_all(dir).map_err(|e| WriteError::CreateDir {
            path: dir.to_path_buf(),
            source: e,
        })
    }
}

impl OutputWriter for FileOutputWriter {
    fn write(
        &self,
        output_dir: &Path,
        file_name: &str,
        content: &[u8],
    ) -> Result<PathBuf, WriteError> {
        Self::ensure_dir(output_dir)?;

        let path = output_dir.join(file_name);
        std::fs::write(&path, content).map_err(|e| WriteError::Write {
            path: path.clone(),
            source: e,
        })?;

        tracing::info!("The file is written in {}", path.display());
        Ok(path)
    }
}

/// Logs documents instead of writing them.
///
/// Used for dry runs: nothing on disk is touched, not even the output directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunWriter;

impl OutputWriter for DryRunWriter {
    fn write(
        &self,
        output_dir: &Path,
        file_name: &str,
        content: &[u8],
    ) -> Result<PathBuf, WriteError> {
        let path = output_dir.join(file_name);
        tracing::info!(
            "[dry-run] Would write {} bytes to {}",
            content.len(),
            path.display()
        );
        Ok(path)
    }
}
