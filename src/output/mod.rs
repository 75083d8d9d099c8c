//! Persistence of rendered provisioning documents.
//!
//! This module provides abstractions for storing rendered documents
//! in an output directory.

mod file;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use file::{DryRunWriter, FileOutputWriter};

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while persisting a document.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to create the output directory.
    #[error("Unable to create output directory '{}': {source}", path.display())]
    CreateDir {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Failed to write the document.
    #[error("Unable to write file '{}': {source}", path.display())]
    Write {
        /// File that could not be written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Abstraction for persisting rendered documents.
///
/// Implementations should:
/// - Create the output directory on demand, including missing parents
/// - Overwrite any existing file of the same name
///
/// # Testing
///
/// Use [`mock::MockOutputWriter`] in tests to avoid filesystem dependencies.
pub trait OutputWriter {
    /// Stores `content` as `file_name` inside `output_dir`.
    ///
    /// Returns the path of the stored document.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    fn write(&self, output_dir: &Path, file_name: &str, content: &[u8])
    -> Result<PathBuf, WriteError>;
}

impl<T: OutputWriter + ?Sized> OutputWriter for &T {
    fn write(
        &self,
        output_dir: &Path,
        file_name: &str,
        content: &[u8],
    ) -> Result<PathBuf, WriteError> {
        (**self).write(output_dir, file_name, content)
    }
}
