//! Line-oriented access to the base configuration.

use std::io;
use std::path::Path;

/// Reads a text file as a sequence of lines.
///
/// Abstracted so merge logic can be tested without touching the filesystem.
pub trait LineSource {
    /// Returns all lines of the file at `path`, without line terminators.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>>;
}

/// [`LineSource`] backed by the local filesystem.
///
/// Both `\n` and `\r\n` terminators are accepted. Bytes that are not valid
/// UTF-8 are replaced with U+FFFD rather than failing the read.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLineSource;

impl LineSource for FsLineSource {
    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>> {
        let bytes = std::fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_owned)
            .collect())
    }
}

impl<T: LineSource + ?Sized> LineSource for &T {
    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>> {
        (**self).read_lines(path)
    }
}
