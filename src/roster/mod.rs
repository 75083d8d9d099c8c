//! Device roster loading.
//!
//! The roster is a header-less CSV file with exactly four columns per row:
//! `mac,user,password,auth_id`. Rows whose MAC does not carry the vendor
//! prefix are dropped with a warning; structural problems fail the whole load.

mod loader;

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

pub use loader::{FIELD_COUNT, Roster, RosterLoader};

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort loading of a roster.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The roster file could not be opened.
    #[error("Failed to open devices file '{}': {source}", path.display())]
    Open {
        /// Path to the roster file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The CSV data is malformed (bad quoting, invalid UTF-8, read failure).
    #[error("Failed to parse devices file: {0}")]
    Parse(#[from] csv::Error),

    /// A row does not have exactly four fields.
    #[error("Invalid row at line {line}: expected 4 fields, found {found}")]
    FieldCount {
        /// 1-based line number of the offending row
        line: u64,
        /// Number of fields actually present
        found: usize,
    },
}
