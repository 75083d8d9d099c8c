//! CSV roster reader.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::device::{Device, VENDOR_PREFIX};

use super::RosterError;

/// Number of columns every roster row must have.
pub const FIELD_COUNT: usize = 4;

/// Result of a successful roster load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    /// Accepted devices, in input order.
    pub devices: Vec<Device>,

    /// MAC values of rows dropped for lacking the vendor prefix, in input order.
    pub rejected: Vec<String>,
}

impl Roster {
    /// Returns `true` if no device was accepted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

/// Loads device rosters from CSV.
///
/// Rows are read strictly: any row with a field count other than
/// [`FIELD_COUNT`] fails the whole load. Rows with a foreign MAC are
/// dropped, and each drop is reported at `warn` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct RosterLoader;

impl RosterLoader {
    /// Creates a new loader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Loads the roster stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Open`] if the file cannot be opened, or any
    /// error from [`RosterLoader::from_reader`].
    pub fn load(&self, path: &Path) -> Result<Roster, RosterError> {
        let file = File::open(path).map_err(|e| RosterError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;

        self.from_reader(file)
    }

    /// Loads a roster from any reader.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Parse`] on malformed CSV and
    /// [`RosterError::FieldCount`] on a row of the wrong width.
    pub fn from_reader<R: Read>(&self, reader: R) -> Result<Roster, RosterError> {
        let mut csv = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut roster = Roster::default();

        for record in csv.records() {
            let record = record?;
            let device = parse_record(&record)?;

            if device.has_vendor_prefix() {
                roster.devices.push(device);
            } else {
                tracing::warn!(
                    "Skipping device \"{}\": MAC does not start with \"{VENDOR_PREFIX}\", please check the devices file",
                    device.mac
                );
                roster.rejected.push(device.mac);
            }
        }

        Ok(roster)
    }
}

fn parse_record(record: &StringRecord) -> Result<Device, RosterError> {
    if record.len() != FIELD_COUNT {
        return Err(RosterError::FieldCount {
            line: record.position().map_or(0, csv::Position::line),
            found: record.len(),
        });
    }

    Ok(Device::new(&record[0], &record[1], &record[2], &record[3]))
}
