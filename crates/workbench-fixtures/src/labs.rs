//! The lab result table (`lab_table.csv`).

use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use tracing::warn;

use crate::error::{FixtureError, FixtureResult};

/// Column holding the abnormal-value marker.
pub const FLAG_COLUMN: &str = "标记";

/// Direction of an abnormal lab value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabFlag {
    /// Above the reference range (`↑`).
    High,
    /// Below the reference range (`↓`).
    Low,
}

impl LabFlag {
    /// Parses a marker cell.
    pub fn parse(marker: &str) -> Option<Self> {
        match marker.trim() {
            "↑" => Some(LabFlag::High),
            "↓" => Some(LabFlag::Low),
            _ => None,
        }
    }
}

/// One row of the lab table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabRow {
    headers: Arc<[String]>,
    values: Vec<String>,
}

impl LabRow {
    /// Value of `column`, if the table has that column.
    pub fn get(&self, column: &str) -> Option<&str> {
        let index = self.headers.iter().position(|h| h == column)?;
        self.values.get(index).map(String::as_str)
    }

    /// Cell values in column order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// The abnormal marker, if any.
    pub fn flag(&self) -> Option<LabFlag> {
        self.get(FLAG_COLUMN).and_then(LabFlag::parse)
    }

    /// Returns true if the row is marked above or below range.
    pub fn is_abnormal(&self) -> bool {
        self.flag().is_some()
    }
}

/// Header-keyed lab results, preserving column and row order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabTable {
    headers: Arc<[String]>,
    rows: Vec<LabRow>,
}

impl LabTable {
    /// Builds a table from a header row and data rows.
    pub fn new<H, R>(headers: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = Vec<String>>,
    {
        let headers: Arc<[String]> = headers.into_iter().map(Into::into).collect();
        let rows = rows
            .into_iter()
            .map(|values| LabRow {
                headers: Arc::clone(&headers),
                values,
            })
            .collect();
        Self { headers, rows }
    }

    /// Column names.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All rows.
    pub fn rows(&self) -> &[LabRow] {
        &self.rows
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns true if the table carries an abnormal-marker column.
    pub fn has_flag_column(&self) -> bool {
        self.headers.iter().any(|h| h == FLAG_COLUMN)
    }

    /// Rows marked above or below range.
    pub fn abnormal_rows(&self) -> impl Iterator<Item = &LabRow> {
        self.rows.iter().filter(|row| row.is_abnormal())
    }

    /// Writes the table back out as CSV text.
    pub fn to_csv(&self) -> FixtureResult<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(self.headers.iter())
            .map_err(|e| FixtureError::Export(e.to_string()))?;
        for row in &self.rows {
            writer
                .write_record(&row.values)
                .map_err(|e| FixtureError::Export(e.to_string()))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| FixtureError::Export(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| FixtureError::Export(e.to_string()))
    }
}

/// Loads the lab table.
///
/// Returns `Ok(None)` if the file does not exist. Short rows are padded with
/// empty cells so every row lines up with the header.
pub fn load_lab_table<P: AsRef<Path>>(path: P) -> FixtureResult<Option<LabTable>> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "lab table not found");
            return Ok(None);
        }
        Err(e) => return Err(FixtureError::io_error(path, e)),
    };

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| FixtureError::csv(path, e.to_string()))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| FixtureError::csv(path, e.to_string()))?;
        let mut values: Vec<String> = record.iter().map(str::to_string).collect();
        values.resize(headers.len().max(values.len()), String::new());
        rows.push(values);
    }

    Ok(Some(LabTable::new(headers, rows)))
}
