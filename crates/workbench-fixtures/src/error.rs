//! Error types for fixture loading.

use std::path::PathBuf;

/// Result type for fixture operations.
pub type FixtureResult<T> = Result<T, FixtureError>;

/// Errors that can occur while loading fixture files.
///
/// A fixture file that does not exist is not an error; loaders return
/// `Ok(None)` for it so callers can tell "absent" from "broken".
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    /// I/O error other than a missing file.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// File or directory being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not valid JSON for the expected shape.
    #[error("Malformed fixture {path}: {message}")]
    Malformed {
        /// The fixture file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// The lab table could not be read as CSV.
    #[error("Invalid CSV in {path}: {message}")]
    Csv {
        /// The lab table file.
        path: PathBuf,
        /// Reader message.
        message: String,
    },

    /// The lab table could not be written out as CSV.
    #[error("CSV export failed: {0}")]
    Export(String),
}

impl FixtureError {
    /// Creates an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a malformed-fixture error.
    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a CSV read error.
    pub fn csv(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Csv {
            path: path.into(),
            message: message.into(),
        }
    }
}
