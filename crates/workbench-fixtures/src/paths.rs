//! Locations of the fixture files inside a data directory.

use std::path::{Path, PathBuf};

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Paths of every fixture file.
///
/// `FixturePaths::in_dir` gives the standard file names; individual paths
/// can be overridden afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixturePaths {
    /// Directory the standard names were resolved against.
    pub data_dir: PathBuf,
    /// `patient.json`
    pub patient: PathBuf,
    /// `transcript.json`
    pub transcript: PathBuf,
    /// `dialogue_highlights.json`
    pub highlights: PathBuf,
    /// `similar_cases.json`
    pub similar_cases: PathBuf,
    /// `orders_ranked.json`
    pub orders: PathBuf,
    /// `order_check_rules.json`
    pub check_rules: PathBuf,
    /// `abnormal_summary.json`
    pub abnormal_summary: PathBuf,
    /// `sidebar_support.json`
    pub sidebar_support: PathBuf,
    /// `lab_table.csv`
    pub lab_table: PathBuf,
}

impl FixturePaths {
    /// Standard file names inside `data_dir`.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        Self {
            data_dir: dir.to_path_buf(),
            patient: dir.join("patient.json"),
            transcript: dir.join("transcript.json"),
            highlights: dir.join("dialogue_highlights.json"),
            similar_cases: dir.join("similar_cases.json"),
            orders: dir.join("orders_ranked.json"),
            check_rules: dir.join("order_check_rules.json"),
            abnormal_summary: dir.join("abnormal_summary.json"),
            sidebar_support: dir.join("sidebar_support.json"),
            lab_table: dir.join("lab_table.csv"),
        }
    }
}

impl Default for FixturePaths {
    fn default() -> Self {
        Self::in_dir(DEFAULT_DATA_DIR)
    }
}
