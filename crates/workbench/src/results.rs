//! Stage 3: lab results review.

use workbench_fixtures::{FixtureResult, Fixtures, LabTable};

use crate::error::WorkbenchError;

/// The lab table, or an error if it was not loaded.
pub fn lab_table(fixtures: &Fixtures) -> Result<&LabTable, WorkbenchError> {
    fixtures
        .lab_table
        .as_ref()
        .ok_or(WorkbenchError::LabTableUnavailable)
}

/// A copy of `table` holding only rows marked above or below range.
pub fn abnormal_only(table: &LabTable) -> LabTable {
    LabTable::new(
        table.headers().iter().cloned(),
        table.abnormal_rows().map(|row| row.values().to_vec()),
    )
}

/// CSV text for download, optionally restricted to abnormal rows.
pub fn export_csv(table: &LabTable, abnormal: bool) -> FixtureResult<String> {
    if abnormal {
        abnormal_only(table).to_csv()
    } else {
        table.to_csv()
    }
}
