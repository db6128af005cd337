//! Configuration for the workbench stages.

use std::path::{Path, PathBuf};

use workbench_fixtures::{FixturePaths, DEFAULT_DATA_DIR};

/// Default number of trailing transcript turns shown as highlights.
pub const DEFAULT_HIGHLIGHT_COUNT: usize = 5;

/// Default number of key clues shown beside the record.
pub const DEFAULT_CLUE_LIMIT: usize = 6;

/// Workbench configuration, resolved once at startup.
///
/// # Example
///
/// ```rust
/// use workbench::WorkbenchConfig;
///
/// let config = WorkbenchConfig::builder()
///     .with_data_dir("/srv/demo")
///     .with_highlight_count(3)
///     .build();
///
/// assert_eq!(config.fixture_paths().transcript.to_str(), Some("/srv/demo/transcript.json"));
/// ```
#[derive(Debug, Clone)]
pub struct WorkbenchConfig {
    /// Directory holding the fixture files.
    pub data_dir: PathBuf,
    /// Trailing transcript turns shown when no highlight fixture exists.
    pub highlight_count: usize,
    /// Maximum key clues on the record stage.
    pub clue_limit: usize,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            highlight_count: DEFAULT_HIGHLIGHT_COUNT,
            clue_limit: DEFAULT_CLUE_LIMIT,
        }
    }
}

impl WorkbenchConfig {
    /// Creates a new builder for WorkbenchConfig.
    pub fn builder() -> WorkbenchConfigBuilder {
        WorkbenchConfigBuilder::default()
    }

    /// Fixture file locations under the data directory.
    pub fn fixture_paths(&self) -> FixturePaths {
        FixturePaths::in_dir(&self.data_dir)
    }
}

/// Builder for WorkbenchConfig.
#[derive(Debug, Clone, Default)]
pub struct WorkbenchConfigBuilder {
    data_dir: Option<PathBuf>,
    highlight_count: Option<usize>,
    clue_limit: Option<usize>,
}

impl WorkbenchConfigBuilder {
    /// Sets the fixture directory.
    pub fn with_data_dir(mut self, data_dir: impl AsRef<Path>) -> Self {
        self.data_dir = Some(data_dir.as_ref().to_path_buf());
        self
    }

    /// Sets how many trailing turns stand in for missing highlights.
    pub fn with_highlight_count(mut self, count: usize) -> Self {
        self.highlight_count = Some(count);
        self
    }

    /// Sets the key clue limit.
    pub fn with_clue_limit(mut self, limit: usize) -> Self {
        self.clue_limit = Some(limit);
        self
    }

    /// Builds the WorkbenchConfig.
    pub fn build(self) -> WorkbenchConfig {
        let defaults = WorkbenchConfig::default();
        WorkbenchConfig {
            data_dir: self.data_dir.unwrap_or(defaults.data_dir),
            highlight_count: self.highlight_count.unwrap_or(defaults.highlight_count),
            clue_limit: self.clue_limit.unwrap_or(defaults.clue_limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = WorkbenchConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.highlight_count, 5);
        assert_eq!(config.clue_limit, 6);
    }

    #[test]
    fn test_builder_overrides() {
        let config = WorkbenchConfig::builder()
            .with_data_dir("fixtures")
            .with_highlight_count(2)
            .with_clue_limit(10)
            .build();

        assert_eq!(config.data_dir, PathBuf::from("fixtures"));
        assert_eq!(config.highlight_count, 2);
        assert_eq!(config.clue_limit, 10);
    }

    #[test]
    fn test_builder_partial() {
        let config = WorkbenchConfig::builder().with_clue_limit(1).build();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.clue_limit, 1);
    }
}
