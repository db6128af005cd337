//! Error types for the workbench stages.

use order_check::CheckError;
use thiserror::Error;
use workbench_fixtures::FixtureError;

/// Reasons an order submission cannot be checked.
///
/// Finding issues is not an error; these variants block the check itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Nothing is selected. The check is never run.
    #[error("请至少选择一项检查项目")]
    EmptySelection,

    /// The rule file was not found.
    #[error("规则文件加载失败")]
    RuleFileMissing,

    /// The rule file exists but could not be parsed.
    #[error("规则文件加载失败: {0}")]
    RuleFileInvalid(String),

    /// The rule file loaded but a rule collection is absent.
    #[error("规则文件加载失败: {0}")]
    RulesUnavailable(#[from] CheckError),
}

/// Errors raised by the workbench outside the submission flow.
#[derive(Error, Debug)]
pub enum WorkbenchError {
    /// Fixture loading failed.
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// The order catalog was not found.
    #[error("检查项目目录加载失败")]
    CatalogUnavailable,

    /// The lab table was not found.
    #[error("检验结果加载失败")]
    LabTableUnavailable,
}

#[cfg(test)]
mod tests {
    use super::*;
    use order_check::RuleCollection;

    #[test]
    fn test_submit_error_display() {
        assert_eq!(SubmitError::EmptySelection.to_string(), "请至少选择一项检查项目");
        let err: SubmitError = CheckError::MissingRuleCollection {
            collection: RuleCollection::MissingChecks,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "规则文件加载失败: rule collection `missing_checks` is not loaded"
        );
        assert_eq!(
            SubmitError::RuleFileInvalid("expected value".into()).to_string(),
            "规则文件加载失败: expected value"
        );
    }
}
