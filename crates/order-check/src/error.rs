//! Error types for order checking.

use std::fmt;

use thiserror::Error;

/// The two rule collections an order check depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCollection {
    /// Mutually exclusive or redundant order groups.
    Conflicts,
    /// Keyword-triggered recommendations for likely omissions.
    MissingChecks,
}

impl fmt::Display for RuleCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleCollection::Conflicts => write!(f, "conflicts"),
            RuleCollection::MissingChecks => write!(f, "missing_checks"),
        }
    }
}

/// Errors that can occur when running an order check.
///
/// "No findings" is never an error; only configuration problems are.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// A rule collection was never loaded (absent or null), as opposed to
    /// loaded but empty.
    #[error("rule collection `{collection}` is not loaded")]
    MissingRuleCollection {
        /// Which collection is missing.
        collection: RuleCollection,
    },
}

/// Result type for order check operations.
pub type CheckResult<T> = std::result::Result<T, CheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_conflicts() {
        let err = CheckError::MissingRuleCollection {
            collection: RuleCollection::Conflicts,
        };
        assert_eq!(err.to_string(), "rule collection `conflicts` is not loaded");
    }

    #[test]
    fn test_error_display_missing_checks() {
        let err = CheckError::MissingRuleCollection {
            collection: RuleCollection::MissingChecks,
        };
        assert_eq!(
            err.to_string(),
            "rule collection `missing_checks` is not loaded"
        );
    }
}
