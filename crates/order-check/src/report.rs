//! Warning report types produced by an order check.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rules::Priority;

/// Two or more members of one conflict group selected together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictFinding {
    /// Group label of the triggering rule.
    pub group: String,
    /// The selected members of the group, in the rule's declared order.
    pub items: Vec<String>,
    /// Why the members conflict.
    pub reason: String,
    /// Suggested resolution.
    pub suggestion: String,
}

/// A likely omitted order suggested by the patient's reported symptoms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingFinding {
    /// Candidate order name.
    pub item: String,
    /// Why the order is suggested.
    pub reason: String,
    /// Suggestion priority.
    pub priority: Priority,
    /// Warning text.
    pub warning: String,
}

/// Result of one submission check.
///
/// Recomputed on every submission; conflicts keep rule order, missing items
/// are sorted by priority with ties in rule order.
///
/// # Example
///
/// ```rust
/// use order_check::WarningReport;
///
/// let report = WarningReport::empty();
/// assert!(!report.has_issues());
/// assert_eq!(report.finding_count(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningReport {
    /// Conflict findings.
    pub conflicts: Vec<ConflictFinding>,
    /// Missing-item findings.
    pub missing: Vec<MissingFinding>,
}

impl WarningReport {
    /// Creates a report from already ordered findings.
    pub fn new(conflicts: Vec<ConflictFinding>, missing: Vec<MissingFinding>) -> Self {
        Self { conflicts, missing }
    }

    /// Creates a report with no findings.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True if any conflict or missing-item finding exists.
    pub fn has_issues(&self) -> bool {
        !self.conflicts.is_empty() || !self.missing.is_empty()
    }

    /// True if the report holds no findings.
    pub fn is_empty(&self) -> bool {
        !self.has_issues()
    }

    /// Total number of findings of both kinds.
    pub fn finding_count(&self) -> usize {
        self.conflicts.len() + self.missing.len()
    }
}

impl WarningReport {
    /// Writes the report text, passing each priority tag such as `[高]`
    /// through `style` first. Plain [`Display`](fmt::Display) output uses
    /// the tag unchanged.
    pub fn write_with<W, F>(&self, out: &mut W, style: F) -> fmt::Result
    where
        W: fmt::Write,
        F: Fn(&Priority, &str) -> String,
    {
        if !self.has_issues() {
            return writeln!(out, "✓ 未发现需要特别提醒的事项");
        }

        writeln!(out, "请您再次检查！")?;
        if !self.conflicts.is_empty() {
            writeln!(out, "检查项目可能冲突:")?;
            for conflict in &self.conflicts {
                writeln!(out, "  [{}] 冲突项目: {}", conflict.group, conflict.items.join(", "))?;
                if !conflict.reason.is_empty() {
                    writeln!(out, "    原因: {}", conflict.reason)?;
                }
                if !conflict.suggestion.is_empty() {
                    writeln!(out, "    建议: {}", conflict.suggestion)?;
                }
            }
        }
        if !self.missing.is_empty() {
            writeln!(out, "可能遗漏的检查:")?;
            for missing in &self.missing {
                match missing.priority {
                    Priority::Unset => writeln!(out, "  {}", missing.item)?,
                    ref priority => {
                        let tag = style(priority, &format!("[{}]", priority));
                        writeln!(out, "  {} {}", tag, missing.item)?
                    }
                }
                if !missing.warning.is_empty() {
                    writeln!(out, "    {}", missing.warning)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for WarningReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_with(f, |_, tag| tag.to_string())
    }
}
