//! Rule types for conflict and omission checking.
//!
//! Rules are immutable reference data loaded once from the fixture store.
//! Field names follow the on-disk JSON (`order_check_rules.json`).

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Priority of a missing-item suggestion.
///
/// The closed set is `High`, `Medium` and `Low`. A rule that gives no
/// priority is `Unset`; values outside the set are kept verbatim in
/// `Unrecognized`. Both rank after every known level.
///
/// # Example
///
/// ```rust
/// use order_check::Priority;
///
/// assert_eq!(Priority::from("高"), Priority::High);
/// assert_eq!(Priority::from("medium"), Priority::Medium);
/// assert_eq!(Priority::from("urgent").rank(), 4);
/// assert_eq!(Priority::Unset.rank(), 4);
/// assert!(Priority::High < Priority::Low);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    /// Should almost certainly be ordered.
    High,
    /// Worth considering.
    Medium,
    /// Optional.
    Low,
    /// The rule gives no priority, or `null`.
    #[default]
    Unset,
    /// A priority string the workbench does not know.
    Unrecognized(String),
}

impl Priority {
    /// Sort rank: high=1, medium=2, low=3, unset or unrecognized=4.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
            Priority::Unset | Priority::Unrecognized(_) => 4,
        }
    }

    /// The label used in fixture files; empty when unset.
    pub fn label(&self) -> &str {
        match self {
            Priority::High => "高",
            Priority::Medium => "中",
            Priority::Low => "低",
            Priority::Unset => "",
            Priority::Unrecognized(raw) => raw,
        }
    }
}

impl From<&str> for Priority {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "高" | "high" => Priority::High,
            "中" | "medium" => Priority::Medium,
            "低" | "low" => Priority::Low,
            "" => Priority::Unset,
            _ => Priority::Unrecognized(trimmed.to_string()),
        }
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        Priority::from(value.as_str())
    }
}

impl From<Priority> for String {
    fn from(value: Priority) -> Self {
        value.label().to_string()
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank()
            .cmp(&other.rank())
            .then_with(|| self.label().cmp(other.label()))
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Absent and `null` priorities are both `Unset`.
fn priority_or_unset<'de, D>(deserializer: D) -> Result<Priority, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(Priority::from)
        .unwrap_or_default())
}

/// A group of orders that should not normally be selected together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictRule {
    /// Group label shown to the clinician.
    #[serde(default)]
    pub group: String,
    /// Order names in the group, in declared order.
    pub items: Vec<String>,
    /// Why the members conflict.
    #[serde(default)]
    pub reason: String,
    /// Suggested resolution.
    #[serde(default)]
    pub suggestion: String,
}

impl ConflictRule {
    /// Creates a conflict rule with empty reason and suggestion.
    pub fn new<I, S>(group: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            group: group.into(),
            items: items.into_iter().map(Into::into).collect(),
            reason: String::new(),
            suggestion: String::new(),
        }
    }

    /// Sets the reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Sets the suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = suggestion.into();
        self
    }
}

/// An order that may have been omitted, triggered by transcript keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingItemRule {
    /// Candidate order name.
    pub missing_item: String,
    /// Keywords matched as literal substrings of the patient's speech.
    #[serde(default)]
    pub symptom_keywords: Vec<String>,
    /// Why the order is suggested.
    #[serde(default)]
    pub reason: String,
    /// Suggestion priority, `Unset` when absent.
    #[serde(default, deserialize_with = "priority_or_unset")]
    pub priority: Priority,
    /// Warning text shown with the suggestion.
    #[serde(default)]
    pub warning: String,
}

impl MissingItemRule {
    /// Creates a missing-item rule with unset priority and empty texts.
    pub fn new<I, S>(missing_item: impl Into<String>, symptom_keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            missing_item: missing_item.into(),
            symptom_keywords: symptom_keywords.into_iter().map(Into::into).collect(),
            reason: String::new(),
            priority: Priority::default(),
            warning: String::new(),
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Sets the warning text.
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = warning.into();
        self
    }

    /// Returns true if any keyword occurs in `corpus` as a literal,
    /// case-sensitive substring.
    ///
    /// Negations are not understood: "没有咳嗽" still matches "咳嗽".
    pub fn matches(&self, corpus: &str) -> bool {
        self.symptom_keywords
            .iter()
            .any(|keyword| corpus.contains(keyword.as_str()))
    }
}

/// Both rule collections as stored in the combined rule file.
///
/// A collection that is absent or `null` in the file stays `None`, which is
/// a configuration error at check time. An empty list is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Conflict groups.
    #[serde(default)]
    pub conflicts: Option<Vec<ConflictRule>>,
    /// Missing-item rules.
    #[serde(default)]
    pub missing_checks: Option<Vec<MissingItemRule>>,
}

impl RuleSet {
    /// Creates a rule set with both collections loaded.
    pub fn new(conflicts: Vec<ConflictRule>, missing_checks: Vec<MissingItemRule>) -> Self {
        Self {
            conflicts: Some(conflicts),
            missing_checks: Some(missing_checks),
        }
    }

    /// Conflict rules, if loaded.
    pub fn conflicts(&self) -> Option<&[ConflictRule]> {
        self.conflicts.as_deref()
    }

    /// Missing-item rules, if loaded.
    pub fn missing_checks(&self) -> Option<&[MissingItemRule]> {
        self.missing_checks.as_deref()
    }
}
