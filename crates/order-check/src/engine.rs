//! The order safety-check engine.
//!
//! A check is a pure function of the selection, the two rule collections and
//! the transcript. It holds no state, performs no I/O and never mutates its
//! inputs, so identical inputs always produce identical reports.

use tracing::debug;

use crate::error::{CheckError, CheckResult, RuleCollection};
use crate::report::{ConflictFinding, MissingFinding, WarningReport};
use crate::rules::{ConflictRule, MissingItemRule, RuleSet};
use crate::selection::OrderSelection;
use crate::transcript::{patient_text, TranscriptTurn};

/// Checks a set of selected orders against conflict and missing-item rules.
///
/// `None` for either rule collection means it was never loaded and yields
/// [`CheckError::MissingRuleCollection`]; an empty slice is a valid "no rules"
/// configuration. An empty selection is not an error here and produces an
/// empty report; rejecting it is the caller's job.
///
/// # Example
///
/// ```rust
/// use order_check::{check, ConflictRule, MissingItemRule, Priority, Selection, TranscriptTurn};
///
/// let conflicts = vec![ConflictRule::new("凝血功能重复", ["APTT", "PT"])];
/// let missing = vec![MissingItemRule::new("胸部CT", ["咳嗽"]).with_priority(Priority::High)];
/// let transcript = vec![TranscriptTurn::patient("我有点咳嗽")];
/// let selection: Selection = ["APTT", "PT", "血常规"].into_iter().collect();
///
/// let report = check(&selection, Some(&conflicts), Some(&missing), &transcript).unwrap();
/// assert_eq!(report.conflicts[0].items, vec!["APTT", "PT"]);
/// assert_eq!(report.missing[0].item, "胸部CT");
/// assert!(report.has_issues());
/// ```
pub fn check<S>(
    selection: &S,
    conflict_rules: Option<&[ConflictRule]>,
    missing_rules: Option<&[MissingItemRule]>,
    transcript: &[TranscriptTurn],
) -> CheckResult<WarningReport>
where
    S: OrderSelection + ?Sized,
{
    let conflict_rules = conflict_rules.ok_or(CheckError::MissingRuleCollection {
        collection: RuleCollection::Conflicts,
    })?;
    let missing_rules = missing_rules.ok_or(CheckError::MissingRuleCollection {
        collection: RuleCollection::MissingChecks,
    })?;

    let conflicts = detect_conflicts(selection, conflict_rules);
    let corpus = patient_text(transcript);
    let missing = detect_missing(selection, missing_rules, &corpus);

    debug!(
        conflict_rules = conflict_rules.len(),
        missing_rules = missing_rules.len(),
        conflicts = conflicts.len(),
        missing = missing.len(),
        "order check complete"
    );

    Ok(WarningReport::new(conflicts, missing))
}

/// Finds every conflict group with two or more selected members.
///
/// Each finding carries only the selected members, in the rule's order.
/// Groups are evaluated independently, so one order can appear in several
/// findings.
pub fn detect_conflicts<S>(selection: &S, rules: &[ConflictRule]) -> Vec<ConflictFinding>
where
    S: OrderSelection + ?Sized,
{
    rules
        .iter()
        .filter_map(|rule| {
            let selected: Vec<String> = rule
                .items
                .iter()
                .filter(|item| selection.is_selected(item))
                .cloned()
                .collect();
            (selected.len() >= 2).then(|| ConflictFinding {
                group: rule.group.clone(),
                items: selected,
                reason: rule.reason.clone(),
                suggestion: rule.suggestion.clone(),
            })
        })
        .collect()
}

/// Finds unselected candidates whose keywords occur in `patient_text`.
///
/// Results are stably sorted by priority rank, so rules of equal priority
/// keep their declared order.
pub fn detect_missing<S>(
    selection: &S,
    rules: &[MissingItemRule],
    patient_text: &str,
) -> Vec<MissingFinding>
where
    S: OrderSelection + ?Sized,
{
    let mut findings: Vec<MissingFinding> = rules
        .iter()
        .filter(|rule| !selection.is_selected(&rule.missing_item))
        .filter(|rule| rule.matches(patient_text))
        .map(|rule| MissingFinding {
            item: rule.missing_item.clone(),
            reason: rule.reason.clone(),
            priority: rule.priority.clone(),
            warning: rule.warning.clone(),
        })
        .collect();
    findings.sort_by_key(|finding| finding.priority.rank());
    findings
}

/// Runs checks against a borrowed [`RuleSet`].
///
/// # Example
///
/// ```rust
/// use order_check::{OrderChecker, RuleSet, Selection};
///
/// let rules = RuleSet::new(Vec::new(), Vec::new());
/// let checker = OrderChecker::new(&rules);
///
/// let selection: Selection = ["血常规"].into_iter().collect();
/// let report = checker.check(&selection, &[]).unwrap();
/// assert!(!report.has_issues());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct OrderChecker<'a> {
    rules: &'a RuleSet,
}

impl<'a> OrderChecker<'a> {
    /// Creates a checker over `rules`.
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// Returns the rule set this checker reads.
    pub fn rules(&self) -> &'a RuleSet {
        self.rules
    }

    /// Checks `selection` against the rule set.
    pub fn check<S>(&self, selection: &S, transcript: &[TranscriptTurn]) -> CheckResult<WarningReport>
    where
        S: OrderSelection + ?Sized,
    {
        check(
            selection,
            self.rules.conflicts(),
            self.rules.missing_checks(),
            transcript,
        )
    }
}
