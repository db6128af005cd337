//! Per-clinician session state and the order submission flow.
//!
//! A [`Session`] owns the current selection; nothing here is shared between
//! sessions. Submitting runs the order check on a snapshot of the selection
//! and returns a [`SubmissionDialog`], which the clinician resolves with one
//! of its offered [`DialogAction`]s.

use chrono::{DateTime, Local};
use order_check::{OrderChecker, Selection, WarningReport};
use tracing::info;
use workbench_fixtures::{FixtureKind, Fixtures};

use crate::error::SubmitError;
use crate::record::DraftRecord;

/// What the clinician can do with a submission dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    /// Submit despite the reported issues.
    SubmitAnyway,
    /// Return to editing with the selection intact.
    GoBack,
    /// Submit when no issues were found.
    ConfirmSubmit,
}

impl DialogAction {
    /// Button label.
    pub fn label(&self) -> &'static str {
        match self {
            DialogAction::SubmitAnyway => "继续提交",
            DialogAction::GoBack => "返回调整",
            DialogAction::ConfirmSubmit => "确认提交",
        }
    }
}

/// The check result for one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionDialog {
    /// Findings for the submitted selection.
    pub report: WarningReport,
    orders: Vec<String>,
}

impl SubmissionDialog {
    /// Actions offered for this report.
    pub fn actions(&self) -> &'static [DialogAction] {
        if self.report.has_issues() {
            &[DialogAction::SubmitAnyway, DialogAction::GoBack]
        } else {
            &[DialogAction::ConfirmSubmit]
        }
    }

    /// Orders that were checked, in selection order.
    pub fn orders(&self) -> &[String] {
        &self.orders
    }
}

/// How a dialog was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The orders were submitted and the selection cleared.
    Submitted { orders: Vec<String> },
    /// The clinician went back; the selection is unchanged.
    Returned,
}

/// One clinician's in-memory workbench state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    selection: Selection,
    submitted: Vec<String>,
    record_text: Option<String>,
    drafted_at: Option<DateTime<Local>>,
}

impl Session {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Mutable access to the current selection.
    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    /// Orders from the last completed submission.
    pub fn submitted(&self) -> &[String] {
        &self.submitted
    }

    /// Checks the current selection against the loaded rules.
    ///
    /// An empty selection is rejected before any check runs. A rule file
    /// that is missing or failed to parse blocks the check, as does an absent
    /// rule collection; no partial report is made.
    pub fn submit(&self, fixtures: &Fixtures) -> Result<SubmissionDialog, SubmitError> {
        if self.selection.is_empty() {
            return Err(SubmitError::EmptySelection);
        }
        let rules = match (&fixtures.check_rules, fixtures.failure(FixtureKind::CheckRules)) {
            (Some(rules), _) => rules,
            (None, Some(err)) => return Err(SubmitError::RuleFileInvalid(err.to_string())),
            (None, None) => return Err(SubmitError::RuleFileMissing),
        };

        let snapshot = self.selection.clone();
        let report = OrderChecker::new(rules).check(&snapshot, fixtures.transcript())?;
        info!(
            orders = snapshot.len(),
            conflicts = report.conflicts.len(),
            missing = report.missing.len(),
            "order submission checked"
        );

        Ok(SubmissionDialog {
            report,
            orders: snapshot.into_iter().collect(),
        })
    }

    /// Applies the clinician's choice for `dialog`.
    ///
    /// `SubmitAnyway` and `ConfirmSubmit` submit the checked orders and clear
    /// the selection; `GoBack` leaves everything as it was.
    pub fn resolve(&mut self, dialog: SubmissionDialog, action: DialogAction) -> SubmissionOutcome {
        match action {
            DialogAction::GoBack => SubmissionOutcome::Returned,
            DialogAction::SubmitAnyway | DialogAction::ConfirmSubmit => {
                self.selection.clear();
                self.submitted = dialog.orders.clone();
                info!(orders = dialog.orders.len(), "orders submitted");
                SubmissionOutcome::Submitted {
                    orders: dialog.orders,
                }
            }
        }
    }

    /// Orders to list under auxiliary exams: the current selection, else the
    /// last submission.
    pub fn auxiliary_orders(&self) -> Vec<String> {
        if self.selection.is_empty() {
            self.submitted.clone()
        } else {
            self.selection.iter().map(str::to_string).collect()
        }
    }

    /// The editable record text, drafted from the fixtures on first access.
    pub fn record_text(&mut self, fixtures: &Fixtures) -> &str {
        if self.record_text.is_none() {
            let draft = DraftRecord::draft(
                fixtures.patient.as_ref(),
                fixtures.transcript(),
                &self.auxiliary_orders(),
            );
            tracing::debug!(orders = %draft.auxiliary_exams, "record drafted");
            self.record_text = Some(draft.render());
            self.drafted_at = Some(draft.drafted_at);
        }
        self.record_text.as_deref().unwrap_or_default()
    }

    /// When the current draft was generated, if one has been.
    pub fn drafted_at(&self) -> Option<DateTime<Local>> {
        self.drafted_at
    }

    /// Replaces the record text with the clinician's edit.
    pub fn set_record_text(&mut self, text: impl Into<String>) {
        self.record_text = Some(text.into());
    }

    /// Discards edits so the next access drafts afresh.
    pub fn reset_record(&mut self) {
        self.record_text = None;
        self.drafted_at = None;
    }
}
