//! # workbench
//!
//! The outpatient visit workbench: four stages over one patient's demo data.
//!
//! 1. **Intake** ([`intake`]): conversation highlights and similar past cases.
//! 2. **Ordering** ([`ordering`], [`session`]): ranked order catalog, search,
//!    and submission with the order safety check.
//! 3. **Lab results** ([`results`]): the lab table with abnormal rows marked.
//! 4. **Record** ([`record`]): a drafted outpatient record and key clues.
//!
//! Fixtures are loaded once into an immutable snapshot; every clinician works
//! in their own [`Session`].
//!
//! ## Example
//!
//! ```rust
//! use order_check::{ConflictRule, RuleSet};
//! use workbench::{DialogAction, Session, SubmissionOutcome};
//! use workbench_fixtures::Fixtures;
//!
//! let fixtures = Fixtures {
//!     check_rules: Some(RuleSet::new(
//!         vec![ConflictRule::new("凝血功能重复", ["APTT", "PT"])],
//!         Vec::new(),
//!     )),
//!     ..Default::default()
//! };
//!
//! let mut session = Session::new();
//! session.selection_mut().extend(["APTT", "PT"]);
//!
//! let dialog = session.submit(&fixtures).unwrap();
//! assert!(dialog.report.has_issues());
//!
//! let outcome = session.resolve(dialog, DialogAction::GoBack);
//! assert_eq!(outcome, SubmissionOutcome::Returned);
//! assert_eq!(session.selection().len(), 2);
//! ```

pub mod config;
pub mod error;
pub mod intake;
pub mod ordering;
pub mod record;
pub mod results;
pub mod session;
pub mod view;

pub use config::{WorkbenchConfig, WorkbenchConfigBuilder};
pub use error::{SubmitError, WorkbenchError};
pub use record::{key_clues, DraftRecord};
pub use session::{DialogAction, Session, SubmissionDialog, SubmissionOutcome};
pub use view::{priority_color, PriorityColor};
