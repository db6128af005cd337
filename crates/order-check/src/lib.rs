//! # order-check
//!
//! Conflict and omission checking for outpatient lab/imaging orders.
//!
//! When a clinician submits a set of selected orders, the engine
//! cross-references the selection against two rule collections and returns a
//! [`WarningReport`]:
//!
//! - **Conflict rules**: groups of mutually exclusive or redundant orders.
//!   Selecting two or more members of one group yields a [`ConflictFinding`].
//! - **Missing-item rules**: a candidate order plus symptom keywords. If the
//!   candidate is not selected and a keyword occurs in what the patient said,
//!   the rule yields a [`MissingFinding`].
//!
//! ## Usage
//!
//! ```rust
//! use order_check::{OrderChecker, RuleSet, Selection, TranscriptTurn};
//!
//! let rules: RuleSet = serde_json::from_str(r#"{
//!     "conflicts": [
//!         {"group": "凝血功能重复", "items": ["APTT", "PT"], "reason": "重复检查", "suggestion": "保留一项"}
//!     ],
//!     "missing_checks": [
//!         {"missing_item": "胸部CT", "symptom_keywords": ["咳嗽", "胸痛"], "priority": "高"}
//!     ]
//! }"#).unwrap();
//!
//! let transcript = vec![
//!     TranscriptTurn::doctor("还有别的不舒服吗？"),
//!     TranscriptTurn::patient("我有点咳嗽"),
//! ];
//! let selection: Selection = ["APTT", "PT", "血常规"].into_iter().collect();
//!
//! let report = OrderChecker::new(&rules).check(&selection, &transcript).unwrap();
//! assert_eq!(report.conflicts.len(), 1);
//! assert_eq!(report.missing[0].item, "胸部CT");
//! ```
//!
//! ## Matching
//!
//! Keywords are matched as literal, case-sensitive substrings of the patient
//! turns joined by single spaces. There is no tokenization or negation
//! handling: "没有咳嗽" matches the keyword "咳嗽".
//!
//! ## Ordering
//!
//! | Findings | Order |
//! |----------|-------|
//! | Conflicts | Rule declaration order |
//! | Missing items | Priority rank (高/high=1, 中/medium=2, 低/low=3, unset or other=4), ties in rule order |

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod engine;
mod error;
mod order;
mod report;
mod rules;
mod selection;
mod transcript;

pub use engine::{check, detect_conflicts, detect_missing, OrderChecker};
pub use error::{CheckError, CheckResult, RuleCollection};
pub use order::{Order, DEFAULT_RANK};
pub use report::{ConflictFinding, MissingFinding, WarningReport};
pub use rules::{ConflictRule, MissingItemRule, Priority, RuleSet};
pub use selection::{OrderSelection, Selection};
pub use transcript::{patient_text, Role, TranscriptTurn};
