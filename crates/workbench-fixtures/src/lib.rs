//! # workbench-fixtures
//!
//! Loads the outpatient workbench's reference data from a data directory.
//!
//! The workbench renders pre-generated demo data: a patient, the intake
//! transcript, similar cases, the ranked order catalog, the order-check rule
//! file, lab results and summary notes. This crate reads those files once and
//! hands out an immutable snapshot.
//!
//! Each file loads on its own. A missing file leaves its fixture `None`; a
//! file that exists but cannot be parsed does the same and its error is kept
//! in [`Fixtures::failures`], so one broken file never hides the others.
//!
//! ## Files
//!
//! | Fixture | Default file | Format |
//! |---------|--------------|--------|
//! | Patient | `patient.json` | JSON object |
//! | Transcript | `transcript.json` | JSON list of `{role, text}` |
//! | Highlights | `dialogue_highlights.json` | JSON list of strings |
//! | Similar cases | `similar_cases.json` | JSON list |
//! | Order catalog | `orders_ranked.json` | JSON list of `{order_name, order, reason}` |
//! | Check rules | `order_check_rules.json` | JSON `{conflicts, missing_checks}` |
//! | Abnormal summary | `abnormal_summary.json` | JSON `{abnormal_items}` |
//! | Sidebar support | `sidebar_support.json` | JSON `{key_tests}` |
//! | Lab table | `lab_table.csv` | CSV with header row |
//!
//! ## Example
//!
//! ```ignore
//! use workbench_fixtures::{FixturePaths, FixtureStore};
//!
//! let store = FixtureStore::open(FixturePaths::in_dir("data"))?;
//! let fixtures = store.fixtures();
//! println!("{} transcript turns", fixtures.transcript().len());
//! ```

#![warn(missing_docs)]

mod error;
mod json;
mod labs;
mod models;
mod paths;
mod store;

pub use error::{FixtureError, FixtureResult};
pub use json::load_json;
pub use labs::{load_lab_table, LabFlag, LabRow, LabTable, FLAG_COLUMN};
pub use models::{AbnormalItem, AbnormalSummary, Patient, SidebarSupport, SimilarCase};
pub use paths::{FixturePaths, DEFAULT_DATA_DIR};
pub use store::{FixtureKind, FixtureStore, Fixtures};
