//! Loaded reference data for one workbench process.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::sync::Arc;

use order_check::{Order, RuleSet, TranscriptTurn};
use tracing::{info, warn};

use crate::error::{FixtureError, FixtureResult};
use crate::json::load_json;
use crate::labs::{load_lab_table, LabTable};
use crate::models::{AbnormalSummary, Patient, SidebarSupport, SimilarCase};
use crate::paths::FixturePaths;

/// Names one fixture file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FixtureKind {
    /// [`FixturePaths::patient`]
    Patient,
    /// [`FixturePaths::transcript`]
    Transcript,
    /// [`FixturePaths::highlights`]
    Highlights,
    /// [`FixturePaths::similar_cases`]
    SimilarCases,
    /// [`FixturePaths::orders`]
    Orders,
    /// [`FixturePaths::check_rules`]
    CheckRules,
    /// [`FixturePaths::abnormal_summary`]
    AbnormalSummary,
    /// [`FixturePaths::sidebar_support`]
    SidebarSupport,
    /// [`FixturePaths::lab_table`]
    LabTable,
}

impl FixtureKind {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            FixtureKind::Patient => "patient",
            FixtureKind::Transcript => "transcript",
            FixtureKind::Highlights => "highlights",
            FixtureKind::SimilarCases => "similar_cases",
            FixtureKind::Orders => "orders",
            FixtureKind::CheckRules => "check_rules",
            FixtureKind::AbnormalSummary => "abnormal_summary",
            FixtureKind::SidebarSupport => "sidebar_support",
            FixtureKind::LabTable => "lab_table",
        }
    }
}

impl fmt::Display for FixtureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every fixture, loaded once and read-only afterwards.
///
/// A fixture whose file does not exist is `None`. So is one whose file
/// exists but could not be read; its error is kept in
/// [`failures`](Self::failures). Stages decide what an absent fixture
/// means: the order check refuses to run without its rule file, while the
/// intake stage just shows no highlights.
#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    /// The patient being seen.
    pub patient: Option<Patient>,
    /// The intake conversation in speaking order.
    pub transcript: Option<Vec<TranscriptTurn>>,
    /// Curated conversation highlights.
    pub highlights: Option<Vec<String>>,
    /// Past cases similar to this visit.
    pub similar_cases: Option<Vec<SimilarCase>>,
    /// The order catalog.
    pub orders: Option<Vec<Order>>,
    /// Conflict and missing-item rules for the order check.
    pub check_rules: Option<RuleSet>,
    /// Interpretation of the abnormal lab values.
    pub abnormal_summary: Option<AbnormalSummary>,
    /// Notes shown beside the record.
    pub sidebar_support: Option<SidebarSupport>,
    /// Lab results.
    pub lab_table: Option<LabTable>,
    /// Files that exist but failed to load, by fixture.
    pub failures: BTreeMap<FixtureKind, Arc<FixtureError>>,
}

impl Fixtures {
    /// Loads every fixture named by `paths`.
    ///
    /// A file that cannot be parsed leaves its fixture `None` and is
    /// recorded in [`failures`](Self::failures); the other fixtures still
    /// load. Only an unreadable data directory is an error.
    pub fn load(paths: &FixturePaths) -> FixtureResult<Self> {
        let metadata =
            fs::metadata(&paths.data_dir).map_err(|e| FixtureError::io_error(&paths.data_dir, e))?;
        if !metadata.is_dir() {
            return Err(FixtureError::io_error(
                &paths.data_dir,
                io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
            ));
        }

        let mut failures = BTreeMap::new();
        let f = &mut failures;
        let patient = settle(FixtureKind::Patient, load_json(&paths.patient), f);
        let transcript = settle(FixtureKind::Transcript, load_json(&paths.transcript), f);
        let highlights = settle(FixtureKind::Highlights, load_json(&paths.highlights), f);
        let similar_cases = settle(FixtureKind::SimilarCases, load_json(&paths.similar_cases), f);
        let orders = settle(FixtureKind::Orders, load_json(&paths.orders), f);
        let check_rules = settle(FixtureKind::CheckRules, load_json(&paths.check_rules), f);
        let abnormal_summary =
            settle(FixtureKind::AbnormalSummary, load_json(&paths.abnormal_summary), f);
        let sidebar_support =
            settle(FixtureKind::SidebarSupport, load_json(&paths.sidebar_support), f);
        let lab_table = settle(FixtureKind::LabTable, load_lab_table(&paths.lab_table), f);

        let fixtures = Self {
            patient,
            transcript,
            highlights,
            similar_cases,
            orders,
            check_rules,
            abnormal_summary,
            sidebar_support,
            lab_table,
            failures,
        };
        info!(
            data_dir = %paths.data_dir.display(),
            transcript_turns = fixtures.transcript().len(),
            orders = fixtures.orders.as_ref().map_or(0, Vec::len),
            rules_loaded = fixtures.check_rules.is_some(),
            failed = fixtures.failures.len(),
            "fixtures loaded"
        );
        Ok(fixtures)
    }

    /// The transcript, empty if none was loaded.
    pub fn transcript(&self) -> &[TranscriptTurn] {
        self.transcript.as_deref().unwrap_or_default()
    }

    /// Similar cases, empty if none were loaded.
    pub fn similar_cases(&self) -> &[SimilarCase] {
        self.similar_cases.as_deref().unwrap_or_default()
    }

    /// Why `kind` failed to load, if its file exists but was unreadable.
    pub fn failure(&self, kind: FixtureKind) -> Option<&FixtureError> {
        self.failures.get(&kind).map(Arc::as_ref)
    }
}

fn settle<T>(
    kind: FixtureKind,
    result: FixtureResult<Option<T>>,
    failures: &mut BTreeMap<FixtureKind, Arc<FixtureError>>,
) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(err) => {
            warn!(fixture = %kind, error = %err, "fixture failed to load");
            failures.insert(kind, Arc::new(err));
            None
        }
    }
}

/// Holds the current fixture snapshot.
///
/// Readers share an `Arc<Fixtures>`; [`reload`](Self::reload) swaps in a
/// fresh snapshot without touching the ones already handed out.
#[derive(Debug, Clone)]
pub struct FixtureStore {
    paths: FixturePaths,
    current: Arc<Fixtures>,
}

impl FixtureStore {
    /// Loads fixtures from `paths`. Fails only if the data directory is
    /// unreadable.
    pub fn open(paths: FixturePaths) -> FixtureResult<Self> {
        let current = Arc::new(Fixtures::load(&paths)?);
        Ok(Self { paths, current })
    }

    /// Wraps already loaded fixtures, for callers that build them in memory.
    pub fn from_fixtures(paths: FixturePaths, fixtures: Fixtures) -> Self {
        Self {
            paths,
            current: Arc::new(fixtures),
        }
    }

    /// The current snapshot.
    pub fn fixtures(&self) -> Arc<Fixtures> {
        Arc::clone(&self.current)
    }

    /// The paths this store loads from.
    pub fn paths(&self) -> &FixturePaths {
        &self.paths
    }

    /// Re-reads every fixture from disk.
    ///
    /// If the data directory cannot be read the previous snapshot stays
    /// current.
    pub fn reload(&mut self) -> FixtureResult<Arc<Fixtures>> {
        let fresh = Arc::new(Fixtures::load(&self.paths)?);
        self.current = Arc::clone(&fresh);
        Ok(fresh)
    }
}
