//! Types for snapshot run results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::engine::ActionType;

/// Whether mismatching snapshots fail the run or get rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Compare only; any mismatch fails the run
    Check,
    /// Rewrite mismatching snapshots; content drift never fails the run
    Update,
}

impl RunMode {
    pub fn from_update_flag(update: bool) -> Self {
        if update { RunMode::Update } else { RunMode::Check }
    }
}

/// Result of running a single fixture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Input document of the fixture
    pub fixture_path: PathBuf,

    /// Persisted snapshot the result was compared against
    pub snapshot_path: PathBuf,

    /// Kind the document was validated as
    pub action_type: ActionType,

    /// Whether the new serialization equals the stored one byte for byte
    pub matched: bool,

    /// Whether the snapshot file was rewritten
    #[serde(default)]
    pub updated: bool,

    /// Freshly computed serialization (trailing newline included)
    #[serde(skip)]
    pub new_snapshot: String,
}

/// Result of a complete harness run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Mode the run used
    pub mode: RunMode,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Wall-clock duration in seconds
    pub elapsed_secs: f64,

    /// One outcome per fixture, in discovery order
    pub outcomes: Vec<RunOutcome>,
}

impl RunSummary {
    /// Process-level verdict for this run
    pub fn passed(&self) -> bool {
        aggregate(self.mode, self.outcomes.iter().map(|o| o.matched))
    }

    /// Number of fixtures whose snapshot did not match
    pub fn mismatches(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.matched).count()
    }

    /// Number of snapshots rewritten during the run
    pub fn updated(&self) -> usize {
        self.outcomes.iter().filter(|o| o.updated).count()
    }
}

/// Fold per-fixture match results into one verdict.
///
/// Check mode passes only when every fixture matched. Update mode always
/// passes: mismatches are resolved by rewriting the snapshot.
pub fn aggregate(mode: RunMode, matches: impl IntoIterator<Item = bool>) -> bool {
    match mode {
        RunMode::Check => matches.into_iter().all(|matched| matched),
        RunMode::Update => true,
    }
}
