use log::debug;
use std::fs;

use crate::harness::{HarnessError, HarnessResult};
use crate::runner::{RunMode, RunOutcome};

/// Persists recomputed snapshots; inert outside update mode
#[derive(Debug, Clone, Copy)]
pub struct SnapshotWriter {
    mode: RunMode,
}

impl SnapshotWriter {
    pub fn new(mode: RunMode) -> Self {
        Self { mode }
    }

    /// Overwrite the snapshot of a mismatched outcome.
    ///
    /// Returns whether the file was written. Matched outcomes and check mode
    /// never touch the disk.
    pub fn persist(&self, outcome: &RunOutcome) -> HarnessResult<bool> {
        if self.mode != RunMode::Update || outcome.matched {
            return Ok(false);
        }

        fs::write(&outcome.snapshot_path, &outcome.new_snapshot)
            .map_err(|err| HarnessError::io(&outcome.snapshot_path, err))?;
        debug!(
            "wrote {} bytes to {}",
            outcome.new_snapshot.len(),
            outcome.snapshot_path.display()
        );

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ActionType;
    use std::path::Path;
    use tempfile::TempDir;

    fn outcome(dir: &Path, matched: bool) -> RunOutcome {
        RunOutcome {
            fixture_path: dir.join("workflow.yml"),
            snapshot_path: dir.join("validation_state.snap.json"),
            action_type: ActionType::Workflow,
            matched,
            updated: false,
            new_snapshot: "{\n  \"new\": true\n}\n".to_string(),
        }
    }

    #[test]
    fn test_update_mode_rewrites_mismatch() {
        let dir = TempDir::new().unwrap();
        let outcome = outcome(dir.path(), false);
        fs::write(&outcome.snapshot_path, "old\n").unwrap();

        let written = SnapshotWriter::new(RunMode::Update).persist(&outcome).unwrap();
        assert!(written);
        assert_eq!(fs::read_to_string(&outcome.snapshot_path).unwrap(), outcome.new_snapshot);
    }

    #[test]
    fn test_check_mode_is_inert() {
        let dir = TempDir::new().unwrap();
        let outcome = outcome(dir.path(), false);
        fs::write(&outcome.snapshot_path, "old\n").unwrap();

        let written = SnapshotWriter::new(RunMode::Check).persist(&outcome).unwrap();
        assert!(!written);
        assert_eq!(fs::read_to_string(&outcome.snapshot_path).unwrap(), "old\n");
    }

    #[test]
    fn test_matched_outcome_is_left_alone() {
        let dir = TempDir::new().unwrap();
        let outcome = outcome(dir.path(), true);
        fs::write(&outcome.snapshot_path, "old\n").unwrap();

        assert!(!SnapshotWriter::new(RunMode::Update).persist(&outcome).unwrap());
        assert_eq!(fs::read_to_string(&outcome.snapshot_path).unwrap(), "old\n");
    }

    #[test]
    fn test_write_failure_names_path() {
        let dir = TempDir::new().unwrap();
        let mut outcome = outcome(dir.path(), false);
        outcome.snapshot_path = dir.path().join("missing").join("validation_state.snap.json");

        let err = SnapshotWriter::new(RunMode::Update).persist(&outcome).unwrap_err();
        assert!(err.to_string().contains("validation_state.snap.json"));
    }
}
