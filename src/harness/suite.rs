use chrono::Utc;
use log::{debug, info};
use std::io::Write;
use std::time::Instant;

use crate::engine::Validator;
use crate::harness::discovery::discover;
use crate::harness::types::{FixtureCase, HarnessConfig, HarnessResult};
use crate::report::Reporter;
use crate::runner::{RunMode, RunOutcome, RunSummary};
use crate::snapshot::{SnapshotWriter, serialize_state, snapshot_matches};

/// Runs every fixture under the configured root, one at a time.
///
/// Discovery failures and I/O errors abort the run. Snapshot mismatches never
/// do: they are reported, rewritten in update mode, and folded into the
/// returned summary.
pub fn run_harness<V, O, E>(
    config: &HarnessConfig,
    validator: &V,
    reporter: &mut Reporter<O, E>,
) -> HarnessResult<RunSummary>
where
    V: Validator + ?Sized,
    O: Write,
    E: Write,
{
    let started_at = Utc::now();
    let start = Instant::now();

    let cases = discover(&config.fixture_dir, &config.snapshot_file)?;
    info!(
        "running {} fixture(s) from {} with the {} engine",
        cases.len(),
        config.fixture_dir.display(),
        validator.name()
    );

    let writer = SnapshotWriter::new(config.mode);
    let mut outcomes = Vec::with_capacity(cases.len());

    for case in &cases {
        let mut outcome = run_fixture(validator, case, reporter)?;
        reporter.outcome(&outcome, &case.snapshot_text, config.mode)?;

        if !outcome.matched {
            match config.mode {
                RunMode::Update => {
                    reporter.updating(&outcome.fixture_path)?;
                    outcome.updated = writer.persist(&outcome)?;
                }
                RunMode::Check => reporter.mismatch(&outcome.fixture_path)?,
            }
        }

        outcomes.push(outcome);
    }

    Ok(RunSummary {
        mode: config.mode,
        started_at,
        elapsed_secs: start.elapsed().as_secs_f64(),
        outcomes,
    })
}

/// Validate one fixture and compare the result against its snapshot
pub fn run_fixture<V, O, E>(
    validator: &V,
    case: &FixtureCase,
    reporter: &mut Reporter<O, E>,
) -> HarnessResult<RunOutcome>
where
    V: Validator + ?Sized,
    O: Write,
    E: Write,
{
    let action_type = case.action_type();
    reporter.fixture_header(&case.document_path, action_type)?;

    reporter.output_start()?;
    debug!("validating {} as {}", case.document_path.display(), action_type);
    let state = validator.validate(action_type, &case.document_text);
    reporter.output_end()?;

    let new_snapshot = serialize_state(&state)?;
    let matched = snapshot_matches(&case.snapshot_text, &new_snapshot);

    Ok(RunOutcome {
        fixture_path: case.document_path.clone(),
        snapshot_path: case.snapshot_path.clone(),
        action_type,
        matched,
        updated: false,
        new_snapshot,
    })
}
