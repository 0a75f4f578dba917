//! Action Validator - validation for GitHub Action and Workflow YAML files.
//!
//! This crate provides:
//! - A validation contract ([`Validator`]) with a built-in reference engine
//! - Filename-based classification of action vs. workflow documents
//! - A golden-snapshot harness that runs fixture directories through the
//!   engine, diffs the serialized result against stored snapshots and can
//!   rewrite them in update mode
//!
//! # Example
//!
//! ```rust,no_run
//! use action_validator::{BuiltinValidator, HarnessConfig, Reporter, RunMode, run_harness};
//!
//! let config = HarnessConfig::new("test").mode(RunMode::Check);
//! let mut reporter = Reporter::stdio(false);
//! let summary = run_harness(&config, &BuiltinValidator::new(), &mut reporter).unwrap();
//! assert!(summary.passed());
//! ```

pub mod classify;
pub mod config;
pub mod engine;
pub mod harness;
pub mod report;
pub mod runner;
pub mod snapshot;

// Re-export engine types
pub use engine::{
    ActionType, BuiltinValidator, FixedValidator, NestedState, ParseErrorLocation, ValidationError,
    ValidationState, Validator,
};

// Re-export harness types
pub use harness::{FixtureCase, HarnessConfig, HarnessError, HarnessResult, discover, run_fixture, run_harness};

// Re-export runner types
pub use runner::{RunMode, RunOutcome, RunSummary, aggregate};

// Re-export reporting and snapshot helpers
pub use report::{Reporter, render_segments};
pub use snapshot::{Segment, SegmentKind, SnapshotWriter, diff_lines, serialize_state, snapshot_matches};
