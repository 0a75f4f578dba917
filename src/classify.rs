//! Filename-based dispatch between action and workflow validation.
//!
//! Both the snapshot harness and the `action-validator` binary route through
//! [`ActionType::from_path`] so the two can never disagree on a file.

use std::path::Path;

use crate::engine::ActionType;

/// File names treated as action metadata
pub const ACTION_FILE_NAMES: [&str; 2] = ["action.yml", "action.yaml"];

impl ActionType {
    /// Classify a document by its file name.
    ///
    /// Only an exact `action.yml` / `action.yaml` file name is an action;
    /// every other path (including ones without a file name) is a workflow.
    pub fn from_path(path: &Path) -> Self {
        match path.file_name().and_then(|name| name.to_str()) {
            Some(name) if ACTION_FILE_NAMES.contains(&name) => ActionType::Action,
            _ => ActionType::Workflow,
        }
    }
}
