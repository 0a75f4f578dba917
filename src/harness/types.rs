use std::path::{Path, PathBuf};

use crate::config;
use crate::engine::ActionType;
use crate::runner::RunMode;

/// One test case: an input document and its persisted expectation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureCase {
    /// Path of the YAML document
    pub document_path: PathBuf,

    /// Contents of the YAML document
    pub document_text: String,

    /// Path of the persisted snapshot
    pub snapshot_path: PathBuf,

    /// Contents of the persisted snapshot
    pub snapshot_text: String,
}

impl FixtureCase {
    /// Document kind, decided by the document's file name
    pub fn action_type(&self) -> ActionType {
        ActionType::from_path(&self.document_path)
    }
}

/// Configuration for a harness run
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Directory holding one subdirectory per test case
    pub fixture_dir: PathBuf,

    /// Snapshot file name inside each test case directory
    pub snapshot_file: String,

    /// Check or update
    pub mode: RunMode,
}

impl HarnessConfig {
    /// Check-mode configuration for a fixture root
    pub fn new(fixture_dir: impl Into<PathBuf>) -> Self {
        Self {
            fixture_dir: fixture_dir.into(),
            ..Default::default()
        }
    }

    pub fn mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn snapshot_file(mut self, name: impl Into<String>) -> Self {
        self.snapshot_file = name.into();
        self
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        let cfg = config::get();
        Self {
            fixture_dir: PathBuf::from(&cfg.fixtures.root_dir),
            snapshot_file: cfg.fixtures.snapshot_file.clone(),
            mode: RunMode::Check,
        }
    }
}

/// Result type for harness operations
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Error types for harness operations
#[derive(Debug)]
pub enum HarnessError {
    /// Reading or writing a fixture file failed
    Io { path: PathBuf, source: std::io::Error },

    /// Fixture root is missing or not a directory
    NotADirectory(PathBuf),

    /// Test case directory contains no `.yml` / `.yaml` document
    MissingDocument(PathBuf),

    /// Validation state could not be serialized
    Serialization(serde_json::Error),

    /// Writing report output failed
    Output(std::io::Error),
}

impl HarnessError {
    /// Wrap an I/O error with the path it concerns
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        HarnessError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl std::fmt::Display for HarnessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HarnessError::Io { path, source } => write!(f, "I/O error at {}: {}", path.display(), source),
            HarnessError::NotADirectory(path) => {
                write!(f, "Fixture root is not a directory: {}", path.display())
            }
            HarnessError::MissingDocument(dir) => {
                write!(f, "No .yml or .yaml document found in {}", dir.display())
            }
            HarnessError::Serialization(err) => write!(f, "Serialization error: {}", err),
            HarnessError::Output(err) => write!(f, "Output error: {}", err),
        }
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HarnessError::Io { source, .. } => Some(source),
            HarnessError::NotADirectory(_) | HarnessError::MissingDocument(_) => None,
            HarnessError::Serialization(err) => Some(err),
            HarnessError::Output(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for HarnessError {
    fn from(err: std::io::Error) -> Self {
        HarnessError::Output(err)
    }
}

impl From<serde_json::Error> for HarnessError {
    fn from(err: serde_json::Error) -> Self {
        HarnessError::Serialization(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_case_classification() {
        let case = FixtureCase {
            document_path: PathBuf::from("test/a/action.yaml"),
            document_text: String::new(),
            snapshot_path: PathBuf::from("test/a/validation_state.snap.json"),
            snapshot_text: String::new(),
        };
        assert_eq!(case.action_type(), ActionType::Action);
    }

    #[test]
    fn test_config_builder() {
        let config = HarnessConfig::new("fixtures")
            .mode(RunMode::Update)
            .snapshot_file("expected.json");
        assert_eq!(config.fixture_dir, PathBuf::from("fixtures"));
        assert_eq!(config.snapshot_file, "expected.json");
        assert_eq!(config.mode, RunMode::Update);
    }

    #[test]
    fn test_error_messages_name_paths() {
        let err = HarnessError::MissingDocument(PathBuf::from("test/empty_case"));
        assert_eq!(err.to_string(), "No .yml or .yaml document found in test/empty_case");

        let err = HarnessError::io(
            "test/a/validation_state.snap.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("test/a/validation_state.snap.json"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
