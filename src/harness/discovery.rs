//! Fixture discovery.
//!
//! Every immediate subdirectory of the fixture root is one test case. Cases
//! are returned in lexicographic order of their directory names, and within
//! a case the lexicographically first `.yml` / `.yaml` file is the input
//! document, so the result does not depend on filesystem listing order.
//!
//! All files are read up front. A missing document or unreadable file aborts
//! discovery for the whole run.

use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::harness::types::{FixtureCase, HarnessError, HarnessResult};

const YAML_EXTENSIONS: [&str; 2] = [".yml", ".yaml"];

/// Discover and read every test case under `root`
pub fn discover(root: &Path, snapshot_file: &str) -> HarnessResult<Vec<FixtureCase>> {
    if !root.is_dir() {
        return Err(HarnessError::NotADirectory(root.to_path_buf()));
    }

    let mut cases = Vec::new();
    for case_dir in sorted_entries(root)?.into_iter().filter(|p| p.is_dir()) {
        let document_path = select_document(&case_dir)?;
        let snapshot_path = case_dir.join(snapshot_file);

        let document_text = read_text(&document_path)?;
        let snapshot_text = read_text(&snapshot_path)?;
        debug!("discovered fixture {}", document_path.display());

        cases.push(FixtureCase {
            document_path,
            document_text,
            snapshot_path,
            snapshot_text,
        });
    }

    Ok(cases)
}

/// Pick the input document of a test case directory
pub fn select_document(case_dir: &Path) -> HarnessResult<PathBuf> {
    let mut documents = sorted_entries(case_dir)?
        .into_iter()
        .filter(|p| p.is_file() && is_yaml(p));

    let first = documents
        .next()
        .ok_or_else(|| HarnessError::MissingDocument(case_dir.to_path_buf()))?;

    let ignored: Vec<PathBuf> = documents.collect();
    if !ignored.is_empty() {
        warn!(
            "{} holds {} YAML documents; using {}",
            case_dir.display(),
            ignored.len() + 1,
            first.display()
        );
    }

    Ok(first)
}

fn is_yaml(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| YAML_EXTENSIONS.iter().any(|ext| name.ends_with(ext)))
        .unwrap_or(false)
}

fn sorted_entries(dir: &Path) -> HarnessResult<Vec<PathBuf>> {
    let mut paths = fs::read_dir(dir)
        .map_err(|err| HarnessError::io(dir, err))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| HarnessError::io(dir, err))?;
    paths.sort();
    Ok(paths)
}

fn read_text(path: &Path) -> HarnessResult<String> {
    fs::read_to_string(path).map_err(|err| HarnessError::io(path, err))
}
