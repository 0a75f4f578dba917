//! Structural rules applied by the built-in engine.
//!
//! This is a deliberately small subset of the published action and workflow
//! schemas: top-level keys, a handful of type checks and job dependency
//! resolution. Diagnostics are emitted in a fixed order (required keys in
//! declared order, unknown keys in sorted order, then nested checks in key
//! order) so repeated runs serialize identically.

use log::debug;
use serde_json::{Map, Value};

use crate::engine::types::{NestedState, ValidationError};

/// Allowed and required keys of a mapping
struct Shape {
    required: &'static [&'static str],
    allowed: &'static [&'static str],
}

const ACTION_SHAPE: Shape = Shape {
    required: &["name", "description", "runs"],
    allowed: &["name", "author", "description", "inputs", "outputs", "runs", "branding"],
};

const WORKFLOW_SHAPE: Shape = Shape {
    required: &["on", "jobs"],
    allowed: &[
        "name",
        "run-name",
        "on",
        "permissions",
        "env",
        "defaults",
        "concurrency",
        "jobs",
    ],
};

/// Check an action metadata document
pub(crate) fn check_action(doc: &Value) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if let Some(root) = check_shape(doc, &ACTION_SHAPE, &mut errors) {
        if let Some(runs) = root.get("runs") {
            check_runs(runs, &mut errors);
        }
    }
    errors
}

/// Check a workflow document
pub(crate) fn check_workflow(doc: &Value) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if let Some(root) = check_shape(doc, &WORKFLOW_SHAPE, &mut errors) {
        if let Some(on) = root.get("on") {
            check_on(on, &mut errors);
        }
        if let Some(jobs) = root.get("jobs") {
            check_jobs(jobs, &mut errors);
        }
    }
    errors
}

fn check_shape<'a>(
    doc: &'a Value,
    shape: &Shape,
    errors: &mut Vec<ValidationError>,
) -> Option<&'a Map<String, Value>> {
    let Some(root) = doc.as_object() else {
        errors.push(wrong_type("", "object", doc));
        return None;
    };

    debug!("checking {} top-level keys", root.len());

    for key in shape.required {
        if !root.contains_key(*key) {
            errors.push(required(&pointer("", key)));
        }
    }

    for key in root.keys() {
        if !shape.allowed.contains(&key.as_str()) {
            errors.push(
                ValidationError::schema(
                    "additional_properties",
                    pointer("", key),
                    "Additional properties are not allowed",
                )
                .detail(format!("Additional property `{}` is not allowed", key)),
            );
        }
    }

    Some(root)
}

fn check_runs(runs: &Value, errors: &mut Vec<ValidationError>) {
    let Some(runs) = runs.as_object() else {
        errors.push(wrong_type("/runs", "object", runs));
        return;
    };

    match runs.get("using") {
        None => errors.push(required("/runs/using")),
        Some(Value::String(_)) => {}
        Some(other) => errors.push(wrong_type("/runs/using", "string", other)),
    }
}

fn check_on(on: &Value, errors: &mut Vec<ValidationError>) {
    match on {
        Value::String(_) | Value::Array(_) | Value::Object(_) => {}
        other => errors.push(any_of("/on", &["string", "array", "object"], other)),
    }
}

fn check_jobs(jobs: &Value, errors: &mut Vec<ValidationError>) {
    let Some(jobs) = jobs.as_object() else {
        errors.push(wrong_type("/jobs", "object", jobs));
        return;
    };

    for (job_name, job) in jobs {
        let job_path = pointer("/jobs", job_name);
        let Some(job) = job.as_object() else {
            errors.push(wrong_type(&job_path, "object", job));
            continue;
        };

        let needs_path = pointer(&job_path, "needs");
        match job.get("needs") {
            None => {}
            Some(Value::String(need)) => {
                if !jobs.contains_key(need) {
                    errors.push(unresolved_job(&needs_path, need));
                }
            }
            Some(Value::Array(needs)) => {
                for (index, need) in needs.iter().enumerate() {
                    match need.as_str() {
                        Some(need) if !jobs.contains_key(need) => {
                            errors.push(unresolved_job(&needs_path, need));
                        }
                        Some(_) => {}
                        None => errors.push(wrong_type(
                            &pointer(&needs_path, &index.to_string()),
                            "string",
                            need,
                        )),
                    }
                }
            }
            Some(other) => errors.push(any_of(&needs_path, &["string", "array"], other)),
        }
    }
}

fn required(path: &str) -> ValidationError {
    ValidationError::schema("required", path, "This property is required")
}

fn unresolved_job(path: &str, need: &str) -> ValidationError {
    ValidationError::schema("unresolved_job", path, "Unresolved job")
        .detail(format!("unresolved job {}", need))
}

fn wrong_type(path: &str, expected: &str, actual: &Value) -> ValidationError {
    ValidationError::schema("wrong_type", path, "Type of the value is wrong").detail(format!(
        "The value must be {}, found {}",
        expected,
        type_name(actual)
    ))
}

/// One nested state per alternative, each holding the type mismatch for it
fn any_of(path: &str, alternatives: &[&str], actual: &Value) -> ValidationError {
    let states = alternatives
        .iter()
        .map(|expected| NestedState {
            errors: vec![wrong_type(path, expected, actual)],
        })
        .collect();

    ValidationError::schema("any_of", path, "AnyOf conditions are not met").states(states)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Append one escaped segment to a JSON pointer
fn pointer(parent: &str, segment: &str) -> String {
    format!("{}/{}", parent, segment.replace('~', "~0").replace('/', "~1"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn codes_and_paths(errors: &[ValidationError]) -> Vec<(String, String)> {
        errors
            .iter()
            .map(|e| (e.code().to_string(), e.path().unwrap_or("-").to_string()))
            .collect()
    }

    #[test]
    fn test_minimal_action_is_clean() {
        let doc = json!({
            "name": "hello",
            "description": "says hello",
            "runs": {"using": "node20", "main": "index.js"}
        });
        assert!(check_action(&doc).is_empty());
    }

    #[test]
    fn test_action_missing_keys_in_declared_order() {
        let doc = json!({"author": "me"});
        assert_eq!(
            codes_and_paths(&check_action(&doc)),
            vec![
                ("required".to_string(), "/name".to_string()),
                ("required".to_string(), "/description".to_string()),
                ("required".to_string(), "/runs".to_string()),
            ]
        );
    }

    #[test]
    fn test_action_runs_using() {
        let doc = json!({"name": "a", "description": "b", "runs": {"main": "x"}});
        assert_eq!(
            codes_and_paths(&check_action(&doc)),
            vec![("required".to_string(), "/runs/using".to_string())]
        );

        let doc = json!({"name": "a", "description": "b", "runs": "node20"});
        assert_eq!(
            codes_and_paths(&check_action(&doc)),
            vec![("wrong_type".to_string(), "/runs".to_string())]
        );
    }

    #[test]
    fn test_unknown_top_level_key() {
        let doc = json!({"on": "push", "jobs": {}, "bogus": true});
        let errors = check_workflow(&doc);
        assert_eq!(
            codes_and_paths(&errors),
            vec![("additional_properties".to_string(), "/bogus".to_string())]
        );
    }

    #[test]
    fn test_non_mapping_document() {
        let errors = check_workflow(&json!(["a", "b"]));
        assert_eq!(codes_and_paths(&errors), vec![("wrong_type".to_string(), "".to_string())]);
    }

    #[test]
    fn test_on_any_of_states() {
        let doc = json!({"on": 5, "jobs": {}});
        let errors = check_workflow(&doc);
        assert_eq!(errors.len(), 1);
        match &errors[0] {
            ValidationError::Schema { code, path, states: Some(states), .. } => {
                assert_eq!(code, "any_of");
                assert_eq!(path, "/on");
                assert_eq!(states.len(), 3);
                assert!(states.iter().all(|s| s.errors.len() == 1));
            }
            other => panic!("unexpected diagnostic: {:?}", other),
        }
    }

    #[test]
    fn test_unresolved_needs() {
        let doc = json!({
            "on": "push",
            "jobs": {
                "build": {"runs-on": "ubuntu-latest"},
                "deploy": {"needs": ["build", "test"]},
                "lint": {"needs": "missing"}
            }
        });
        let errors = check_workflow(&doc);
        assert_eq!(
            codes_and_paths(&errors),
            vec![
                ("unresolved_job".to_string(), "/jobs/deploy/needs".to_string()),
                ("unresolved_job".to_string(), "/jobs/lint/needs".to_string()),
            ]
        );
        match &errors[0] {
            ValidationError::Schema { detail, .. } => {
                assert_eq!(detail.as_deref(), Some("unresolved job test"));
            }
            other => panic!("unexpected diagnostic: {:?}", other),
        }
    }

    #[test]
    fn test_pointer_escaping() {
        assert_eq!(pointer("", "on"), "/on");
        assert_eq!(pointer("/jobs", "a/b~c"), "/jobs/a~1b~0c");
    }
}
