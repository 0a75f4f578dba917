// Core types shared by the validation engine, the harness and the CLI

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of document being validated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    /// Action metadata (`action.yml` / `action.yaml`)
    Action,
    /// Workflow definition (any other YAML file)
    Workflow,
}

impl ActionType {
    /// Lowercase name used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Action => "action",
            ActionType::Workflow => "workflow",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Offsets reported by the YAML parser, copied through unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseErrorLocation {
    pub index: usize,
    pub line: usize,
    pub column: usize,
}

/// One alternative tried while checking an `anyOf`-style rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedState {
    pub errors: Vec<ValidationError>,
}

/// A single diagnostic produced by the engine.
///
/// Schema diagnostics point into the document with a JSON-pointer style
/// `path`; parse diagnostics carry a source `location` instead. The two
/// shapes are kept apart so neither field is ever reused for the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidationError {
    Schema {
        code: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
        path: String,
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        states: Option<Vec<NestedState>>,
    },
    Parse {
        code: String,
        detail: String,
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<ParseErrorLocation>,
    },
}

impl ValidationError {
    /// Build a schema diagnostic without detail or nested states
    pub fn schema(code: impl Into<String>, path: impl Into<String>, title: impl Into<String>) -> Self {
        ValidationError::Schema {
            code: code.into(),
            detail: None,
            path: path.into(),
            title: title.into(),
            states: None,
        }
    }

    /// Attach a detail message (schema diagnostics only)
    pub fn detail(mut self, message: impl Into<String>) -> Self {
        if let ValidationError::Schema { detail, .. } = &mut self {
            *detail = Some(message.into());
        }
        self
    }

    /// Attach nested alternative states (schema diagnostics only)
    pub fn states(mut self, nested: Vec<NestedState>) -> Self {
        if let ValidationError::Schema { states, .. } = &mut self {
            *states = Some(nested);
        }
        self
    }

    pub fn code(&self) -> &str {
        match self {
            ValidationError::Schema { code, .. } | ValidationError::Parse { code, .. } => code,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ValidationError::Schema { title, .. } | ValidationError::Parse { title, .. } => title,
        }
    }

    /// Document path, for schema diagnostics
    pub fn path(&self) -> Option<&str> {
        match self {
            ValidationError::Schema { path, .. } => Some(path),
            ValidationError::Parse { .. } => None,
        }
    }

    /// Source location, for parse diagnostics that have one
    pub fn location(&self) -> Option<ParseErrorLocation> {
        match self {
            ValidationError::Schema { .. } => None,
            ValidationError::Parse { location, .. } => *location,
        }
    }
}

impl From<serde_yaml::Error> for ValidationError {
    fn from(err: serde_yaml::Error) -> Self {
        ValidationError::Parse {
            code: "invalid_yaml".to_string(),
            detail: err.to_string(),
            title: "Invalid YAML".to_string(),
            location: err.location().map(|loc| ParseErrorLocation {
                index: loc.index(),
                line: loc.line(),
                column: loc.column(),
            }),
        }
    }
}

/// Full result of validating one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationState {
    /// Kind the document was validated as
    pub action_type: ActionType,

    /// Diagnostics in the order the engine reported them
    pub errors: Vec<ValidationError>,
}

impl ValidationState {
    /// Empty state for the given document kind
    pub fn new(action_type: ActionType) -> Self {
        Self {
            action_type,
            errors: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_state_wire_format() {
        let state = ValidationState {
            action_type: ActionType::Workflow,
            errors: vec![ValidationError::schema("required", "/jobs", "This property is required")],
        };
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(
            value,
            json!({
                "actionType": "workflow",
                "errors": [{"code": "required", "path": "/jobs", "title": "This property is required"}]
            })
        );
    }

    #[test]
    fn test_schema_key_order() {
        let error = ValidationError::schema("any_of", "/on", "AnyOf conditions are not met")
            .detail("no alternative matched")
            .states(vec![NestedState { errors: vec![] }]);
        let text = serde_json::to_string(&error).unwrap();
        assert_eq!(
            text,
            r#"{"code":"any_of","detail":"no alternative matched","path":"/on","title":"AnyOf conditions are not met","states":[{"errors":[]}]}"#
        );
    }

    #[test]
    fn test_parse_shape_has_no_path() {
        let error = ValidationError::Parse {
            code: "invalid_yaml".to_string(),
            detail: "bad indent".to_string(),
            title: "Invalid YAML".to_string(),
            location: Some(ParseErrorLocation { index: 12, line: 2, column: 3 }),
        };
        assert_eq!(error.path(), None);
        assert_eq!(error.location().map(|l| l.line), Some(2));

        let text = serde_json::to_string(&error).unwrap();
        assert_eq!(
            text,
            r#"{"code":"invalid_yaml","detail":"bad indent","title":"Invalid YAML","location":{"index":12,"line":2,"column":3}}"#
        );
    }

    #[test]
    fn test_untagged_shapes_deserialize_apart() {
        let schema: ValidationError =
            serde_json::from_str(r#"{"code":"required","path":"/on","title":"t"}"#).unwrap();
        assert_eq!(schema.path(), Some("/on"));

        let parse: ValidationError =
            serde_json::from_str(r#"{"code":"invalid_yaml","detail":"d","title":"t"}"#).unwrap();
        assert_eq!(parse.path(), None);
        assert_eq!(parse.location(), None);
    }

    #[test]
    fn test_detail_ignored_on_parse_shape() {
        let error = ValidationError::Parse {
            code: "invalid_yaml".to_string(),
            detail: "mapping values are not allowed here".to_string(),
            title: "Invalid YAML".to_string(),
            location: None,
        }
        .detail("replacement");
        match error {
            ValidationError::Parse { detail, .. } => assert_eq!(detail, "mapping values are not allowed here"),
            other => panic!("unexpected shape: {:?}", other),
        }
    }
}
