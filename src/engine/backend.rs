use log::debug;
use serde_json::Value;

use crate::engine::schema;
use crate::engine::types::{ActionType, ValidationError, ValidationState};

/// Entry points of a validation engine.
///
/// Implementations are pure with respect to process state: the same text
/// always yields the same [`ValidationState`], and malformed input is
/// reported through diagnostics rather than an error.
pub trait Validator {
    /// Validate action metadata
    fn validate_action(&self, src: &str) -> ValidationState;

    /// Validate a workflow definition
    fn validate_workflow(&self, src: &str) -> ValidationState;

    /// Short name for log output
    fn name(&self) -> &str;

    /// Dispatch on document kind
    fn validate(&self, action_type: ActionType, src: &str) -> ValidationState {
        match action_type {
            ActionType::Action => self.validate_action(src),
            ActionType::Workflow => self.validate_workflow(src),
        }
    }
}

// ============================================================================
// Built-in engine
// ============================================================================

/// Reference engine: YAML parsing plus the structural rules in `schema`
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinValidator;

impl BuiltinValidator {
    pub fn new() -> Self {
        Self
    }

    fn run(&self, action_type: ActionType, src: &str) -> ValidationState {
        let doc: Value = match serde_yaml::from_str(src) {
            Ok(doc) => doc,
            Err(err) => {
                debug!("document is not valid YAML: {}", err);
                return ValidationState {
                    action_type,
                    errors: vec![ValidationError::from(err)],
                };
            }
        };

        let errors = match action_type {
            ActionType::Action => schema::check_action(&doc),
            ActionType::Workflow => schema::check_workflow(&doc),
        };
        debug!("{} check produced {} diagnostic(s)", action_type, errors.len());

        ValidationState { action_type, errors }
    }
}

impl Validator for BuiltinValidator {
    fn validate_action(&self, src: &str) -> ValidationState {
        self.run(ActionType::Action, src)
    }

    fn validate_workflow(&self, src: &str) -> ValidationState {
        self.run(ActionType::Workflow, src)
    }

    fn name(&self) -> &str {
        "builtin"
    }
}

// ============================================================================
// Fixed engine (testing)
// ============================================================================

/// Engine returning the same diagnostics for every document
#[derive(Debug, Default, Clone)]
pub struct FixedValidator {
    errors: Vec<ValidationError>,
}

impl FixedValidator {
    /// Report the given diagnostics for every call
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    /// Report every document as valid
    pub fn valid() -> Self {
        Self::default()
    }
}

impl Validator for FixedValidator {
    fn validate_action(&self, _src: &str) -> ValidationState {
        ValidationState {
            action_type: ActionType::Action,
            errors: self.errors.clone(),
        }
    }

    fn validate_workflow(&self, _src: &str) -> ValidationState {
        ValidationState {
            action_type: ActionType::Workflow,
            errors: self.errors.clone(),
        }
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_ACTION: &str = "\
name: hello
description: says hello
runs:
  using: node20
  main: index.js
";

    #[test]
    fn test_builtin_valid_action() {
        let state = BuiltinValidator::new().validate_action(MINIMAL_ACTION);
        assert_eq!(state.action_type, ActionType::Action);
        assert!(state.is_valid(), "unexpected diagnostics: {:?}", state.errors);
    }

    #[test]
    fn test_builtin_same_text_validated_as_workflow() {
        let state = BuiltinValidator::new().validate(ActionType::Workflow, MINIMAL_ACTION);
        assert_eq!(state.action_type, ActionType::Workflow);
        let codes: Vec<&str> = state.errors.iter().map(|e| e.code()).collect();
        assert!(codes.contains(&"required"));
        assert!(codes.contains(&"additional_properties"));
    }

    #[test]
    fn test_builtin_parse_error_has_location() {
        let state = BuiltinValidator::new().validate_workflow("on: [push\njobs: {}\n");
        assert_eq!(state.errors.len(), 1);
        let error = &state.errors[0];
        assert_eq!(error.code(), "invalid_yaml");
        assert_eq!(error.path(), None);
        assert!(error.location().is_some());
    }

    #[test]
    fn test_builtin_is_deterministic() {
        let src = "on: push\njobs:\n  b:\n    needs: [x, y]\n  a:\n    needs: z\nextra: 1\n";
        let validator = BuiltinValidator::new();
        assert_eq!(validator.validate_workflow(src), validator.validate_workflow(src));
    }

    #[test]
    fn test_fixed_validator_keeps_kind() {
        let validator = FixedValidator::new(vec![ValidationError::schema("c", "/p", "t")]);
        assert_eq!(validator.validate(ActionType::Action, "").action_type, ActionType::Action);
        assert_eq!(validator.validate(ActionType::Workflow, "").errors.len(), 1);
        assert!(FixedValidator::valid().validate_action("anything").is_valid());
    }
}
