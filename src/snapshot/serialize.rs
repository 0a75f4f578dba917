use crate::engine::ValidationState;

/// Serialize a state the way snapshot files store it.
///
/// Keys follow the declared field order, indentation is two spaces and a
/// single trailing newline is appended.
pub fn serialize_state(state: &ValidationState) -> serde_json::Result<String> {
    let mut text = serde_json::to_string_pretty(state)?;
    text.push('\n');
    Ok(text)
}

/// Exact text comparison; formatting drift counts as a mismatch
pub fn snapshot_matches(expected: &str, actual: &str) -> bool {
    expected == actual
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ActionType, NestedState, ValidationError};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_state_layout() {
        let text = serialize_state(&ValidationState::new(ActionType::Action)).unwrap();
        assert_eq!(text, "{\n  \"actionType\": \"action\",\n  \"errors\": []\n}\n");
    }

    #[test]
    fn test_nested_layout() {
        let state = ValidationState {
            action_type: ActionType::Workflow,
            errors: vec![
                ValidationError::schema("any_of", "/on", "AnyOf conditions are not met").states(vec![
                    NestedState {
                        errors: vec![ValidationError::schema("wrong_type", "/on", "Type of the value is wrong")],
                    },
                ]),
            ],
        };
        let expected = r#"{
  "actionType": "workflow",
  "errors": [
    {
      "code": "any_of",
      "path": "/on",
      "title": "AnyOf conditions are not met",
      "states": [
        {
          "errors": [
            {
              "code": "wrong_type",
              "path": "/on",
              "title": "Type of the value is wrong"
            }
          ]
        }
      ]
    }
  ]
}
"#;
        assert_eq!(serialize_state(&state).unwrap(), expected);
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let state = ValidationState {
            action_type: ActionType::Workflow,
            errors: vec![
                ValidationError::schema("b", "/b", "second").detail("d"),
                ValidationError::schema("a", "/a", "first"),
            ],
        };
        let first = serialize_state(&state).unwrap();
        let second = serialize_state(&state.clone()).unwrap();
        assert_eq!(first, second);
        assert!(first.find("\"b\"").unwrap() < first.find("\"a\"").unwrap());
    }

    #[test]
    fn test_comparison_is_byte_exact() {
        let text = serialize_state(&ValidationState::new(ActionType::Action)).unwrap();
        assert!(snapshot_matches(&text, &text));
        assert!(!snapshot_matches(text.trim_end(), &text));
        assert!(!snapshot_matches(
            "{\"actionType\":\"action\",\"errors\":[]}\n",
            &text
        ));
        assert!(!snapshot_matches(
            "{\n  \"errors\": [],\n  \"actionType\": \"action\"\n}\n",
            &text
        ));
    }
}
