//! # Actions
//!
//! The value dispatched to the store. Its JSON form is the contract shared with
//! every other reducer registered in the same store:
//!
//! ```text
//! { "type": "users_CREATE_SUCCESS", "payload": { "data": { ... } } }
//! { "type": "users_CREATE_FAILURE", "payload": { "errors": { ... } } }
//! { "type": "users_CREATE_REQUEST" }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field-name to message map carried by FAILURE actions and kept in state.
pub type Errors = Map<String, Value>;

/// A dispatched action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Errors>,
}

impl Action {
    /// An action with no payload (REQUEST, CLEAR_ERRORS, or foreign types).
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            payload: None,
        }
    }

    pub fn with_data(action_type: impl Into<String>, data: Value) -> Self {
        Self {
            action_type: action_type.into(),
            payload: Some(Payload {
                data: Some(data),
                errors: None,
            }),
        }
    }

    pub fn with_errors(action_type: impl Into<String>, errors: Errors) -> Self {
        Self {
            action_type: action_type.into(),
            payload: Some(Payload {
                data: None,
                errors: Some(errors),
            }),
        }
    }

    pub fn data(&self) -> Option<&Value> {
        self.payload.as_ref().and_then(|p| p.data.as_ref())
    }

    pub fn errors(&self) -> Option<&Errors> {
        self.payload.as_ref().and_then(|p| p.errors.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_shape() {
        let request = Action::new("users_CREATE_REQUEST");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "type": "users_CREATE_REQUEST" })
        );

        let success = Action::with_data("users_CREATE_SUCCESS", json!({ "id": 1 }));
        assert_eq!(
            serde_json::to_value(&success).unwrap(),
            json!({ "type": "users_CREATE_SUCCESS", "payload": { "data": { "id": 1 } } })
        );

        let mut errors = Errors::new();
        errors.insert("base".into(), json!("something went wrong"));
        let failure = Action::with_errors("users_CREATE_FAILURE", errors);
        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            json!({
                "type": "users_CREATE_FAILURE",
                "payload": { "errors": { "base": "something went wrong" } }
            })
        );
    }

    #[test]
    fn test_parses_foreign_actions() {
        let action: Action = serde_json::from_value(json!({ "type": "FOOBAR" })).unwrap();
        assert_eq!(action, Action::new("FOOBAR"));
        assert!(action.data().is_none());
        assert!(action.errors().is_none());
    }
}
