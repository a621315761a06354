//! # Entity Errors
//!
//! This module defines the error types used throughout the crate. They fall into
//! three groups:
//!
//! - **Configuration errors**: programmer mistakes such as asking for a thunk whose
//!   request handler was never configured. Raised synchronously, never retried.
//! - **Input-shape errors**: [`EntityError::InvalidInput`], raised while parsing a
//!   response that does not have the shape the parse functions expect.
//! - **Remote errors**: [`RemoteError`], the raw rejection from a request handler.
//!   Thunks format it into the FAILURE payload and hand the original back to the caller.

use crate::action_types::{Operation, Phase};
use serde_json::Value;

/// Errors produced by entity configuration, parsing, thunks and the store host.
#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    #[error("entityName must not be empty")]
    EmptyEntityName,
    #[error("Schema key {0} is reserved for the id list")]
    ReservedSchemaKey(String),
    #[error("Unknown request type: {0}")]
    UnknownRequestType(String),
    #[error("Unknown success type: {0}")]
    UnknownSuccessType(String),
    #[error("Unknown failure type: {0}")]
    UnknownFailureType(String),
    #[error("Unknown action type: {operation} {phase}")]
    UnknownActionType { operation: Operation, phase: Phase },
    #[error("{0}")]
    InvalidInput(String),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error("Store closed")]
    StoreClosed,
    #[error("Store dropped response channel")]
    StoreDropped,
}

impl EntityError {
    /// True for errors caused by a misconfigured entity rather than by I/O.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            EntityError::EmptyEntityName
                | EntityError::ReservedSchemaKey(_)
                | EntityError::UnknownRequestType(_)
                | EntityError::UnknownSuccessType(_)
                | EntityError::UnknownFailureType(_)
                | EntityError::UnknownActionType { .. }
        )
    }

    /// The original rejection, if this error came from a request handler.
    pub fn remote(&self) -> Option<&RemoteError> {
        match self {
            EntityError::Remote(e) => Some(e),
            _ => None,
        }
    }
}

/// The raw rejection returned by a request handler.
///
/// The body is kept verbatim so callers can branch on whatever detail the
/// remote side reported (status codes, validation messages, ...).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Remote call failed: {body}")]
pub struct RemoteError {
    body: Value,
}

impl RemoteError {
    pub fn new(body: impl Into<Value>) -> Self {
        Self { body: body.into() }
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_body(self) -> Value {
        self.body
    }

    /// The `status` field of the body, when the remote side reported one.
    pub fn status(&self) -> Option<u64> {
        self.body.get("status").and_then(Value::as_u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_messages_name_the_offending_value() {
        let err = EntityError::UnknownRequestType("foobar".into());
        assert_eq!(err.to_string(), "Unknown request type: foobar");
        assert!(err.is_configuration());

        let err = EntityError::UnknownActionType {
            operation: Operation::LoadAll,
            phase: Phase::Request,
        };
        assert_eq!(err.to_string(), "Unknown action type: LOAD_ALL REQUEST");
    }

    #[test]
    fn test_remote_error_keeps_body() {
        let err: EntityError = RemoteError::new(json!({ "status": 422 })).into();
        assert!(!err.is_configuration());
        assert_eq!(err.remote().and_then(RemoteError::status), Some(422));
    }
}
