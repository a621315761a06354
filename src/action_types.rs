//! # Action Types
//!
//! Every entity gets the same fixed set of 14 action types, namespaced by the
//! entity name: `users_CREATE_REQUEST`, `users_LOAD_ALL_SUCCESS`, and so on.
//!
//! The set is an explicit enumeration ([`ActionKind`]) rather than strings built
//! on the fly, so the reducer can match on it exhaustively. [`ActionTypes`] maps
//! each kind to its string once, when the entity is configured.

use crate::error::EntityError;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// The operations a thunk can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Destroy,
    Load,
    LoadAll,
    Update,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Create,
        Operation::Destroy,
        Operation::Load,
        Operation::LoadAll,
        Operation::Update,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "CREATE",
            Operation::Destroy => "DESTROY",
            Operation::Load => "LOAD",
            Operation::LoadAll => "LOAD_ALL",
            Operation::Update => "UPDATE",
        }
    }

    /// The REQUEST action a thunk for this operation dispatches.
    ///
    /// `LoadAll` has no request of its own and shares `LOAD_REQUEST`.
    pub fn request_kind(&self) -> ActionKind {
        match self {
            Operation::Create => ActionKind::CreateRequest,
            Operation::Destroy => ActionKind::DestroyRequest,
            Operation::Load | Operation::LoadAll => ActionKind::LoadRequest,
            Operation::Update => ActionKind::UpdateRequest,
        }
    }

    pub fn success_kind(&self) -> ActionKind {
        match self {
            Operation::Create => ActionKind::CreateSuccess,
            Operation::Destroy => ActionKind::DestroySuccess,
            Operation::Load => ActionKind::LoadSuccess,
            Operation::LoadAll => ActionKind::LoadAllSuccess,
            Operation::Update => ActionKind::UpdateSuccess,
        }
    }

    /// `LoadAll` shares `LOAD_FAILURE`.
    pub fn failure_kind(&self) -> ActionKind {
        match self {
            Operation::Create => ActionKind::CreateFailure,
            Operation::Destroy => ActionKind::DestroyFailure,
            Operation::Load | Operation::LoadAll => ActionKind::LoadFailure,
            Operation::Update => ActionKind::UpdateFailure,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| EntityError::UnknownRequestType(s.to_string()))
    }
}

/// The lifecycle phase of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Request,
    Success,
    Failure,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Request => "REQUEST",
            Phase::Success => "SUCCESS",
            Phase::Failure => "FAILURE",
        })
    }
}

/// One of the 14 action types every entity has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    ClearErrors,
    CreateFailure,
    CreateRequest,
    CreateSuccess,
    DestroyFailure,
    DestroyRequest,
    DestroySuccess,
    LoadAllSuccess,
    LoadFailure,
    LoadRequest,
    LoadSuccess,
    UpdateFailure,
    UpdateRequest,
    UpdateSuccess,
}

impl ActionKind {
    pub const ALL: [ActionKind; 14] = [
        ActionKind::ClearErrors,
        ActionKind::CreateFailure,
        ActionKind::CreateRequest,
        ActionKind::CreateSuccess,
        ActionKind::DestroyFailure,
        ActionKind::DestroyRequest,
        ActionKind::DestroySuccess,
        ActionKind::LoadAllSuccess,
        ActionKind::LoadFailure,
        ActionKind::LoadRequest,
        ActionKind::LoadSuccess,
        ActionKind::UpdateFailure,
        ActionKind::UpdateRequest,
        ActionKind::UpdateSuccess,
    ];

    /// The part of the type string after the entity prefix.
    pub fn suffix(&self) -> &'static str {
        match self {
            ActionKind::ClearErrors => "CLEAR_ERRORS",
            ActionKind::CreateFailure => "CREATE_FAILURE",
            ActionKind::CreateRequest => "CREATE_REQUEST",
            ActionKind::CreateSuccess => "CREATE_SUCCESS",
            ActionKind::DestroyFailure => "DESTROY_FAILURE",
            ActionKind::DestroyRequest => "DESTROY_REQUEST",
            ActionKind::DestroySuccess => "DESTROY_SUCCESS",
            ActionKind::LoadAllSuccess => "LOAD_ALL_SUCCESS",
            ActionKind::LoadFailure => "LOAD_FAILURE",
            ActionKind::LoadRequest => "LOAD_REQUEST",
            ActionKind::LoadSuccess => "LOAD_SUCCESS",
            ActionKind::UpdateFailure => "UPDATE_FAILURE",
            ActionKind::UpdateRequest => "UPDATE_REQUEST",
            ActionKind::UpdateSuccess => "UPDATE_SUCCESS",
        }
    }

    /// The phase of this kind; `None` for `ClearErrors`.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            ActionKind::ClearErrors => None,
            ActionKind::CreateRequest
            | ActionKind::DestroyRequest
            | ActionKind::LoadRequest
            | ActionKind::UpdateRequest => Some(Phase::Request),
            ActionKind::CreateSuccess
            | ActionKind::DestroySuccess
            | ActionKind::LoadAllSuccess
            | ActionKind::LoadSuccess
            | ActionKind::UpdateSuccess => Some(Phase::Success),
            ActionKind::CreateFailure
            | ActionKind::DestroyFailure
            | ActionKind::LoadFailure
            | ActionKind::UpdateFailure => Some(Phase::Failure),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// The action-type strings of one entity, computed once at configuration time.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionTypes {
    types: [String; 14],
    by_type: HashMap<String, ActionKind>,
}

impl ActionTypes {
    pub fn new(entity_name: &str) -> Self {
        let types = ActionKind::ALL.map(|kind| format!("{}_{}", entity_name, kind.suffix()));
        let by_type = ActionKind::ALL
            .into_iter()
            .map(|kind| (types[kind.index()].clone(), kind))
            .collect();
        Self { types, by_type }
    }

    pub fn get(&self, kind: ActionKind) -> &str {
        &self.types[kind.index()]
    }

    /// Looks up the type for an explicit operation/phase pair.
    ///
    /// `LoadAll` only has a SUCCESS type; asking for its REQUEST or FAILURE is a
    /// configuration error (thunks use [`Operation::request_kind`] instead).
    pub fn lookup(&self, operation: Operation, phase: Phase) -> Result<&str, EntityError> {
        let kind = match (operation, phase) {
            (Operation::LoadAll, Phase::Success) => ActionKind::LoadAllSuccess,
            (Operation::LoadAll, _) => {
                return Err(EntityError::UnknownActionType { operation, phase });
            }
            (op, Phase::Request) => op.request_kind(),
            (op, Phase::Success) => op.success_kind(),
            (op, Phase::Failure) => op.failure_kind(),
        };
        Ok(self.get(kind))
    }

    /// Reverse lookup used by the reducer.
    pub fn kind_of(&self, action_type: &str) -> Option<ActionKind> {
        self.by_type.get(action_type).copied()
    }

    pub fn success_action_type_for(&self, name: &str) -> Result<&str, EntityError> {
        let op = Operation::from_str(name)
            .map_err(|_| EntityError::UnknownSuccessType(name.to_string()))?;
        Ok(self.get(op.success_kind()))
    }

    pub fn failure_action_type_for(&self, name: &str) -> Result<&str, EntityError> {
        let op = Operation::from_str(name)
            .map_err(|_| EntityError::UnknownFailureType(name.to_string()))?;
        Ok(self.get(op.failure_kind()))
    }

    /// All `(kind, type)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ActionKind, &str)> + '_ {
        ActionKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.get(kind)))
    }
}
