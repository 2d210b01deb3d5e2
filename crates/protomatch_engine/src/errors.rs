//! Error types for matching and static checking.

use protomatch_value::{MapKey, Name, Value, ValueError};
use thiserror::Error;

/// Failure of `MatchStatement::evaluate` or `MatchStatement::select`.
///
/// `E` is the caller's guard/action error type. It is carried unchanged and
/// never retried.
#[derive(Debug, Error)]
pub enum MatchError<E> {
    /// A record pattern named a field the record's type does not declare.
    #[error(transparent)]
    Value(#[from] ValueError),

    /// No arm committed.
    #[error("no match for {value}")]
    NoMatch { value: Value },

    #[error("guard of arm {arm} failed")]
    Guard {
        arm: usize,
        #[source]
        source: E,
    },

    #[error("action of arm {arm} failed")]
    Action {
        arm: usize,
        #[source]
        source: E,
    },
}

impl<E> MatchError<E> {
    /// Index of the arm whose guard or action failed.
    pub fn arm(&self) -> Option<usize> {
        match self {
            MatchError::Guard { arm, .. } | MatchError::Action { arm, .. } => Some(*arm),
            MatchError::Value(_) | MatchError::NoMatch { .. } => None,
        }
    }
}

/// Problem found by `MatchStatement::check`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CheckError {
    #[error("arm {arm}: unknown record type `{type_name}`")]
    UnknownType { arm: usize, type_name: Name },

    #[error("arm {arm}: `{type_name}` has no field `{field}`")]
    UnknownField {
        arm: usize,
        type_name: Name,
        field: Name,
    },

    #[error("arm {arm}: field `{field}` listed twice in `{type_name}` pattern")]
    DuplicateField {
        arm: usize,
        type_name: Name,
        field: Name,
    },

    #[error("arm {arm}: literal pattern must be a scalar, found {kind}")]
    NonScalarLiteral { arm: usize, kind: String },

    #[error("arm {arm}: mapping key {key} listed twice")]
    DuplicateKey { arm: usize, key: MapKey },

    #[error("arm {arm}: sequence pattern has patterns after a missing star")]
    TailWithoutRest { arm: usize },

    #[error("arm {arm} is unreachable: arm {covered_by} matches every value")]
    UnreachableArm { arm: usize, covered_by: usize },
}

impl CheckError {
    pub fn arm(&self) -> usize {
        match self {
            CheckError::UnknownType { arm, .. }
            | CheckError::UnknownField { arm, .. }
            | CheckError::DuplicateField { arm, .. }
            | CheckError::NonScalarLiteral { arm, .. }
            | CheckError::DuplicateKey { arm, .. }
            | CheckError::TailWithoutRest { arm }
            | CheckError::UnreachableArm { arm, .. } => *arm,
        }
    }
}
