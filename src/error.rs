//! Core error taxonomy. Four of the kinds are expected business outcomes
//! returned to the caller unmodified; `Unavailable` is the only one
//! eligible for caller-directed retry, and it carries no internals.

use thiserror::Error;
use uuid::Uuid;

use crate::store::{EntityKind, StoreError};

#[derive(Debug, Error)]
pub enum CoreError {
    /// Referenced row absent. Maps to a 404-equivalent at the transport.
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: Uuid },

    /// Delete blocked by live children; carries every non-empty dependent
    /// collection with its count so the caller can explain the failure.
    #[error("delete blocked by dependent records: {blocking:?}")]
    DependencyConflict { blocking: Vec<(EntityKind, u64)> },

    /// Cross-reference mismatch, e.g. a resident named for a household it
    /// does not belong to.
    #[error("invalid relationship: {0}")]
    InvalidRelationship(String),

    /// Access Gate denial.
    #[error("requested subtree is out of the caller's scope")]
    OutOfScope,

    /// Store timeout or a failure the core cannot classify. Deliberately
    /// uninformative; the real cause is logged, never surfaced.
    #[error("service temporarily unavailable")]
    Unavailable,
}

impl CoreError {
    /// Stable code for the transport layer's client-facing payloads.
    pub fn error_code(&self) -> &'static str {
        match self {
            CoreError::NotFound { .. } => "NOT_FOUND",
            CoreError::DependencyConflict { .. } => "DEPENDENCY_CONFLICT",
            CoreError::InvalidRelationship(_) => "INVALID_RELATIONSHIP",
            CoreError::OutOfScope => "OUT_OF_SCOPE",
            CoreError::Unavailable => "UNAVAILABLE",
        }
    }

    /// Whether the caller may retry. Business outcomes never are.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::Unavailable)
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { kind, id } => CoreError::NotFound { kind, id },
            StoreError::Conflict(msg) => CoreError::InvalidRelationship(msg),
            StoreError::Unavailable(msg) => {
                // Log the real failure, return the generic kind
                tracing::error!("store unavailable: {}", msg);
                CoreError::Unavailable
            }
        }
    }
}

/// The store handed back a row of a kind it was not asked for. Not
/// reachable from valid inputs; surfaced as an uninformative failure.
pub(crate) fn wrong_kind(kind: EntityKind, id: Uuid) -> CoreError {
    tracing::error!(%kind, %id, "store returned a row of the wrong kind");
    CoreError::Unavailable
}
