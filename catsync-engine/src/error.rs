//! Error types for the relevance engine.
//!
//! Every variant is a contract toward the caller. The engine never retries
//! and never downgrades one error into another.

use crate::reconciler::ConflictGroup;
use catsync_types::{ScopeId, TargetId};
use std::time::Duration;
use thiserror::Error;

/// Result type for engine operations.
pub type RelevanceResult<T> = Result<T, RelevanceError>;

/// Errors that can occur while computing or comparing derived state.
#[derive(Debug, Error)]
pub enum RelevanceError {
    /// The entity or its declared parent could not be resolved.
    #[error("no such entity: {target_id}")]
    NoSuchEntity { target_id: TargetId },

    /// The chosen strategy needs a signal the snapshot does not carry.
    #[error("cannot compute {signal} for entity {target_id} in scope {scope_id}: signal missing")]
    UnresolvableCalculationInput {
        target_id: TargetId,
        scope_id: ScopeId,
        signal: &'static str,
    },

    /// Related entities computed different states and no tie-break applies.
    #[error("conflicting states: {0}")]
    ConflictingStates(Box<ConflictGroup>),

    /// A collaborator call exceeded the configured deadline.
    #[error("{operation} timed out after {timeout:?}")]
    LookupTimeout {
        operation: &'static str,
        timeout: Duration,
    },

    /// No evaluator is registered under this criterion id.
    #[error("unknown criterion: {0}")]
    UnknownCriterion(String),

    /// Reconciliation was asked to decide over zero targets.
    #[error("reconciliation batch is empty")]
    EmptyBatch,

    /// Invalid identifier or code.
    #[error(transparent)]
    Types(#[from] catsync_types::Error),
}

impl RelevanceError {
    /// True for `NoSuchEntity`: the entity may have been deleted concurrently.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RelevanceError::NoSuchEntity { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, RelevanceError::LookupTimeout { .. })
    }

    /// Returns the conflict payload, if this is a `ConflictingStates` error.
    pub fn conflict(&self) -> Option<&ConflictGroup> {
        match self {
            RelevanceError::ConflictingStates(group) => Some(group),
            _ => None,
        }
    }
}

impl From<ConflictGroup> for RelevanceError {
    fn from(group: ConflictGroup) -> Self {
        RelevanceError::ConflictingStates(Box::new(group))
    }
}
