//! Lifecycle error types.
//!
//! Every failure is a synchronous, terminal rejection of a single operation;
//! nothing here is retried.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

use crate::lifecycle::types::ConfigStatus;
use crate::rules::ValidationError;

/// The operation that was attempted on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    /// Field-level update.
    Edit,
    /// Approval.
    Approve,
    /// Rejection.
    Reject,
    /// Deletion.
    Delete,
}

impl LifecycleAction {
    /// Returns the verb used in messages.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during lifecycle operations.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The id does not resolve to a record.
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Human-readable entity name.
        entity: &'static str,
        /// The id that was looked up.
        id: Uuid,
    },

    /// A natural-key collision.
    #[error("{0}")]
    Conflict(String),

    /// Deletion blocked by an external reference.
    #[error("Cannot delete {entity} {id}: it is still referenced by employee records")]
    InUse {
        /// Human-readable entity name.
        entity: &'static str,
        /// The record that is still referenced.
        id: Uuid,
    },

    /// Operation attempted outside the DRAFT state.
    #[error("Can only {action} configurations in DRAFT status (current status: {status})")]
    InvalidState {
        /// What was attempted.
        action: LifecycleAction,
        /// The record's status at the time.
        status: ConfigStatus,
    },

    /// A field-level business rule was violated.
    #[error(transparent)]
    ValidationFailed(#[from] ValidationError),

    /// The reference guard was asked about a type it does not know.
    #[error("Unknown entity type: {0}")]
    UnknownEntityType(String),

    /// The persistence collaborator failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LifecycleError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Conflict(_) | Self::InUse { .. } => 409,
            Self::InvalidState { .. }
            | Self::ValidationFailed(_)
            | Self::UnknownEntityType(_) => 400,
            Self::Storage(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::InUse { .. } => "IN_USE",
            Self::InvalidState { .. } => "INVALID_STATE",
            Self::ValidationFailed(_) => "VALIDATION_FAILED",
            Self::UnknownEntityType(_) => "UNKNOWN_ENTITY_TYPE",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }
}

/// Errors reported by persistence collaborators.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A storage-level uniqueness constraint fired.
    #[error("Duplicate natural key: {0}")]
    Duplicate(String),

    /// The record vanished between load and save.
    #[error("Record {0} no longer exists")]
    Missing(Uuid),

    /// Any other backend failure.
    #[error("{0}")]
    Backend(String),
}
