//! Configuration state machine.
//!
//! This module implements the transition rules shared by every approvable
//! configuration type. It is pure: callers load the record, ask for the next
//! decision here, and persist the result.

use chrono::Utc;

use crate::lifecycle::error::{LifecycleAction, LifecycleError};
use crate::lifecycle::types::{ActorId, ConfigStatus, Decision};
use crate::rules::ValidationError;

/// Stateless service for configuration status transitions.
pub struct Transitions;

impl Transitions {
    /// Ensure a record is still a draft before `action` touches it.
    ///
    /// # Returns
    /// * `Ok(())` if the record is in Draft status
    /// * `Err(LifecycleError::InvalidState)` otherwise
    pub fn ensure_draft(current: &Decision, action: LifecycleAction) -> Result<(), LifecycleError> {
        match current {
            Decision::Draft => Ok(()),
            other => Err(LifecycleError::InvalidState {
                action,
                status: other.status(),
            }),
        }
    }

    /// Approve a draft.
    ///
    /// # Arguments
    /// * `current` - The record's current decision
    /// * `approved_by` - The approving actor
    ///
    /// # Returns
    /// * `Ok(Decision::Approved)` if the transition is valid
    /// * `Err(LifecycleError::InvalidState)` if not in Draft status
    pub fn approve(current: &Decision, approved_by: ActorId) -> Result<Decision, LifecycleError> {
        Self::ensure_draft(current, LifecycleAction::Approve)?;
        Ok(Decision::Approved {
            approved_by,
            approved_at: Utc::now(),
        })
    }

    /// Reject a draft.
    ///
    /// The state check comes first, so a terminal record reports
    /// `InvalidState` whatever the reason looks like.
    ///
    /// # Returns
    /// * `Ok(Decision::Rejected)` if the transition is valid
    /// * `Err(LifecycleError::InvalidState)` if not in Draft status
    /// * `Err(LifecycleError::ValidationFailed)` if the reason is blank
    pub fn reject(
        current: &Decision,
        rejected_by: ActorId,
        rejection_reason: String,
    ) -> Result<Decision, LifecycleError> {
        Self::ensure_draft(current, LifecycleAction::Reject)?;

        if rejection_reason.trim().is_empty() {
            return Err(ValidationError::RejectionReasonRequired.into());
        }

        Ok(Decision::Rejected {
            rejected_by,
            rejected_at: Utc::now(),
            rejection_reason,
        })
    }

    /// Check if a status transition is valid.
    ///
    /// Valid transitions:
    /// - Draft → Approved (approve)
    /// - Draft → Rejected (reject)
    #[must_use]
    pub fn is_valid_transition(from: ConfigStatus, to: ConfigStatus) -> bool {
        matches!(
            (from, to),
            (
                ConfigStatus::Draft,
                ConfigStatus::Approved | ConfigStatus::Rejected
            )
        )
    }
}
