//! Deletion-eligibility guard.
//!
//! Deleting a configuration must eventually be refused while employee
//! contracts still reference it. The engine only sees this capability
//! interface, so the real check can be swapped in without touching lifecycle
//! logic.

use std::collections::HashSet;

use async_trait::async_trait;
use payroll_config_shared::ConfigId;

use crate::lifecycle::error::LifecycleError;
use crate::lifecycle::types::EntityKind;

/// Decides whether a configuration record may be deleted.
#[async_trait]
pub trait ReferenceGuard: Send + Sync {
    /// Returns `Ok(false)` when external records still reference `id`.
    async fn can_delete(&self, kind: EntityKind, id: ConfigId) -> Result<bool, LifecycleError>;
}

/// Guard that permits every deletion for the kinds it was registered with.
///
/// TODO: replace with a guard that queries employee contracts once the
/// employee profile service exposes a reference lookup.
#[derive(Debug, Clone)]
pub struct PermissiveGuard {
    registered: HashSet<EntityKind>,
}

impl PermissiveGuard {
    /// Guard that knows only `kinds`.
    pub fn for_kinds(kinds: impl IntoIterator<Item = EntityKind>) -> Self {
        Self {
            registered: kinds.into_iter().collect(),
        }
    }
}

impl Default for PermissiveGuard {
    fn default() -> Self {
        Self::for_kinds(EntityKind::ALL)
    }
}

#[async_trait]
impl ReferenceGuard for PermissiveGuard {
    async fn can_delete(&self, kind: EntityKind, _id: ConfigId) -> Result<bool, LifecycleError> {
        if self.registered.contains(&kind) {
            Ok(true)
        } else {
            Err(LifecycleError::UnknownEntityType(kind.to_string()))
        }
    }
}
