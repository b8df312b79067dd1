//! The generic configuration lifecycle engine.
//!
//! One engine instance manages one configuration kind. It loads the current
//! record, asks [`Transitions`] for the next decision, runs the kind's
//! validators and uniqueness predicate, and persists through the injected
//! [`ConfigStore`]. Deletion additionally consults the [`ReferenceGuard`].

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use payroll_config_shared::ConfigId;
use tracing::{debug, error, info, warn};

use crate::lifecycle::entity::{ConfigEntity, ListOrder, NaturalKey};
use crate::lifecycle::error::{LifecycleAction, LifecycleError, StoreError};
use crate::lifecycle::guard::ReferenceGuard;
use crate::lifecycle::store::ConfigStore;
use crate::lifecycle::transition::Transitions;
use crate::lifecycle::types::{ActorId, ConfigRecord, Decision, EntityKind, ListFilter};
use crate::rules::RuleSettings;

/// Lifecycle operations for configuration kind `T`.
pub struct LifecycleEngine<T: ConfigEntity> {
    store: Arc<dyn ConfigStore<T>>,
    guard: Arc<dyn ReferenceGuard>,
    rules: RuleSettings,
}

impl<T: ConfigEntity> Clone for LifecycleEngine<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            guard: Arc::clone(&self.guard),
            rules: self.rules.clone(),
        }
    }
}

impl<T: ConfigEntity> LifecycleEngine<T> {
    /// Creates an engine over the given collaborators.
    pub fn new(
        store: Arc<dyn ConfigStore<T>>,
        guard: Arc<dyn ReferenceGuard>,
        rules: RuleSettings,
    ) -> Self {
        Self {
            store,
            guard,
            rules,
        }
    }

    /// The kind this engine manages.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        T::KIND
    }

    /// The business-rule constants in force.
    #[must_use]
    pub fn rules(&self) -> &RuleSettings {
        &self.rules
    }

    /// Create a new draft.
    ///
    /// Validators run first, then the natural-key check. The status is always
    /// Draft whatever the caller sent.
    pub async fn create(
        &self,
        fields: T,
        created_by: Option<ActorId>,
    ) -> Result<ConfigRecord<T>, LifecycleError> {
        fields.validate(&self.rules, today())?;

        if let Some(key) = fields.natural_key() {
            self.ensure_unique(&key, None).await?;
        }

        let now = Utc::now();
        let record = ConfigRecord {
            id: ConfigId::new(),
            fields,
            decision: Decision::Draft,
            created_by,
            created_at: now,
            updated_at: now,
        };

        let record = self.store.create(record).await.map_err(Self::store_error)?;
        info!(kind = %T::KIND, id = %record.id, "Configuration draft created");
        Ok(record)
    }

    /// Apply a partial update to a draft.
    ///
    /// The natural key is re-checked only when the update changes it; the
    /// validators always run against the merged values.
    pub async fn update(
        &self,
        id: ConfigId,
        patch: T::Patch,
    ) -> Result<ConfigRecord<T>, LifecycleError> {
        let mut record = self.load(id).await?;
        Transitions::ensure_draft(&record.decision, LifecycleAction::Edit)?;

        let merged = record.fields.merge(patch);
        let new_key = merged.natural_key();
        if new_key != record.fields.natural_key()
            && let Some(key) = &new_key
        {
            self.ensure_unique(key, Some(id)).await?;
        }

        merged.validate(&self.rules, today())?;

        record.fields = merged;
        record.updated_at = Utc::now();

        let record = self.store.update(record).await.map_err(Self::store_error)?;
        info!(kind = %T::KIND, id = %record.id, "Configuration draft updated");
        Ok(record)
    }

    /// Approve a draft.
    pub async fn approve(
        &self,
        id: ConfigId,
        approved_by: ActorId,
    ) -> Result<ConfigRecord<T>, LifecycleError> {
        let mut record = self.load(id).await?;
        record.decision = Transitions::approve(&record.decision, approved_by)?;
        record.updated_at = Utc::now();

        let record = self.store.update(record).await.map_err(Self::store_error)?;
        info!(kind = %T::KIND, id = %record.id, "Configuration approved");
        Ok(record)
    }

    /// Reject a draft with a reason.
    pub async fn reject(
        &self,
        id: ConfigId,
        rejected_by: ActorId,
        reason: String,
    ) -> Result<ConfigRecord<T>, LifecycleError> {
        let mut record = self.load(id).await?;
        record.decision = Transitions::reject(&record.decision, rejected_by, reason)?;
        record.updated_at = Utc::now();

        let record = self.store.update(record).await.map_err(Self::store_error)?;
        info!(kind = %T::KIND, id = %record.id, "Configuration rejected");
        Ok(record)
    }

    /// Delete a draft that nothing references.
    ///
    /// A non-draft record is refused before the reference guard is consulted.
    pub async fn delete(&self, id: ConfigId) -> Result<(), LifecycleError> {
        let record = self.load(id).await?;
        Transitions::ensure_draft(&record.decision, LifecycleAction::Delete)?;

        if !self.guard.can_delete(T::KIND, id).await? {
            warn!(kind = %T::KIND, id = %id, "Deletion blocked by existing references");
            return Err(LifecycleError::InUse {
                entity: T::KIND.label(),
                id: id.into_inner(),
            });
        }

        if !self.store.delete(id).await.map_err(Self::store_error)? {
            return Err(Self::not_found(id));
        }

        info!(kind = %T::KIND, id = %id, "Configuration draft deleted");
        Ok(())
    }

    /// Load one record by id.
    pub async fn get(&self, id: ConfigId) -> Result<ConfigRecord<T>, LifecycleError> {
        debug!(kind = %T::KIND, id = %id, "Loading configuration");
        self.load(id).await
    }

    /// Load every record passing `filter`, in the kind's list order.
    pub async fn list(&self, filter: &ListFilter) -> Result<Vec<ConfigRecord<T>>, LifecycleError> {
        let mut records = self
            .store
            .find_many(filter)
            .await
            .map_err(Self::store_error)?;

        match T::LIST_ORDER {
            ListOrder::NewestFirst => {
                records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            }
            ListOrder::ByNaturalKey => {
                records.sort_by_cached_key(|record| {
                    record
                        .fields
                        .natural_key()
                        .map(|key| key.as_str().to_owned())
                });
            }
        }

        debug!(kind = %T::KIND, count = records.len(), "Listed configurations");
        Ok(records)
    }

    async fn load(&self, id: ConfigId) -> Result<ConfigRecord<T>, LifecycleError> {
        self.store
            .find_by_id(id)
            .await
            .map_err(Self::store_error)?
            .ok_or_else(|| Self::not_found(id))
    }

    async fn ensure_unique(
        &self,
        key: &NaturalKey,
        excluding: Option<ConfigId>,
    ) -> Result<(), LifecycleError> {
        let taken = self
            .store
            .exists_by_natural_key(key, excluding)
            .await
            .map_err(Self::store_error)?;
        if taken {
            warn!(kind = %T::KIND, key = %key, "Natural key already in use");
            return Err(Self::conflict(&key.to_string()));
        }
        Ok(())
    }

    fn not_found(id: ConfigId) -> LifecycleError {
        LifecycleError::NotFound {
            entity: T::KIND.label(),
            id: id.into_inner(),
        }
    }

    fn conflict(key: &str) -> LifecycleError {
        LifecycleError::Conflict(format!("{} with {key} already exists", T::KIND.label()))
    }

    fn store_error(err: StoreError) -> LifecycleError {
        match err {
            StoreError::Duplicate(key) => {
                warn!(kind = %T::KIND, key = %key, "Storage rejected duplicate natural key");
                Self::conflict(&key)
            }
            StoreError::Missing(id) => Self::not_found(ConfigId::from_uuid(id)),
            StoreError::Backend(message) => {
                error!(kind = %T::KIND, error = %message, "Configuration store failure");
                LifecycleError::Storage(message)
            }
        }
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
