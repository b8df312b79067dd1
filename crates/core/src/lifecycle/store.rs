//! Persistence collaborator interface.
//!
//! The engine assumes atomic single-record reads and writes and nothing more.
//! Implementations may back the natural key with a uniqueness constraint and
//! report a collision as [`StoreError::Duplicate`].

use async_trait::async_trait;
use payroll_config_shared::ConfigId;

use crate::lifecycle::entity::{ConfigEntity, NaturalKey};
use crate::lifecycle::error::StoreError;
use crate::lifecycle::types::{ConfigRecord, ListFilter};

/// Storage for one configuration kind.
#[async_trait]
pub trait ConfigStore<T: ConfigEntity>: Send + Sync {
    /// Persist a new record.
    async fn create(&self, record: ConfigRecord<T>) -> Result<ConfigRecord<T>, StoreError>;

    /// Load a record by id.
    async fn find_by_id(&self, id: ConfigId) -> Result<Option<ConfigRecord<T>>, StoreError>;

    /// Load every record passing `filter`, in no particular order.
    async fn find_many(&self, filter: &ListFilter) -> Result<Vec<ConfigRecord<T>>, StoreError>;

    /// Overwrite an existing record.
    async fn update(&self, record: ConfigRecord<T>) -> Result<ConfigRecord<T>, StoreError>;

    /// Remove a record. Returns false if nothing was removed.
    async fn delete(&self, id: ConfigId) -> Result<bool, StoreError>;

    /// Whether another record already holds `key`.
    async fn exists_by_natural_key(
        &self,
        key: &NaturalKey,
        excluding: Option<ConfigId>,
    ) -> Result<bool, StoreError>;
}
