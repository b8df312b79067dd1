//! In-memory persistence collaborators.
//!
//! Used when the service runs without a database and throughout the tests.
//! Writes are serialized so the natural-key check and the insert happen as
//! one step, mirroring a storage-level unique index.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use dashmap::DashMap;
use payroll_config_shared::ConfigId;

use crate::lifecycle::entity::{ConfigEntity, NaturalKey};
use crate::lifecycle::error::StoreError;
use crate::lifecycle::store::ConfigStore;
use crate::lifecycle::types::{ConfigRecord, ListFilter};

/// [`ConfigStore`] backed by a concurrent map.
#[derive(Debug)]
pub struct MemoryConfigStore<T: ConfigEntity> {
    records: DashMap<ConfigId, ConfigRecord<T>>,
    write_lock: Mutex<()>,
}

impl<T: ConfigEntity> MemoryConfigStore<T> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            write_lock: Mutex::new(()),
        }
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn key_taken(&self, key: &NaturalKey, excluding: Option<ConfigId>) -> bool {
        self.records.iter().any(|entry| {
            Some(entry.id) != excluding && entry.fields.natural_key().as_ref() == Some(key)
        })
    }

    fn ensure_key_free(&self, record: &ConfigRecord<T>) -> Result<(), StoreError> {
        match record.fields.natural_key() {
            Some(key) if self.key_taken(&key, Some(record.id)) => {
                Err(StoreError::Duplicate(key.to_string()))
            }
            _ => Ok(()),
        }
    }
}

impl<T: ConfigEntity> Default for MemoryConfigStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: ConfigEntity> ConfigStore<T> for MemoryConfigStore<T> {
    async fn create(&self, record: ConfigRecord<T>) -> Result<ConfigRecord<T>, StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.ensure_key_free(&record)?;
        self.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: ConfigId) -> Result<Option<ConfigRecord<T>>, StoreError> {
        Ok(self.records.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_many(&self, filter: &ListFilter) -> Result<Vec<ConfigRecord<T>>, StoreError> {
        Ok(self
            .records
            .iter()
            .filter(|entry| filter.matches(entry.status(), entry.fields.category()))
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn update(&self, record: ConfigRecord<T>) -> Result<ConfigRecord<T>, StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.records.contains_key(&record.id) {
            return Err(StoreError::Missing(record.id.into_inner()));
        }
        self.ensure_key_free(&record)?;
        self.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn delete(&self, id: ConfigId) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.records.remove(&id).is_some())
    }

    async fn exists_by_natural_key(
        &self,
        key: &NaturalKey,
        excluding: Option<ConfigId>,
    ) -> Result<bool, StoreError> {
        Ok(self.key_taken(key, excluding))
    }
}
