//! Persistence for company settings.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use dashmap::DashMap;
use payroll_config_shared::SettingsId;

use crate::lifecycle::error::StoreError;
use crate::settings::types::SettingsRecord;

/// Storage for company settings records.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// The most recently created record, if any.
    async fn find_current(&self) -> Result<Option<SettingsRecord>, StoreError>;

    /// Load a record by id.
    async fn find_by_id(&self, id: SettingsId) -> Result<Option<SettingsRecord>, StoreError>;

    /// Persist a new record.
    async fn create(&self, record: SettingsRecord) -> Result<SettingsRecord, StoreError>;

    /// Overwrite an existing record.
    async fn update(&self, record: SettingsRecord) -> Result<SettingsRecord, StoreError>;
}

/// [`SettingsStore`] backed by a concurrent map.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    records: DashMap<SettingsId, SettingsRecord>,
    write_lock: Mutex<()>,
}

impl MemorySettingsStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn find_current(&self) -> Result<Option<SettingsRecord>, StoreError> {
        Ok(self
            .records
            .iter()
            .max_by_key(|entry| (entry.created_at, entry.id))
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_id(&self, id: SettingsId) -> Result<Option<SettingsRecord>, StoreError> {
        Ok(self.records.get(&id).map(|entry| entry.value().clone()))
    }

    async fn create(&self, record: SettingsRecord) -> Result<SettingsRecord, StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(&self, record: SettingsRecord) -> Result<SettingsRecord, StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.records.contains_key(&record.id) {
            return Err(StoreError::Missing(record.id.into_inner()));
        }
        self.records.insert(record.id, record.clone());
        Ok(record)
    }
}
