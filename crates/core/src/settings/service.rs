//! Company settings service.
//!
//! Settings are a singleton outside the approval workflow: the first upsert
//! creates the record and later upserts merge into it.

use std::sync::Arc;

use chrono::Utc;
use payroll_config_shared::SettingsId;
use tracing::{debug, error, info};

use crate::lifecycle::error::{LifecycleError, StoreError};
use crate::settings::store::SettingsStore;
use crate::settings::types::{CompanySettings, SettingsPatch, SettingsRecord};

const ENTITY: &str = "Company settings";

/// Reads and writes the company settings singleton.
#[derive(Clone)]
pub struct CompanySettingsService {
    store: Arc<dyn SettingsStore>,
}

impl CompanySettingsService {
    /// Creates a service over the given store.
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    /// Create the settings if none exist, else merge `patch` into them.
    pub async fn upsert(&self, patch: SettingsPatch) -> Result<SettingsRecord, LifecycleError> {
        let current = self.store.find_current().await.map_err(store_error)?;

        match current {
            Some(record) => self.save_merged(record, patch).await,
            None => {
                let settings = CompanySettings::from_patch(patch)?;
                settings.validate()?;

                let now = Utc::now();
                let record = SettingsRecord {
                    id: SettingsId::new(),
                    settings,
                    created_at: now,
                    updated_at: now,
                };
                let record = self.store.create(record).await.map_err(store_error)?;
                info!(id = %record.id, "Company settings created");
                Ok(record)
            }
        }
    }

    /// The current settings, if any have been saved.
    pub async fn current(&self) -> Result<Option<SettingsRecord>, LifecycleError> {
        debug!("Loading company settings");
        self.store.find_current().await.map_err(store_error)
    }

    /// Merge `patch` into the settings record `id`.
    pub async fn update(
        &self,
        id: SettingsId,
        patch: SettingsPatch,
    ) -> Result<SettingsRecord, LifecycleError> {
        let record = self
            .store
            .find_by_id(id)
            .await
            .map_err(store_error)?
            .ok_or(LifecycleError::NotFound {
                entity: ENTITY,
                id: id.into_inner(),
            })?;
        self.save_merged(record, patch).await
    }

    async fn save_merged(
        &self,
        mut record: SettingsRecord,
        patch: SettingsPatch,
    ) -> Result<SettingsRecord, LifecycleError> {
        let merged = record.settings.merge(patch);
        merged.validate()?;

        record.settings = merged;
        record.updated_at = Utc::now();

        let record = self.store.update(record).await.map_err(store_error)?;
        info!(id = %record.id, "Company settings updated");
        Ok(record)
    }
}

fn store_error(err: StoreError) -> LifecycleError {
    match err {
        StoreError::Missing(id) => LifecycleError::NotFound { entity: ENTITY, id },
        StoreError::Duplicate(message) | StoreError::Backend(message) => {
            error!(error = %message, "Settings store failure");
            LifecycleError::Storage(message)
        }
    }
}
