//! `SettingsStore` backed by the company_settings table.

use async_trait::async_trait;
use payroll_config_core::lifecycle::StoreError;
use payroll_config_core::settings::{CompanySettings, SettingsRecord, SettingsStore};
use payroll_config_shared::SettingsId;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};

use crate::entities::company_settings;

/// Company settings store.
#[derive(Debug, Clone)]
pub struct SeaOrmSettingsStore {
    db: DatabaseConnection,
}

impl SeaOrmSettingsStore {
    /// Creates a new store over `db`.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_active_model(record: &SettingsRecord) -> company_settings::ActiveModel {
    company_settings::ActiveModel {
        id: Set(record.id.into_inner()),
        pay_date: Set(record.settings.pay_date),
        time_zone: Set(record.settings.time_zone.clone()),
        currency: Set(record.settings.currency.clone()),
        created_at: Set(record.created_at.into()),
        updated_at: Set(record.updated_at.into()),
    }
}

fn from_model(model: company_settings::Model) -> SettingsRecord {
    SettingsRecord {
        id: SettingsId::from_uuid(model.id),
        settings: CompanySettings {
            pay_date: model.pay_date,
            time_zone: model.time_zone,
            currency: model.currency,
        },
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
    }
}

fn backend(err: DbErr) -> StoreError {
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl SettingsStore for SeaOrmSettingsStore {
    async fn find_current(&self) -> Result<Option<SettingsRecord>, StoreError> {
        let model = company_settings::Entity::find()
            .order_by_desc(company_settings::Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(backend)?;
        Ok(model.map(from_model))
    }

    async fn find_by_id(&self, id: SettingsId) -> Result<Option<SettingsRecord>, StoreError> {
        let model = company_settings::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(backend)?;
        Ok(model.map(from_model))
    }

    async fn create(&self, record: SettingsRecord) -> Result<SettingsRecord, StoreError> {
        let model = to_active_model(&record)
            .insert(&self.db)
            .await
            .map_err(backend)?;
        Ok(from_model(model))
    }

    async fn update(&self, record: SettingsRecord) -> Result<SettingsRecord, StoreError> {
        let model = to_active_model(&record)
            .update(&self.db)
            .await
            .map_err(|err| match err {
                DbErr::RecordNotUpdated => StoreError::Missing(record.id.into_inner()),
                other => backend(other),
            })?;
        Ok(from_model(model))
    }
}
