//! `ConfigStore` backed by the payroll_configurations table.

use std::marker::PhantomData;

use async_trait::async_trait;
use payroll_config_core::lifecycle::{
    ConfigEntity, ConfigRecord, ConfigStore, ListFilter, NaturalKey, StoreError,
};
use payroll_config_shared::ConfigId;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, Set, SqlErr,
};
use tracing::warn;

use crate::entities::payroll_configurations;

/// Configuration store for kind `T`.
#[derive(Debug)]
pub struct SeaOrmConfigStore<T> {
    db: DatabaseConnection,
    _kind: PhantomData<fn() -> T>,
}

impl<T> Clone for SeaOrmConfigStore<T> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _kind: PhantomData,
        }
    }
}

impl<T: ConfigEntity> SeaOrmConfigStore<T> {
    /// Creates a new store over `db`.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _kind: PhantomData,
        }
    }

    fn kind_filter() -> Condition {
        Condition::all().add(payroll_configurations::Column::Kind.eq(T::KIND.as_str()))
    }

    fn to_active_model(
        record: &ConfigRecord<T>,
    ) -> Result<payroll_configurations::ActiveModel, StoreError> {
        let document =
            serde_json::to_value(record).map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(payroll_configurations::ActiveModel {
            id: Set(record.id.into_inner()),
            kind: Set(T::KIND.as_str().to_string()),
            natural_key: Set(record
                .fields
                .natural_key()
                .map(|key| key.as_str().to_string())),
            status: Set(record.status().as_str().to_string()),
            category: Set(record.fields.category().map(str::to_string)),
            document: Set(document),
            created_at: Set(record.created_at.into()),
            updated_at: Set(record.updated_at.into()),
        })
    }

    fn from_model(model: payroll_configurations::Model) -> Result<ConfigRecord<T>, StoreError> {
        serde_json::from_value(model.document).map_err(|e| {
            StoreError::Backend(format!("Corrupt {} document {}: {e}", model.kind, model.id))
        })
    }

    /// Maps a failed write, naming the natural key on a unique violation.
    fn write_error(err: DbErr, record: &ConfigRecord<T>) -> StoreError {
        if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
            let key = record
                .fields
                .natural_key()
                .map_or_else(|| record.id.to_string(), |key| key.to_string());
            warn!(kind = %T::KIND, key = %key, "Unique index rejected configuration write");
            return StoreError::Duplicate(key);
        }
        if matches!(err, DbErr::RecordNotUpdated) {
            return StoreError::Missing(record.id.into_inner());
        }
        backend(err)
    }
}

fn backend(err: DbErr) -> StoreError {
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl<T: ConfigEntity> ConfigStore<T> for SeaOrmConfigStore<T> {
    async fn create(&self, record: ConfigRecord<T>) -> Result<ConfigRecord<T>, StoreError> {
        let model = Self::to_active_model(&record)?
            .insert(&self.db)
            .await
            .map_err(|e| Self::write_error(e, &record))?;
        Self::from_model(model)
    }

    async fn find_by_id(&self, id: ConfigId) -> Result<Option<ConfigRecord<T>>, StoreError> {
        payroll_configurations::Entity::find_by_id(id.into_inner())
            .filter(Self::kind_filter())
            .one(&self.db)
            .await
            .map_err(backend)?
            .map(Self::from_model)
            .transpose()
    }

    async fn find_many(&self, filter: &ListFilter) -> Result<Vec<ConfigRecord<T>>, StoreError> {
        let mut condition = Self::kind_filter();
        if let Some(status) = filter.status {
            condition =
                condition.add(payroll_configurations::Column::Status.eq(status.as_str()));
        }
        if let Some(category) = &filter.category {
            condition =
                condition.add(payroll_configurations::Column::Category.eq(category.as_str()));
        }

        payroll_configurations::Entity::find()
            .filter(condition)
            .all(&self.db)
            .await
            .map_err(backend)?
            .into_iter()
            .map(Self::from_model)
            .collect()
    }

    async fn update(&self, record: ConfigRecord<T>) -> Result<ConfigRecord<T>, StoreError> {
        let model = Self::to_active_model(&record)?
            .update(&self.db)
            .await
            .map_err(|e| Self::write_error(e, &record))?;
        Self::from_model(model)
    }

    async fn delete(&self, id: ConfigId) -> Result<bool, StoreError> {
        let result = payroll_configurations::Entity::delete_many()
            .filter(Self::kind_filter())
            .filter(payroll_configurations::Column::Id.eq(id.into_inner()))
            .exec(&self.db)
            .await
            .map_err(backend)?;
        Ok(result.rows_affected > 0)
    }

    async fn exists_by_natural_key(
        &self,
        key: &NaturalKey,
        excluding: Option<ConfigId>,
    ) -> Result<bool, StoreError> {
        let mut query = payroll_configurations::Entity::find()
            .filter(Self::kind_filter())
            .filter(payroll_configurations::Column::NaturalKey.eq(key.as_str()));
        if let Some(id) = excluding {
            query = query.filter(payroll_configurations::Column::Id.ne(id.into_inner()));
        }

        let count = query.count(&self.db).await.map_err(backend)?;
        Ok(count > 0)
    }
}
