//! Company settings migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(COMPANY_SETTINGS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS company_settings CASCADE;")
            .await?;
        Ok(())
    }
}

const COMPANY_SETTINGS_SQL: &str = r"
CREATE TABLE company_settings (
    id UUID PRIMARY KEY,
    pay_date DATE NOT NULL,
    time_zone VARCHAR(64) NOT NULL,
    currency VARCHAR(3) NOT NULL DEFAULT 'EGP',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_company_settings_currency CHECK (currency ~ '^[A-Z]{3}$')
);

-- The current settings are the most recently created row
CREATE INDEX idx_company_settings_created ON company_settings(created_at DESC);
";
