//! Payroll configurations migration.
//!
//! Creates the shared table for every approvable configuration kind. The
//! partial unique index backs the natural-key pre-check, so two concurrent
//! creates of the same key cannot both succeed.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(PAYROLL_CONFIGURATIONS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS payroll_configurations CASCADE;")
            .await?;
        Ok(())
    }
}

const PAYROLL_CONFIGURATIONS_SQL: &str = r"
-- One row per configuration record, whatever its kind
CREATE TABLE payroll_configurations (
    id UUID PRIMARY KEY,
    kind VARCHAR(32) NOT NULL,
    natural_key TEXT,
    status VARCHAR(16) NOT NULL DEFAULT 'draft',
    category VARCHAR(32),
    document JSONB NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_payroll_configurations_status
        CHECK (status IN ('draft', 'approved', 'rejected'))
);

-- Natural key is unique per kind; kinds without one store NULL
CREATE UNIQUE INDEX uq_payroll_configurations_natural_key
    ON payroll_configurations(kind, natural_key)
    WHERE natural_key IS NOT NULL;

-- List reads filter by kind and status, newest first
CREATE INDEX idx_payroll_configurations_list
    ON payroll_configurations(kind, status, created_at DESC);

-- Secondary list dimension (policy type)
CREATE INDEX idx_payroll_configurations_category
    ON payroll_configurations(kind, category)
    WHERE category IS NOT NULL;
";
