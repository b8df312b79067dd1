//! Schema migration runner for the payroll configuration tables.
//!
//! Usage:
//!   migrator up      - Apply pending migrations
//!   migrator down    - Roll back the last migration
//!   migrator status  - List applied and pending migrations
//!   migrator fresh   - Drop everything and re-apply
//!
//! The connection string is read from `DATABASE_URL`.

use payroll_config_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // sea-orm-migration installs its own tracing subscriber
    cli::run_cli(Migrator).await;
}
