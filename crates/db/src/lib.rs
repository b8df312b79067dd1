//! Database layer with `SeaORM` entities and configuration stores.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - `ConfigStore` and `SettingsStore` implementations for PostgreSQL
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod stores;

pub use stores::{SeaOrmConfigStore, SeaOrmSettingsStore};

use payroll_config_shared::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::debug;

/// Establishes a connection pool to the configured database.
///
/// # Errors
///
/// Returns an error if no URL is configured or the connection cannot be
/// established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let url = config
        .url
        .as_deref()
        .ok_or_else(|| DbErr::Custom("database.url is not configured".to_string()))?;

    let mut options = ConnectOptions::new(url);
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .sqlx_logging(false);

    debug!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Opening database pool"
    );

    Database::connect(options).await
}
