//! `SeaORM` implementations of the core persistence collaborators.

pub mod config;
pub mod settings;

pub use config::SeaOrmConfigStore;
pub use settings::SeaOrmSettingsStore;
