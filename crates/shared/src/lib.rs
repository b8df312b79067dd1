//! Shared types, errors, and configuration for the payroll configuration service.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for configuration records
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, DatabaseConfig, PayrollConfig, ServerConfig};
pub use error::{AppError, AppResult};
pub use types::{ConfigId, SettingsId};
