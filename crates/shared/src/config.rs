//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::AppResult;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Payroll business-rule constants.
    #[serde(default)]
    pub payroll: PayrollConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

/// Database configuration.
///
/// Without a URL the service keeps records in memory.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: Option<String>,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
        }
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Payroll business-rule constants.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollConfig {
    /// Statutory minimum wage applied to pay types and pay grades.
    #[serde(default = "default_minimum_wage")]
    pub minimum_wage: Decimal,
    /// Gross salary may not exceed this multiple of base salary.
    #[serde(default = "default_max_gross_multiplier")]
    pub max_gross_multiplier: Decimal,
    /// Minimum length of an optional description, when one is given.
    #[serde(default = "default_min_description_len")]
    pub min_description_len: usize,
    /// How far back a policy effective date may lie, in years.
    #[serde(default = "default_policy_past_window_years")]
    pub policy_past_window_years: u32,
    /// How far ahead a policy effective date may lie, in years.
    #[serde(default = "default_policy_future_window_years")]
    pub policy_future_window_years: u32,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            minimum_wage: default_minimum_wage(),
            max_gross_multiplier: default_max_gross_multiplier(),
            min_description_len: default_min_description_len(),
            policy_past_window_years: default_policy_past_window_years(),
            policy_future_window_years: default_policy_future_window_years(),
        }
    }
}

fn default_minimum_wage() -> Decimal {
    Decimal::from(6000)
}

fn default_max_gross_multiplier() -> Decimal {
    Decimal::TEN
}

fn default_min_description_len() -> usize {
    10
}

fn default_policy_past_window_years() -> u32 {
    1
}

fn default_policy_future_window_years() -> u32 {
    5
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PAYROLL").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
