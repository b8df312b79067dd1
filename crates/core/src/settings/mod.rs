//! Company-wide payroll settings.
//!
//! A singleton record with no approval workflow.

pub mod service;
pub mod store;
pub mod types;

pub use service::CompanySettingsService;
pub use store::{MemorySettingsStore, SettingsStore};
pub use types::{CompanySettings, DEFAULT_CURRENCY, SettingsPatch, SettingsRecord};
