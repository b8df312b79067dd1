//! `SeaORM` entity definitions.

pub mod company_settings;
pub mod payroll_configurations;
