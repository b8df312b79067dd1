//! API route definitions.

use axum::Router;
use payroll_config_core::rules::{
    Allowance, InsuranceBracket, PayGrade, PayType, PayrollPolicy, SigningBonus, TaxRule,
    TerminationBenefit,
};

use crate::AppState;

pub mod health;
pub mod lifecycle;
pub mod settings;

/// Creates the API router with every configuration kind mounted.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(lifecycle::routes::<PayType>())
        .merge(lifecycle::routes::<PayGrade>())
        .merge(lifecycle::routes::<PayrollPolicy>())
        .merge(lifecycle::routes::<Allowance>())
        .merge(lifecycle::routes::<InsuranceBracket>())
        .merge(lifecycle::routes::<SigningBonus>())
        .merge(lifecycle::routes::<TaxRule>())
        .merge(lifecycle::routes::<TerminationBenefit>())
        .merge(settings::routes())
}
