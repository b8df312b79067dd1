//! Per-type business rules for payroll configuration.
//!
//! Each submodule defines one configuration type, its partial-update payload,
//! and its [`ConfigEntity`](crate::lifecycle::ConfigEntity) implementation.
//! The checks shared between types live here.

pub mod allowance;
pub mod insurance;
pub mod pay_grade;
pub mod pay_type;
pub mod payroll_policy;
pub mod signing_bonus;
pub mod tax_rule;
pub mod termination;

use chrono::{Months, NaiveDate};
use payroll_config_shared::PayrollConfig;
use rust_decimal::Decimal;
use thiserror::Error;

pub use allowance::{Allowance, AllowancePatch};
pub use insurance::{InsuranceBracket, InsuranceBracketPatch};
pub use pay_grade::{PayGrade, PayGradePatch};
pub use pay_type::{PayType, PayTypeKind, PayTypePatch};
pub use payroll_policy::{
    Applicability, PayrollPolicy, PayrollPolicyPatch, PolicyType, RuleDefinition,
};
pub use signing_bonus::{SigningBonus, SigningBonusPatch};
pub use tax_rule::{TaxRule, TaxRulePatch};
pub use termination::{TerminationBenefit, TerminationBenefitPatch};

/// Business-rule constants consumed by the validators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSettings {
    /// Statutory minimum wage.
    pub minimum_wage: Decimal,
    /// Upper bound on gross salary as a multiple of base salary.
    pub max_gross_multiplier: Decimal,
    /// Minimum length of an optional description, when one is given.
    pub min_description_len: usize,
    /// Years a policy effective date may lie in the past.
    pub policy_past_window_years: u32,
    /// Years a policy effective date may lie in the future.
    pub policy_future_window_years: u32,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self::from(&PayrollConfig::default())
    }
}

impl From<&PayrollConfig> for RuleSettings {
    fn from(config: &PayrollConfig) -> Self {
        Self {
            minimum_wage: config.minimum_wage,
            max_gross_multiplier: config.max_gross_multiplier,
            min_description_len: config.min_description_len,
            policy_past_window_years: config.policy_past_window_years,
            policy_future_window_years: config.policy_future_window_years,
        }
    }
}

/// A field-level business rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// An amount is below the statutory minimum wage.
    #[error("{field} must be at least {minimum} to comply with the minimum wage")]
    BelowMinimumWage {
        /// Offending field.
        field: &'static str,
        /// The minimum wage.
        minimum: Decimal,
    },

    /// Gross salary is below base salary.
    #[error("Gross salary must be greater than or equal to base salary")]
    GrossBelowBase,

    /// Gross salary exceeds the allowed multiple of base salary.
    #[error("Gross salary cannot exceed {multiplier} times the base salary")]
    GrossAboveCeiling {
        /// The allowed multiple.
        multiplier: Decimal,
    },

    /// A rule definition with nothing in it.
    #[error(
        "ruleDefinition must include at least one value (percentage, fixedAmount, or threshold)"
    )]
    EmptyRuleDefinition,

    /// A value outside an inclusive range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        /// Offending field.
        field: &'static str,
        /// Inclusive lower bound.
        min: Decimal,
        /// Inclusive upper bound.
        max: Decimal,
    },

    /// A value that must not be negative.
    #[error("{field} must be greater than or equal to 0")]
    Negative {
        /// Offending field.
        field: &'static str,
    },

    /// Effective date lies too far back.
    #[error("Effective date cannot be more than {years} year(s) in the past")]
    EffectiveDateTooOld {
        /// Allowed look-back.
        years: u32,
    },

    /// Effective date lies too far ahead.
    #[error("Effective date cannot be more than {years} years in the future")]
    EffectiveDateTooFar {
        /// Allowed look-ahead.
        years: u32,
    },

    /// Insurance bracket bounds out of order.
    #[error("Minimum salary must be less than maximum salary")]
    InvalidSalaryRange,

    /// Text shorter than required.
    #[error("{field} must be at least {min} characters if provided")]
    TooShort {
        /// Offending field.
        field: &'static str,
        /// Required length.
        min: usize,
    },

    /// Required text that is empty or whitespace.
    #[error("{field} must not be blank")]
    Blank {
        /// Offending field.
        field: &'static str,
    },

    /// Required field absent from a payload.
    #[error("{field} is required")]
    Missing {
        /// The absent field.
        field: &'static str,
    },

    /// Rejection without a reason.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,

    /// Time zone not in the IANA database.
    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),

    /// Currency that is not an ISO 4217 code.
    #[error("Currency must be a three-letter ISO 4217 code, got {0:?}")]
    InvalidCurrency(String),
}

pub(crate) fn ensure_minimum_wage(
    field: &'static str,
    value: Decimal,
    rules: &RuleSettings,
) -> Result<(), ValidationError> {
    if value < rules.minimum_wage {
        return Err(ValidationError::BelowMinimumWage {
            field,
            minimum: rules.minimum_wage,
        });
    }
    Ok(())
}

pub(crate) fn ensure_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<(), ValidationError> {
    if value < Decimal::ZERO {
        return Err(ValidationError::Negative { field });
    }
    Ok(())
}

pub(crate) fn ensure_percentage(
    field: &'static str,
    value: Decimal,
) -> Result<(), ValidationError> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field,
            min: Decimal::ZERO,
            max: Decimal::ONE_HUNDRED,
        });
    }
    Ok(())
}

pub(crate) fn ensure_not_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    Ok(())
}

/// An empty description counts as absent.
pub(crate) fn ensure_description(
    field: &'static str,
    value: Option<&str>,
    rules: &RuleSettings,
) -> Result<(), ValidationError> {
    match value {
        Some(text) if !text.is_empty() && text.chars().count() < rules.min_description_len => {
            Err(ValidationError::TooShort {
                field,
                min: rules.min_description_len,
            })
        }
        _ => Ok(()),
    }
}

/// Inclusive window `[today - past years, today + future years]`.
pub(crate) fn ensure_within_window(
    date: NaiveDate,
    today: NaiveDate,
    rules: &RuleSettings,
) -> Result<(), ValidationError> {
    let earliest = today.checked_sub_months(Months::new(rules.policy_past_window_years * 12));
    if earliest.is_some_and(|earliest| date < earliest) {
        return Err(ValidationError::EffectiveDateTooOld {
            years: rules.policy_past_window_years,
        });
    }

    let latest = today.checked_add_months(Months::new(rules.policy_future_window_years * 12));
    if latest.is_some_and(|latest| date > latest) {
        return Err(ValidationError::EffectiveDateTooFar {
            years: rules.policy_future_window_years,
        });
    }

    Ok(())
}
