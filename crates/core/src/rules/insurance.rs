//! Social insurance brackets.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lifecycle::entity::{ConfigEntity, NaturalKey};
use crate::lifecycle::types::EntityKind;
use crate::rules::{
    RuleSettings, ValidationError, ensure_non_negative, ensure_not_blank, ensure_percentage,
};

/// A salary bracket with employee and employer contribution rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceBracket {
    /// Bracket name.
    pub name: String,
    /// Fixed contribution amount.
    pub amount: Decimal,
    /// Lower salary bound, exclusive of `max_salary`.
    pub min_salary: Decimal,
    /// Upper salary bound.
    pub max_salary: Decimal,
    /// Employee contribution percentage.
    pub employee_rate: Decimal,
    /// Employer contribution percentage.
    pub employer_rate: Decimal,
}

/// Partial update for [`InsuranceBracket`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceBracketPatch {
    /// New name.
    pub name: Option<String>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New lower bound.
    pub min_salary: Option<Decimal>,
    /// New upper bound.
    pub max_salary: Option<Decimal>,
    /// New employee rate.
    pub employee_rate: Option<Decimal>,
    /// New employer rate.
    pub employer_rate: Option<Decimal>,
}

impl ConfigEntity for InsuranceBracket {
    const KIND: EntityKind = EntityKind::InsuranceBracket;
    type Patch = InsuranceBracketPatch;

    fn validate(&self, _rules: &RuleSettings, _today: NaiveDate) -> Result<(), ValidationError> {
        ensure_not_blank("name", &self.name)?;
        ensure_non_negative("amount", self.amount)?;
        ensure_non_negative("minSalary", self.min_salary)?;
        if self.min_salary >= self.max_salary {
            return Err(ValidationError::InvalidSalaryRange);
        }
        ensure_percentage("employeeRate", self.employee_rate)?;
        ensure_percentage("employerRate", self.employer_rate)
    }

    fn natural_key(&self) -> Option<NaturalKey> {
        None
    }

    fn merge(&self, patch: InsuranceBracketPatch) -> Self {
        Self {
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            amount: patch.amount.unwrap_or(self.amount),
            min_salary: patch.min_salary.unwrap_or(self.min_salary),
            max_salary: patch.max_salary.unwrap_or(self.max_salary),
            employee_rate: patch.employee_rate.unwrap_or(self.employee_rate),
            employer_rate: patch.employer_rate.unwrap_or(self.employer_rate),
        }
    }
}
