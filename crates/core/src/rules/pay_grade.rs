//! Pay grades: salary bands attached to positions.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lifecycle::entity::{ConfigEntity, ListOrder, NaturalKey};
use crate::lifecycle::types::EntityKind;
use crate::rules::{RuleSettings, ValidationError, ensure_minimum_wage, ensure_not_blank};

/// A pay grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayGrade {
    /// Grade label, unique across pay grades.
    pub grade: String,
    /// Base salary.
    pub base_salary: Decimal,
    /// Gross salary including fixed allowances.
    pub gross_salary: Decimal,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Position this grade applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_id: Option<String>,
}

/// Partial update for [`PayGrade`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayGradePatch {
    /// New grade label.
    pub grade: Option<String>,
    /// New base salary.
    pub base_salary: Option<Decimal>,
    /// New gross salary.
    pub gross_salary: Option<Decimal>,
    /// New description.
    pub description: Option<String>,
    /// New position reference.
    pub position_id: Option<String>,
}

impl ConfigEntity for PayGrade {
    const KIND: EntityKind = EntityKind::PayGrade;
    const LIST_ORDER: ListOrder = ListOrder::ByNaturalKey;
    type Patch = PayGradePatch;

    fn validate(&self, rules: &RuleSettings, _today: NaiveDate) -> Result<(), ValidationError> {
        ensure_not_blank("grade", &self.grade)?;
        ensure_minimum_wage("baseSalary", self.base_salary, rules)?;

        if self.gross_salary < self.base_salary {
            return Err(ValidationError::GrossBelowBase);
        }

        // An overflowing ceiling cannot be exceeded.
        let ceiling = self.base_salary.checked_mul(rules.max_gross_multiplier);
        if ceiling.is_some_and(|ceiling| self.gross_salary > ceiling) {
            return Err(ValidationError::GrossAboveCeiling {
                multiplier: rules.max_gross_multiplier,
            });
        }

        Ok(())
    }

    fn natural_key(&self) -> Option<NaturalKey> {
        Some(NaturalKey::single("grade", self.grade.as_str()))
    }

    fn merge(&self, patch: PayGradePatch) -> Self {
        Self {
            grade: patch.grade.unwrap_or_else(|| self.grade.clone()),
            base_salary: patch.base_salary.unwrap_or(self.base_salary),
            gross_salary: patch.gross_salary.unwrap_or(self.gross_salary),
            description: patch.description.or_else(|| self.description.clone()),
            position_id: patch.position_id.or_else(|| self.position_id.clone()),
        }
    }
}
