//! Allowances paid on top of base salary.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lifecycle::entity::{ConfigEntity, NaturalKey};
use crate::lifecycle::types::EntityKind;
use crate::rules::{RuleSettings, ValidationError, ensure_non_negative, ensure_not_blank};

/// A named allowance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allowance {
    /// Allowance name, unique across allowances.
    pub name: String,
    /// Amount paid.
    pub amount: Decimal,
}

/// Partial update for [`Allowance`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowancePatch {
    /// New name.
    pub name: Option<String>,
    /// New amount.
    pub amount: Option<Decimal>,
}

impl ConfigEntity for Allowance {
    const KIND: EntityKind = EntityKind::Allowance;
    type Patch = AllowancePatch;

    fn validate(&self, _rules: &RuleSettings, _today: NaiveDate) -> Result<(), ValidationError> {
        ensure_not_blank("name", &self.name)?;
        ensure_non_negative("amount", self.amount)
    }

    fn natural_key(&self) -> Option<NaturalKey> {
        Some(NaturalKey::single("name", self.name.as_str()))
    }

    fn merge(&self, patch: AllowancePatch) -> Self {
        Self {
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            amount: patch.amount.unwrap_or(self.amount),
        }
    }
}
