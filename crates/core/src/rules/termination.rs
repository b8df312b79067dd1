//! Termination and resignation benefits.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lifecycle::entity::{ConfigEntity, NaturalKey};
use crate::lifecycle::types::EntityKind;
use crate::rules::{RuleSettings, ValidationError, ensure_non_negative, ensure_not_blank};

/// A benefit paid when employment ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminationBenefit {
    /// Benefit name.
    pub name: String,
    /// Amount paid.
    pub amount: Decimal,
    /// Conditions under which the benefit applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,
}

/// Partial update for [`TerminationBenefit`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminationBenefitPatch {
    /// New name.
    pub name: Option<String>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New terms.
    pub terms: Option<String>,
}

impl ConfigEntity for TerminationBenefit {
    const KIND: EntityKind = EntityKind::TerminationBenefit;
    type Patch = TerminationBenefitPatch;

    fn validate(&self, _rules: &RuleSettings, _today: NaiveDate) -> Result<(), ValidationError> {
        ensure_not_blank("name", &self.name)?;
        ensure_non_negative("amount", self.amount)
    }

    fn natural_key(&self) -> Option<NaturalKey> {
        None
    }

    fn merge(&self, patch: TerminationBenefitPatch) -> Self {
        Self {
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            amount: patch.amount.unwrap_or(self.amount),
            terms: patch.terms.or_else(|| self.terms.clone()),
        }
    }
}
