//! One-off signing bonuses.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lifecycle::entity::{ConfigEntity, NaturalKey};
use crate::lifecycle::types::EntityKind;
use crate::rules::{RuleSettings, ValidationError, ensure_non_negative, ensure_not_blank};

/// A signing bonus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningBonus {
    /// Bonus name, unique across signing bonuses.
    pub name: String,
    /// Amount paid once on joining.
    pub amount: Decimal,
}

/// Partial update for [`SigningBonus`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningBonusPatch {
    /// New name.
    pub name: Option<String>,
    /// New amount.
    pub amount: Option<Decimal>,
}

impl ConfigEntity for SigningBonus {
    const KIND: EntityKind = EntityKind::SigningBonus;
    type Patch = SigningBonusPatch;

    fn validate(&self, _rules: &RuleSettings, _today: NaiveDate) -> Result<(), ValidationError> {
        ensure_not_blank("name", &self.name)?;
        ensure_non_negative("amount", self.amount)
    }

    fn natural_key(&self) -> Option<NaturalKey> {
        Some(NaturalKey::single("name", self.name.as_str()))
    }

    fn merge(&self, patch: SigningBonusPatch) -> Self {
        Self {
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            amount: patch.amount.unwrap_or(self.amount),
        }
    }
}
