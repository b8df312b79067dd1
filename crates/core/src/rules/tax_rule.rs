//! Tax rules.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lifecycle::entity::{ConfigEntity, NaturalKey};
use crate::lifecycle::types::EntityKind;
use crate::rules::{RuleSettings, ValidationError, ensure_not_blank, ensure_percentage};

/// A named tax rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRule {
    /// Rule name, unique across tax rules.
    pub name: String,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tax rate as a percentage.
    pub rate: Decimal,
}

/// Partial update for [`TaxRule`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRulePatch {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New rate.
    pub rate: Option<Decimal>,
}

impl ConfigEntity for TaxRule {
    const KIND: EntityKind = EntityKind::TaxRule;
    type Patch = TaxRulePatch;

    fn validate(&self, _rules: &RuleSettings, _today: NaiveDate) -> Result<(), ValidationError> {
        ensure_not_blank("name", &self.name)?;
        ensure_percentage("rate", self.rate)
    }

    fn natural_key(&self) -> Option<NaturalKey> {
        Some(NaturalKey::single("name", self.name.as_str()))
    }

    fn merge(&self, patch: TaxRulePatch) -> Self {
        Self {
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            description: patch.description.or_else(|| self.description.clone()),
            rate: patch.rate.unwrap_or(self.rate),
        }
    }
}
