//! Pay types: how an employee's pay is computed (hourly, monthly, ...).

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lifecycle::entity::{ConfigEntity, NaturalKey};
use crate::lifecycle::types::EntityKind;
use crate::rules::{RuleSettings, ValidationError, ensure_description, ensure_minimum_wage};

/// Pay period basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayTypeKind {
    /// Paid per hour.
    Hourly,
    /// Paid per day.
    Daily,
    /// Paid per week.
    Weekly,
    /// Paid per month.
    Monthly,
    /// Paid per contract.
    ContractBased,
}

impl PayTypeKind {
    /// Returns the wire representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::ContractBased => "contract_based",
        }
    }
}

impl fmt::Display for PayTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pay type definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayType {
    /// Pay period basis, unique across pay types.
    #[serde(rename = "type")]
    pub pay_type: PayTypeKind,
    /// Reference amount for this pay type.
    pub amount: Decimal,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial update for [`PayType`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayTypePatch {
    /// New pay period basis.
    #[serde(rename = "type")]
    pub pay_type: Option<PayTypeKind>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New description.
    pub description: Option<String>,
}

impl ConfigEntity for PayType {
    const KIND: EntityKind = EntityKind::PayType;
    type Patch = PayTypePatch;

    fn validate(&self, rules: &RuleSettings, _today: NaiveDate) -> Result<(), ValidationError> {
        ensure_minimum_wage("amount", self.amount, rules)?;
        ensure_description("description", self.description.as_deref(), rules)
    }

    fn natural_key(&self) -> Option<NaturalKey> {
        Some(NaturalKey::single("type", self.pay_type.as_str()))
    }

    fn merge(&self, patch: PayTypePatch) -> Self {
        Self {
            pay_type: patch.pay_type.unwrap_or(self.pay_type),
            amount: patch.amount.unwrap_or(self.amount),
            description: patch.description.or_else(|| self.description.clone()),
        }
    }
}
