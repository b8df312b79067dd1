//! Payroll policies: deduction, allowance, benefit, misconduct and leave rules.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lifecycle::entity::{ConfigEntity, NaturalKey};
use crate::lifecycle::types::EntityKind;
use crate::rules::{
    RuleSettings, ValidationError, ensure_non_negative, ensure_not_blank, ensure_percentage,
    ensure_within_window,
};

const MIN_POLICY_NAME_LEN: usize = 3;

/// Category of a payroll policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyType {
    /// Amount withheld from pay.
    Deduction,
    /// Amount added to pay.
    Allowance,
    /// Non-cash or conditional benefit.
    Benefit,
    /// Penalty for misconduct.
    Misconduct,
    /// Leave-related rule.
    Leave,
}

impl PolicyType {
    /// Returns the wire representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deduction => "Deduction",
            Self::Allowance => "Allowance",
            Self::Benefit => "Benefit",
            Self::Misconduct => "Misconduct",
            Self::Leave => "Leave",
        }
    }
}

impl fmt::Display for PolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which employees a policy applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Applicability {
    /// Everyone.
    #[default]
    #[serde(rename = "All Employees")]
    AllEmployees,
    /// Full-time staff only.
    #[serde(rename = "Full Time Employees")]
    FullTime,
    /// Part-time staff only.
    #[serde(rename = "Part Time Employees")]
    PartTime,
    /// Contractors only.
    #[serde(rename = "Contractors")]
    Contractors,
}

/// The computation a policy applies.
///
/// At least one field must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDefinition {
    /// Percentage of the reference amount, in `[0, 100]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Decimal>,
    /// Fixed amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_amount: Option<Decimal>,
    /// Threshold above which the rule kicks in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<Decimal>,
}

impl RuleDefinition {
    /// Returns true if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.percentage.is_none() && self.fixed_amount.is_none() && self.threshold.is_none()
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyRuleDefinition);
        }
        if let Some(percentage) = self.percentage {
            ensure_percentage("ruleDefinition.percentage", percentage)?;
        }
        if let Some(fixed_amount) = self.fixed_amount {
            ensure_non_negative("ruleDefinition.fixedAmount", fixed_amount)?;
        }
        if let Some(threshold) = self.threshold {
            ensure_non_negative("ruleDefinition.threshold", threshold)?;
        }
        Ok(())
    }
}

/// A payroll policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollPolicy {
    /// Policy name, unique together with the policy type.
    pub policy_name: String,
    /// Policy category.
    pub policy_type: PolicyType,
    /// What the policy is for.
    #[serde(default)]
    pub description: String,
    /// Date from which the policy applies.
    pub effective_date: NaiveDate,
    /// The computation applied.
    #[serde(default)]
    pub rule_definition: RuleDefinition,
    /// Who the policy applies to.
    #[serde(default)]
    pub applicability: Applicability,
}

/// Partial update for [`PayrollPolicy`].
///
/// A new `ruleDefinition` replaces the old one whole.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollPolicyPatch {
    /// New name.
    pub policy_name: Option<String>,
    /// New category.
    pub policy_type: Option<PolicyType>,
    /// New description.
    pub description: Option<String>,
    /// New effective date.
    pub effective_date: Option<NaiveDate>,
    /// New rule definition.
    pub rule_definition: Option<RuleDefinition>,
    /// New applicability.
    pub applicability: Option<Applicability>,
}

impl ConfigEntity for PayrollPolicy {
    const KIND: EntityKind = EntityKind::PayrollPolicy;
    type Patch = PayrollPolicyPatch;

    fn validate(&self, rules: &RuleSettings, today: NaiveDate) -> Result<(), ValidationError> {
        ensure_not_blank("policyName", &self.policy_name)?;
        if self.policy_name.trim().chars().count() < MIN_POLICY_NAME_LEN {
            return Err(ValidationError::TooShort {
                field: "policyName",
                min: MIN_POLICY_NAME_LEN,
            });
        }
        self.rule_definition.validate()?;
        ensure_within_window(self.effective_date, today, rules)
    }

    fn natural_key(&self) -> Option<NaturalKey> {
        Some(NaturalKey::composite(&[
            ("policyName", self.policy_name.as_str()),
            ("policyType", self.policy_type.as_str()),
        ]))
    }

    fn merge(&self, patch: PayrollPolicyPatch) -> Self {
        Self {
            policy_name: patch
                .policy_name
                .unwrap_or_else(|| self.policy_name.clone()),
            policy_type: patch.policy_type.unwrap_or(self.policy_type),
            description: patch
                .description
                .unwrap_or_else(|| self.description.clone()),
            effective_date: patch.effective_date.unwrap_or(self.effective_date),
            rule_definition: patch
                .rule_definition
                .unwrap_or_else(|| self.rule_definition.clone()),
            applicability: patch.applicability.unwrap_or(self.applicability),
        }
    }

    fn category(&self) -> Option<&str> {
        Some(self.policy_type.as_str())
    }
}
