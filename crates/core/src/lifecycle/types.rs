//! Lifecycle domain types shared by every approvable configuration.
//!
//! A record is a pair of type-specific fields and a [`Decision`]. The decision
//! is a tagged variant, so a record can never carry approval and rejection
//! audit data at the same time.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use payroll_config_shared::ConfigId;
use serde::{Deserialize, Serialize};

use crate::lifecycle::error::LifecycleError;

/// Status of a configuration record in the approval workflow.
///
/// The valid transitions are:
/// - Draft → Approved (approve)
/// - Draft → Rejected (reject)
///
/// Approved and Rejected are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigStatus {
    /// Record is being drafted and can be edited or deleted.
    Draft,
    /// Record has been approved (immutable).
    Approved,
    /// Record has been rejected (immutable).
    Rejected,
}

impl ConfigStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true if fields may still be edited and the record deleted.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if no transition leaves this status.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for ConfigStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Opaque reference to an actor in the identity system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    /// Wraps an identity-system reference.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Approval decision recorded on a configuration record.
///
/// Serialized with a `status` tag so that the audit fields sit next to the
/// status they belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum Decision {
    /// No decision yet.
    #[default]
    Draft,
    /// Approved by an actor.
    Approved {
        /// The approver.
        approved_by: ActorId,
        /// When the record was approved.
        approved_at: DateTime<Utc>,
    },
    /// Rejected by an actor.
    Rejected {
        /// The rejecter.
        rejected_by: ActorId,
        /// When the record was rejected.
        rejected_at: DateTime<Utc>,
        /// Why the record was rejected.
        rejection_reason: String,
    },
}

impl Decision {
    /// Returns the status this decision corresponds to.
    #[must_use]
    pub fn status(&self) -> ConfigStatus {
        match self {
            Self::Draft => ConfigStatus::Draft,
            Self::Approved { .. } => ConfigStatus::Approved,
            Self::Rejected { .. } => ConfigStatus::Rejected,
        }
    }
}

/// The kinds of approvable configuration managed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    /// Pay type (hourly, monthly, ...).
    PayType,
    /// Pay grade with base and gross salary.
    PayGrade,
    /// Payroll policy with a rule definition.
    PayrollPolicy,
    /// Allowance.
    Allowance,
    /// Social insurance bracket.
    InsuranceBracket,
    /// Signing bonus.
    SigningBonus,
    /// Tax rule.
    TaxRule,
    /// Termination or resignation benefit.
    TerminationBenefit,
}

impl EntityKind {
    /// Every registered kind.
    pub const ALL: [Self; 8] = [
        Self::PayType,
        Self::PayGrade,
        Self::PayrollPolicy,
        Self::Allowance,
        Self::InsuranceBracket,
        Self::SigningBonus,
        Self::TaxRule,
        Self::TerminationBenefit,
    ];

    /// Stable identifier used in storage and by the reference guard.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PayType => "payType",
            Self::PayGrade => "payGrade",
            Self::PayrollPolicy => "payrollPolicy",
            Self::Allowance => "allowance",
            Self::InsuranceBracket => "insuranceBracket",
            Self::SigningBonus => "signingBonus",
            Self::TaxRule => "taxRule",
            Self::TerminationBenefit => "terminationBenefit",
        }
    }

    /// URL path segment for this kind.
    #[must_use]
    pub fn slug(&self) -> &'static str {
        match self {
            Self::PayType => "pay-types",
            Self::PayGrade => "pay-grades",
            Self::PayrollPolicy => "payroll-policies",
            Self::Allowance => "allowances",
            Self::InsuranceBracket => "insurance-brackets",
            Self::SigningBonus => "signing-bonuses",
            Self::TaxRule => "tax-rules",
            Self::TerminationBenefit => "termination-benefits",
        }
    }

    /// Human-readable name used in messages.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::PayType => "Pay type",
            Self::PayGrade => "Pay grade",
            Self::PayrollPolicy => "Payroll policy",
            Self::Allowance => "Allowance",
            Self::InsuranceBracket => "Insurance bracket",
            Self::SigningBonus => "Signing bonus",
            Self::TaxRule => "Tax rule",
            Self::TerminationBenefit => "Termination benefit",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = LifecycleError;

    /// Accepts either the storage identifier or the URL slug.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s || kind.slug() == s)
            .ok_or_else(|| LifecycleError::UnknownEntityType(s.to_string()))
    }
}

/// A persisted configuration record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigRecord<T> {
    /// Record identifier.
    pub id: ConfigId,
    /// Type-specific fields.
    #[serde(flatten)]
    pub fields: T,
    /// Current approval decision.
    #[serde(flatten)]
    pub decision: Decision,
    /// Who created the draft, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<ActorId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl<T> ConfigRecord<T> {
    /// Returns the record's current status.
    #[must_use]
    pub fn status(&self) -> ConfigStatus {
        self.decision.status()
    }
}

/// Filter for list reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Only records with this status.
    pub status: Option<ConfigStatus>,
    /// Only records in this secondary category (e.g. policy type).
    pub category: Option<String>,
}

impl ListFilter {
    /// Filter on status only.
    #[must_use]
    pub fn with_status(status: ConfigStatus) -> Self {
        Self {
            status: Some(status),
            category: None,
        }
    }

    /// Returns true if a record with this status and category passes.
    #[must_use]
    pub fn matches(&self, status: ConfigStatus, category: Option<&str>) -> bool {
        let status_ok = self.status.is_none_or(|wanted| wanted == status);
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|wanted| category == Some(wanted));
        status_ok && category_ok
    }
}
