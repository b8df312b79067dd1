//! Company-wide payroll settings.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use payroll_config_shared::SettingsId;
use serde::{Deserialize, Serialize};

use crate::rules::ValidationError;

/// Currency used when none is configured.
pub const DEFAULT_CURRENCY: &str = "EGP";

/// Settings that apply to the whole company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySettings {
    /// Next pay date.
    pub pay_date: NaiveDate,
    /// IANA time zone payroll dates are interpreted in.
    pub time_zone: String,
    /// ISO 4217 currency code.
    pub currency: String,
}

impl CompanySettings {
    /// Checks the time zone and currency.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.time_zone.parse::<Tz>().is_err() {
            return Err(ValidationError::UnknownTimeZone(self.time_zone.clone()));
        }

        let is_iso_code =
            self.currency.len() == 3 && self.currency.chars().all(|c| c.is_ascii_uppercase());
        if !is_iso_code {
            return Err(ValidationError::InvalidCurrency(self.currency.clone()));
        }

        Ok(())
    }

    /// Builds settings from a patch, for when none exist yet.
    pub fn from_patch(patch: SettingsPatch) -> Result<Self, ValidationError> {
        Ok(Self {
            pay_date: patch
                .pay_date
                .ok_or(ValidationError::Missing { field: "payDate" })?,
            time_zone: patch
                .time_zone
                .ok_or(ValidationError::Missing { field: "timeZone" })?,
            currency: patch
                .currency
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        })
    }

    /// Applies a patch on top of the current values.
    #[must_use]
    pub fn merge(&self, patch: SettingsPatch) -> Self {
        Self {
            pay_date: patch.pay_date.unwrap_or(self.pay_date),
            time_zone: patch.time_zone.unwrap_or_else(|| self.time_zone.clone()),
            currency: patch.currency.unwrap_or_else(|| self.currency.clone()),
        }
    }
}

/// Partial settings payload used by both upsert and update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    /// New pay date.
    pub pay_date: Option<NaiveDate>,
    /// New time zone.
    pub time_zone: Option<String>,
    /// New currency.
    pub currency: Option<String>,
}

/// A persisted settings record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRecord {
    /// Record identifier.
    pub id: SettingsId,
    /// The settings values.
    #[serde(flatten)]
    pub settings: CompanySettings,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}
