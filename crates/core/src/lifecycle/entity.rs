//! The plug-in point for configuration entity types.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::lifecycle::types::EntityKind;
use crate::rules::{RuleSettings, ValidationError};

/// Value of an entity's natural key, unique per kind among stored records.
///
/// Equality looks at the stored value only.
#[derive(Debug, Clone)]
pub struct NaturalKey {
    value: String,
    description: String,
}

impl PartialEq for NaturalKey {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for NaturalKey {}

impl NaturalKey {
    /// Key made of a single field.
    #[must_use]
    pub fn single(label: &str, value: &str) -> Self {
        Self::composite(&[(label, value)])
    }

    /// Key made of several fields, each given as `(label, value)`.
    #[must_use]
    pub fn composite(parts: &[(&str, &str)]) -> Self {
        let value = parts
            .iter()
            .map(|(_, value)| *value)
            .collect::<Vec<_>>()
            .join("::");
        let description = parts
            .iter()
            .map(|(label, value)| format!("{label} \"{value}\""))
            .collect::<Vec<_>>()
            .join(" and ");
        Self { value, description }
    }

    /// The stored form of the key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for NaturalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// How list reads are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    /// Most recently created first.
    NewestFirst,
    /// Ascending by natural key.
    ByNaturalKey,
}

/// A configuration type managed by the lifecycle engine.
///
/// Implementors hold only their own fields; status and audit data live on
/// [`ConfigRecord`](crate::lifecycle::types::ConfigRecord).
pub trait ConfigEntity:
    Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Which kind this is.
    const KIND: EntityKind;

    /// List ordering for this kind.
    const LIST_ORDER: ListOrder = ListOrder::NewestFirst;

    /// Partial update payload.
    type Patch: fmt::Debug + Default + DeserializeOwned + Send + Sync + 'static;

    /// Check the type-specific business rules.
    fn validate(&self, rules: &RuleSettings, today: NaiveDate) -> Result<(), ValidationError>;

    /// The natural key, if this kind has one.
    fn natural_key(&self) -> Option<NaturalKey>;

    /// Apply a partial update on top of the current values.
    #[must_use]
    fn merge(&self, patch: Self::Patch) -> Self;

    /// Secondary list dimension, if this kind has one.
    fn category(&self) -> Option<&str> {
        None
    }
}
