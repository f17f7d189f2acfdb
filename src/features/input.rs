//! Raw applicant attributes as collected upstream.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{HealthcostError, Result};

/// Attribute names recognised by the encoder.
pub mod keys {
    pub const AGE: &str = "Age";
    pub const GENDER: &str = "Gender";
    pub const REGION: &str = "Region";
    pub const MARITAL_STATUS: &str = "Marital Status";
    pub const BMI_CATEGORY: &str = "BMI Category";
    pub const SMOKING_STATUS: &str = "Smoking Status";
    pub const EMPLOYMENT_STATUS: &str = "Employment Status";
    pub const INSURANCE_PLAN: &str = "Insurance Plan";
    pub const NUMBER_OF_DEPENDANTS: &str = "Number of Dependants";
    pub const INCOME_IN_LAKHS: &str = "Income in Lakhs";
    pub const GENETICAL_RISK: &str = "Genetical Risk";
    pub const MEDICAL_HISTORY: &str = "Medical History";
}

/// A scalar or string attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(f64),
    Text(String),
}

impl AttributeValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }

    /// Numeric view of the value. Text is accepted when it parses as a number.
    /// NaN and infinities are never numeric, including `"NaN"` and `"inf"`.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        let number = match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        };
        number.filter(|n: &f64| n.is_finite())
    }
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Raw attribute mapping for one prediction request.
///
/// Deserializes from a flat JSON object:
///
/// ```rust
/// use healthcost::RawInput;
///
/// let raw: RawInput = serde_json::from_str(
///     r#"{"Age": 22, "Gender": "Male", "Medical History": "diabetes"}"#,
/// ).unwrap();
/// assert_eq!(raw.age().unwrap(), 22.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawInput {
    attributes: BTreeMap<String, AttributeValue>,
}

impl RawInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<AttributeValue> {
        self.attributes.remove(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    /// Look up a key that must be present.
    pub fn require(&self, key: &str) -> Result<&AttributeValue> {
        self.get(key).ok_or_else(|| HealthcostError::missing_key(key))
    }

    /// The applicant's age, which drives bracket selection.
    ///
    /// # Errors
    ///
    /// `MissingKey` when absent, `InvalidAttribute` when not numeric.
    pub fn age(&self) -> Result<f64> {
        let value = self.require(keys::AGE)?;
        value
            .as_number()
            .ok_or_else(|| HealthcostError::invalid_attribute(keys::AGE, value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
