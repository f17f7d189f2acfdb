//! Feature schema and single-row encoding.
//!
//! A [`FeatureRow`] is the fixed 18-column record shared with the offline
//! model and scaler artifacts. Column order is part of that contract:
//!
//! | # | Column | Source |
//! |---|--------|--------|
//! | 0 | `age` | Age |
//! | 1 | `number_of_dependants` | Number of Dependants |
//! | 2 | `income_lakhs` | Income in Lakhs |
//! | 3 | `insurance_plan` | Insurance Plan (Bronze=1, Silver=2, Gold=3) |
//! | 4 | `genetical_risk` | Genetical Risk |
//! | 5 | `normalized_risk_score` | Medical History |
//! | 6–17 | one-hot columns | Gender, Region, Marital Status, BMI, Smoking, Employment |

pub mod encoder;
pub mod input;
pub mod risk;

pub use encoder::encode;
pub use input::{keys, AttributeValue, RawInput};
pub use risk::{calculate_normalized_risk, condition_weight, RISK_NORMALIZATION_CEILING};

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Number of columns in a [`FeatureRow`].
pub const FEATURE_COUNT: usize = 18;

/// One column of the feature row, in schema order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    Age,
    NumberOfDependants,
    IncomeLakhs,
    InsurancePlan,
    GeneticalRisk,
    NormalizedRiskScore,
    GenderMale,
    RegionNorthwest,
    RegionSoutheast,
    RegionSouthwest,
    MaritalStatusUnmarried,
    BmiCategoryObesity,
    BmiCategoryOverweight,
    BmiCategoryUnderweight,
    SmokingStatusOccasional,
    SmokingStatusRegular,
    EmploymentStatusSalaried,
    EmploymentStatusSelfEmployed,
}

impl Feature {
    /// All columns in schema order.
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Self::Age,
        Self::NumberOfDependants,
        Self::IncomeLakhs,
        Self::InsurancePlan,
        Self::GeneticalRisk,
        Self::NormalizedRiskScore,
        Self::GenderMale,
        Self::RegionNorthwest,
        Self::RegionSoutheast,
        Self::RegionSouthwest,
        Self::MaritalStatusUnmarried,
        Self::BmiCategoryObesity,
        Self::BmiCategoryOverweight,
        Self::BmiCategoryUnderweight,
        Self::SmokingStatusOccasional,
        Self::SmokingStatusRegular,
        Self::EmploymentStatusSalaried,
        Self::EmploymentStatusSelfEmployed,
    ];

    /// Column name as it appears in the artifacts.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::NumberOfDependants => "number_of_dependants",
            Self::IncomeLakhs => "income_lakhs",
            Self::InsurancePlan => "insurance_plan",
            Self::GeneticalRisk => "genetical_risk",
            Self::NormalizedRiskScore => "normalized_risk_score",
            Self::GenderMale => "gender_Male",
            Self::RegionNorthwest => "region_Northwest",
            Self::RegionSoutheast => "region_Southeast",
            Self::RegionSouthwest => "region_Southwest",
            Self::MaritalStatusUnmarried => "marital_status_Unmarried",
            Self::BmiCategoryObesity => "bmi_category_Obesity",
            Self::BmiCategoryOverweight => "bmi_category_Overweight",
            Self::BmiCategoryUnderweight => "bmi_category_Underweight",
            Self::SmokingStatusOccasional => "smoking_status_Occasional",
            Self::SmokingStatusRegular => "smoking_status_Regular",
            Self::EmploymentStatusSalaried => "employment_status_Salaried",
            Self::EmploymentStatusSelfEmployed => "employment_status_Self-Employed",
        }
    }

    /// Look up a column by its artifact name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Position of this column in the row.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Feature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A single encoded applicant: every column present, every value numeric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow {
    values: [f64; FEATURE_COUNT],
}

impl Default for FeatureRow {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl FeatureRow {
    /// A row with every column at 0, the baseline for all one-hot columns.
    #[must_use]
    pub fn zeroed() -> Self {
        Self {
            values: [0.0; FEATURE_COUNT],
        }
    }

    #[must_use]
    pub fn get(&self, feature: Feature) -> f64 {
        self.values[feature.index()]
    }

    pub fn set(&mut self, feature: Feature, value: f64) {
        self.values[feature.index()] = value;
    }

    /// Raw values in schema order.
    #[must_use]
    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    /// Column count; always [`FEATURE_COUNT`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// `(column, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        Feature::ALL.into_iter().zip(self.values.iter().copied())
    }
}

impl Serialize for FeatureRow {
    // Serialized as an ordered JSON object so the column order survives.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (feature, value) in self.iter() {
            map.serialize_entry(feature.name(), &value)?;
        }
        map.end()
    }
}
