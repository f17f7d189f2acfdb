//! Raw input → [`FeatureRow`] encoding.
//!
//! Every recognised `(key, value)` pair writes exactly one column, so the
//! order in which attributes are visited never changes the result. Keys and
//! categorical values outside the known set fall through to a no-op arm and
//! leave their columns at the 0 baseline.

use tracing::{debug, warn};

use super::input::{keys, AttributeValue, RawInput};
use super::risk::calculate_normalized_risk;
use super::{Feature, FeatureRow};
use crate::error::{HealthcostError, Result};

/// Insurance plan code; unknown plans are treated as Bronze.
#[must_use]
pub fn insurance_plan_code(plan: Option<&str>) -> f64 {
    match plan {
        Some("Bronze") => 1.0,
        Some("Silver") => 2.0,
        Some("Gold") => 3.0,
        _ => 1.0,
    }
}

/// Encode one applicant into the model's feature schema.
///
/// # Errors
///
/// - `MissingKey` if `Medical History` is absent.
/// - `InvalidAttribute` if `Medical History` is not text, or a numeric
///   passthrough (age, dependants, income, genetical risk) is not a number.
pub fn encode(raw: &RawInput) -> Result<FeatureRow> {
    let mut row = FeatureRow::zeroed();

    for (key, value) in raw.iter() {
        apply_attribute(&mut row, key, value)?;
    }

    let history = raw.require(keys::MEDICAL_HISTORY)?;
    let history = history
        .as_text()
        .ok_or_else(|| HealthcostError::invalid_attribute(keys::MEDICAL_HISTORY, history))?;
    row.set(
        Feature::NormalizedRiskScore,
        calculate_normalized_risk(history),
    );

    debug!(row = ?row.values(), "encoded feature row");
    Ok(row)
}

fn apply_attribute(row: &mut FeatureRow, key: &str, value: &AttributeValue) -> Result<()> {
    let one_hot = match (key, value.as_text()) {
        (keys::GENDER, Some("Male")) => Some(Feature::GenderMale),
        (keys::REGION, Some("Northwest")) => Some(Feature::RegionNorthwest),
        (keys::REGION, Some("Southeast")) => Some(Feature::RegionSoutheast),
        (keys::REGION, Some("Southwest")) => Some(Feature::RegionSouthwest),
        (keys::MARITAL_STATUS, Some("Unmarried")) => Some(Feature::MaritalStatusUnmarried),
        (keys::BMI_CATEGORY, Some("Obesity")) => Some(Feature::BmiCategoryObesity),
        (keys::BMI_CATEGORY, Some("Overweight")) => Some(Feature::BmiCategoryOverweight),
        (keys::BMI_CATEGORY, Some("Underweight")) => Some(Feature::BmiCategoryUnderweight),
        (keys::SMOKING_STATUS, Some("Occasional")) => Some(Feature::SmokingStatusOccasional),
        (keys::SMOKING_STATUS, Some("Regular")) => Some(Feature::SmokingStatusRegular),
        (keys::EMPLOYMENT_STATUS, Some("Salaried")) => Some(Feature::EmploymentStatusSalaried),
        (keys::EMPLOYMENT_STATUS, Some("Self-Employed")) => {
            Some(Feature::EmploymentStatusSelfEmployed)
        }
        _ => None,
    };
    if let Some(feature) = one_hot {
        row.set(feature, 1.0);
        return Ok(());
    }

    match key {
        keys::INSURANCE_PLAN => row.set(Feature::InsurancePlan, insurance_plan_code(value.as_text())),
        keys::AGE => row.set(Feature::Age, passthrough(key, value)?),
        keys::NUMBER_OF_DEPENDANTS => row.set(Feature::NumberOfDependants, passthrough(key, value)?),
        keys::INCOME_IN_LAKHS => row.set(Feature::IncomeLakhs, passthrough(key, value)?),
        keys::GENETICAL_RISK => row.set(Feature::GeneticalRisk, passthrough(key, value)?),
        // Baseline categories and unknown keys.
        _ => {}
    }
    Ok(())
}

fn passthrough(key: &str, value: &AttributeValue) -> Result<f64> {
    let number = value
        .as_number()
        .ok_or_else(|| HealthcostError::invalid_attribute(key, value))?;
    if let AttributeValue::Text(text) = value {
        warn!(key, text = %text, "coerced text attribute to number");
    }
    Ok(number)
}
