//! Medical-history risk score.
//!
//! Each condition named in the history carries a fixed severity weight:
//!
//! | Condition | Weight |
//! |-----------|--------|
//! | heart disease | 8 |
//! | diabetes | 6 |
//! | high blood pressure | 6 |
//! | thyroid | 5 |
//! | no disease / none | 0 |
//!
//! The summed weight is divided by [`RISK_NORMALIZATION_CEILING`]. The
//! ceiling is heart disease plus one 6-weight condition; histories naming
//! more conditions than that score above 1.0 and are left unclamped, since
//! the models were fit on exactly this feature.

/// Separator between conditions in a medical-history string.
pub const CONDITION_SEPARATOR: &str = " & ";

/// Divisor applied to the summed condition weights.
pub const RISK_NORMALIZATION_CEILING: f64 = 14.0;

/// Severity weight of a single lowercased condition name. Unknown names weigh 0.
#[must_use]
pub fn condition_weight(condition: &str) -> u32 {
    match condition {
        "diabetes" => 6,
        "heart disease" => 8,
        "high blood pressure" => 6,
        "thyroid" => 5,
        "no disease" | "none" => 0,
        _ => 0,
    }
}

/// Normalized risk score for a `" & "`-joined medical history. Case-insensitive.
///
/// ```rust
/// use healthcost::calculate_normalized_risk;
///
/// assert_eq!(calculate_normalized_risk("none"), 0.0);
/// assert_eq!(calculate_normalized_risk("Heart disease & Diabetes"), 1.0);
/// ```
#[must_use]
pub fn calculate_normalized_risk(medical_history: &str) -> f64 {
    let total: u32 = medical_history
        .to_lowercase()
        .split(CONDITION_SEPARATOR)
        .map(condition_weight)
        .sum();
    f64::from(total) / RISK_NORMALIZATION_CEILING
}
