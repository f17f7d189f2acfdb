//! Reference artifacts and inputs shared by unit tests, integration tests
//! and benchmarks.
//!
//! The standard artifact set is small enough to work predictions out by hand:
//!
//! - young: min-max scaler over `age, number_of_dependants, income_level,
//!   income_lakhs, insurance_plan`, then `4000.5 + 3000 * insurance_plan
//!   + 1400 * normalized_risk_score`.
//! - rest: standard scaler over the same columns, then a two-tree ensemble
//!   on scaled age and risk score with base score `10000.5`.
//!
//! [`SAMPLE_APPLICANT`] predicts 7600 (young); the same applicant at age 60
//! predicts 13000 (rest).

#[cfg(test)]
pub mod fixtures;

#[cfg(test)]
pub use fixtures::*;

/// File names and contents of the standard artifact set.
pub const STANDARD_ARTIFACTS: [(&str, &str); 4] = [
    ("model_young.json", YOUNG_MODEL),
    ("model_rest.json", REST_MODEL),
    ("scaler_young.json", YOUNG_SCALER),
    ("scaler_rest.json", REST_SCALER),
];

pub const YOUNG_MODEL: &str = r#"{
    "kind": "linear_regression",
    "coefficients": {"insurance_plan": 3000.0, "normalized_risk_score": 1400.0},
    "intercept": 4000.5
}"#;

pub const REST_MODEL: &str = r#"{
    "kind": "tree_ensemble",
    "base_score": 10000.5,
    "trees": [
        {"nodes": [
            {"feature": "age", "threshold": 0.0, "left": 1, "right": 2},
            {"leaf": 1000.0},
            {"leaf": 3000.0}
        ]},
        {"nodes": [
            {"feature": "normalized_risk_score", "threshold": 0.5, "left": 1, "right": 2},
            {"leaf": 0.0},
            {"leaf": 4000.0}
        ]}
    ]
}"#;

pub const YOUNG_SCALER: &str = r#"{
    "cols_to_scale": ["age", "number_of_dependants", "income_level", "income_lakhs", "insurance_plan"],
    "scaler": {
        "kind": "min_max",
        "data_min": [18, 0, 1, 1, 1],
        "data_max": [25, 5, 3, 100, 3]
    }
}"#;

pub const REST_SCALER: &str = r#"{
    "cols_to_scale": ["age", "number_of_dependants", "income_level", "income_lakhs", "insurance_plan"],
    "scaler": {
        "kind": "standard",
        "mean": [45, 2, 0, 20, 2],
        "scale": [15, 1, 1, 10, 1]
    }
}"#;

/// The 22-year-old salaried applicant used throughout the docs.
pub const SAMPLE_APPLICANT: &str = r#"{
    "Age": 22,
    "Gender": "Male",
    "Region": "Southeast",
    "Marital Status": "Unmarried",
    "BMI Category": "Normal",
    "Smoking Status": "Never",
    "Employment Status": "Salaried",
    "Insurance Plan": "Gold",
    "Number of Dependants": 2,
    "Income in Lakhs": 10,
    "Genetical Risk": 3,
    "Medical History": "diabetes"
}"#;
