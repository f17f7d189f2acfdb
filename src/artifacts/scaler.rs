//! Scaler bundle artifacts.
//!
//! A bundle pairs the columns to rescale with a transform fitted over exactly
//! those columns, in that order. The fitted column list may include the
//! `income_level` placeholder, which the runtime schema no longer produces;
//! it is fed as 0 and its output discarded.

use serde::{Deserialize, Serialize};

use crate::features::{Feature, FeatureRow};

/// Name of the placeholder column the scalers were fitted with.
pub const PLACEHOLDER_COLUMN: &str = "income_level";

/// Value fed to the scaler for the placeholder column.
pub const PLACEHOLDER_VALUE: f64 = 0.0;

/// Transform kinds this build can decode.
pub const SUPPORTED_SCALER_KINDS: &[&str] = &["min_max", "standard"];

/// On-disk shape of a scaler bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerBundleSpec {
    pub cols_to_scale: Vec<String>,
    pub scaler: Transform,
}

/// A fitted per-column transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transform {
    /// `(x - data_min) / (data_max - data_min)` mapped onto `feature_range`.
    MinMax {
        data_min: Vec<f64>,
        data_max: Vec<f64>,
        #[serde(default = "default_feature_range")]
        feature_range: [f64; 2],
    },
    /// `(x - mean) / scale`.
    Standard { mean: Vec<f64>, scale: Vec<f64> },
}

fn default_feature_range() -> [f64; 2] {
    [0.0, 1.0]
}

// A zero-width column scales by 1 rather than dividing by zero.
fn nonzero(width: f64) -> f64 {
    if width == 0.0 {
        1.0
    } else {
        width
    }
}

impl Transform {
    fn validate(&self, columns: usize) -> std::result::Result<(), String> {
        let lengths = match self {
            Self::MinMax {
                data_min,
                data_max,
                feature_range,
            } => {
                if feature_range[0] >= feature_range[1] {
                    return Err(format!("feature_range {feature_range:?} is not increasing"));
                }
                [("data_min", data_min.len()), ("data_max", data_max.len())]
            }
            Self::Standard { mean, scale } => [("mean", mean.len()), ("scale", scale.len())],
        };
        for (name, len) in lengths {
            if len != columns {
                return Err(format!(
                    "{name} has {len} entries but cols_to_scale has {columns}"
                ));
            }
        }
        Ok(())
    }

    /// Transform `values` in place; `values[i]` belongs to fitted column `i`.
    pub fn apply(&self, values: &mut [f64]) {
        match self {
            Self::MinMax {
                data_min,
                data_max,
                feature_range: [lo, hi],
            } => {
                for (i, x) in values.iter_mut().enumerate() {
                    let unit = (*x - data_min[i]) / nonzero(data_max[i] - data_min[i]);
                    *x = unit * (hi - lo) + lo;
                }
            }
            Self::Standard { mean, scale } => {
                for (i, x) in values.iter_mut().enumerate() {
                    *x = (*x - mean[i]) / nonzero(scale[i]);
                }
            }
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MinMax { .. } => "min_max",
            Self::Standard { .. } => "standard",
        }
    }
}

/// A column the scaler was fitted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalerColumn {
    Feature(Feature),
    Placeholder,
}

/// A decoded, validated scaler bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalerBundle {
    columns: Vec<ScalerColumn>,
    transform: Transform,
}

impl ScalerBundle {
    /// Resolve an on-disk spec against the feature schema.
    ///
    /// # Errors
    ///
    /// Returns a description of the first inconsistency: an unknown or
    /// repeated column, or transform parameters of the wrong length.
    pub fn from_spec(spec: ScalerBundleSpec) -> std::result::Result<Self, String> {
        let mut columns = Vec::with_capacity(spec.cols_to_scale.len());
        for name in &spec.cols_to_scale {
            let column = if name == PLACEHOLDER_COLUMN {
                ScalerColumn::Placeholder
            } else {
                Feature::from_name(name)
                    .map(ScalerColumn::Feature)
                    .ok_or_else(|| format!("unknown column '{name}' in cols_to_scale"))?
            };
            if columns.contains(&column) {
                return Err(format!("column '{name}' listed twice in cols_to_scale"));
            }
            columns.push(column);
        }
        spec.scaler.validate(columns.len())?;
        Ok(Self {
            columns,
            transform: spec.scaler,
        })
    }

    /// Columns in fitted order.
    #[must_use]
    pub fn columns(&self) -> &[ScalerColumn] {
        &self.columns
    }

    #[must_use]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Rescale the declared columns of `row`.
    ///
    /// The placeholder column is fed as [`PLACEHOLDER_VALUE`] and dropped
    /// afterwards. Undeclared columns and column order are unchanged.
    #[must_use]
    pub fn apply(&self, row: &FeatureRow) -> FeatureRow {
        let mut working: Vec<f64> = self
            .columns
            .iter()
            .map(|column| match column {
                ScalerColumn::Feature(feature) => row.get(*feature),
                ScalerColumn::Placeholder => PLACEHOLDER_VALUE,
            })
            .collect();

        self.transform.apply(&mut working);

        let mut scaled = *row;
        for (column, value) in self.columns.iter().zip(working) {
            if let ScalerColumn::Feature(feature) = column {
                scaled.set(*feature, value);
            }
        }
        scaled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(json: &str) -> std::result::Result<ScalerBundle, String> {
        let spec: ScalerBundleSpec = serde_json::from_str(json).map_err(|e| e.to_string())?;
        ScalerBundle::from_spec(spec)
    }

    #[test]
    fn test_min_max_with_placeholder() {
        let scaler = bundle(
            r#"{
                "cols_to_scale": ["age", "income_level", "income_lakhs"],
                "scaler": {"kind": "min_max", "data_min": [18, 1, 0], "data_max": [28, 3, 50]}
            }"#,
        )
        .unwrap();
        assert_eq!(scaler.columns()[1], ScalerColumn::Placeholder);

        let mut row = FeatureRow::zeroed();
        row.set(Feature::Age, 23.0);
        row.set(Feature::IncomeLakhs, 25.0);
        row.set(Feature::GenderMale, 1.0);

        let scaled = scaler.apply(&row);
        assert_eq!(scaled.get(Feature::Age), 0.5);
        assert_eq!(scaled.get(Feature::IncomeLakhs), 0.5);
        assert_eq!(scaled.get(Feature::GenderMale), 1.0);
        assert_eq!(scaled.len(), row.len());
    }

    #[test]
    fn test_undeclared_columns_untouched() {
        let scaler = bundle(
            r#"{"cols_to_scale": ["age"], "scaler": {"kind": "standard", "mean": [40], "scale": [10]}}"#,
        )
        .unwrap();
        let mut row = FeatureRow::zeroed();
        row.set(Feature::Age, 60.0);
        row.set(Feature::GeneticalRisk, 4.0);
        row.set(Feature::InsurancePlan, 2.0);
        let scaled = scaler.apply(&row);
        assert_eq!(scaled.get(Feature::Age), 2.0);
        for feature in Feature::ALL.into_iter().skip(1) {
            assert_eq!(scaled.get(feature), row.get(feature), "{feature}");
        }
    }

    #[test]
    fn test_feature_range() {
        let scaler = bundle(
            r#"{"cols_to_scale": ["age"], "scaler": {"kind": "min_max", "data_min": [0], "data_max": [10], "feature_range": [-1, 1]}}"#,
        )
        .unwrap();
        let mut row = FeatureRow::zeroed();
        row.set(Feature::Age, 5.0);
        assert_eq!(scaler.apply(&row).get(Feature::Age), 0.0);
    }

    #[test]
    fn test_zero_width_column_scales_by_one() {
        let scaler = bundle(
            r#"{"cols_to_scale": ["age"], "scaler": {"kind": "standard", "mean": [3], "scale": [0]}}"#,
        )
        .unwrap();
        let mut row = FeatureRow::zeroed();
        row.set(Feature::Age, 5.0);
        assert_eq!(scaler.apply(&row).get(Feature::Age), 2.0);
    }

    #[test]
    fn test_rejects_unknown_column() {
        let err = bundle(
            r#"{"cols_to_scale": ["height"], "scaler": {"kind": "standard", "mean": [0], "scale": [1]}}"#,
        )
        .unwrap_err();
        assert!(err.contains("height"));
    }

    #[test]
    fn test_rejects_duplicate_column() {
        let err = bundle(
            r#"{"cols_to_scale": ["age", "age"], "scaler": {"kind": "standard", "mean": [0, 0], "scale": [1, 1]}}"#,
        )
        .unwrap_err();
        assert!(err.contains("twice"));
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let err = bundle(
            r#"{"cols_to_scale": ["age", "income_lakhs"], "scaler": {"kind": "min_max", "data_min": [0], "data_max": [1, 2]}}"#,
        )
        .unwrap_err();
        assert!(err.contains("data_min has 1 entries"));
    }
}
