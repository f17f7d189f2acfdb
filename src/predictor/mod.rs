//! Cost prediction: encode, scale by age bracket, invoke the bracket's model.
//!
//! # Architecture
//!
//! ```text
//!  RawInput ──> encode ──> FeatureRow ──> scale_features ──> model.predict ──> i64
//!                 │                           ▲                   ▲
//!                 └── Age ──> AgeBracket ─────┴───────────────────┘
//! ```
//!
//! Scaler and model are picked by the same [`AgeBracket::from_age`] call, so
//! a row is never scaled for one bracket and scored by the other.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use healthcost::{ArtifactStore, Predictor, RawInput};
//!
//! let store = Arc::new(ArtifactStore::load("artifacts")?);
//! let predictor = Predictor::new(store);
//!
//! let raw: RawInput = serde_json::from_str(r#"{"Age": 30, "Medical History": "none"}"#)?;
//! let cost = predictor.predict(&raw)?;
//! ```

use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::artifacts::{AgeBracket, ArtifactStore};
use crate::error::{HealthcostError, Result};
use crate::features::{encode, FeatureRow, RawInput};

/// Outcome of one prediction with the intermediate values kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Bracket whose scaler and model were used.
    pub bracket: AgeBracket,
    /// Model output truncated toward zero.
    pub cost: i64,
    /// Model output before truncation.
    pub raw_output: f64,
    /// The scaled row the model was invoked on.
    pub features: FeatureRow,
}

/// Rescale `row` with the scaler for `age`'s bracket.
#[must_use]
pub fn scale_features(age: f64, row: &FeatureRow, store: &ArtifactStore) -> FeatureRow {
    store.scaler(AgeBracket::from_age(age)).apply(row)
}

/// Predict the cost for one applicant.
///
/// # Errors
///
/// - `MissingKey` when `Medical History` or `Age` is absent, checked in that
///   order.
/// - `InvalidAttribute` when a value cannot be encoded.
/// - `NonFinitePrediction` when the model yields NaN or infinity.
pub fn predict(store: &ArtifactStore, raw: &RawInput) -> Result<i64> {
    predict_detailed(store, raw).map(|p| p.cost)
}

/// Like [`predict`], returning the bracket, raw output and scaled row as well.
pub fn predict_detailed(store: &ArtifactStore, raw: &RawInput) -> Result<Prediction> {
    let encoded = encode(raw)?;
    let age = raw.age()?;

    let bracket = AgeBracket::from_age(age);
    debug!(age, %bracket, "selected age bracket");

    let features = scale_features(age, &encoded, store);
    let raw_output = store.model(bracket).predict(&features);
    if !raw_output.is_finite() {
        return Err(HealthcostError::NonFinitePrediction { value: raw_output });
    }

    // Truncation toward zero, saturating at the i64 bounds.
    let cost = raw_output.trunc() as i64;
    debug!(raw_output, cost, "model prediction");

    Ok(Prediction {
        bracket,
        cost,
        raw_output,
        features,
    })
}

/// Shareable predictor over a loaded [`ArtifactStore`].
///
/// Cloning is cheap; every clone reads the same immutable store, so clones
/// may be moved to other threads and used concurrently.
#[derive(Debug, Clone)]
pub struct Predictor {
    store: Arc<ArtifactStore>,
}

impl Predictor {
    #[must_use]
    pub fn new(store: Arc<ArtifactStore>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// See [`predict`].
    pub fn predict(&self, raw: &RawInput) -> Result<i64> {
        predict(&self.store, raw)
    }

    /// See [`predict_detailed`].
    pub fn predict_detailed(&self, raw: &RawInput) -> Result<Prediction> {
        predict_detailed(&self.store, raw)
    }
}
