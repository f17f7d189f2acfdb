//! healthcost - health insurance cost prediction
//!
//! Turns a handful of applicant attributes into a fixed 18-column feature
//! row, rescales it with the scaler fitted for the applicant's age bracket,
//! and scores it with that bracket's pre-trained regression model.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`artifacts`] - Loading the two models and two scaler bundles
//! - [`config`] - Configuration loading and artifact directory resolution
//! - [`error`] - Custom error types and handling
//! - [`features`] - Raw input, feature schema, risk score and encoding
//! - [`predictor`] - Bracket dispatch, scaling and model invocation
//! - [`testing`] - Reference artifacts and fixtures for tests
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use healthcost::{ArtifactStore, Predictor, RawInput};
//!
//! // Load once at startup
//! let store = Arc::new(ArtifactStore::load("artifacts")?);
//! let predictor = Predictor::new(store);
//!
//! let raw = RawInput::new()
//!     .with("Age", 22)
//!     .with("Insurance Plan", "Gold")
//!     .with("Medical History", "diabetes");
//! let cost: i64 = predictor.predict(&raw)?;
//! ```

pub mod artifacts;
pub mod config;
pub mod error;
pub mod features;
pub mod predictor;
pub mod testing;

// Re-export commonly used types
pub use error::{HealthcostError, Result};

pub use artifacts::{AgeBracket, ArtifactInfo, ArtifactStore, BracketArtifacts, YOUNG_AGE_LIMIT};
pub use config::HealthcostConfig;
pub use features::{
    calculate_normalized_risk, encode, AttributeValue, Feature, FeatureRow, RawInput,
    FEATURE_COUNT,
};
pub use predictor::{predict, predict_detailed, scale_features, Prediction, Predictor};
