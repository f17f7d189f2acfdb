//! Artifact store: the two models and two scaler bundles, keyed by age bracket.
//!
//! The store is loaded once at startup and never mutated afterwards. It is
//! passed explicitly to the predictor; nothing reaches it through a global.
//!
//! # Layout
//!
//! ```text
//! artifacts/
//! ├── model_young.json    regression model, age <= 25
//! ├── model_rest.json     regression model, age > 25
//! ├── scaler_young.json   scaler bundle,    age <= 25
//! └── scaler_rest.json    scaler bundle,    age > 25
//! ```
//!
//! # Errors
//!
//! Loading fails on the first artifact that is absent (`MissingArtifact`),
//! declares a kind this build cannot decode (`UnsupportedArtifact`), is not
//! valid JSON for its kind (`ArtifactDecode`) or is internally inconsistent
//! (`InvalidArtifact`). There is no retry: a missing artifact is a
//! deployment error.

pub mod model;
pub mod scaler;

pub use model::{LinearModel, ModelSpec, RegressionModel, TreeEnsemble, SUPPORTED_MODEL_KINDS};
pub use scaler::{
    ScalerBundle, ScalerBundleSpec, ScalerColumn, Transform, PLACEHOLDER_COLUMN,
    SUPPORTED_SCALER_KINDS,
};

use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{HealthcostError, Result};

/// Default artifact directory name.
pub const ARTIFACTS_DIR_NAME: &str = "artifacts";

/// Oldest age that still selects the young bracket.
pub const YOUNG_AGE_LIMIT: f64 = 25.0;

/// Age bracket selecting a model/scaler pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeBracket {
    /// Age 25 and under.
    Young,
    /// Everyone older.
    Rest,
}

impl AgeBracket {
    /// The single threshold used for both scaler and model selection.
    #[must_use]
    pub fn from_age(age: f64) -> Self {
        if age <= YOUNG_AGE_LIMIT {
            Self::Young
        } else {
            Self::Rest
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Young => "young",
            Self::Rest => "rest",
        }
    }

    #[must_use]
    pub fn model_file(self) -> String {
        format!("model_{}.json", self.label())
    }

    #[must_use]
    pub fn scaler_file(self) -> String {
        format!("scaler_{}.json", self.label())
    }
}

impl std::fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Where an artifact came from and what it contained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactInfo {
    pub bracket: AgeBracket,
    pub path: PathBuf,
    pub kind: String,
    /// Hex SHA-256 of the file contents.
    pub sha256: String,
}

/// Model and scaler for one bracket.
#[derive(Debug, Clone)]
pub struct BracketArtifacts {
    pub model: RegressionModel,
    pub scaler: ScalerBundle,
}

/// Read-only holder of all four artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    young: BracketArtifacts,
    rest: BracketArtifacts,
    manifest: Vec<ArtifactInfo>,
}

impl ArtifactStore {
    /// Build a store from already-decoded artifacts.
    #[must_use]
    pub fn from_parts(young: BracketArtifacts, rest: BracketArtifacts) -> Self {
        Self {
            young,
            rest,
            manifest: Vec::new(),
        }
    }

    /// Load all four artifacts from `dir`.
    ///
    /// # Errors
    ///
    /// See the module documentation for the failure kinds.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        debug!("Loading artifacts from {}", dir.display());

        let mut manifest = Vec::with_capacity(4);
        let mut load_bracket = |bracket: AgeBracket| -> Result<BracketArtifacts> {
            let (model, info) = load_model(&dir.join(bracket.model_file()), bracket)?;
            manifest.push(info);
            let (scaler, info) = load_scaler(&dir.join(bracket.scaler_file()), bracket)?;
            manifest.push(info);
            Ok(BracketArtifacts { model, scaler })
        };
        let young = load_bracket(AgeBracket::Young)?;
        let rest = load_bracket(AgeBracket::Rest)?;

        for info in &manifest {
            info!(
                bracket = %info.bracket,
                kind = %info.kind,
                sha256 = %info.sha256,
                "Loaded {}",
                info.path.display()
            );
        }

        Ok(Self {
            young,
            rest,
            manifest,
        })
    }

    #[must_use]
    pub fn bracket(&self, bracket: AgeBracket) -> &BracketArtifacts {
        match bracket {
            AgeBracket::Young => &self.young,
            AgeBracket::Rest => &self.rest,
        }
    }

    #[must_use]
    pub fn model(&self, bracket: AgeBracket) -> &RegressionModel {
        &self.bracket(bracket).model
    }

    #[must_use]
    pub fn scaler(&self, bracket: AgeBracket) -> &ScalerBundle {
        &self.bracket(bracket).scaler
    }

    /// Files the store was loaded from; empty for stores built in memory.
    #[must_use]
    pub fn manifest(&self) -> &[ArtifactInfo] {
        &self.manifest
    }
}

fn load_model(path: &Path, bracket: AgeBracket) -> Result<(RegressionModel, ArtifactInfo)> {
    let (spec, info) = read_artifact::<ModelSpec>(path, bracket, "/kind", SUPPORTED_MODEL_KINDS)?;
    let model = RegressionModel::from_spec(spec)
        .map_err(|reason| HealthcostError::invalid_artifact(path, reason))?;
    Ok((model, info))
}

fn load_scaler(path: &Path, bracket: AgeBracket) -> Result<(ScalerBundle, ArtifactInfo)> {
    let (spec, info) =
        read_artifact::<ScalerBundleSpec>(path, bracket, "/scaler/kind", SUPPORTED_SCALER_KINDS)?;
    let scaler = ScalerBundle::from_spec(spec)
        .map_err(|reason| HealthcostError::invalid_artifact(path, reason))?;
    Ok((scaler, info))
}

/// Read, fingerprint and decode one artifact, checking its declared kind
/// against what this build supports before decoding the body.
fn read_artifact<T: DeserializeOwned>(
    path: &Path,
    bracket: AgeBracket,
    kind_pointer: &str,
    supported: &[&str],
) -> Result<(T, ArtifactInfo)> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => HealthcostError::MissingArtifact {
            path: path.to_path_buf(),
        },
        _ => HealthcostError::Io(e),
    })?;

    let decode_err = |source| HealthcostError::ArtifactDecode {
        path: path.to_path_buf(),
        source,
    };
    let value: serde_json::Value = serde_json::from_slice(&bytes).map_err(decode_err)?;

    let kind = value
        .pointer(kind_pointer)
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| {
            HealthcostError::invalid_artifact(path, format!("missing string field '{kind_pointer}'"))
        })?
        .to_string();
    if !supported.contains(&kind.as_str()) {
        return Err(HealthcostError::UnsupportedArtifact {
            path: path.to_path_buf(),
            kind,
        });
    }

    let decoded = serde_json::from_value(value).map_err(decode_err)?;
    let info = ArtifactInfo {
        bracket,
        path: path.to_path_buf(),
        kind,
        sha256: hex::encode(Sha256::digest(&bytes)),
    };
    Ok((decoded, info))
}
