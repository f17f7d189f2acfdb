//! Custom error types for healthcost.
//!
//! Load-time failures (artifacts, configuration) are fatal: the process
//! cannot serve predictions without all four artifacts. Call-time failures
//! (missing keys, bad attribute values) propagate to the caller as-is.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for healthcost operations
#[derive(Error, Debug)]
pub enum HealthcostError {
    // =========================================================================
    // Artifact Errors
    // =========================================================================
    /// Artifact file absent at its expected path
    #[error("Model/scaler file not found: {}", path.display())]
    MissingArtifact { path: PathBuf },

    /// Artifact declares a kind this build cannot decode
    #[error("Missing capability required to load {}: unsupported kind '{kind}'", path.display())]
    UnsupportedArtifact { path: PathBuf, kind: String },

    /// Artifact is not well-formed JSON for its declared kind
    #[error("Failed to decode {}: {source}", path.display())]
    ArtifactDecode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Artifact decoded but its contents are inconsistent
    #[error("Invalid artifact {}: {reason}", path.display())]
    InvalidArtifact { path: PathBuf, reason: String },

    // =========================================================================
    // Encoding Errors
    // =========================================================================
    /// Required raw input key absent
    #[error("Missing required input key: '{0}'")]
    MissingKey(String),

    /// Raw input value has the wrong shape for its key
    #[error("Invalid value for '{key}': {value}")]
    InvalidAttribute { key: String, value: String },

    // =========================================================================
    // Prediction Errors
    // =========================================================================
    /// Model produced NaN or infinity
    #[error("Model returned a non-finite prediction: {value}")]
    NonFinitePrediction { value: f64 },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Failed to load configuration
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    // =========================================================================
    // Wrapped Errors
    // =========================================================================
    /// IO error wrapper
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl HealthcostError {
    // =========================================================================
    // Constructor helpers
    // =========================================================================

    /// Create a missing-key error
    pub fn missing_key(key: impl Into<String>) -> Self {
        Self::MissingKey(key.into())
    }

    /// Create an invalid-attribute error
    pub fn invalid_attribute(key: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidAttribute {
            key: key.into(),
            value: value.to_string(),
        }
    }

    /// Create an invalid-artifact error
    pub fn invalid_artifact(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidArtifact {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            path: None,
        }
    }

    /// Create a configuration error with path
    pub fn config_with_path(message: impl Into<String>, path: PathBuf) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path),
        }
    }

    // =========================================================================
    // Classification helpers
    // =========================================================================

    /// Check if this error happened while loading artifacts.
    pub fn is_artifact_error(&self) -> bool {
        matches!(
            self,
            Self::MissingArtifact { .. }
                | Self::UnsupportedArtifact { .. }
                | Self::ArtifactDecode { .. }
                | Self::InvalidArtifact { .. }
        )
    }

    /// Check if this error means the process cannot serve predictions at all
    pub fn is_fatal(&self) -> bool {
        self.is_artifact_error() || matches!(self, Self::Config { .. })
    }

    /// Get error code for exit status
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingKey(_) | Self::InvalidAttribute { .. } => 2,
            Self::MissingArtifact { .. } => 3,
            Self::UnsupportedArtifact { .. } => 4,
            Self::ArtifactDecode { .. } | Self::InvalidArtifact { .. } => 5,
            Self::Config { .. } => 7,
            _ => 1,
        }
    }
}

/// Type alias for healthcost results
pub type Result<T> = std::result::Result<T, HealthcostError>;
