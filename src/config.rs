//! Configuration management for healthcost.
//!
//! Settings live in `<project>/.healthcost/settings.json`. Every field is
//! optional; an absent file means all defaults.
//!
//! # Example settings.json
//!
//! ```json
//! {
//!   "artifactsDir": "deploy/artifacts",
//!   "logJson": true
//! }
//! ```
//!
//! The artifact directory is resolved in this order: explicit override
//! (`--artifacts` / `HEALTHCOST_ARTIFACTS`), `artifactsDir` from settings
//! (relative paths are taken from the project directory), then
//! `artifacts/` next to the running executable.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::artifacts::ARTIFACTS_DIR_NAME;
use crate::error::{HealthcostError, Result};

/// Environment variable overriding the artifact directory.
pub const ARTIFACTS_ENV_VAR: &str = "HEALTHCOST_ARTIFACTS";

/// Project-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthcostConfig {
    /// Directory holding the four model/scaler artifacts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifacts_dir: Option<PathBuf>,

    /// Emit logs as JSON lines instead of human-readable text.
    #[serde(default)]
    pub log_json: bool,
}

impl HealthcostConfig {
    /// Load settings for a project, falling back to defaults when the
    /// settings file does not exist.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the file exists but cannot be read,
    /// parsed or validated.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let settings_path = Self::settings_path(project_dir);

        if !settings_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&settings_path).map_err(|e| {
            HealthcostError::config_with_path(e.to_string(), settings_path.clone())
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            HealthcostError::config_with_path(e.to_string(), settings_path.clone())
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Get the settings.json path for a project
    pub fn settings_path(project_dir: &Path) -> PathBuf {
        project_dir.join(".healthcost/settings.json")
    }

    /// Reject settings that cannot work.
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.artifacts_dir {
            if dir.as_os_str().is_empty() {
                return Err(HealthcostError::config("artifactsDir must not be empty"));
            }
        }
        Ok(())
    }

    /// Resolve the artifact directory, highest precedence first.
    #[must_use]
    pub fn artifacts_dir(&self, project_dir: &Path, overridden: Option<&Path>) -> PathBuf {
        if let Some(dir) = overridden {
            return dir.to_path_buf();
        }
        match &self.artifacts_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => project_dir.join(dir),
            None => default_artifacts_dir(),
        }
    }
}

/// `artifacts/` next to the running executable, or relative to the working
/// directory if the executable path is unavailable.
#[must_use]
pub fn default_artifacts_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(ARTIFACTS_DIR_NAME)))
        .unwrap_or_else(|| PathBuf::from(ARTIFACTS_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_settings(dir: &Path, content: &str) {
        let path = HealthcostConfig::settings_path(dir);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = HealthcostConfig::load(temp.path()).unwrap();
        assert_eq!(config, HealthcostConfig::default());
    }

    #[test]
    fn test_load_settings() {
        let temp = TempDir::new().unwrap();
        write_settings(temp.path(), r#"{"artifactsDir": "models", "logJson": true}"#);

        let config = HealthcostConfig::load(temp.path()).unwrap();
        assert_eq!(config.artifacts_dir, Some(PathBuf::from("models")));
        assert!(config.log_json);
    }

    #[test]
    fn test_load_invalid_json() {
        let temp = TempDir::new().unwrap();
        write_settings(temp.path(), "{ not json");

        let err = HealthcostConfig::load(temp.path()).unwrap_err();
        match err {
            HealthcostError::Config { path, .. } => {
                assert_eq!(path, Some(HealthcostConfig::settings_path(temp.path())));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_artifacts_dir_rejected() {
        let temp = TempDir::new().unwrap();
        write_settings(temp.path(), r#"{"artifactsDir": ""}"#);
        assert!(HealthcostConfig::load(temp.path()).is_err());
    }

    #[test]
    fn test_artifacts_dir_precedence() {
        let project = Path::new("/srv/app");
        let config = HealthcostConfig {
            artifacts_dir: Some(PathBuf::from("models")),
            log_json: false,
        };

        assert_eq!(
            config.artifacts_dir(project, Some(Path::new("/override"))),
            PathBuf::from("/override")
        );
        assert_eq!(
            config.artifacts_dir(project, None),
            PathBuf::from("/srv/app/models")
        );

        let absolute = HealthcostConfig {
            artifacts_dir: Some(PathBuf::from("/opt/models")),
            log_json: false,
        };
        assert_eq!(
            absolute.artifacts_dir(project, None),
            PathBuf::from("/opt/models")
        );
    }

    #[test]
    fn test_default_artifacts_dir_name() {
        let config = HealthcostConfig::default();
        let dir = config.artifacts_dir(Path::new("."), None);
        assert!(dir.ends_with(ARTIFACTS_DIR_NAME));
    }
}
