//! Temporary artifact directories for unit tests.

use std::path::Path;
use tempfile::TempDir;

use super::{SAMPLE_APPLICANT, STANDARD_ARTIFACTS};
use crate::features::RawInput;

/// A temporary artifact directory, removed when dropped.
pub struct ArtifactFixture {
    temp_dir: TempDir,
}

impl ArtifactFixture {
    /// An empty artifact directory.
    ///
    /// # Panics
    ///
    /// Panics if temporary directory creation fails.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// All four standard artifacts.
    #[must_use]
    pub fn standard() -> Self {
        let fixture = Self::empty();
        for (name, content) in STANDARD_ARTIFACTS {
            fixture.write(name, content);
        }
        fixture
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write (or overwrite) an artifact file.
    pub fn write(&self, name: &str, content: &str) {
        std::fs::write(self.path().join(name), content)
            .unwrap_or_else(|e| panic!("Failed to write {name}: {e}"));
    }

    pub fn remove(&self, name: &str) {
        std::fs::remove_file(self.path().join(name))
            .unwrap_or_else(|e| panic!("Failed to remove {name}: {e}"));
    }
}

/// [`SAMPLE_APPLICANT`] as a [`RawInput`].
#[must_use]
pub fn sample_input() -> RawInput {
    serde_json::from_str(SAMPLE_APPLICANT).expect("sample applicant is valid JSON")
}
