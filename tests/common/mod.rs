//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::path::Path;
use tempfile::TempDir;

use healthcost::testing::STANDARD_ARTIFACTS;

pub use healthcost::testing::SAMPLE_APPLICANT;

/// Temporary directory with all four artifacts written into it.
pub fn artifact_dir() -> TempDir {
    let temp = TempDir::new().unwrap();
    write_standard(temp.path());
    temp
}

/// Write the standard artifact set into an existing directory.
pub fn write_standard(dir: &Path) {
    for (name, content) in STANDARD_ARTIFACTS {
        write(dir, name, content);
    }
}

pub fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}
