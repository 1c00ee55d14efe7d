//! Temporary manifest directories
//!
//! Each fixture owns a fresh temporary directory that is removed on drop, so
//! tests never see each other's manifests or dumps.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory holding build manifests and dumps
pub struct ManifestFixture {
    /// The temporary directory (automatically cleaned up on drop)
    pub temp_dir: TempDir,
}

impl ManifestFixture {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            temp_dir: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` to `file_path` under the fixture, creating parents
    pub fn write_file(&self, file_path: &str, content: &str) -> std::io::Result<PathBuf> {
        let full_path = self.path().join(file_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full_path, content)?;
        Ok(full_path)
    }

    pub fn read_file(&self, file_path: &str) -> std::io::Result<String> {
        fs::read_to_string(self.path().join(file_path))
    }

    pub fn file_exists(&self, file_path: &str) -> bool {
        self.path().join(file_path).exists()
    }
}

#[cfg(test)]
mod tests {
    include!("filesystem.test.rs");
}
