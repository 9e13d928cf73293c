//! Filesystem-based testing utilities
//!
//! Builds workdir layouts (`<namespace>/fixtures/<name>.toml`) inside a
//! temporary directory that is removed on drop.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory fixture with automatic cleanup
pub struct TempDirFixture {
    /// The temporary directory (automatically cleaned up on drop)
    pub temp_dir: TempDir,
}

impl TempDirFixture {
    /// Create a new temporary directory fixture
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let temp_dir = tempfile::tempdir()?;
        Ok(Self { temp_dir })
    }

    /// Get the path to the temporary directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a subdirectory within the temporary directory
    pub fn create_dir(&self, subdir: &str) -> Result<(), Box<dyn std::error::Error>> {
        fs::create_dir_all(self.path().join(subdir))?;
        Ok(())
    }

    /// Write content to a file within the temporary directory
    pub fn write_file(
        &self,
        file_path: &str,
        content: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let full_path = self.path().join(file_path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full_path, content)?;
        Ok(())
    }

    /// Write a fixture manifest at `<namespace>/fixtures/<name>.toml`
    pub fn write_manifest(
        &self,
        namespace: &str,
        name: &str,
        content: &str,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let relative = format!("{namespace}/fixtures/{name}.toml");
        self.write_file(&relative, content)?;
        Ok(self.path().join(relative))
    }

    /// Read content from a file within the temporary directory
    pub fn read_file(&self, file_path: &str) -> Result<String, Box<dyn std::error::Error>> {
        Ok(fs::read_to_string(self.path().join(file_path))?)
    }

    /// Check if a file exists within the temporary directory
    pub fn file_exists(&self, file_path: &str) -> bool {
        self.path().join(file_path).exists()
    }
}

#[cfg(test)]
mod tests {
    include!("filesystem.test.rs");
}
