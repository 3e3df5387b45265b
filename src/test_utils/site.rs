//! Temporary site directories for rendering tests.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding documents to render.
///
/// Paths handed out are absolute strings with `/` separators, the form
/// documents use for references. The directory is removed on drop.
pub struct TestSite {
    temp: TempDir,
}

impl TestSite {
    /// Creates an empty site.
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp: TempDir::new().context("Failed to create temporary site directory")?,
        })
    }

    /// Root directory of the site.
    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Absolute path of `rel` inside the site, as a string.
    pub fn path(&self, rel: &str) -> String {
        self.root().join(rel).to_string_lossy().replace('\\', "/")
    }

    /// Writes `content` to `rel`, creating parent directories, and returns
    /// the absolute path.
    pub fn write(&self, rel: &str, content: &str) -> Result<String> {
        let full: PathBuf = self.root().join(rel);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&full, content).with_context(|| format!("Failed to write {}", full.display()))?;
        Ok(self.path(rel))
    }

    /// Reads `rel` back as text.
    pub fn read(&self, rel: &str) -> Result<String> {
        let full = self.root().join(rel);
        fs::read_to_string(&full).with_context(|| format!("Failed to read {}", full.display()))
    }

    /// Whether `rel` exists inside the site.
    pub fn exists(&self, rel: &str) -> bool {
        self.root().join(rel).exists()
    }
}
