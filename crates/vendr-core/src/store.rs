//! Loading and saving the workspace manifest (`vendr.toml`).

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use vendr_schema::Manifest;

/// A manifest together with the file it was loaded from.
#[derive(Debug, Clone)]
pub struct Store {
    /// Location of the manifest file.
    pub path: PathBuf,
    /// The manifest contents.
    pub config: Manifest,
}

impl Store {
    /// Asynchronously load the manifest at `path`.
    ///
    /// If the file does not exist an empty manifest is returned, so a fresh
    /// workspace behaves like one with no modules.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self {
                path: path.to_path_buf(),
                config: Manifest::default(),
            });
        }

        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: Manifest = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            config,
        })
    }

    /// Replace the manifest contents.
    pub fn replace(&mut self, config: Manifest) {
        self.config = config;
    }

    /// Atomically persist the manifest.
    ///
    /// The file is first written to a temporary location and then renamed so
    /// that readers never observe a partially written manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, file writing, or the atomic rename
    /// fails.
    pub async fn save(&self) -> Result<()> {
        let content = toml::to_string_pretty(&self.config)?;

        // Atomic write: write to temp file, then rename
        let temp_path = self.path.with_extension("toml.tmp");
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&temp_path, &content).await?;
        fs::rename(&temp_path, &self.path).await?;

        Ok(())
    }
}
