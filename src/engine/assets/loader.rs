// Asset loading functionality

use super::AssetError;
use anyhow::Result;
use std::path::{Component, Path, PathBuf};

/// File extensions recognised as animated image sequences
pub const SEQUENCE_EXTENSIONS: &[&str] = &["gif"];

/// Asset loader responsible for mapping server-style URLs onto files
///
/// A URL such as `/static/images/player/kyo/0.gif` resolves to
/// `<base_path>/static/images/player/kyo/0.gif`.
#[derive(Debug, Clone)]
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset URL
    ///
    /// Only absolute URLs made of plain path segments are accepted, so a URL
    /// can never escape the base path.
    pub fn resolve_url(&self, url: &str) -> Result<PathBuf, AssetError> {
        let Some(relative) = url.strip_prefix('/') else {
            return Err(AssetError::InvalidUrl(url.to_string()));
        };

        let relative = Path::new(relative);
        let plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if relative.as_os_str().is_empty() || !plain {
            return Err(AssetError::InvalidUrl(url.to_string()));
        }

        Ok(self.base_path.join(relative))
    }

    /// Load asset bytes from disk
    pub fn load_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let path = self.resolve_url(url)?;

        if !path.exists() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()).into());
        }

        std::fs::read(&path)
            .map_err(|e| AssetError::LoadError(format!("Failed to read {}: {}", url, e)).into())
    }

    /// Check if an asset exists
    pub fn exists(&self, url: &str) -> bool {
        self.resolve_url(url).map(|p| p.is_file()).unwrap_or(false)
    }

    /// List the image sequences inside a directory URL, sorted by name
    pub fn list_assets(&self, dir_url: &str) -> Result<Vec<String>> {
        let dir = self.resolve_url(dir_url)?;

        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut assets = Vec::new();

        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }
            let is_sequence = path
                .extension()
                .map(|ext| SEQUENCE_EXTENSIONS.contains(&ext.to_string_lossy().as_ref()))
                .unwrap_or(false);
            if let (true, Some(name)) = (is_sequence, path.file_name()) {
                assets.push(name.to_string_lossy().to_string());
            }
        }

        assets.sort();
        Ok(assets)
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}
