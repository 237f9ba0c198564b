//! Flat on-disk cache directory.

use crate::key::CacheKey;
use crate::{AssetError, AssetResult};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::info;

/// Extension used when a caller does not name one.
pub const DEFAULT_EXTENSION: &str = ".png";

/// Maps cache keys to files `{key}{extension}` in one flat directory.
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    /// Opens (and creates if needed) the cache directory.
    pub fn open(root: impl Into<PathBuf>) -> AssetResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| AssetError::CacheDir {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    /// Cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path for `key` with `extension` (e.g. `".png"`, or `""` for none).
    ///
    /// Pure; nothing is touched on disk.
    pub fn get_path(&self, key: &CacheKey, extension: &str) -> PathBuf {
        self.root.join(format!("{}{}", key, extension))
    }

    /// Path for a caller-chosen file name, used as given.
    ///
    /// The name must be a single plain path component so the entry stays
    /// inside the cache root.
    pub fn named_path(&self, name: &str) -> AssetResult<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(file)), None) => Ok(self.root.join(file)),
            _ => Err(AssetError::InvalidRequest(format!(
                "output name must be a plain file name, got {:?}",
                name
            ))),
        }
    }

    /// Returns true if a file exists for `key` with `extension`.
    pub fn exists(&self, key: &CacheKey, extension: &str) -> bool {
        self.get_path(key, extension).is_file()
    }

    /// Removes the whole cache directory and recreates it empty.
    pub fn clear(&self) -> AssetResult<()> {
        let wrap = |source| AssetError::CacheDir {
            path: self.root.clone(),
            source,
        };
        if self.root.exists() {
            fs::remove_dir_all(&self.root).map_err(wrap)?;
        }
        fs::create_dir_all(&self.root).map_err(wrap)?;
        info!(root = %self.root.display(), "cleared asset cache");
        Ok(())
    }

    /// Number of files currently in the cache.
    pub fn entry_count(&self) -> AssetResult<usize> {
        let entries = fs::read_dir(&self.root).map_err(|source| AssetError::CacheDir {
            path: self.root.clone(),
            source,
        })?;
        Ok(entries
            .filter_map(Result::ok)
            .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
            .count())
    }
}
