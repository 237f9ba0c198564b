//! Pipeline configuration.
//!
//! # Example
//!
//! ```yaml
//! cache_dir: build/asset_cache
//! force_cmyk: true
//! assets_dir: assets
//! profile: assets/color/ISOcoated_v2_300_eci.icc
//! jpeg_quality: 95
//! palette: brand_palette.yaml
//! ```
//!
//! Relative paths are resolved against the directory of the config file.

use crate::{AssetError, AssetResult};
use press_core::Palette;
use press_icc::ProfileSearch;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for an [`AssetPipeline`](crate::AssetPipeline).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Cache directory.
    pub cache_dir: PathBuf,
    /// Convert every output to CMYK.
    pub force_cmyk: bool,
    /// Asset tree searched for ICC profiles (`<assets_dir>/color/...`).
    pub assets_dir: PathBuf,
    /// Explicit ICC output profile; overrides the search list.
    pub profile: Option<PathBuf>,
    /// JPEG encoder quality for CMYK outputs.
    pub jpeg_quality: u8,
    /// Palette YAML; the built-in exhibit palette when absent.
    pub palette: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("asset_cache"),
            force_cmyk: true,
            assets_dir: PathBuf::from("assets"),
            profile: None,
            jpeg_quality: press_io::jpeg::DEFAULT_QUALITY,
            palette: None,
        }
    }
}

impl PipelineConfig {
    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> AssetResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| AssetError::Config(format!("{}: {}", path.display(), e)))?;
        let working_dir = path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let mut config = Self::from_yaml_str(&content)?;
        config.resolve_relative(&working_dir);
        Ok(config)
    }

    /// Parses configuration from YAML; paths are kept as written.
    pub fn from_yaml_str(yaml: &str) -> AssetResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> AssetResult<()> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(AssetError::Config(format!(
                "jpeg_quality must be in 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }

    fn resolve_relative(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.cache_dir);
        resolve(&mut self.assets_dir);
        if let Some(p) = self.profile.as_mut() {
            resolve(p);
        }
        if let Some(p) = self.palette.as_mut() {
            resolve(p);
        }
    }

    /// Standard profile search rooted at `assets_dir`.
    pub fn profile_search(&self) -> ProfileSearch {
        ProfileSearch::standard(&self.assets_dir)
    }

    /// Loads the configured palette, or the built-in one.
    pub fn load_palette(&self) -> AssetResult<Palette> {
        match &self.palette {
            Some(path) => Ok(Palette::from_file(path)?),
            None => Ok(Palette::exhibit()),
        }
    }
}
