//! CLI command implementations

pub mod clear;
pub mod cmyk;
pub mod gradient;
pub mod info;
pub mod logo;
pub mod palette;
pub mod qr;
pub mod vignette;

use anyhow::{bail, Context, Result};
use press_assets::{AssetPipeline, PipelineConfig};
use press_core::{CmykColor, Palette};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolved configuration shared by all commands.
pub struct Session {
    pub config: PipelineConfig,
    pub palette: Palette,
    pub verbose: bool,
}

impl Session {
    /// Loads the config file (if any) and applies command-line overrides.
    pub fn load(config: Option<&Path>, cache_dir: Option<PathBuf>, no_force_cmyk: bool, verbose: bool) -> Result<Self> {
        let mut config = match config {
            Some(path) => PipelineConfig::from_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => PipelineConfig::default(),
        };
        if let Some(dir) = cache_dir {
            config.cache_dir = dir;
        }
        if no_force_cmyk {
            config.force_cmyk = false;
        }

        let palette = config.load_palette().context("Failed to load palette")?;
        debug!(
            cache_dir = %config.cache_dir.display(),
            force_cmyk = config.force_cmyk,
            profile = ?config.profile,
            colors = palette.len(),
            "configuration loaded"
        );
        Ok(Self {
            config,
            palette,
            verbose,
        })
    }

    /// Opens the asset pipeline.
    pub fn pipeline(&self) -> Result<AssetPipeline> {
        AssetPipeline::from_config(&self.config)
            .with_context(|| format!("Failed to open cache: {}", self.config.cache_dir.display()))
    }

    /// Resolves a palette name or `c,m,y,k` percentages.
    pub fn color(&self, spec: &str) -> Result<CmykColor> {
        parse_color(spec, &self.palette)
    }
}

/// Parses `c,m,y,k` percentages, else looks the name up in the palette.
pub fn parse_color(spec: &str, palette: &Palette) -> Result<CmykColor> {
    if !spec.contains(',') {
        return palette
            .require(spec)
            .with_context(|| format!("Unknown color '{}'", spec));
    }

    let parts = spec
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Invalid color '{}'", spec))?;
    let &[c, m, y, k] = parts.as_slice() else {
        bail!("Color '{}' needs four components (c,m,y,k)", spec);
    };
    CmykColor::new(c, m, y, k).with_context(|| format!("Invalid color '{}'", spec))
}

/// Prints the prepared path, with counters when verbose.
pub fn report(path: &Path, pipeline: &AssetPipeline, verbose: bool) {
    println!("{}", path.display());
    if verbose {
        let stats = pipeline.stats();
        eprintln!("  generated: {}, cache hits: {}", stats.generated, stats.cache_hits);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_components() {
        let palette = Palette::new();
        let c = parse_color("60, 40, 40, 100", &palette).unwrap();
        assert_eq!(c.channels(), [60.0, 40.0, 40.0, 100.0]);
        assert!(parse_color("1,2,3", &palette).is_err());
        assert!(parse_color("1,2,3,x", &palette).is_err());
        assert!(parse_color("0,0,0,120", &palette).is_err());
    }

    #[test]
    fn test_parse_palette_name() {
        let palette = Palette::exhibit();
        assert_eq!(parse_color("rich_black", &palette).unwrap(), palette.get("rich_black").unwrap());
        assert!(parse_color("chartreuse", &palette).is_err());
    }
}
