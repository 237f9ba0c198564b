//! Named CMYK color palettes.
//!
//! A palette is plain configuration: it is loaded (or built) once and passed
//! to whatever needs brand colors, so tests can swap in their own palette.
//!
//! # YAML Format
//!
//! ```yaml
//! colors:
//!   background: {c: 3, m: 1, y: 0, k: 2}
//!   rich_black: {c: 60, m: 40, y: 40, k: 100}
//! ```

use crate::{CmykColor, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A set of named [`CmykColor`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    #[serde(default)]
    colors: BTreeMap<String, CmykColor>,
}

impl Palette {
    /// Creates an empty palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// The exhibit brand palette.
    ///
    /// Values were derived from the brand hex colors and tuned on press;
    /// they are not what [`CmykColor::from_hex`] would produce.
    pub fn exhibit() -> Self {
        let entries = [
            ("background", [3.0, 1.0, 0.0, 2.0]),
            ("headline_text", [85.0, 60.0, 40.0, 60.0]),
            ("accent_primary", [70.0, 0.0, 10.0, 0.0]),
            ("accent_light", [40.0, 0.0, 0.0, 0.0]),
            ("accent_muted", [15.0, 0.0, 0.0, 0.0]),
            ("accent_dark", [85.0, 25.0, 20.0, 5.0]),
            ("rich_black", [60.0, 40.0, 40.0, 100.0]),
            ("pure_white", [0.0, 0.0, 0.0, 0.0]),
        ];
        let colors = entries
            .into_iter()
            .filter_map(|(name, [c, m, y, k])| {
                CmykColor::new(c, m, y, k).ok().map(|color| (name.to_string(), color))
            })
            .collect();
        Self { colors }
    }

    /// Parses a palette from YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a palette from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Adds or replaces a color.
    pub fn insert(&mut self, name: impl Into<String>, color: CmykColor) {
        self.colors.insert(name.into(), color);
    }

    /// Looks up a color by name.
    pub fn get(&self, name: &str) -> Option<CmykColor> {
        self.colors.get(name).copied()
    }

    /// Looks up a color by name, failing with [`Error::UnknownColor`].
    pub fn require(&self, name: &str) -> Result<CmykColor> {
        self.get(name).ok_or_else(|| Error::UnknownColor(name.to_string()))
    }

    /// Iterates colors in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CmykColor)> {
        self.colors.iter().map(|(name, color)| (name.as_str(), color))
    }

    /// Number of colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True when the palette has no colors.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhibit_palette() {
        let palette = Palette::exhibit();
        assert_eq!(palette.len(), 8);
        assert_eq!(
            palette.require("rich_black").unwrap(),
            CmykColor::new(60.0, 40.0, 40.0, 100.0).unwrap()
        );
        assert_eq!(palette.get("pure_white"), Some(CmykColor::WHITE));
        assert!(matches!(palette.require("neon"), Err(Error::UnknownColor(_))));
    }

    #[test]
    fn test_yaml_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("palette.yaml");
        std::fs::write(
            &path,
            "colors:\n  ink: {c: 10, m: 20, y: 30, k: 40}\n  paper: {c: 0, m: 0, y: 0, k: 0}\n",
        )
        .unwrap();

        let palette = Palette::from_file(&path).unwrap();
        let names: Vec<&str> = palette.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["ink", "paper"]);
        assert_eq!(palette.require("ink").unwrap().channels(), [10.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn test_yaml_rejects_out_of_range() {
        let result = Palette::from_yaml_str("colors:\n  bad: {c: 0, m: 0, y: 0, k: 101}\n");
        assert!(matches!(result, Err(Error::Yaml(_))));
    }
}
