//! ICC profile wrapper.

use crate::{IccError, IccResult};
use lcms2::{ColorSpaceSignature, Profile as LcmsProfile};
use std::path::Path;

/// An ICC color profile.
///
/// Source images are assumed to be sRGB ([`Profile::srgb`]); the destination
/// is a CMYK output profile loaded from disk.
///
/// # Example
///
/// ```rust,no_run
/// use press_icc::Profile;
/// use std::path::Path;
///
/// let press = Profile::from_file(Path::new("ISOcoated_v2_300_eci.icc")).unwrap();
/// assert!(press.is_cmyk());
/// println!("Description: {}", press.description());
/// ```
pub struct Profile {
    /// Internal lcms2 profile handle.
    pub(crate) inner: LcmsProfile,
}

impl Profile {
    /// Loads a profile from an ICC file.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or contains invalid data.
    pub fn from_file(path: &Path) -> IccResult<Self> {
        let inner = LcmsProfile::new_file(path)
            .map_err(|e| IccError::LoadFailed(format!("{}: {}", path.display(), e)))?;
        Ok(Self { inner })
    }

    /// Creates a profile from raw ICC data.
    pub fn from_icc(data: &[u8]) -> IccResult<Self> {
        let inner = LcmsProfile::new_icc(data).map_err(|e| IccError::InvalidProfile(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Creates an sRGB profile (IEC 61966-2-1).
    pub fn srgb() -> Self {
        Self {
            inner: LcmsProfile::new_srgb(),
        }
    }

    /// Returns the profile description.
    pub fn description(&self) -> String {
        self.inner
            .info(lcms2::InfoType::Description, lcms2::Locale::none())
            .unwrap_or_default()
    }

    /// Returns the color space signature.
    pub fn color_space(&self) -> String {
        format!("{:?}", self.inner.color_space())
    }

    /// Returns true if this is an RGB profile.
    pub fn is_rgb(&self) -> bool {
        matches!(self.inner.color_space(), ColorSpaceSignature::RgbData)
    }

    /// Returns true if this is a CMYK profile.
    pub fn is_cmyk(&self) -> bool {
        matches!(self.inner.color_space(), ColorSpaceSignature::CmykData)
    }

    /// Exports the profile as ICC data, e.g. for embedding in an output file.
    pub fn to_icc(&self) -> IccResult<Vec<u8>> {
        self.inner.icc().map_err(|e| IccError::InvalidProfile(e.to_string()))
    }
}

impl std::fmt::Debug for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("description", &self.description())
            .field("color_space", &self.color_space())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srgb() {
        let profile = Profile::srgb();
        assert!(profile.is_rgb());
        assert!(!profile.is_cmyk());
        assert!(!profile.description().is_empty());
    }

    #[test]
    fn test_icc_roundtrip() {
        let data = Profile::srgb().to_icc().unwrap();
        assert!(!data.is_empty());
        assert!(Profile::from_icc(&data).unwrap().is_rgb());
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.icc");
        std::fs::write(&path, b"definitely not an icc profile").unwrap();
        assert!(matches!(Profile::from_file(&path), Err(IccError::LoadFailed(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(Profile::from_file(Path::new("/nonexistent/press.icc")).is_err());
    }
}
