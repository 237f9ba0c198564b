//! RGB to CMYK transforms between ICC profiles.

use crate::{IccError, IccResult, Intent, Profile};
use lcms2::{PixelFormat, Transform as LcmsTransform};

/// A transform from 8-bit RGB to 8-bit CMYK.
///
/// CMYK samples follow the usual ink convention: 0 is no ink, 255 is full
/// coverage.
///
/// # Example
///
/// ```rust,no_run
/// use press_icc::{CmykTransform, Intent, Profile};
/// use std::path::Path;
///
/// let press = Profile::from_file(Path::new("USWebCoatedSWOP.icc")).unwrap();
/// let transform = CmykTransform::new(&Profile::srgb(), &press, Intent::Perceptual).unwrap();
///
/// let cmyk = transform.convert_buffer(&[255, 255, 255, 0, 0, 0]).unwrap();
/// assert_eq!(cmyk.len(), 8);
/// ```
pub struct CmykTransform {
    inner: LcmsTransform<[u8; 3], [u8; 4]>,
}

impl CmykTransform {
    /// Creates a new transform between an RGB source and a CMYK destination.
    ///
    /// # Errors
    ///
    /// [`IccError::ColorSpaceMismatch`] if either profile has the wrong color
    /// space, [`IccError::TransformFailed`] if Little CMS rejects the pair.
    pub fn new(source: &Profile, dest: &Profile, intent: Intent) -> IccResult<Self> {
        if !source.is_rgb() {
            return Err(IccError::ColorSpaceMismatch {
                expected: "RgbData".into(),
                actual: source.color_space(),
            });
        }
        if !dest.is_cmyk() {
            return Err(IccError::ColorSpaceMismatch {
                expected: "CmykData".into(),
                actual: dest.color_space(),
            });
        }

        let inner = LcmsTransform::new(
            &source.inner,
            PixelFormat::RGB_8,
            &dest.inner,
            PixelFormat::CMYK_8,
            intent.into(),
        )
        .map_err(|e| IccError::TransformFailed(e.to_string()))?;

        Ok(Self { inner })
    }

    /// Transforms pixels from source to destination buffer.
    pub fn apply(&self, source: &[[u8; 3]], dest: &mut [[u8; 4]]) {
        assert_eq!(source.len(), dest.len(), "source and dest must have same length");
        self.inner.transform_pixels(source, dest);
    }

    /// Transforms a flat interleaved RGB buffer into a flat CMYK buffer.
    pub fn convert_buffer(&self, rgb: &[u8]) -> IccResult<Vec<u8>> {
        if rgb.len() % 3 != 0 {
            return Err(IccError::LengthMismatch {
                source_len: rgb.len(),
                dest_len: rgb.len() / 3 * 4,
            });
        }

        let source: Vec<[u8; 3]> = rgb.chunks_exact(3).map(|px| [px[0], px[1], px[2]]).collect();
        let mut dest = vec![[0u8; 4]; source.len()];
        self.inner.transform_pixels(&source, &mut dest);

        Ok(dest.into_iter().flatten().collect())
    }
}

impl std::fmt::Debug for CmykTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmykTransform").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_rgb_destination() {
        let err = CmykTransform::new(&Profile::srgb(), &Profile::srgb(), Intent::Perceptual).unwrap_err();
        assert!(matches!(err, IccError::ColorSpaceMismatch { .. }));
    }

    #[test]
    fn test_intent_mapping() {
        assert!(matches!(lcms2::Intent::from(Intent::default()), lcms2::Intent::Perceptual));
        assert!(matches!(
            lcms2::Intent::from(Intent::RelativeColorimetric),
            lcms2::Intent::RelativeColorimetric
        ));
    }
}
