//! File-level CMYK conversion.

use crate::{direct_cmyk, ColorError, ColorResult};
use press_core::{ColorMode, Raster};
use press_icc::{CmykTransform, Intent, Profile, ProfileLookup, ProfileSearch};
use press_io::{cmyk_output_path, Format, WriteOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};

/// How a raster reached CMYK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionPath {
    /// The source was already CMYK and was passed through.
    AlreadyCmyk,
    /// Converted through the ICC profile at this path.
    Profile(PathBuf),
    /// Converted with the direct formula.
    Fallback,
}

/// Result of [`CmykConverter::ensure_cmyk_detailed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Where the CMYK image was written (extension-corrected).
    pub path: PathBuf,
    /// Which route produced it.
    pub via: ConversionPath,
}

/// Converts images to CMYK, preferring an ICC output profile.
///
/// Conversion order:
///
/// 1. CMYK input is passed through unchanged.
/// 2. If a profile is found (explicit path, else the search list), alpha is
///    composited over white and an sRGB to profile transform is applied.
///    Any profile failure is logged and falls through.
/// 3. Otherwise the direct per-pixel formula is used ([`direct_cmyk`]).
///
/// # Example
///
/// ```rust,no_run
/// use press_color::CmykConverter;
/// use press_icc::ProfileSearch;
/// use std::path::Path;
///
/// let converter = CmykConverter::new(ProfileSearch::standard(Path::new("assets")));
/// let out = converter.ensure_cmyk(Path::new("photo.png"), None, None)?;
/// assert_eq!(out, Path::new("photo.jpg"));
/// # Ok::<(), press_color::ColorError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CmykConverter {
    search: ProfileSearch,
    intent: Intent,
    write_options: WriteOptions,
}

impl CmykConverter {
    /// Creates a converter using `search` to locate output profiles.
    pub fn new(search: ProfileSearch) -> Self {
        Self {
            search,
            intent: Intent::Perceptual,
            write_options: WriteOptions::default(),
        }
    }

    /// Sets the rendering intent for profile transforms.
    pub fn with_intent(mut self, intent: Intent) -> Self {
        self.intent = intent;
        self
    }

    /// Sets the JPEG quality used for written outputs.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.write_options = WriteOptions::with_jpeg_quality(quality);
        self
    }

    /// Profile search list in use.
    pub fn search(&self) -> &ProfileSearch {
        &self.search
    }

    /// Encoder options in use.
    pub fn write_options(&self) -> &WriteOptions {
        &self.write_options
    }

    /// Converts `source` to CMYK and returns the written path.
    ///
    /// `output` defaults to `source`; either way the extension is corrected
    /// with [`cmyk_output_path`].
    ///
    /// # Errors
    ///
    /// [`ColorError::ImageRead`] if the source cannot be decoded and
    /// [`ColorError::Write`] if the result cannot be stored. Profile
    /// problems are not errors.
    pub fn ensure_cmyk(&self, source: &Path, output: Option<&Path>, profile: Option<&Path>) -> ColorResult<PathBuf> {
        Ok(self.ensure_cmyk_detailed(source, output, profile)?.path)
    }

    /// Like [`ensure_cmyk`](Self::ensure_cmyk), also reporting the route taken.
    pub fn ensure_cmyk_detailed(
        &self,
        source: &Path,
        output: Option<&Path>,
        profile: Option<&Path>,
    ) -> ColorResult<Conversion> {
        trace!(source = %source.display(), "ensure_cmyk");

        let raster = press_io::read(source).map_err(|e| ColorError::ImageRead {
            path: source.to_path_buf(),
            source: e,
        })?;
        let dest = cmyk_output_path(output.unwrap_or(source));

        if raster.mode() == ColorMode::Cmyk {
            if dest != source {
                self.store_existing(source, &dest, &raster)?;
            }
            debug!(path = %dest.display(), "source already CMYK");
            return Ok(Conversion {
                path: dest,
                via: ConversionPath::AlreadyCmyk,
            });
        }

        let (cmyk, via) = self.convert_raster(&raster, profile)?;
        self.write(&dest, &cmyk)?;
        info!(
            source = %source.display(),
            dest = %dest.display(),
            via = ?via,
            "converted to CMYK"
        );

        Ok(Conversion { path: dest, via })
    }

    /// Converts an in-memory raster, returning the CMYK raster and its route.
    pub fn convert_raster(&self, raster: &Raster, profile: Option<&Path>) -> ColorResult<(Raster, ConversionPath)> {
        if raster.mode() == ColorMode::Cmyk {
            return Ok((raster.clone(), ConversionPath::AlreadyCmyk));
        }

        let rgb = raster.flatten_to_rgb()?;

        if let ProfileLookup::Profile(path) = self.search.locate(profile) {
            match profile_transform(&rgb, &path, self.intent) {
                Ok(cmyk) => return Ok((cmyk, ConversionPath::Profile(path))),
                Err(e) => warn!(
                    profile = %path.display(),
                    error = %e,
                    "ICC conversion failed, using direct formula"
                ),
            }
        }

        Ok((direct_cmyk(&rgb)?, ConversionPath::Fallback))
    }

    fn store_existing(&self, source: &Path, dest: &Path, raster: &Raster) -> ColorResult<()> {
        let same_container = matches!(Format::detect(source), Ok(f) if f == Format::from_extension(dest));
        let result = if same_container {
            press_io::copy_atomic(source, dest)
        } else {
            press_io::write_with(dest, raster, &self.write_options)
        };
        result.map_err(|e| ColorError::Write {
            path: dest.to_path_buf(),
            source: e,
        })
    }

    fn write(&self, dest: &Path, raster: &Raster) -> ColorResult<()> {
        press_io::write_with(dest, raster, &self.write_options).map_err(|e| ColorError::Write {
            path: dest.to_path_buf(),
            source: e,
        })
    }
}

/// Converts an RGB raster through the CMYK output profile at `profile`.
pub fn profile_transform(rgb: &Raster, profile: &Path, intent: Intent) -> ColorResult<Raster> {
    let dest = Profile::from_file(profile)?;
    let transform = CmykTransform::new(&Profile::srgb(), &dest, intent)?;
    let data = transform.convert_buffer(rgb.data())?;
    Ok(Raster::from_raw(rgb.width(), rgb.height(), ColorMode::Cmyk, data)?)
}
