//! Request-driven asset preparation over a [`CacheStore`].

use crate::config::PipelineConfig;
use crate::key::CacheKey;
use crate::request::{AssetRequest, CmykConversionRequest, GradientRequest, LogoRequest, QrRequest, VignetteRequest};
use crate::store::{CacheStore, DEFAULT_EXTENSION};
use crate::{AssetError, AssetResult};
use press_color::CmykConverter;
use press_core::{ColorMode, Raster};
use press_icc::ProfileSearch;
use press_io::cmyk_output_path;
use press_ops::qr::{render_qr, QrStyle};
use press_ops::resize::{resize, scale_to_width};
use press_ops::{gradient, vignette};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, trace};

/// Counters observed since the pipeline was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Assets generated (cache misses).
    pub generated: u64,
    /// Requests answered from the cache.
    pub cache_hits: u64,
}

/// Prepares print assets, generating each distinct request once.
///
/// Every request is reduced to a [`CacheKey`]. If a file for that key is
/// already in the cache it is returned; otherwise the asset is generated,
/// written atomically, and its path returned. CMYK outputs always land in a
/// CMYK-capable container ([`cmyk_output_path`]).
///
/// # Example
///
/// ```rust,no_run
/// use press_assets::{AssetPipeline, GradientRequest};
/// use press_core::CmykColor;
///
/// let pipeline = AssetPipeline::new("asset_cache")?;
/// let request = GradientRequest::new(100, 100, CmykColor::WHITE, CmykColor::BLACK);
/// let path = pipeline.prepare_gradient(&request)?;
/// assert_eq!(path.extension().unwrap(), "jpg");
/// # Ok::<(), press_assets::AssetError>(())
/// ```
#[derive(Debug)]
pub struct AssetPipeline {
    store: CacheStore,
    converter: CmykConverter,
    force_cmyk: bool,
    profile: Option<PathBuf>,
    generated: AtomicU64,
    cache_hits: AtomicU64,
}

impl AssetPipeline {
    /// Pipeline over `cache_dir` with the standard profile search rooted at
    /// `assets`, forcing CMYK output.
    pub fn new(cache_dir: impl Into<PathBuf>) -> AssetResult<Self> {
        let converter = CmykConverter::new(ProfileSearch::standard(Path::new("assets")));
        Ok(Self {
            store: CacheStore::open(cache_dir)?,
            converter,
            force_cmyk: true,
            profile: None,
            generated: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
        })
    }

    /// Pipeline configured from a [`PipelineConfig`].
    pub fn from_config(config: &PipelineConfig) -> AssetResult<Self> {
        config.validate()?;
        let converter = CmykConverter::new(config.profile_search()).with_jpeg_quality(config.jpeg_quality);
        Ok(Self::new(&config.cache_dir)?
            .with_converter(converter)
            .with_force_cmyk(config.force_cmyk)
            .with_profile(config.profile.clone()))
    }

    /// Replaces the CMYK converter.
    pub fn with_converter(mut self, converter: CmykConverter) -> Self {
        self.converter = converter;
        self
    }

    /// Enables or disables CMYK conversion of sources and logos.
    pub fn with_force_cmyk(mut self, force: bool) -> Self {
        self.force_cmyk = force;
        self
    }

    /// Default ICC profile for requests that do not name one.
    pub fn with_profile(mut self, profile: Option<PathBuf>) -> Self {
        self.profile = profile;
        self
    }

    /// The cache store.
    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Whether sources and logos are converted to CMYK.
    pub fn force_cmyk(&self) -> bool {
        self.force_cmyk
    }

    /// Current counters.
    pub fn stats(&self) -> PipelineStats {
        PipelineStats {
            generated: self.generated.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
        }
    }

    /// Empties the cache directory.
    pub fn clear(&self) -> AssetResult<()> {
        self.store.clear()
    }

    /// Prepares any request.
    pub fn prepare(&self, request: &AssetRequest) -> AssetResult<PathBuf> {
        trace!(kind = request.kind(), "prepare");
        match request {
            AssetRequest::Gradient(r) => self.prepare_gradient(r),
            AssetRequest::Vignette(r) => self.prepare_vignette(r),
            AssetRequest::Qr(r) => self.prepare_qr(r),
            AssetRequest::Cmyk(r) => self.prepare_cmyk(r),
            AssetRequest::Logo(r) => self.prepare_logo(r),
        }
    }

    /// Vertical CMYK gradient.
    pub fn prepare_gradient(&self, request: &GradientRequest) -> AssetResult<PathBuf> {
        request.validate()?;
        let target = self.store.get_path(&request.cache_key(), DEFAULT_EXTENSION);
        if let Some(hit) = self.lookup(&target, "gradient") {
            return Ok(hit);
        }

        let raster = gradient::make_gradient(
            request.width_px,
            request.height_px,
            &request.color_top,
            &request.color_bottom,
        )?;
        self.persist(&target, &raster, "gradient")
    }

    /// Vignetted copy of a source image.
    ///
    /// With CMYK forcing on, the source goes through the cached conversion
    /// first (the same entry [`prepare_cmyk`](Self::prepare_cmyk) would
    /// produce); otherwise it is converted in memory.
    pub fn prepare_vignette(&self, request: &VignetteRequest) -> AssetResult<PathBuf> {
        request.validate()?;
        let target = self.target(&request.cache_key(), request.output_name.as_deref())?;
        if let Some(hit) = self.lookup(&target, "vignette") {
            return Ok(hit);
        }

        let cmyk = if self.force_cmyk {
            let intermediate = self.prepare_cmyk(&CmykConversionRequest::new(&request.source))?;
            read_source(&intermediate)?
        } else {
            let raster = read_source(&request.source)?;
            self.converter.convert_raster(&raster, self.profile.as_deref())?.0
        };

        let faded = vignette::apply_vignette(&cmyk, &request.params)?;
        self.persist(&target, &faded, "vignette")
    }

    /// QR code rendered in CMYK.
    pub fn prepare_qr(&self, request: &QrRequest) -> AssetResult<PathBuf> {
        request.validate()?;
        let target = self.store.get_path(&request.cache_key(), DEFAULT_EXTENSION);
        if let Some(hit) = self.lookup(&target, "qr") {
            return Ok(hit);
        }

        let style = QrStyle {
            size_px: request.size_px,
            border_modules: request.border_modules,
            foreground: request.foreground,
            background: request.background,
        };
        let raster = render_qr(&request.payload, &style)?;
        self.persist(&target, &raster, "qr")
    }

    /// CMYK version of a source image.
    ///
    /// Returns the source path untouched when CMYK forcing is off.
    pub fn prepare_cmyk(&self, request: &CmykConversionRequest) -> AssetResult<PathBuf> {
        if !self.force_cmyk {
            debug!(source = %request.source.display(), "CMYK forcing off, using source");
            return Ok(request.source.clone());
        }

        let target = self.target(&request.cache_key(), request.output_name.as_deref())?;
        if let Some(hit) = self.lookup(&target, "cmyk") {
            return Ok(hit);
        }

        let profile = request.profile.as_deref().or(self.profile.as_deref());
        let conversion = self
            .converter
            .ensure_cmyk_detailed(&request.source, Some(&target), profile)?;

        self.generated.fetch_add(1, Ordering::Relaxed);
        info!(
            kind = "cmyk",
            source = %request.source.display(),
            path = %conversion.path.display(),
            via = ?conversion.via,
            "generated asset"
        );
        Ok(conversion.path)
    }

    /// Logo scaled to a target width.
    pub fn prepare_logo(&self, request: &LogoRequest) -> AssetResult<PathBuf> {
        request.validate()?;
        let target = self.store.get_path(&request.cache_key(), DEFAULT_EXTENSION);
        if let Some(hit) = self.lookup(&target, "logo") {
            return Ok(hit);
        }

        let source = read_source(&request.source)?;
        let (width, height) = scale_to_width(source.width(), source.height(), request.target_width_px);
        let resized = resize(&source, width, height, request.filter)?;

        let keep_alpha = request.preserve_transparency && resized.mode().has_alpha();
        let output = if keep_alpha || resized.mode() == ColorMode::Cmyk {
            resized
        } else {
            let rgb = resized.flatten_to_rgb()?;
            if self.force_cmyk {
                self.converter.convert_raster(&rgb, self.profile.as_deref())?.0
            } else {
                rgb
            }
        };
        self.persist(&target, &output, "logo")
    }

    /// Requested cache path: the digest with the default extension, or the
    /// caller's file name as given.
    fn target(&self, key: &CacheKey, output_name: Option<&str>) -> AssetResult<PathBuf> {
        match output_name {
            Some(name) => self.store.named_path(name),
            None => Ok(self.store.get_path(key, DEFAULT_EXTENSION)),
        }
    }

    /// Finds an existing entry, checking the CMYK container first.
    fn lookup(&self, requested: &Path, kind: &'static str) -> Option<PathBuf> {
        let found = [cmyk_output_path(requested), requested.to_path_buf()]
            .into_iter()
            .find(|p| p.is_file())?;

        self.cache_hits.fetch_add(1, Ordering::Relaxed);
        debug!(kind, path = %found.display(), "cache hit");
        Some(found)
    }

    fn persist(&self, requested: &Path, raster: &Raster, kind: &'static str) -> AssetResult<PathBuf> {
        let path = if raster.mode() == ColorMode::Cmyk {
            cmyk_output_path(requested)
        } else {
            requested.to_path_buf()
        };

        press_io::write_with(&path, raster, self.converter.write_options()).map_err(|source| {
            AssetError::CacheWrite {
                path: path.clone(),
                source,
            }
        })?;

        self.generated.fetch_add(1, Ordering::Relaxed);
        info!(
            kind,
            width = raster.width(),
            height = raster.height(),
            mode = %raster.mode(),
            path = %path.display(),
            "generated asset"
        );
        Ok(path)
    }
}

fn read_source(path: &Path) -> AssetResult<Raster> {
    press_io::read(path).map_err(|source| AssetError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })
}
