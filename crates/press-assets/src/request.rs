//! Declarative asset requests.
//!
//! Each request is an immutable value with a pure [`cache_key`] function.
//! Field-wise equal requests produce the same key; changing any field that
//! affects the output changes it.
//!
//! [`cache_key`]: AssetRequest::cache_key

use crate::key::{CacheKey, KeyBuilder};
use crate::{AssetError, AssetResult};
use press_core::CmykColor;
use press_ops::{Filter, VignetteParams};
use std::path::{Path, PathBuf};

/// Vertical CMYK gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientRequest {
    /// Width in pixels.
    pub width_px: u32,
    /// Height in pixels.
    pub height_px: u32,
    /// Color of the first row.
    pub color_top: CmykColor,
    /// Color of the last row.
    pub color_bottom: CmykColor,
}

impl GradientRequest {
    /// Creates a gradient request.
    pub fn new(width_px: u32, height_px: u32, color_top: CmykColor, color_bottom: CmykColor) -> Self {
        Self {
            width_px,
            height_px,
            color_top,
            color_bottom,
        }
    }

    /// Checks that both dimensions are positive.
    pub fn validate(&self) -> AssetResult<()> {
        if self.width_px == 0 || self.height_px == 0 {
            return Err(AssetError::InvalidRequest(format!(
                "gradient size must be positive, got {}x{}",
                self.width_px, self.height_px
            )));
        }
        Ok(())
    }

    /// Cache key over all fields.
    pub fn cache_key(&self) -> CacheKey {
        KeyBuilder::new("gradient")
            .u32("width_px", self.width_px)
            .u32("height_px", self.height_px)
            .color("color_top", &self.color_top)
            .color("color_bottom", &self.color_bottom)
            .finish()
    }
}

/// Vignette fade applied to a source image.
#[derive(Debug, Clone, PartialEq)]
pub struct VignetteRequest {
    /// Source image.
    pub source: PathBuf,
    /// Fade fractions.
    pub params: VignetteParams,
    /// Cache file name (extension included) to use instead of the digest.
    ///
    /// A PNG or missing extension is remapped to `.jpg`; `..` and
    /// separators are rejected.
    pub output_name: Option<String>,
}

impl VignetteRequest {
    /// Request with the default fades (0.25 sides, 0.45 bottom, 0.05 top).
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            params: VignetteParams::default(),
            output_name: None,
        }
    }

    /// Sets the fade fractions.
    pub fn with_params(mut self, params: VignetteParams) -> Self {
        self.params = params;
        self
    }

    /// Names the output file.
    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = Some(name.into());
        self
    }

    /// Checks the fade fractions.
    pub fn validate(&self) -> AssetResult<()> {
        Ok(self.params.validate()?)
    }

    /// Cache key over the source path and the fades.
    pub fn cache_key(&self) -> CacheKey {
        KeyBuilder::new("vignette")
            .path("source", &self.source)
            .f64("edge_fade", self.params.edge_fade)
            .f64("bottom_fade", self.params.bottom_fade)
            .f64("top_fade", self.params.top_fade)
            .finish()
    }
}

/// QR code rendered in CMYK.
#[derive(Debug, Clone, PartialEq)]
pub struct QrRequest {
    /// Encoded text.
    pub payload: String,
    /// Edge length in pixels.
    pub size_px: u32,
    /// Quiet zone in modules.
    pub border_modules: u32,
    /// Dark module color.
    pub foreground: CmykColor,
    /// Light module color.
    pub background: CmykColor,
}

impl QrRequest {
    /// 400 px, 2-module border, black on white.
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            size_px: 400,
            border_modules: 2,
            foreground: CmykColor::BLACK,
            background: CmykColor::WHITE,
        }
    }

    /// Checks for a non-empty payload and a positive size.
    pub fn validate(&self) -> AssetResult<()> {
        if self.payload.is_empty() {
            return Err(AssetError::InvalidRequest("QR payload is empty".into()));
        }
        if self.size_px == 0 {
            return Err(AssetError::InvalidRequest("QR size must be positive".into()));
        }
        Ok(())
    }

    /// Cache key over all fields.
    pub fn cache_key(&self) -> CacheKey {
        KeyBuilder::new("qr")
            .str("payload", &self.payload)
            .u32("size_px", self.size_px)
            .u32("border_modules", self.border_modules)
            .color("foreground", &self.foreground)
            .color("background", &self.background)
            .finish()
    }
}

/// Conversion of an existing image to CMYK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmykConversionRequest {
    /// Source image.
    pub source: PathBuf,
    /// Explicit ICC output profile.
    pub profile: Option<PathBuf>,
    /// Cache file name (extension included) to use instead of the digest.
    ///
    /// A PNG or missing extension is remapped to `.jpg`; `..` and
    /// separators are rejected.
    pub output_name: Option<String>,
}

impl CmykConversionRequest {
    /// Converts `source` with the configured profile.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            profile: None,
            output_name: None,
        }
    }

    /// Uses an explicit ICC profile.
    pub fn with_profile(mut self, profile: impl Into<PathBuf>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Names the output file.
    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = Some(name.into());
        self
    }

    /// Cache key over the source path and profile.
    pub fn cache_key(&self) -> CacheKey {
        KeyBuilder::new("cmyk")
            .path("source", &self.source)
            .opt_path("profile", self.profile.as_deref())
            .finish()
    }
}

/// Logo resized to a target width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoRequest {
    /// Source logo.
    pub source: PathBuf,
    /// Output width; height follows the aspect ratio.
    pub target_width_px: u32,
    /// Keep alpha (as RGBA PNG) when the source has it.
    pub preserve_transparency: bool,
    /// Resampling filter.
    pub filter: Filter,
}

impl LogoRequest {
    /// Transparency-preserving logo request.
    pub fn new(source: impl Into<PathBuf>, target_width_px: u32) -> Self {
        Self {
            source: source.into(),
            target_width_px,
            preserve_transparency: true,
            filter: Filter::Lanczos3,
        }
    }

    /// Sets whether alpha is kept.
    pub fn preserve_transparency(mut self, preserve: bool) -> Self {
        self.preserve_transparency = preserve;
        self
    }

    /// Sets the resampling filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Checks for a positive width.
    pub fn validate(&self) -> AssetResult<()> {
        if self.target_width_px == 0 {
            return Err(AssetError::InvalidRequest("logo width must be positive".into()));
        }
        Ok(())
    }

    /// Cache key over all fields.
    pub fn cache_key(&self) -> CacheKey {
        KeyBuilder::new("logo")
            .path("source", &self.source)
            .u32("target_width_px", self.target_width_px)
            .bool("preserve_transparency", self.preserve_transparency)
            .str("filter", self.filter.name())
            .finish()
    }
}

/// Any request the pipeline can prepare.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetRequest {
    /// See [`GradientRequest`].
    Gradient(GradientRequest),
    /// See [`VignetteRequest`].
    Vignette(VignetteRequest),
    /// See [`QrRequest`].
    Qr(QrRequest),
    /// See [`CmykConversionRequest`].
    Cmyk(CmykConversionRequest),
    /// See [`LogoRequest`].
    Logo(LogoRequest),
}

impl AssetRequest {
    /// Cache key of the wrapped request.
    pub fn cache_key(&self) -> CacheKey {
        match self {
            Self::Gradient(r) => r.cache_key(),
            Self::Vignette(r) => r.cache_key(),
            Self::Qr(r) => r.cache_key(),
            Self::Cmyk(r) => r.cache_key(),
            Self::Logo(r) => r.cache_key(),
        }
    }

    /// Short kind name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Gradient(_) => "gradient",
            Self::Vignette(_) => "vignette",
            Self::Qr(_) => "qr",
            Self::Cmyk(_) => "cmyk",
            Self::Logo(_) => "logo",
        }
    }

    /// Source image, for requests that have one.
    pub fn source(&self) -> Option<&Path> {
        match self {
            Self::Vignette(r) => Some(&r.source),
            Self::Cmyk(r) => Some(&r.source),
            Self::Logo(r) => Some(&r.source),
            Self::Gradient(_) | Self::Qr(_) => None,
        }
    }
}

impl From<GradientRequest> for AssetRequest {
    fn from(r: GradientRequest) -> Self {
        Self::Gradient(r)
    }
}

impl From<VignetteRequest> for AssetRequest {
    fn from(r: VignetteRequest) -> Self {
        Self::Vignette(r)
    }
}

impl From<QrRequest> for AssetRequest {
    fn from(r: QrRequest) -> Self {
        Self::Qr(r)
    }
}

impl From<CmykConversionRequest> for AssetRequest {
    fn from(r: CmykConversionRequest) -> Self {
        Self::Cmyk(r)
    }
}

impl From<LogoRequest> for AssetRequest {
    fn from(r: LogoRequest) -> Self {
        Self::Logo(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ink(c: f64, k: f64) -> CmykColor {
        CmykColor::new(c, 0.0, 0.0, k).unwrap()
    }

    #[test]
    fn test_equal_requests_equal_keys() {
        let a = GradientRequest::new(100, 100, CmykColor::WHITE, CmykColor::BLACK);
        let b = a.clone();
        assert_eq!(a.cache_key(), b.cache_key());
        assert_eq!(AssetRequest::from(a.clone()).cache_key(), a.cache_key());
    }

    #[test]
    fn test_each_field_changes_key() {
        let base = GradientRequest::new(100, 200, ink(10.0, 0.0), ink(0.0, 90.0));
        let variants = [
            GradientRequest { width_px: 101, ..base.clone() },
            GradientRequest { height_px: 201, ..base.clone() },
            GradientRequest { color_top: ink(11.0, 0.0), ..base.clone() },
            GradientRequest { color_bottom: ink(0.0, 91.0), ..base.clone() },
            // swapped dimensions
            GradientRequest { width_px: 200, height_px: 100, ..base.clone() },
        ];
        for v in &variants {
            assert_ne!(v.cache_key(), base.cache_key(), "{v:?}");
        }
    }

    #[test]
    fn test_vignette_key() {
        let a = VignetteRequest::new("img/hero.png");
        assert_eq!(a.cache_key(), VignetteRequest::new("img/hero.png").cache_key());
        assert_ne!(a.cache_key(), VignetteRequest::new("img/other.png").cache_key());

        let p = VignetteParams::new(0.25, 0.45, 0.10).unwrap();
        assert_ne!(a.cache_key(), a.clone().with_params(p).cache_key());
        // output name only renames the file
        assert_eq!(a.cache_key(), a.clone().with_output_name("hero_faded").cache_key());
    }

    #[test]
    fn test_kinds_do_not_collide() {
        let cmyk = CmykConversionRequest::new("a.png").cache_key();
        let logo = LogoRequest::new("a.png", 100).cache_key();
        let vignette = VignetteRequest::new("a.png").cache_key();
        assert_ne!(cmyk, logo);
        assert_ne!(cmyk, vignette);
        assert_ne!(cmyk, CmykConversionRequest::new("a.png").with_profile("p.icc").cache_key());
    }

    #[test]
    fn test_logo_filter_in_key() {
        let lanczos = LogoRequest::new("logo.png", 300);
        assert_eq!(lanczos.filter, Filter::Lanczos3);
        let bicubic = lanczos.clone().with_filter(Filter::Bicubic);
        assert_ne!(lanczos.cache_key(), bicubic.cache_key());
        assert_eq!(bicubic.cache_key(), LogoRequest::new("logo.png", 300).with_filter(Filter::Bicubic).cache_key());
    }

    #[test]
    fn test_validation() {
        assert!(GradientRequest::new(0, 1, CmykColor::WHITE, CmykColor::BLACK).validate().is_err());
        assert!(QrRequest::new("").validate().is_err());
        assert!(QrRequest::new("x").validate().is_ok());
        assert!(LogoRequest::new("a.png", 0).validate().is_err());
        let mut v = VignetteRequest::new("a.png");
        v.params.top_fade = -0.1;
        assert!(v.validate().is_err());
    }

    #[test]
    fn test_qr_defaults() {
        let q = QrRequest::new("https://example.com");
        assert_eq!((q.size_px, q.border_modules), (400, 2));
        assert_eq!(q.foreground, CmykColor::BLACK);
        assert_eq!(q.background, CmykColor::WHITE);
        assert_eq!(AssetRequest::from(q).kind(), "qr");
    }
}
