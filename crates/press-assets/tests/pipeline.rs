//! End-to-end pipeline behaviour against a temporary cache.

use press_assets::{
    AssetError, AssetPipeline, AssetRequest, CmykConversionRequest, GradientRequest, LogoRequest, PipelineConfig,
    PipelineStats, QrRequest, VignetteRequest,
};
use press_color::CmykConverter;
use press_core::{CmykColor, ColorMode, Raster};
use press_icc::ProfileSearch;
use press_ops::Filter;
use std::path::PathBuf;
use tempfile::TempDir;

fn pipeline(dir: &TempDir) -> AssetPipeline {
    AssetPipeline::new(dir.path().join("cache"))
        .unwrap()
        .with_converter(CmykConverter::new(ProfileSearch::with_candidates(Vec::new())))
}

fn source(dir: &TempDir, name: &str, mode: ColorMode, px: &[u8]) -> PathBuf {
    let mut raster = Raster::new(100, 30, mode).unwrap();
    raster.fill(px);
    let path = dir.path().join(name);
    press_io::write(&path, &raster).unwrap();
    path
}

fn white_to_black() -> GradientRequest {
    GradientRequest::new(100, 100, CmykColor::WHITE, CmykColor::BLACK)
}

#[test]
fn gradient_miss_then_hit() {
    let dir = tempfile::tempdir().unwrap();
    let p = pipeline(&dir);

    let first = p.prepare_gradient(&white_to_black()).unwrap();
    assert_eq!(p.store().entry_count().unwrap(), 1);
    assert_eq!(first.extension().unwrap(), "jpg");
    assert_eq!(first.parent(), Some(p.store().root()));
    assert_eq!(press_io::probe_mode(&first).unwrap(), ColorMode::Cmyk);

    let second = p.prepare(&AssetRequest::from(white_to_black())).unwrap();
    assert_eq!(first, second);
    assert_eq!(p.store().entry_count().unwrap(), 1);
    assert_eq!(
        p.stats(),
        PipelineStats {
            generated: 1,
            cache_hits: 1
        }
    );
}

#[test]
fn distinct_requests_distinct_files() {
    let dir = tempfile::tempdir().unwrap();
    let p = pipeline(&dir);

    let a = p.prepare_gradient(&white_to_black()).unwrap();
    let b = p
        .prepare_gradient(&GradientRequest::new(100, 100, CmykColor::BLACK, CmykColor::WHITE))
        .unwrap();
    assert_ne!(a, b);
    assert_eq!(p.store().entry_count().unwrap(), 2);
}

#[test]
fn cache_survives_new_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let first = pipeline(&dir).prepare_gradient(&white_to_black()).unwrap();

    let p = pipeline(&dir);
    assert_eq!(p.prepare_gradient(&white_to_black()).unwrap(), first);
    assert_eq!(p.stats().generated, 0);
}

#[test]
fn cmyk_conversion_cached() {
    let dir = tempfile::tempdir().unwrap();
    let src = source(&dir, "photo.png", ColorMode::Rgb, &[200, 100, 50]);
    let p = pipeline(&dir);

    let request = CmykConversionRequest::new(&src);
    let out = p.prepare_cmyk(&request).unwrap();
    assert_eq!(out.extension().unwrap(), "jpg");
    assert!(press_io::is_cmyk(&out));

    assert_eq!(p.prepare_cmyk(&request).unwrap(), out);
    assert_eq!(p.stats().generated, 1);

    let named = p.prepare_cmyk(&request.clone().with_output_name("photo_cmyk")).unwrap();
    assert_eq!(named, p.store().root().join("photo_cmyk.jpg"));
}

#[test]
fn cmyk_forcing_off_returns_source() {
    let dir = tempfile::tempdir().unwrap();
    let src = source(&dir, "photo.png", ColorMode::Rgb, &[200, 100, 50]);
    let p = pipeline(&dir).with_force_cmyk(false);

    assert_eq!(p.prepare_cmyk(&CmykConversionRequest::new(&src)).unwrap(), src);
    assert_eq!(p.store().entry_count().unwrap(), 0);
}

#[test]
fn vignette_writes_intermediate() {
    let dir = tempfile::tempdir().unwrap();
    let src = source(&dir, "hero.png", ColorMode::Rgb, &[255, 255, 255]);
    let p = pipeline(&dir);

    let request = VignetteRequest::new(&src).with_output_name("hero_faded");
    let out = p.prepare_vignette(&request).unwrap();
    assert_eq!(out, p.store().root().join("hero_faded.jpg"));

    // faded output plus the shared CMYK conversion of the source
    assert_eq!(p.store().entry_count().unwrap(), 2);
    let intermediate = p.prepare_cmyk(&CmykConversionRequest::new(&src)).unwrap();
    assert!(intermediate.is_file());
    assert_eq!(p.stats().generated, 2);

    let faded = press_io::read(&out).unwrap();
    assert_eq!(faded.mode(), ColorMode::Cmyk);
    assert_eq!((faded.width(), faded.height()), (100, 30));

    assert_eq!(p.prepare_vignette(&request).unwrap(), out);
    assert_eq!(p.stats().generated, 2);
}

#[test]
fn output_name_is_the_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let src = source(&dir, "hero.png", ColorMode::Rgb, &[120, 60, 30]);
    let p = pipeline(&dir);
    let root = p.store().root().to_path_buf();

    // CMYK-capable container kept as named
    let tif = p
        .prepare_vignette(&VignetteRequest::new(&src).with_output_name("hero_faded.tif"))
        .unwrap();
    assert_eq!(tif, root.join("hero_faded.tif"));
    assert!(press_io::is_cmyk(&tif));

    // PNG name is remapped, not extended
    let png = p
        .prepare_cmyk(&CmykConversionRequest::new(&src).with_output_name("hero.png"))
        .unwrap();
    assert_eq!(png, root.join("hero.jpg"));
    assert!(!root.join("hero.png.jpg").exists());

    // a later identical request finds the remapped file
    let again = p
        .prepare_cmyk(&CmykConversionRequest::new(&src).with_output_name("hero.png"))
        .unwrap();
    assert_eq!(again, png);
}

#[test]
fn output_name_stays_in_cache() {
    let dir = tempfile::tempdir().unwrap();
    let src = source(&dir, "hero.png", ColorMode::Rgb, &[120, 60, 30]);
    let p = pipeline(&dir);

    for name in ["../x", "nested/x.jpg", ".."] {
        assert!(
            matches!(
                p.prepare_vignette(&VignetteRequest::new(&src).with_output_name(name)),
                Err(AssetError::InvalidRequest(_))
            ),
            "{name}"
        );
        assert!(matches!(
            p.prepare_cmyk(&CmykConversionRequest::new(&src).with_output_name(name)),
            Err(AssetError::InvalidRequest(_))
        ));
    }
    assert!(!dir.path().join("x.jpg").exists());
    assert_eq!(p.store().entry_count().unwrap(), 0);
}

#[test]
fn vignette_without_forcing_converts_in_memory() {
    let dir = tempfile::tempdir().unwrap();
    let src = source(&dir, "hero.png", ColorMode::Rgb, &[10, 20, 30]);
    let p = pipeline(&dir).with_force_cmyk(false);

    let out = p.prepare_vignette(&VignetteRequest::new(&src)).unwrap();
    assert!(press_io::is_cmyk(&out));
    assert_eq!(p.store().entry_count().unwrap(), 1);
}

#[test]
fn logo_keeps_transparency() {
    let dir = tempfile::tempdir().unwrap();
    let src = source(&dir, "logo.png", ColorMode::Rgba, &[200, 0, 0, 128]);
    let p = pipeline(&dir);

    let out = p.prepare_logo(&LogoRequest::new(&src, 50)).unwrap();
    assert_eq!(out.extension().unwrap(), "png");
    let logo = press_io::read(&out).unwrap();
    assert_eq!(logo.mode(), ColorMode::Rgba);
    assert_eq!((logo.width(), logo.height()), (50, 15));
}

#[test]
fn logo_filter_is_its_own_entry() {
    let dir = tempfile::tempdir().unwrap();
    let src = source(&dir, "logo.png", ColorMode::Rgb, &[0, 80, 160]);
    let p = pipeline(&dir).with_force_cmyk(false);

    let lanczos = p.prepare_logo(&LogoRequest::new(&src, 40)).unwrap();
    let nearest = p
        .prepare_logo(&LogoRequest::new(&src, 40).with_filter(Filter::Nearest))
        .unwrap();
    assert_ne!(lanczos, nearest);
    assert_eq!(p.stats().generated, 2);

    // flat input stays flat under any filter
    let logo = press_io::read(&nearest).unwrap();
    assert_eq!((logo.width(), logo.height()), (40, 12));
    assert!(logo.data().chunks_exact(3).all(|px| px == [0, 80, 160]));
}

#[test]
fn logo_flattened_to_cmyk() {
    let dir = tempfile::tempdir().unwrap();
    let src = source(&dir, "logo.png", ColorMode::Rgba, &[200, 0, 0, 128]);
    let p = pipeline(&dir);

    let out = p
        .prepare_logo(&LogoRequest::new(&src, 50).preserve_transparency(false))
        .unwrap();
    assert_eq!(out.extension().unwrap(), "jpg");
    assert!(press_io::is_cmyk(&out));
}

#[test]
fn logo_rgb_without_forcing() {
    let dir = tempfile::tempdir().unwrap();
    let src = source(&dir, "logo.png", ColorMode::Rgb, &[0, 80, 160]);
    let p = pipeline(&dir).with_force_cmyk(false);

    let out = p.prepare_logo(&LogoRequest::new(&src, 200)).unwrap();
    assert_eq!(out.extension().unwrap(), "png");
    let logo = press_io::read(&out).unwrap();
    assert_eq!(logo.mode(), ColorMode::Rgb);
    assert_eq!((logo.width(), logo.height()), (200, 60));
}

#[cfg(feature = "qr")]
#[test]
fn qr_code() {
    let dir = tempfile::tempdir().unwrap();
    let p = pipeline(&dir);

    let mut request = QrRequest::new("https://example.com/exhibit");
    request.size_px = 200;
    let out = p.prepare_qr(&request).unwrap();
    assert_eq!(out.extension().unwrap(), "jpg");
    let qr = press_io::read(&out).unwrap();
    assert_eq!((qr.width(), qr.height(), qr.mode()), (200, 200, ColorMode::Cmyk));
}

#[test]
fn clear_forces_regeneration() {
    let dir = tempfile::tempdir().unwrap();
    let p = pipeline(&dir);

    let path = p.prepare_gradient(&white_to_black()).unwrap();
    p.clear().unwrap();
    assert!(!path.exists());
    assert_eq!(p.store().entry_count().unwrap(), 0);

    assert_eq!(p.prepare_gradient(&white_to_black()).unwrap(), path);
    assert_eq!(p.stats().generated, 2);
}

#[test]
fn invalid_requests() {
    let dir = tempfile::tempdir().unwrap();
    let p = pipeline(&dir);

    let zero = GradientRequest::new(0, 10, CmykColor::WHITE, CmykColor::BLACK);
    assert!(matches!(p.prepare_gradient(&zero), Err(AssetError::InvalidRequest(_))));
    assert!(matches!(p.prepare_qr(&QrRequest::new("")), Err(AssetError::InvalidRequest(_))));

    let missing = dir.path().join("missing.png");
    assert!(matches!(
        p.prepare_cmyk(&CmykConversionRequest::new(&missing)),
        Err(AssetError::ImageDecode { .. })
    ));
    assert!(matches!(
        p.prepare_logo(&LogoRequest::new(&missing, 10)),
        Err(AssetError::ImageDecode { .. })
    ));

    // failures leave nothing behind
    assert_eq!(p.store().entry_count().unwrap(), 0);
    assert_eq!(p.stats(), PipelineStats::default());
}

#[test]
fn from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("press.yaml");
    std::fs::write(&config_path, "cache_dir: out/cache\nforce_cmyk: false\nassets_dir: nowhere\n").unwrap();

    let config = PipelineConfig::from_file(&config_path).unwrap();
    let p = AssetPipeline::from_config(&config).unwrap();
    assert!(!p.force_cmyk());
    assert_eq!(p.store().root(), dir.path().join("out/cache"));
    assert!(p.store().root().is_dir());
}
