//! Integration tests for format dispatch and atomic writes.

use press_core::{ColorMode, Raster};
use press_io::{cmyk_output_path, is_cmyk, probe_mode, read, write, write_with, Format, IoError, WriteOptions};
use std::path::Path;

fn cmyk_raster() -> Raster {
    let mut raster = Raster::new(32, 16, ColorMode::Cmyk).unwrap();
    raster.fill(&[10, 20, 30, 40]);
    raster
}

#[test]
fn dispatch_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let rgb = Raster::from_raw(4, 4, ColorMode::Rgb, vec![90; 48]).unwrap();

    for name in ["a.png", "a.jpg", "a.tif"] {
        let path = dir.path().join(name);
        write(&path, &rgb).unwrap();
        let back = read(&path).unwrap();
        assert_eq!(back.mode(), ColorMode::Rgb, "{name}");
        assert_eq!((back.width(), back.height()), (4, 4));
    }
}

#[test]
fn cmyk_to_png_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ink.png");

    let err = write(&path, &cmyk_raster()).unwrap_err();
    assert!(matches!(err, IoError::UnsupportedMode { .. }));
    // nothing left behind
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn remapped_cmyk_path_is_writable() {
    let dir = tempfile::tempdir().unwrap();
    let out = cmyk_output_path(&dir.path().join("ink.png"));
    assert_eq!(out.extension().unwrap(), "jpg");

    write_with(&out, &cmyk_raster(), &WriteOptions::with_jpeg_quality(90)).unwrap();
    assert!(is_cmyk(&out));
    assert_eq!(probe_mode(&out).unwrap(), ColorMode::Cmyk);
}

#[test]
fn detect_prefers_magic_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let tif = dir.path().join("really_tiff.tif");
    write(&tif, &cmyk_raster()).unwrap();

    let misnamed = dir.path().join("misnamed.jpg");
    std::fs::copy(&tif, &misnamed).unwrap();

    assert_eq!(Format::detect(&misnamed).unwrap(), Format::Tiff);
    assert_eq!(read(&misnamed).unwrap(), cmyk_raster());
}

#[test]
fn unknown_and_missing() {
    let dir = tempfile::tempdir().unwrap();
    let rgb = Raster::new(1, 1, ColorMode::Rgb).unwrap();
    assert!(matches!(
        write(dir.path().join("a.bmp"), &rgb),
        Err(IoError::UnsupportedFormat(_))
    ));
    assert!(read(Path::new("/nonexistent/image.png")).is_err());
    assert!(!is_cmyk("/nonexistent/image.jpg"));
}
