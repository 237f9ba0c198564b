//! QR codes rendered straight into CMYK.
//!
//! The symbol is encoded with error-correction level H and rasterized by
//! nearest-neighbour sampling of the module grid (quiet zone included) onto a
//! square of `size_px` pixels, so module edges stay hard at any size.
//!
//! Encoding needs the `qr` feature (on by default). Without it
//! [`render_qr`] returns [`OpsError::Unsupported`].

use crate::{OpsError, OpsResult};
use press_core::{CmykColor, ColorMode, Raster};
use rayon::prelude::*;

/// Appearance of a rendered QR code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QrStyle {
    /// Output edge length in pixels.
    pub size_px: u32,
    /// Quiet zone width in modules.
    pub border_modules: u32,
    /// Dark module color.
    pub foreground: CmykColor,
    /// Light module and quiet zone color.
    pub background: CmykColor,
}

impl Default for QrStyle {
    fn default() -> Self {
        Self {
            size_px: 400,
            border_modules: 2,
            foreground: CmykColor::BLACK,
            background: CmykColor::WHITE,
        }
    }
}

/// Encodes `payload` and renders it as a CMYK raster.
#[cfg(feature = "qr")]
pub fn render_qr(payload: &str, style: &QrStyle) -> OpsResult<Raster> {
    use qrcode::{Color, EcLevel, QrCode};

    if payload.is_empty() {
        return Err(OpsError::InvalidParameter("QR payload is empty".into()));
    }

    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)
        .map_err(|e| OpsError::InvalidParameter(format!("QR payload: {}", e)))?;
    let dark: Vec<bool> = code.to_colors().into_iter().map(|c| c == Color::Dark).collect();

    tracing::trace!(modules = code.width(), size = style.size_px, "render_qr");
    render_modules(&dark, code.width(), style)
}

/// Encodes `payload` and renders it as a CMYK raster.
#[cfg(not(feature = "qr"))]
pub fn render_qr(payload: &str, style: &QrStyle) -> OpsResult<Raster> {
    let _ = (payload, style);
    Err(OpsError::Unsupported(
        "QR rendering needs press-ops built with the `qr` feature".into(),
    ))
}

/// Rasterizes a square module grid (`true` = dark, row-major).
pub fn render_modules(dark: &[bool], modules: usize, style: &QrStyle) -> OpsResult<Raster> {
    if modules == 0 || dark.len() != modules * modules {
        return Err(OpsError::InvalidDimensions(format!(
            "{} modules for a {}x{} grid",
            dark.len(),
            modules,
            modules
        )));
    }

    let size = style.size_px;
    let mut raster = Raster::new(size, size, ColorMode::Cmyk)?;

    let border = style.border_modules as usize;
    let total = modules + 2 * border;
    let fg = style.foreground.to_bytes();
    let bg = style.background.to_bytes();

    // module index for each pixel coordinate, None in the quiet zone
    let lookup: Vec<Option<usize>> = (0..size as usize)
        .map(|p| {
            let m = p * total / size as usize;
            (border..border + modules).contains(&m).then(|| m - border)
        })
        .collect();

    let row_len = raster.row_len();
    raster
        .data_mut()
        .par_chunks_exact_mut(row_len)
        .zip(lookup.par_iter())
        .for_each(|(row, &my)| {
            for (px, &mx) in row.chunks_exact_mut(4).zip(&lookup) {
                let is_dark = match (mx, my) {
                    (Some(mx), Some(my)) => dark[my * modules + mx],
                    _ => false,
                };
                px.copy_from_slice(if is_dark { &fg } else { &bg });
            }
        });

    Ok(raster)
}
