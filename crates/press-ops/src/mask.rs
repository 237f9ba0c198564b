//! 8-bit alpha masks for compositing RGB artwork.
//!
//! These are the RGB counterparts of the CMYK fades: instead of removing ink,
//! they produce an `L` mask that is attached as an alpha channel.

use crate::vignette::{factor_tables, VignetteParams};
use crate::{OpsError, OpsResult};
use press_core::{ColorMode, Raster};
use rayon::prelude::*;

/// Linear bottom fade: opaque (255) above the fade zone, ramping to 0 at the
/// last row.
///
/// The zone is `trunc(height * fraction)` rows deep.
///
/// ```rust
/// use press_ops::mask::bottom_fade_mask;
///
/// let mask = bottom_fade_mask(2, 10, 0.5).unwrap();
/// assert_eq!(mask.pixel(0, 4), &[255]);
/// assert_eq!(mask.pixel(0, 5), &[255]);
/// assert_eq!(mask.pixel(1, 7), &[153]);
/// ```
pub fn bottom_fade_mask(width: u32, height: u32, fraction: f64) -> OpsResult<Raster> {
    if !(0.0..=1.0).contains(&fraction) {
        return Err(OpsError::InvalidParameter(format!(
            "fade fraction must be in [0, 1], got {}",
            fraction
        )));
    }

    let mut mask = Raster::new(width, height, ColorMode::Gray)?;
    let fade_rows = (height as f64 * fraction) as u32;
    let fade_start = height - fade_rows;

    mask.data_mut()
        .par_chunks_exact_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as u32;
            let alpha = if y < fade_start {
                255
            } else {
                (255.0 * (1.0 - (y - fade_start) as f64 / fade_rows as f64)) as u8
            };
            row.fill(alpha);
        });

    Ok(mask)
}

/// Alpha mask carrying the vignette opacity, `trunc(255 * opacity)`.
pub fn vignette_mask(width: u32, height: u32, params: &VignetteParams) -> OpsResult<Raster> {
    params.validate()?;
    let mut mask = Raster::new(width, height, ColorMode::Gray)?;
    let (cols, rows) = factor_tables(width, height, params);

    mask.data_mut()
        .par_chunks_exact_mut(width as usize)
        .zip(rows.par_iter())
        .for_each(|(row, &row_opacity)| {
            for (v, &col_opacity) in row.iter_mut().zip(&cols) {
                *v = (255.0 * (row_opacity * col_opacity)) as u8;
            }
        });

    Ok(mask)
}

/// Attaches `mask` as the alpha channel of an RGB or RGBA raster.
///
/// An existing alpha channel is replaced.
pub fn apply_alpha_mask(image: &Raster, mask: &Raster) -> OpsResult<Raster> {
    if mask.mode() != ColorMode::Gray {
        return Err(OpsError::InvalidParameter(format!("mask must be L, got {}", mask.mode())));
    }
    if (image.width(), image.height()) != (mask.width(), mask.height()) {
        return Err(OpsError::SizeMismatch(format!(
            "image {}x{} vs mask {}x{}",
            image.width(),
            image.height(),
            mask.width(),
            mask.height()
        )));
    }

    let channels = match image.mode() {
        ColorMode::Rgb => 3,
        ColorMode::Rgba => 4,
        mode => return Err(OpsError::UnsupportedMode { op: "alpha mask", mode }),
    };

    let data: Vec<u8> = image
        .data()
        .par_chunks_exact(channels)
        .zip(mask.data().par_iter())
        .flat_map_iter(|(px, &a)| [px[0], px[1], px[2], a])
        .collect();

    Ok(Raster::from_raw(image.width(), image.height(), ColorMode::Rgba, data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bottom_fade_ramp() {
        let mask = bottom_fade_mask(3, 100, 0.35).unwrap();
        assert_eq!(mask.pixel(0, 64), &[255]);
        assert_eq!(mask.pixel(0, 65), &[255]);
        assert!(mask.pixel(0, 99)[0] < 10);
        let column: Vec<u8> = (0..100).map(|y| mask.pixel(2, y)[0]).collect();
        assert!(column.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_bottom_fade_disabled() {
        let mask = bottom_fade_mask(4, 4, 0.0).unwrap();
        assert!(mask.data().iter().all(|&v| v == 255));
        assert!(bottom_fade_mask(4, 4, 2.0).is_err());
    }

    #[test]
    fn test_vignette_mask_matches_opacity() {
        let p = VignetteParams::default();
        let mask = vignette_mask(50, 40, &p).unwrap();
        for (x, y) in [(0, 0), (25, 20), (3, 38), (49, 10)] {
            let expected = (255.0 * crate::vignette::opacity_at(x, y, 50, 40, &p)) as u8;
            assert_eq!(mask.pixel(x, y)[0], expected);
        }
    }

    #[test]
    fn test_apply_alpha_mask() {
        let rgb = Raster::from_raw(2, 1, ColorMode::Rgb, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let mask = Raster::from_raw(2, 1, ColorMode::Gray, vec![0, 200]).unwrap();
        let rgba = apply_alpha_mask(&rgb, &mask).unwrap();
        assert_eq!(rgba.mode(), ColorMode::Rgba);
        assert_eq!(rgba.data(), &[1, 2, 3, 0, 4, 5, 6, 200]);

        let wrong = Raster::new(3, 1, ColorMode::Gray).unwrap();
        assert!(matches!(apply_alpha_mask(&rgb, &wrong), Err(OpsError::SizeMismatch(_))));

        let cmyk = Raster::new(4, 4, ColorMode::Cmyk).unwrap();
        let mask = Raster::new(4, 4, ColorMode::Gray).unwrap();
        assert!(matches!(
            apply_alpha_mask(&cmyk, &mask),
            Err(OpsError::UnsupportedMode { mode: ColorMode::Cmyk, .. })
        ));
    }
}
