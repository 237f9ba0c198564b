//! Vertical linear gradients in CMYK.

use crate::{OpsError, OpsResult};
use press_core::color::percent_to_byte;
use press_core::{CmykColor, ColorMode, Raster};
use rayon::prelude::*;

/// Interpolation factor for row `y` of a `height`-row gradient.
///
/// 0 at the top row, 1 at the bottom row; a single row is all `top`.
#[inline]
pub fn row_factor(y: u32, height: u32) -> f64 {
    if height > 1 {
        y as f64 / (height - 1) as f64
    } else {
        0.0
    }
}

/// Builds a `width` x `height` CMYK raster blending `top` into `bottom`.
///
/// Every row is constant; channel values are the linearly interpolated
/// percentages mapped to 0-255.
///
/// ```rust
/// use press_core::CmykColor;
/// use press_ops::gradient::make_gradient;
///
/// let g = make_gradient(4, 3, &CmykColor::WHITE, &CmykColor::BLACK).unwrap();
/// assert_eq!(g.pixel(0, 0), &[0, 0, 0, 0]);
/// assert_eq!(g.pixel(3, 1), &[0, 0, 0, 128]);
/// assert_eq!(g.pixel(2, 2), &[0, 0, 0, 255]);
/// ```
pub fn make_gradient(width: u32, height: u32, top: &CmykColor, bottom: &CmykColor) -> OpsResult<Raster> {
    if width == 0 || height == 0 {
        return Err(OpsError::InvalidDimensions(format!(
            "gradient size must be positive, got {}x{}",
            width, height
        )));
    }

    let mut raster = Raster::new(width, height, ColorMode::Cmyk)?;
    let row_len = raster.row_len();

    raster
        .data_mut()
        .par_chunks_exact_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            let ink = top.lerp(bottom, row_factor(y as u32, height)).map(percent_to_byte);
            for px in row.chunks_exact_mut(4) {
                px.copy_from_slice(&ink);
            }
        });

    Ok(raster)
}
