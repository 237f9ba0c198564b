//! Direct per-pixel conversion without a profile.

use crate::ColorResult;
use press_core::color::rgb8_to_cmyk8;
use press_core::{ColorMode, Raster};
use rayon::prelude::*;

/// Converts a raster to CMYK with the direct subtractive formula.
///
/// Non-RGB input is flattened first (alpha over white, gray expanded).
/// Each pixel goes through [`press_core::to_cmyk`], so the output matches the
/// single-color model exactly.
///
/// ```rust
/// use press_core::{ColorMode, Raster};
/// use press_color::direct_cmyk;
///
/// let rgb = Raster::from_raw(2, 1, ColorMode::Rgb, vec![0, 0, 0, 255, 255, 255]).unwrap();
/// let cmyk = direct_cmyk(&rgb).unwrap();
/// assert_eq!(cmyk.data(), &[0, 0, 0, 255, 0, 0, 0, 0]);
/// ```
pub fn direct_cmyk(raster: &Raster) -> ColorResult<Raster> {
    if raster.mode() == ColorMode::Cmyk {
        return Ok(raster.clone());
    }

    let flattened;
    let rgb = if raster.mode() == ColorMode::Rgb {
        raster
    } else {
        flattened = raster.flatten_to_rgb()?;
        &flattened
    };

    let data: Vec<u8> = rgb
        .data()
        .par_chunks_exact(3)
        .flat_map_iter(|px| rgb8_to_cmyk8([px[0], px[1], px[2]]))
        .collect();

    Ok(Raster::from_raw(rgb.width(), rgb.height(), ColorMode::Cmyk, data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use press_core::{to_cmyk, Rgb};

    #[test]
    fn test_matches_color_model() {
        let pixels = [[255u8, 0, 0], [12, 200, 99], [128, 128, 128], [1, 2, 3]];
        let data: Vec<u8> = pixels.iter().flatten().copied().collect();
        let rgb = Raster::from_raw(4, 1, ColorMode::Rgb, data).unwrap();
        let cmyk = direct_cmyk(&rgb).unwrap();

        for (i, px) in pixels.iter().enumerate() {
            assert_eq!(cmyk.pixel(i as u32, 0), &to_cmyk(Rgb::from_u8(*px)).to_bytes());
        }
    }

    #[test]
    fn test_alpha_over_white() {
        // fully transparent pixel becomes paper
        let rgba = Raster::from_raw(1, 1, ColorMode::Rgba, vec![0, 0, 0, 0]).unwrap();
        assert_eq!(direct_cmyk(&rgba).unwrap().data(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_gray() {
        let gray = Raster::from_raw(1, 1, ColorMode::Gray, vec![0]).unwrap();
        assert_eq!(direct_cmyk(&gray).unwrap().data(), &[0, 0, 0, 255]);
    }
}
