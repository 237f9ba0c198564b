//! Multi-edge vignette fades.
//!
//! Opacity starts at 1.0 for every pixel and is multiplied by one factor per
//! edge whose fade zone contains the pixel:
//!
//! | Edge         | Zone depth             | Easing        |
//! |--------------|------------------------|---------------|
//! | left, right  | `edge_fade * width`    | [`smoothstep`] |
//! | top          | `top_fade * height`    | [`smoothstep`] |
//! | bottom       | `bottom_fade * height` | cubic `t^3`    |
//!
//! Distances are measured in whole pixels from the edge (`x`, `width-1-x`,
//! `y`, `height-1-y`), so the outermost row or column always gets opacity 0
//! when its edge is enabled. Corner zones compound. A fraction of 0 disables
//! an edge.
//!
//! Applied to CMYK, every ink channel is scaled by the opacity, i.e. the
//! image fades toward bare paper.

use crate::{OpsError, OpsResult};
use press_core::{ColorMode, Raster};
use rayon::prelude::*;
use tracing::trace;

/// Fade fractions for [`apply_vignette`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VignetteParams {
    /// Fraction of the width faded on the left and right sides.
    pub edge_fade: f64,
    /// Fraction of the height faded at the bottom.
    pub bottom_fade: f64,
    /// Fraction of the height faded at the top.
    pub top_fade: f64,
}

impl Default for VignetteParams {
    fn default() -> Self {
        Self {
            edge_fade: 0.25,
            bottom_fade: 0.45,
            top_fade: 0.05,
        }
    }
}

impl VignetteParams {
    /// Creates parameters, rejecting fractions outside [0, 1].
    pub fn new(edge_fade: f64, bottom_fade: f64, top_fade: f64) -> OpsResult<Self> {
        let params = Self {
            edge_fade,
            bottom_fade,
            top_fade,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks that every fraction is in [0, 1].
    pub fn validate(&self) -> OpsResult<()> {
        for (name, value) in [
            ("edge_fade", self.edge_fade),
            ("bottom_fade", self.bottom_fade),
            ("top_fade", self.top_fade),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(OpsError::InvalidParameter(format!(
                    "{} must be in [0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Hermite smoothstep, `t^2 (3 - 2t)`.
#[inline]
pub fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn cubic(t: f64) -> f64 {
    t * t * t
}

#[inline]
fn edge(distance: u32, zone: f64, ease: fn(f64) -> f64) -> f64 {
    let d = distance as f64;
    if d < zone { ease(d / zone) } else { 1.0 }
}

#[inline]
fn column_factor(x: u32, width: u32, params: &VignetteParams) -> f64 {
    let zone = params.edge_fade * width as f64;
    edge(x, zone, smoothstep) * edge(width - 1 - x, zone, smoothstep)
}

#[inline]
fn row_factor(y: u32, height: u32, params: &VignetteParams) -> f64 {
    let top = params.top_fade * height as f64;
    let bottom = params.bottom_fade * height as f64;
    edge(y, top, smoothstep) * edge(height - 1 - y, bottom, cubic)
}

/// Opacity of pixel (`x`, `y`) in a `width` x `height` image.
///
/// `x` and `y` must lie inside the image.
///
/// ```rust
/// use press_ops::vignette::{opacity_at, VignetteParams};
///
/// let p = VignetteParams::new(0.25, 0.45, 0.10).unwrap();
/// assert_eq!(opacity_at(500, 500, 1000, 1000, &p), 1.0);
/// assert_eq!(opacity_at(0, 999, 1000, 1000, &p), 0.0);
/// ```
pub fn opacity_at(x: u32, y: u32, width: u32, height: u32, params: &VignetteParams) -> f64 {
    column_factor(x, width, params) * row_factor(y, height, params)
}

/// Per-column and per-row opacity factors; their product is the pixel opacity.
pub(crate) fn factor_tables(width: u32, height: u32, params: &VignetteParams) -> (Vec<f64>, Vec<f64>) {
    let cols = (0..width).map(|x| column_factor(x, width, params)).collect();
    let rows = (0..height).map(|y| row_factor(y, height, params)).collect();
    (cols, rows)
}

/// Returns a faded copy of a CMYK raster.
///
/// # Errors
///
/// [`OpsError::UnsupportedMode`] for non-CMYK input, [`OpsError::InvalidParameter`]
/// for fractions outside [0, 1].
pub fn apply_vignette(src: &Raster, params: &VignetteParams) -> OpsResult<Raster> {
    let mut out = src.clone();
    apply_vignette_in_place(&mut out, params)?;
    Ok(out)
}

/// Fades a CMYK raster in place.
pub fn apply_vignette_in_place(raster: &mut Raster, params: &VignetteParams) -> OpsResult<()> {
    params.validate()?;
    if raster.mode() != ColorMode::Cmyk {
        return Err(OpsError::UnsupportedMode {
            op: "vignette",
            mode: raster.mode(),
        });
    }

    let (width, height) = (raster.width(), raster.height());
    trace!(width, height, ?params, "apply_vignette");

    let (cols, rows) = factor_tables(width, height, params);
    let row_len = raster.row_len();

    raster
        .data_mut()
        .par_chunks_exact_mut(row_len)
        .zip(rows.par_iter())
        .for_each(|(row, &row_opacity)| {
            for (px, &col_opacity) in row.chunks_exact_mut(4).zip(&cols) {
                let opacity = row_opacity * col_opacity;
                if opacity < 1.0 {
                    for v in px.iter_mut() {
                        *v = (*v as f64 * opacity) as u8;
                    }
                }
            }
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn full_ink(width: u32, height: u32) -> Raster {
        let mut r = Raster::new(width, height, ColorMode::Cmyk).unwrap();
        r.fill(&[255, 255, 255, 255]);
        r
    }

    #[test]
    fn test_smoothstep() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_relative_eq!(smoothstep(0.5), 0.5);
    }

    #[test]
    fn test_boundary_opacity() {
        let p = VignetteParams::new(0.25, 0.45, 0.10).unwrap();
        assert_eq!(opacity_at(500, 500, 1000, 1000, &p), 1.0);
        assert_eq!(opacity_at(0, 999, 1000, 1000, &p), 0.0);
        // just inside the left zone
        assert!(opacity_at(249, 500, 1000, 1000, &p) < 1.0);
        assert_eq!(opacity_at(250, 500, 1000, 1000, &p), 1.0);
    }

    #[test]
    fn test_bottom_is_cubic() {
        let p = VignetteParams::new(0.0, 0.5, 0.0).unwrap();
        // zone = 50 rows, pixel 25 rows above the last one
        assert_relative_eq!(opacity_at(10, 74, 100, 100, &p), 0.125);
    }

    #[test]
    fn test_corners_compound() {
        let p = VignetteParams::new(0.5, 0.0, 0.5).unwrap();
        let o = opacity_at(25, 25, 100, 100, &p);
        assert_relative_eq!(o, smoothstep(0.5) * smoothstep(0.5));
    }

    #[test]
    fn test_zero_disables() {
        let p = VignetteParams::new(0.0, 0.0, 0.0).unwrap();
        let src = full_ink(20, 10);
        assert_eq!(apply_vignette(&src, &p).unwrap(), src);
    }

    #[test]
    fn test_fades_toward_paper() {
        let src = full_ink(40, 40);
        let out = apply_vignette(&src, &VignetteParams::default()).unwrap();
        assert_eq!(out.pixel(0, 20), &[0, 0, 0, 0]);
        assert_eq!(out.pixel(20, 39), &[0, 0, 0, 0]);
        assert_eq!(out.pixel(20, 10), &[255, 255, 255, 255]);
    }

    #[test]
    fn test_matches_opacity() {
        let p = VignetteParams::default();
        let src = full_ink(33, 21);
        let out = apply_vignette(&src, &p).unwrap();
        for (x, y) in [(1, 1), (5, 17), (30, 2), (16, 20)] {
            let expected = (255.0 * opacity_at(x, y, 33, 21, &p)) as u8;
            assert_eq!(out.pixel(x, y)[3], expected);
        }
    }

    #[test]
    fn test_rejects() {
        assert!(VignetteParams::new(1.5, 0.0, 0.0).is_err());
        assert!(VignetteParams::new(0.1, f64::NAN, 0.0).is_err());
        let rgb = Raster::new(4, 4, ColorMode::Rgb).unwrap();
        assert!(matches!(
            apply_vignette(&rgb, &VignetteParams::default()),
            Err(OpsError::UnsupportedMode {
                op: "vignette",
                mode: ColorMode::Rgb
            })
        ));
    }
}
