//! Image resize and resampling.
//!
//! Separable two-pass resampling on 8-bit rasters. Rows of each pass run in
//! parallel. Rasters with alpha are resampled premultiplied so transparent
//! pixels do not bleed their color into the edges of a logo.
//!
//! # Filters
//!
//! - [`Filter::Nearest`] - No interpolation (blocky)
//! - [`Filter::Bilinear`] - Linear interpolation
//! - [`Filter::Bicubic`] - Mitchell-Netravali cubic
//! - [`Filter::Lanczos3`] - Sinc-based, best for downscaling artwork
//!
//! # Example
//!
//! ```rust
//! use press_core::{ColorMode, Raster};
//! use press_ops::resize::{resize, scale_to_width, Filter};
//!
//! let logo = Raster::new(400, 100, ColorMode::Rgba).unwrap();
//! let (w, h) = scale_to_width(logo.width(), logo.height(), 120);
//! let small = resize(&logo, w, h, Filter::Lanczos3).unwrap();
//! assert_eq!((small.width(), small.height()), (120, 30));
//! ```

use crate::{OpsError, OpsResult};
use press_core::Raster;
use rayon::prelude::*;
use tracing::trace;

/// Resampling filter for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// Nearest-neighbor (fastest, no interpolation).
    Nearest,
    /// Bilinear interpolation (smooth, fast).
    Bilinear,
    /// Bicubic interpolation (sharper than bilinear).
    Bicubic,
    /// Lanczos-3 (high quality, best for downscaling).
    #[default]
    Lanczos3,
}

impl Filter {
    /// Lowercase name, as accepted by [`FromStr`](std::str::FromStr).
    pub fn name(&self) -> &'static str {
        match self {
            Filter::Nearest => "nearest",
            Filter::Bilinear => "bilinear",
            Filter::Bicubic => "bicubic",
            Filter::Lanczos3 => "lanczos3",
        }
    }

    /// Returns the support radius for this filter.
    #[inline]
    pub fn support(&self) -> f32 {
        match self {
            Filter::Nearest => 0.5,
            Filter::Bilinear => 1.0,
            Filter::Bicubic => 2.0,
            Filter::Lanczos3 => 3.0,
        }
    }

    /// Evaluates the filter kernel at position x.
    #[inline]
    pub fn weight(&self, x: f32) -> f32 {
        let ax = x.abs();
        match self {
            Filter::Nearest => {
                if ax < 0.5 { 1.0 } else { 0.0 }
            }
            Filter::Bilinear => {
                if ax < 1.0 { 1.0 - ax } else { 0.0 }
            }
            Filter::Bicubic => mitchell(ax),
            Filter::Lanczos3 => lanczos(ax, 3.0),
        }
    }
}

impl std::str::FromStr for Filter {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(Filter::Nearest),
            "bilinear" | "linear" => Ok(Filter::Bilinear),
            "bicubic" | "mitchell" => Ok(Filter::Bicubic),
            "lanczos3" | "lanczos" => Ok(Filter::Lanczos3),
            other => Err(OpsError::InvalidParameter(format!("unknown filter '{}'", other))),
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Mitchell-Netravali with B = C = 1/3.
#[inline]
fn mitchell(ax: f32) -> f32 {
    const B: f32 = 1.0 / 3.0;
    const C: f32 = 1.0 / 3.0;

    if ax < 1.0 {
        ((12.0 - 9.0 * B - 6.0 * C) * ax * ax * ax + (-18.0 + 12.0 * B + 6.0 * C) * ax * ax + (6.0 - 2.0 * B))
            / 6.0
    } else if ax < 2.0 {
        ((-B - 6.0 * C) * ax * ax * ax
            + (6.0 * B + 30.0 * C) * ax * ax
            + (-12.0 * B - 48.0 * C) * ax
            + (8.0 * B + 24.0 * C))
            / 6.0
    } else {
        0.0
    }
}

#[inline]
fn lanczos(ax: f32, a: f32) -> f32 {
    if ax < 1e-8 {
        1.0
    } else if ax < a {
        let pi_x = std::f32::consts::PI * ax;
        let pi_x_a = pi_x / a;
        (pi_x.sin() / pi_x) * (pi_x_a.sin() / pi_x_a)
    } else {
        0.0
    }
}

/// Source span and normalized weights feeding one destination sample.
struct Contribution {
    start: usize,
    weights: Vec<f32>,
}

fn contributions(src_len: usize, dst_len: usize, filter: Filter) -> Vec<Contribution> {
    let scale = src_len as f32 / dst_len as f32;
    let filter_scale = scale.max(1.0);
    let support = filter.support() * filter_scale;
    let last = src_len as isize - 1;

    (0..dst_len)
        .map(|i| {
            let center = (i as f32 + 0.5) * scale - 0.5;
            let start = ((center - support).floor() as isize).clamp(0, last) as usize;
            let end = ((center + support).ceil() as isize).clamp(0, last) as usize;

            let mut weights: Vec<f32> = (start..=end)
                .map(|s| filter.weight((s as f32 - center) / filter_scale))
                .collect();
            let sum: f32 = weights.iter().sum();

            if sum.abs() > f32::EPSILON {
                weights.iter_mut().for_each(|w| *w /= sum);
            } else {
                // kernel missed every sample; take the nearest one
                weights.iter_mut().for_each(|w| *w = 0.0);
                let nearest = center.round().clamp(start as f32, end as f32) as usize;
                weights[nearest - start] = 1.0;
            }

            Contribution { start, weights }
        })
        .collect()
}

/// Resizes a raster to `width` x `height`.
///
/// Works for every [`ColorMode`](press_core::ColorMode); the last channel of
/// modes with alpha is treated as coverage.
pub fn resize(src: &Raster, width: u32, height: u32, filter: Filter) -> OpsResult<Raster> {
    if width == 0 || height == 0 {
        return Err(OpsError::InvalidDimensions("destination size must be > 0".into()));
    }
    trace!(
        from_w = src.width(),
        from_h = src.height(),
        to_w = width,
        to_h = height,
        ?filter,
        "resize"
    );

    let ch = src.channels();
    let alpha = src.mode().has_alpha();
    let (src_w, src_h) = (src.width() as usize, src.height() as usize);
    let (dst_w, dst_h) = (width as usize, height as usize);

    let mut samples: Vec<f32> = src.data().iter().map(|&v| v as f32).collect();
    if alpha {
        samples.par_chunks_exact_mut(ch).for_each(|px| {
            let a = px[ch - 1] / 255.0;
            px[..ch - 1].iter_mut().for_each(|v| *v *= a);
        });
    }

    // horizontal pass: src_h rows of dst_w pixels
    let cols = contributions(src_w, dst_w, filter);
    let mut wide = vec![0.0f32; dst_w * src_h * ch];
    wide.par_chunks_exact_mut(dst_w * ch)
        .zip(samples.par_chunks_exact(src_w * ch))
        .for_each(|(out, row)| {
            for (x, contrib) in cols.iter().enumerate() {
                let dst = &mut out[x * ch..(x + 1) * ch];
                for (i, &w) in contrib.weights.iter().enumerate() {
                    let s = (contrib.start + i) * ch;
                    for (d, &v) in dst.iter_mut().zip(&row[s..s + ch]) {
                        *d += v * w;
                    }
                }
            }
        });

    // vertical pass
    let rows = contributions(src_h, dst_h, filter);
    let stride = dst_w * ch;
    let mut tall = vec![0.0f32; stride * dst_h];
    tall.par_chunks_exact_mut(stride)
        .zip(rows.par_iter())
        .for_each(|(out, contrib)| {
            for (i, &w) in contrib.weights.iter().enumerate() {
                let s = (contrib.start + i) * stride;
                for (d, &v) in out.iter_mut().zip(&wide[s..s + stride]) {
                    *d += v * w;
                }
            }
        });

    let mut data = vec![0u8; tall.len()];
    data.par_chunks_exact_mut(ch)
        .zip(tall.par_chunks_exact(ch))
        .for_each(|(dst, px)| {
            let a = if alpha { px[ch - 1].clamp(0.0, 255.0) } else { 255.0 };
            for (k, (d, &v)) in dst.iter_mut().zip(px).enumerate() {
                let v = if alpha && k < ch - 1 {
                    if a > 0.0 { v * 255.0 / a } else { 0.0 }
                } else {
                    v
                };
                *d = v.round().clamp(0.0, 255.0) as u8;
            }
        });

    Ok(Raster::from_raw(width, height, src.mode(), data)?)
}

/// Dimensions for scaling to `target_width` while keeping the aspect ratio.
///
/// The height is truncated and never less than one row.
///
/// ```rust
/// use press_ops::resize::scale_to_width;
///
/// assert_eq!(scale_to_width(300, 200, 100), (100, 66));
/// ```
pub fn scale_to_width(src_w: u32, src_h: u32, target_width: u32) -> (u32, u32) {
    let aspect = src_h as f64 / src_w as f64;
    let height = (target_width as f64 * aspect) as u32;
    (target_width, height.max(1))
}
