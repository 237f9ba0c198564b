//! 8-bit raster buffers.
//!
//! A [`Raster`] is a contiguous, row-major, interleaved pixel buffer tagged
//! with its [`ColorMode`]. Print assets only ever need 8 bits per channel, so
//! the buffer is always `Vec<u8>`; 16-bit sources are reduced on read.
//!
//! # Example
//!
//! ```rust
//! use press_core::{ColorMode, Raster};
//!
//! let mut img = Raster::new(4, 2, ColorMode::Cmyk).unwrap();
//! img.fill(&[0, 0, 0, 255]);
//! assert_eq!(img.pixel(3, 1), &[0, 0, 0, 255]);
//! ```

use crate::{Error, Result};
use rayon::prelude::*;

/// Channel layout of a [`Raster`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorMode {
    /// Single luminance channel.
    Gray,
    /// Luminance plus straight alpha.
    GrayAlpha,
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue plus straight alpha.
    Rgba,
    /// Cyan, magenta, yellow, key; 255 means 100 % ink.
    Cmyk,
}

impl ColorMode {
    /// Number of interleaved channels.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            ColorMode::Gray => 1,
            ColorMode::GrayAlpha => 2,
            ColorMode::Rgb => 3,
            ColorMode::Rgba | ColorMode::Cmyk => 4,
        }
    }

    /// True for modes carrying an alpha channel.
    #[inline]
    pub fn has_alpha(self) -> bool {
        matches!(self, ColorMode::GrayAlpha | ColorMode::Rgba)
    }

    /// Short mode name, matching the usual imaging-library spelling.
    pub fn name(self) -> &'static str {
        match self {
            ColorMode::Gray => "L",
            ColorMode::GrayAlpha => "LA",
            ColorMode::Rgb => "RGB",
            ColorMode::Rgba => "RGBA",
            ColorMode::Cmyk => "CMYK",
        }
    }
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Owned 8-bit image buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    mode: ColorMode,
    data: Vec<u8>,
}

impl Raster {
    /// Allocates a zero-filled raster.
    ///
    /// Zero is "no ink" for CMYK and black for the additive modes.
    pub fn new(width: u32, height: u32, mode: ColorMode) -> Result<Self> {
        let len = buffer_len(width, height, mode)?;
        Ok(Self {
            width,
            height,
            mode,
            data: vec![0u8; len],
        })
    }

    /// Wraps an existing buffer, checking its length against the geometry.
    pub fn from_raw(width: u32, height: u32, mode: ColorMode, data: Vec<u8>) -> Result<Self> {
        let expected = buffer_len(width, height, mode)?;
        if data.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            mode,
            data,
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel layout.
    #[inline]
    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    /// Number of interleaved channels.
    #[inline]
    pub fn channels(&self) -> usize {
        self.mode.channels()
    }

    /// Bytes per row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width as usize * self.channels()
    }

    /// Raw interleaved samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw interleaved samples.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the raster and returns its buffer.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Samples of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let ch = self.channels();
        let idx = (y as usize * self.width as usize + x as usize) * ch;
        &self.data[idx..idx + ch]
    }

    /// Samples of row `y`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let len = self.row_len();
        let start = y as usize * len;
        &self.data[start..start + len]
    }

    /// Sets every pixel to `value` (one sample per channel).
    pub fn fill(&mut self, value: &[u8]) {
        let ch = self.channels();
        assert_eq!(value.len(), ch, "fill value must have one sample per channel");
        for px in self.data.chunks_exact_mut(ch) {
            px.copy_from_slice(value);
        }
    }

    /// Returns an RGB copy with any alpha composited over opaque white.
    ///
    /// Print has no transparency, so uncovered regions become paper white.
    /// CMYK input is rejected; it has no meaningful additive form here.
    pub fn flatten_to_rgb(&self) -> Result<Raster> {
        let out: Vec<u8> = match self.mode {
            ColorMode::Rgb => self.data.clone(),
            ColorMode::Gray => self.data.iter().flat_map(|&l| [l, l, l]).collect(),
            ColorMode::GrayAlpha => self
                .data
                .par_chunks_exact(2)
                .flat_map_iter(|la| {
                    let l = over_white(la[0], la[1]);
                    [l, l, l]
                })
                .collect(),
            ColorMode::Rgba => self
                .data
                .par_chunks_exact(4)
                .flat_map_iter(|px| {
                    [
                        over_white(px[0], px[3]),
                        over_white(px[1], px[3]),
                        over_white(px[2], px[3]),
                    ]
                })
                .collect(),
            ColorMode::Cmyk => {
                return Err(Error::UnsupportedMode {
                    op: "flatten_to_rgb",
                    mode: self.mode.name(),
                });
            }
        };
        Raster::from_raw(self.width, self.height, ColorMode::Rgb, out)
    }
}

/// Composites one straight-alpha sample over white.
#[inline]
fn over_white(value: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((value as u32 * a + 255 * (255 - a) + 127) / 255) as u8
}

/// Validates geometry and returns the buffer length in bytes.
fn buffer_len(width: u32, height: u32, mode: ColorMode) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(mode.channels()))
        .ok_or(Error::InvalidDimensions { width, height })
}
