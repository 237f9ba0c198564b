//! The print color model.
//!
//! [`CmykColor`] stores ink coverage as percentages (0-100 per channel), the
//! unit print shops specify colors in. [`Rgb`] is the additive source form
//! (0-1 per channel) that is only ever converted *from*, never persisted.
//!
//! The conversion in [`to_cmyk`] is the standard subtractive formula with
//! gray-component replacement through the key channel. It knows nothing about
//! paper or ink and is only the fallback when no ICC output profile is
//! available.
//!
//! # Example
//!
//! ```rust
//! use press_core::{to_cmyk, CmykColor, Rgb};
//!
//! let cyan = to_cmyk(Rgb::new(0.0, 1.0, 1.0));
//! assert_eq!(cyan, CmykColor::new(100.0, 0.0, 0.0, 0.0).unwrap());
//!
//! let black = to_cmyk(Rgb::new(0.0, 0.0, 0.0));
//! assert_eq!(black, CmykColor::BLACK);
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Additive color with channels normalized to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    r: f64,
    g: f64,
    b: f64,
}

impl Rgb {
    /// Creates a color, clamping each channel into [0, 1]. NaN becomes 0.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        let unit = |v: f64| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        Self {
            r: unit(r),
            g: unit(g),
            b: unit(b),
        }
    }

    /// Red.
    #[inline]
    pub fn r(&self) -> f64 {
        self.r
    }

    /// Green.
    #[inline]
    pub fn g(&self) -> f64 {
        self.g
    }

    /// Blue.
    #[inline]
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Creates a color from 8-bit channel values.
    #[inline]
    pub fn from_u8(px: [u8; 3]) -> Self {
        Self {
            r: px[0] as f64 / 255.0,
            g: px[1] as f64 / 255.0,
            b: px[2] as f64 / 255.0,
        }
    }
}

/// Ink coverage in percent for cyan, magenta, yellow and key (black).
///
/// Every channel is validated into the closed range [0, 100] at construction
/// and the value is immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCmyk", into = "RawCmyk")]
pub struct CmykColor {
    c: f64,
    m: f64,
    y: f64,
    k: f64,
}

/// Serialized form, validated through [`CmykColor::new`].
#[derive(Clone, Copy, Serialize, Deserialize)]
struct RawCmyk {
    c: f64,
    m: f64,
    y: f64,
    k: f64,
}

impl TryFrom<RawCmyk> for CmykColor {
    type Error = Error;

    fn try_from(raw: RawCmyk) -> Result<Self> {
        CmykColor::new(raw.c, raw.m, raw.y, raw.k)
    }
}

impl From<CmykColor> for RawCmyk {
    fn from(color: CmykColor) -> Self {
        Self {
            c: color.c,
            m: color.m,
            y: color.y,
            k: color.k,
        }
    }
}

impl CmykColor {
    /// No ink at all (paper white).
    pub const WHITE: Self = Self { c: 0.0, m: 0.0, y: 0.0, k: 0.0 };

    /// Full key ink only.
    pub const BLACK: Self = Self { c: 0.0, m: 0.0, y: 0.0, k: 100.0 };

    /// Creates a color from percentages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelOutOfRange`] if any channel is outside [0, 100]
    /// or is NaN.
    pub fn new(c: f64, m: f64, y: f64, k: f64) -> Result<Self> {
        for (channel, value) in [('c', c), ('m', m), ('y', y), ('k', k)] {
            if !(0.0..=100.0).contains(&value) {
                return Err(Error::ChannelOutOfRange { channel, value });
            }
        }
        Ok(Self { c, m, y, k })
    }

    /// Cyan coverage in percent.
    #[inline]
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Magenta coverage in percent.
    #[inline]
    pub fn m(&self) -> f64 {
        self.m
    }

    /// Yellow coverage in percent.
    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Key (black) coverage in percent.
    #[inline]
    pub fn k(&self) -> f64 {
        self.k
    }

    /// Channels as an array in c, m, y, k order.
    #[inline]
    pub fn channels(&self) -> [f64; 4] {
        [self.c, self.m, self.y, self.k]
    }

    /// Returns the channels scaled to [0, 1].
    pub fn to_normalized(&self) -> (f64, f64, f64, f64) {
        (self.c / 100.0, self.m / 100.0, self.y / 100.0, self.k / 100.0)
    }

    /// Returns the channels as 8-bit raster samples (255 = 100 % ink).
    pub fn to_bytes(&self) -> [u8; 4] {
        self.channels().map(percent_to_byte)
    }

    /// Converts an additive color with [`to_cmyk`].
    pub fn from_rgb(rgb: Rgb) -> Self {
        to_cmyk(rgb)
    }

    /// Parses `#RRGGBB` (leading `#` optional) and converts it with [`to_cmyk`].
    ///
    /// This is the same approximate conversion as [`to_cmyk`]; colors meant
    /// for print should be specified in CMYK directly.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(Error::InvalidHex(hex.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| Error::InvalidHex(hex.to_string()))
        };
        Ok(to_cmyk(Rgb::from_u8([channel(0)?, channel(2)?, channel(4)?])))
    }

    /// Linearly interpolates every channel between `self` (t = 0) and `other` (t = 1).
    #[inline]
    pub fn lerp(&self, other: &CmykColor, t: f64) -> [f64; 4] {
        let a = self.channels();
        let b = other.channels();
        [
            a[0] + (b[0] - a[0]) * t,
            a[1] + (b[1] - a[1]) * t,
            a[2] + (b[2] - a[2]) * t,
            a[3] + (b[3] - a[3]) * t,
        ]
    }
}

impl Default for CmykColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl std::fmt::Display for CmykColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "C{} M{} Y{} K{}", self.c, self.m, self.y, self.k)
    }
}

/// Maps a percentage in [0, 100] to an 8-bit sample, rounding to nearest.
#[inline]
pub fn percent_to_byte(value: f64) -> u8 {
    (value.clamp(0.0, 100.0) / 100.0 * 255.0).round() as u8
}

/// Converts RGB to CMYK with the direct subtractive formula.
///
/// Pure black and the degenerate `k == 1` case both map to `(0, 0, 0, 100)`
/// without dividing by `1 - k`.
pub fn to_cmyk(rgb: Rgb) -> CmykColor {
    let Rgb { r, g, b } = rgb;
    if r == 0.0 && g == 0.0 && b == 0.0 {
        return CmykColor::BLACK;
    }

    let k = 1.0 - r.max(g).max(b);
    if k == 1.0 {
        return CmykColor::BLACK;
    }

    let scale = |v: f64| (((1.0 - v - k) / (1.0 - k)) * 100.0).clamp(0.0, 100.0);
    CmykColor {
        c: scale(r),
        m: scale(g),
        y: scale(b),
        k: (k * 100.0).clamp(0.0, 100.0),
    }
}

/// Returns the color as a normalized `(c, m, y, k)` tuple in [0, 1].
#[inline]
pub fn to_normalized(color: &CmykColor) -> (f64, f64, f64, f64) {
    color.to_normalized()
}

/// Converts one 8-bit RGB pixel into 8-bit CMYK samples with [`to_cmyk`].
#[inline]
pub fn rgb8_to_cmyk8(px: [u8; 3]) -> [u8; 4] {
    to_cmyk(Rgb::from_u8(px)).to_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_black_and_white() {
        assert_eq!(to_cmyk(Rgb::new(0.0, 0.0, 0.0)), CmykColor::BLACK);
        assert_eq!(to_cmyk(Rgb::new(1.0, 1.0, 1.0)), CmykColor::WHITE);
    }

    #[test]
    fn test_grays_use_key_only() {
        for step in 1..=10 {
            let v = step as f64 / 10.0;
            let cmyk = to_cmyk(Rgb::new(v, v, v));
            assert_eq!(cmyk.c(), 0.0);
            assert_eq!(cmyk.m(), 0.0);
            assert_eq!(cmyk.y(), 0.0);
            assert_relative_eq!(cmyk.k(), (1.0 - v) * 100.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_primaries() {
        let red = to_cmyk(Rgb::new(1.0, 0.0, 0.0));
        assert_eq!(red.channels(), [0.0, 100.0, 100.0, 0.0]);

        let dark_blue = to_cmyk(Rgb::new(0.0, 0.0, 0.5));
        assert_relative_eq!(dark_blue.c(), 100.0);
        assert_relative_eq!(dark_blue.m(), 100.0);
        assert_relative_eq!(dark_blue.y(), 0.0);
        assert_relative_eq!(dark_blue.k(), 50.0);
    }

    #[test]
    fn test_rgb_out_of_range_inputs() {
        let rgb = Rgb::new(f64::NAN, 2.0, -1.0);
        assert_eq!((rgb.r(), rgb.g(), rgb.b()), (0.0, 1.0, 0.0));

        let cmyk = to_cmyk(Rgb::new(f64::NAN, f64::NAN, 0.5));
        for v in cmyk.channels() {
            assert!((0.0..=100.0).contains(&v), "{v}");
        }
        assert!(CmykColor::new(cmyk.c(), cmyk.m(), cmyk.y(), cmyk.k()).is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(CmykColor::new(0.0, 0.0, 0.0, 100.0).is_ok());
        assert!(CmykColor::new(100.1, 0.0, 0.0, 0.0).is_err());
        assert!(CmykColor::new(0.0, -1.0, 0.0, 0.0).is_err());
        assert!(CmykColor::new(0.0, 0.0, f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_normalized() {
        let color = CmykColor::new(60.0, 40.0, 40.0, 100.0).unwrap();
        assert_eq!(to_normalized(&color), (0.6, 0.4, 0.4, 1.0));
    }

    #[test]
    fn test_bytes() {
        assert_eq!(CmykColor::BLACK.to_bytes(), [0, 0, 0, 255]);
        assert_eq!(CmykColor::new(50.0, 0.0, 100.0, 0.0).unwrap().to_bytes(), [128, 0, 255, 0]);
    }

    #[test]
    fn test_from_hex() {
        let white = CmykColor::from_hex("#FFFFFF").unwrap();
        assert_eq!(white, CmykColor::WHITE);

        let cyan = CmykColor::from_hex("00ffff").unwrap();
        assert_eq!(cyan.channels(), [100.0, 0.0, 0.0, 0.0]);

        assert!(CmykColor::from_hex("#12345").is_err());
        assert!(CmykColor::from_hex("#GG0000").is_err());
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = CmykColor::new(10.0, 20.0, 30.0, 40.0).unwrap();
        let b = CmykColor::new(90.0, 80.0, 70.0, 60.0).unwrap();
        assert_eq!(a.lerp(&b, 0.0), a.channels());
        assert_eq!(a.lerp(&b, 1.0), b.channels());
        assert_eq!(a.lerp(&b, 0.5), [50.0, 50.0, 50.0, 50.0]);
    }

    #[test]
    fn test_serde_validates() {
        let ok: CmykColor = serde_yaml::from_str("{c: 70, m: 0, y: 10, k: 0}").unwrap();
        assert_eq!(ok.channels(), [70.0, 0.0, 10.0, 0.0]);

        let bad: std::result::Result<CmykColor, _> = serde_yaml::from_str("{c: 170, m: 0, y: 0, k: 0}");
        assert!(bad.is_err());
    }
}
