//! Physical size helpers.
//!
//! Layout code works in millimeters; raster assets need pixel dimensions at a
//! target resolution.

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Minimum effective resolution accepted for placed images.
pub const MIN_EFFECTIVE_DPI: u32 = 150;

/// Preferred effective resolution for placed images.
pub const PREFERRED_DPI: u32 = 300;

/// Pixel dimensions of a `width_mm` x `height_mm` area at `dpi`.
///
/// Fractional pixels are truncated.
///
/// ```rust
/// use press_core::units::pixels_for_size;
///
/// // 1000 x 2170 mm backwall at 150 dpi
/// assert_eq!(pixels_for_size(1000.0, 2170.0, 150), (5905, 12814));
/// ```
pub fn pixels_for_size(width_mm: f64, height_mm: f64, dpi: u32) -> (u32, u32) {
    (mm_to_px(width_mm, dpi), mm_to_px(height_mm, dpi))
}

/// Converts a length in millimeters to whole pixels at `dpi`.
#[inline]
pub fn mm_to_px(mm: f64, dpi: u32) -> u32 {
    (mm / MM_PER_INCH * dpi as f64).max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inch_is_dpi() {
        assert_eq!(mm_to_px(25.4, 300), 300);
        assert_eq!(pixels_for_size(50.8, 25.4, PREFERRED_DPI), (600, 300));
    }

    #[test]
    fn test_truncates() {
        assert_eq!(mm_to_px(1.0, 300), 11);
        assert_eq!(mm_to_px(-5.0, 300), 0);
    }
}
