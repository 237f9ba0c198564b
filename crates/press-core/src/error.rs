//! Error types for press-core operations.
//!
//! Covers color validation, raster buffer construction and palette loading.
//!
//! # Usage
//!
//! ```rust
//! use press_core::{CmykColor, Error};
//!
//! let err = CmykColor::new(120.0, 0.0, 0.0, 0.0).unwrap_err();
//! assert!(matches!(err, Error::ChannelOutOfRange { channel: 'c', .. }));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core color and raster types.
#[derive(Debug, Error)]
pub enum Error {
    /// A CMYK channel lies outside the closed range [0, 100].
    #[error("channel '{channel}' value {value} outside [0, 100]")]
    ChannelOutOfRange {
        /// Channel letter (c, m, y or k).
        channel: char,
        /// Offending value.
        value: f64,
    },

    /// A hex color string could not be parsed.
    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),

    /// Image dimensions are zero or overflow the address space.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Pixel buffer length does not match the image geometry.
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },

    /// Operation is not defined for this color mode.
    #[error("unsupported color mode for {op}: {mode}")]
    UnsupportedMode {
        /// Operation name.
        op: &'static str,
        /// Mode name.
        mode: &'static str,
    },

    /// Named color missing from a palette.
    #[error("palette has no color named {0:?}")]
    UnknownColor(String),

    /// Palette or config YAML could not be parsed.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// I/O error while reading a palette file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
