//! Error types for asset operations.

use press_core::ColorMode;
use thiserror::Error;

/// Error type for asset operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Images have incompatible sizes.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Raster has a color mode the operation does not accept.
    #[error("{op} does not accept {mode} input")]
    UnsupportedMode {
        /// Operation name.
        op: &'static str,
        /// Offending mode.
        mode: ColorMode,
    },

    /// Operation compiled out (optional feature disabled).
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// Buffer construction failed.
    #[error(transparent)]
    Core(#[from] press_core::Error),
}

/// Result type for asset operations.
pub type OpsResult<T> = Result<T, OpsError>;
