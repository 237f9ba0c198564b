//! Error types for image color conversion.

use press_io::IoError;
use std::path::PathBuf;
use thiserror::Error;

/// Color conversion error.
///
/// Profile problems never reach callers of
/// [`CmykConverter::ensure_cmyk`](crate::CmykConverter::ensure_cmyk): they are
/// logged and the direct formula is used instead. [`ColorError::Profile`] is
/// only returned by the explicit profile entry points.
#[derive(Debug, Error)]
pub enum ColorError {
    /// Source image missing or undecodable.
    #[error("cannot read image {}: {source}", path.display())]
    ImageRead {
        /// Source path.
        path: PathBuf,
        /// Underlying decode error.
        source: IoError,
    },

    /// Output could not be encoded or written.
    #[error("cannot write {}: {source}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying encode or filesystem error.
        source: IoError,
    },

    /// ICC profile could not be loaded or applied.
    #[error("profile transform failed: {0}")]
    Profile(#[from] press_icc::IccError),

    /// Raster construction failed.
    #[error(transparent)]
    Core(#[from] press_core::Error),
}

/// Result type for color conversion.
pub type ColorResult<T> = Result<T, ColorError>;
