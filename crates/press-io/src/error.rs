//! Error types for raster I/O.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Unsupported or unrecognized container format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Decoding error.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// The container cannot store rasters of this mode.
    #[error("{format} cannot store {mode} data")]
    UnsupportedMode {
        /// Container name.
        format: &'static str,
        /// Raster mode name.
        mode: &'static str,
    },

    /// Buffer or geometry error from the core types.
    #[error(transparent)]
    Core(#[from] press_core::Error),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
