//! ICC error types.

use thiserror::Error;

/// Result type for ICC operations.
pub type IccResult<T> = Result<T, IccError>;

/// Errors that can occur while loading profiles or building transforms.
#[derive(Debug, Error)]
pub enum IccError {
    /// Failed to load profile from file.
    #[error("failed to load profile: {0}")]
    LoadFailed(String),

    /// Invalid profile data.
    #[error("invalid profile data: {0}")]
    InvalidProfile(String),

    /// Failed to create transform.
    #[error("failed to create transform: {0}")]
    TransformFailed(String),

    /// Profile color space mismatch.
    #[error("color space mismatch: expected {expected}, got {actual}")]
    ColorSpaceMismatch {
        /// Expected color space.
        expected: String,
        /// Actual color space.
        actual: String,
    },

    /// Pixel buffers handed to a transform disagree in length.
    #[error("buffer length mismatch: {source_len} source pixels, {dest_len} destination pixels")]
    LengthMismatch {
        /// Source pixel count.
        source_len: usize,
        /// Destination pixel count.
        dest_len: usize,
    },
}
