//! Error types for asset preparation.

use press_color::ColorError;
use press_io::IoError;
use press_ops::OpsError;
use std::path::PathBuf;
use thiserror::Error;

/// Asset preparation error.
///
/// Callers get either a valid path or one of these; nothing is left at the
/// canonical cache path on failure.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Request fields violate their contract.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Source image missing or undecodable.
    #[error("cannot decode image {}: {source}", path.display())]
    ImageDecode {
        /// Source path.
        path: PathBuf,
        /// Underlying error.
        source: IoError,
    },

    /// Optional generator not compiled in.
    #[error("dependency unavailable: {0}")]
    UnsupportedDependency(String),

    /// Generated asset could not be written.
    #[error("cannot write cache entry {}: {source}", path.display())]
    CacheWrite {
        /// Target path.
        path: PathBuf,
        /// Underlying error.
        source: IoError,
    },

    /// Cache directory could not be created or cleared.
    #[error("cache directory {}: {source}", path.display())]
    CacheDir {
        /// Cache root.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Generator failure not covered above.
    #[error(transparent)]
    Ops(OpsError),

    /// Conversion failure not covered above.
    #[error(transparent)]
    Color(ColorError),

    /// Configuration or palette loading failed.
    #[error("config error: {0}")]
    Config(String),

    /// Configuration YAML could not be parsed.
    #[error("config parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Core type error.
    #[error(transparent)]
    Core(#[from] press_core::Error),
}

impl From<OpsError> for AssetError {
    fn from(e: OpsError) -> Self {
        match e {
            OpsError::Unsupported(msg) => AssetError::UnsupportedDependency(msg),
            OpsError::InvalidParameter(msg) | OpsError::InvalidDimensions(msg) => AssetError::InvalidRequest(msg),
            other => AssetError::Ops(other),
        }
    }
}

impl From<ColorError> for AssetError {
    fn from(e: ColorError) -> Self {
        match e {
            ColorError::ImageRead { path, source } => AssetError::ImageDecode { path, source },
            ColorError::Write { path, source } => AssetError::CacheWrite { path, source },
            other => AssetError::Color(other),
        }
    }
}

/// Result type for asset preparation.
pub type AssetResult<T> = Result<T, AssetError>;
