//! # press-io
//!
//! Raster I/O for print asset preparation.
//!
//! Reads and writes [`Raster`] buffers in the three containers the pipeline
//! deals with:
//!
//! | Format | Read | Write | CMYK |
//! |--------|------|-------|------|
//! | PNG    | yes  | yes   | no   |
//! | JPEG   | yes  | yes   | yes  |
//! | TIFF   | yes  | yes   | yes  |
//!
//! Because PNG cannot hold ink data, CMYK outputs go through
//! [`cmyk_output_path`] first. Writes land atomically: the encoded file is
//! written to a temporary sibling and renamed into place, so a failed encode
//! never leaves a partial file at the destination.
//!
//! # Example
//!
//! ```rust,no_run
//! use press_io::{cmyk_output_path, read, write};
//! use std::path::Path;
//!
//! let raster = read("logo.png")?;
//! println!("{}x{} {}", raster.width(), raster.height(), raster.mode());
//!
//! let out = cmyk_output_path(Path::new("logo_cmyk.png"));
//! # let raster = raster.flatten_to_rgb()?;
//! write(&out, &raster)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod detect;
pub mod jpeg;
pub mod png;
pub mod tiff;

mod error;
mod path;

pub use detect::Format;
pub use error::{IoError, IoResult};
pub use path::cmyk_output_path;

use press_core::{ColorMode, Raster};
use std::io::Write;
use std::path::Path;
use tracing::{debug, trace};

/// Options applied when encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    /// JPEG encoder options.
    pub jpeg: jpeg::JpegWriterOptions,
}

impl WriteOptions {
    /// Options with the given JPEG quality.
    pub fn with_jpeg_quality(quality: u8) -> Self {
        Self {
            jpeg: jpeg::JpegWriterOptions { quality },
        }
    }
}

/// Reads an image, detecting the format from magic bytes then extension.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    trace!(path = %path.display(), %format, "reading raster");

    match format {
        Format::Png => png::read(path),
        Format::Jpeg => jpeg::read(path),
        Format::Tiff => tiff::read(path),
        Format::Unknown => Err(IoError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Encodes a raster in the given container.
pub fn encode(raster: &Raster, format: Format, options: &WriteOptions) -> IoResult<Vec<u8>> {
    match format {
        Format::Png => png::encode(raster),
        Format::Jpeg => jpeg::encode(raster, &options.jpeg),
        Format::Tiff => tiff::encode(raster),
        Format::Unknown => Err(IoError::UnsupportedFormat("unknown".into())),
    }
}

/// Writes a raster with default options; the format follows the extension.
pub fn write<P: AsRef<Path>>(path: P, raster: &Raster) -> IoResult<()> {
    write_with(path, raster, &WriteOptions::default())
}

/// Writes a raster atomically; the format follows the extension.
pub fn write_with<P: AsRef<Path>>(path: P, raster: &Raster, options: &WriteOptions) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path);
    if format == Format::Unknown {
        return Err(IoError::UnsupportedFormat(path.display().to_string()));
    }

    let bytes = encode(raster, format, options)?;
    write_atomic(path, &bytes)?;
    debug!(
        path = %path.display(),
        width = raster.width(),
        height = raster.height(),
        mode = %raster.mode(),
        "wrote raster"
    );
    Ok(())
}

/// Writes bytes to `path` via a temporary file in the same directory.
///
/// The destination either keeps its previous state or holds the complete
/// new contents.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> IoResult<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| IoError::Io(e.error))?;
    Ok(())
}

/// Copies a file atomically.
pub fn copy_atomic(source: &Path, dest: &Path) -> IoResult<()> {
    let bytes = std::fs::read(source)?;
    write_atomic(dest, &bytes)
}

/// Reports the color mode of an image without decoding pixel data.
pub fn probe_mode<P: AsRef<Path>>(path: P) -> IoResult<ColorMode> {
    let path = path.as_ref();
    match Format::detect(path)? {
        Format::Png => png::probe(path),
        Format::Jpeg => jpeg::probe(path),
        Format::Tiff => tiff::probe(path),
        Format::Unknown => Err(IoError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Returns true if the image at `path` stores CMYK data.
///
/// Unreadable files report false.
pub fn is_cmyk<P: AsRef<Path>>(path: P) -> bool {
    matches!(probe_mode(path), Ok(ColorMode::Cmyk))
}
