//! JPEG format support.
//!
//! Reads baseline and progressive JPEGs in gray, RGB and CMYK; writes gray,
//! RGB and CMYK (Adobe four-component) files. JPEG has no alpha channel;
//! callers flatten first.

use crate::{IoError, IoResult};
use press_core::{ColorMode, Raster};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Default encoder quality.
pub const DEFAULT_QUALITY: u8 = 95;

/// JPEG writer options.
#[derive(Debug, Clone, Copy)]
pub struct JpegWriterOptions {
    /// Quality (1-100).
    pub quality: u8,
}

impl Default for JpegWriterOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
        }
    }
}

/// Reads a JPEG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let file = File::open(path.as_ref())?;
    decode(BufReader::new(file))
}

/// Decodes a JPEG stream.
pub fn decode<R: Read>(reader: R) -> IoResult<Raster> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

    let (mode, data) = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => (ColorMode::Rgb, pixels),
        jpeg_decoder::PixelFormat::L8 => (ColorMode::Gray, pixels),
        jpeg_decoder::PixelFormat::CMYK32 => (ColorMode::Cmyk, pixels),
        jpeg_decoder::PixelFormat::L16 => {
            // high byte
            let gray = pixels.chunks_exact(2).map(|l16| l16[0]).collect();
            (ColorMode::Gray, gray)
        }
    };

    Ok(Raster::from_raw(info.width as u32, info.height as u32, mode, data)?)
}

/// Reads only the header and reports the decoded color mode.
pub fn probe<P: AsRef<Path>>(path: P) -> IoResult<ColorMode> {
    let file = File::open(path.as_ref())?;
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(file));
    decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

    Ok(match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => ColorMode::Rgb,
        jpeg_decoder::PixelFormat::CMYK32 => ColorMode::Cmyk,
        jpeg_decoder::PixelFormat::L8 | jpeg_decoder::PixelFormat::L16 => ColorMode::Gray,
    })
}

/// Encodes a raster as JPEG.
pub fn encode(raster: &Raster, options: &JpegWriterOptions) -> IoResult<Vec<u8>> {
    use jpeg_encoder::{ColorType as JpegColorType, Encoder};

    let color_type = match raster.mode() {
        ColorMode::Gray => JpegColorType::Luma,
        ColorMode::Rgb => JpegColorType::Rgb,
        ColorMode::Cmyk => JpegColorType::Cmyk,
        mode => {
            return Err(IoError::UnsupportedMode {
                format: "JPEG",
                mode: mode.name(),
            });
        }
    };

    let width = u16::try_from(raster.width())
        .map_err(|_| IoError::EncodeError(format!("width {} exceeds JPEG limit", raster.width())))?;
    let height = u16::try_from(raster.height())
        .map_err(|_| IoError::EncodeError(format!("height {} exceeds JPEG limit", raster.height())))?;

    let mut buffer = Vec::new();
    let encoder = Encoder::new(&mut buffer, options.quality.clamp(1, 100));
    encoder
        .encode(raster.data(), width, height, color_type)
        .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;

    Ok(buffer)
}
