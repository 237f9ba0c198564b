//! PNG format support.
//!
//! PNG holds gray, gray+alpha, RGB and RGBA rasters. It has no four-channel
//! ink layout, so CMYK rasters are rejected on encode; see
//! [`cmyk_output_path`](crate::cmyk_output_path).
//!
//! Palette, low bit depth and `tRNS` images are expanded on read and 16-bit
//! samples are stripped to 8 bits.

use crate::{IoError, IoResult};
use press_core::{ColorMode, Raster};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let file = File::open(path.as_ref())?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let (color_type, _) = reader.output_color_type();
    let mode = mode_for(color_type)?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    buf.truncate(info.buffer_size());

    Ok(Raster::from_raw(info.width, info.height, mode, buf)?)
}

/// Reads only the header and reports the decoded color mode.
pub fn probe<P: AsRef<Path>>(path: P) -> IoResult<ColorMode> {
    let file = File::open(path.as_ref())?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    mode_for(reader.output_color_type().0)
}

/// Encodes a raster as PNG.
pub fn encode(raster: &Raster) -> IoResult<Vec<u8>> {
    let color_type = match raster.mode() {
        ColorMode::Gray => png::ColorType::Grayscale,
        ColorMode::GrayAlpha => png::ColorType::GrayscaleAlpha,
        ColorMode::Rgb => png::ColorType::Rgb,
        ColorMode::Rgba => png::ColorType::Rgba,
        ColorMode::Cmyk => {
            return Err(IoError::UnsupportedMode {
                format: "PNG",
                mode: raster.mode().name(),
            });
        }
    };

    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, raster.width(), raster.height());
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::default());
        encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

        let mut writer = encoder
            .write_header()
            .map_err(|e| IoError::EncodeError(e.to_string()))?;
        writer
            .write_image_data(raster.data())
            .map_err(|e| IoError::EncodeError(e.to_string()))?;
        writer.finish().map_err(|e| IoError::EncodeError(e.to_string()))?;
    }

    Ok(out)
}

fn mode_for(color_type: png::ColorType) -> IoResult<ColorMode> {
    match color_type {
        png::ColorType::Grayscale => Ok(ColorMode::Gray),
        png::ColorType::GrayscaleAlpha => Ok(ColorMode::GrayAlpha),
        png::ColorType::Rgb => Ok(ColorMode::Rgb),
        png::ColorType::Rgba => Ok(ColorMode::Rgba),
        other => Err(IoError::DecodeError(format!("unexpected PNG color type {:?}", other))),
    }
}
