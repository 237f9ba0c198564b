//! TIFF format support.
//!
//! Lossless container for every raster mode, including separated CMYK.
//! Written with LZW compression; 16-bit input is reduced to 8 bits on read.

use crate::{IoError, IoResult};
use press_core::{ColorMode, Raster};
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

/// Reads a TIFF file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    use tiff::decoder::{Decoder, DecodingResult};

    let file = File::open(path.as_ref())?;
    let mut decoder = Decoder::new(BufReader::new(file))
        .map_err(|e: tiff::TiffError| IoError::DecodeError(e.to_string()))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e: tiff::TiffError| IoError::DecodeError(e.to_string()))?;
    let color_type = decoder
        .colortype()
        .map_err(|e: tiff::TiffError| IoError::DecodeError(e.to_string()))?;
    let result = decoder
        .read_image()
        .map_err(|e: tiff::TiffError| IoError::DecodeError(e.to_string()))?;

    let mode = mode_for(color_type)?;
    let data = match result {
        DecodingResult::U8(buf) => buf,
        DecodingResult::U16(buf) => buf.iter().map(|&v| (v >> 8) as u8).collect(),
        _ => {
            return Err(IoError::DecodeError(format!(
                "unsupported TIFF sample type for {:?}",
                color_type
            )));
        }
    };

    Ok(Raster::from_raw(width, height, mode, data)?)
}

/// Reads only the header and reports the decoded color mode.
pub fn probe<P: AsRef<Path>>(path: P) -> IoResult<ColorMode> {
    let file = File::open(path.as_ref())?;
    let mut decoder = tiff::decoder::Decoder::new(BufReader::new(file))
        .map_err(|e: tiff::TiffError| IoError::DecodeError(e.to_string()))?;
    let color_type = decoder
        .colortype()
        .map_err(|e: tiff::TiffError| IoError::DecodeError(e.to_string()))?;
    mode_for(color_type)
}

/// Encodes a raster as an LZW-compressed TIFF.
pub fn encode(raster: &Raster) -> IoResult<Vec<u8>> {
    use tiff::encoder::{colortype, compression, TiffEncoder};

    let mut buffer = Vec::new();
    let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
        .map_err(|e: tiff::TiffError| IoError::EncodeError(e.to_string()))?;

    let (width, height) = (raster.width(), raster.height());
    let result = match raster.mode() {
        ColorMode::Gray => encoder.write_image_with_compression::<colortype::Gray8, compression::Lzw>(
            width,
            height,
            compression::Lzw,
            raster.data(),
        ),
        ColorMode::Rgb => encoder.write_image_with_compression::<colortype::RGB8, compression::Lzw>(
            width,
            height,
            compression::Lzw,
            raster.data(),
        ),
        ColorMode::Rgba => encoder.write_image_with_compression::<colortype::RGBA8, compression::Lzw>(
            width,
            height,
            compression::Lzw,
            raster.data(),
        ),
        ColorMode::GrayAlpha => {
            // stored as RGBA
            let rgba: Vec<u8> = raster
                .data()
                .chunks_exact(2)
                .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
                .collect();
            encoder.write_image_with_compression::<colortype::RGBA8, compression::Lzw>(
                width,
                height,
                compression::Lzw,
                &rgba,
            )
        }
        ColorMode::Cmyk => encoder.write_image_with_compression::<colortype::CMYK8, compression::Lzw>(
            width,
            height,
            compression::Lzw,
            raster.data(),
        ),
    };
    result.map_err(|e: tiff::TiffError| IoError::EncodeError(e.to_string()))?;
    drop(encoder);

    Ok(buffer)
}

fn mode_for(color_type: tiff::ColorType) -> IoResult<ColorMode> {
    use tiff::ColorType;

    match color_type {
        ColorType::Gray(8) | ColorType::Gray(16) => Ok(ColorMode::Gray),
        ColorType::GrayA(8) | ColorType::GrayA(16) => Ok(ColorMode::GrayAlpha),
        ColorType::RGB(8) | ColorType::RGB(16) => Ok(ColorMode::Rgb),
        ColorType::RGBA(8) | ColorType::RGBA(16) => Ok(ColorMode::Rgba),
        ColorType::CMYK(8) | ColorType::CMYK(16) => Ok(ColorMode::Cmyk),
        ct => Err(IoError::DecodeError(format!("unsupported TIFF color type: {:?}", ct))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_cmyk_exact() {
        let data: Vec<u8> = (0..6 * 5).flat_map(|i| [i as u8, 255 - i as u8, 7, 200]).collect();
        let raster = Raster::from_raw(6, 5, ColorMode::Cmyk, data).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ink.tif");
        std::fs::write(&path, encode(&raster).unwrap()).unwrap();

        assert_eq!(probe(&path).unwrap(), ColorMode::Cmyk);
        let back = read(&path).unwrap();
        assert_eq!(back, raster);
    }

    #[test]
    fn test_roundtrip_rgb() {
        let raster = Raster::from_raw(2, 2, ColorMode::Rgb, (0..12).collect()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.tiff");
        std::fs::write(&path, encode(&raster).unwrap()).unwrap();

        assert_eq!(read(&path).unwrap().data(), raster.data());
    }
}
