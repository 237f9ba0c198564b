//! # press-core
//!
//! Core types for preparing print-ready raster assets.
//!
//! This crate provides the foundational types used throughout the press-rs workspace:
//!
//! - [`CmykColor`], [`Rgb`] - The additive/subtractive color model and the
//!   direct RGB to CMYK formula ([`to_cmyk`])
//! - [`Raster`], [`ColorMode`] - Contiguous 8-bit pixel buffers tagged with their mode
//! - [`Palette`] - Named CMYK colors loaded as an explicit configuration value
//! - [`units`] - Physical size to pixel helpers
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. All other press-rs crates depend on it:
//!
//! ```text
//! press-core (this crate)
//!    ^
//!    |
//!    +-- press-icc (ICC profiles, CMYK transforms)
//!    +-- press-io (PNG/JPEG/TIFF raster I/O)
//!    +-- press-ops (gradients, vignettes, resize, QR)
//!    +-- press-color (image CMYK conversion)
//!    +-- press-assets (cache + pipeline)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod color;
pub mod error;
pub mod palette;
pub mod raster;
pub mod units;

pub use color::{to_cmyk, to_normalized, CmykColor, Rgb};
pub use error::{Error, Result};
pub use palette::Palette;
pub use raster::{ColorMode, Raster};
