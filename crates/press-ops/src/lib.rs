//! # press-ops
//!
//! Pixel-level generators and operations for print assets.
//!
//! Everything here works on [`Raster`](press_core::Raster) buffers and is
//! row-parallel via rayon; results are identical to a sequential pass.
//!
//! # Modules
//!
//! - [`gradient`] - Vertical linear CMYK gradients
//! - [`vignette`] - Multi-edge fades toward zero ink
//! - [`mask`] - 8-bit alpha masks for RGB compositing
//! - [`resize`] - Separable resampling (Lanczos3 for logos)
//! - [`qr`] - QR code rasterization in CMYK
//!
//! # Example
//!
//! ```rust
//! use press_core::CmykColor;
//! use press_ops::{gradient::make_gradient, vignette::{apply_vignette, VignetteParams}};
//!
//! let top = CmykColor::new(0.0, 0.0, 0.0, 0.0).unwrap();
//! let bottom = CmykColor::new(85.0, 70.0, 0.0, 40.0).unwrap();
//!
//! let backdrop = make_gradient(64, 128, &top, &bottom).unwrap();
//! let faded = apply_vignette(&backdrop, &VignetteParams::default()).unwrap();
//! assert_eq!(faded.pixel(0, 0), &[0, 0, 0, 0]);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod gradient;
pub mod mask;
pub mod qr;
pub mod resize;
pub mod vignette;

pub use error::{OpsError, OpsResult};
pub use resize::Filter;
pub use vignette::VignetteParams;
