//! # press-color
//!
//! Image-level conversion to CMYK for print.
//!
//! [`CmykConverter`] turns any readable raster into a CMYK file: already-CMYK
//! sources pass through, everything else goes through an ICC output profile
//! when one can be found and through the direct formula ([`direct_cmyk`])
//! when not. Profile failures are absorbed and logged; only unreadable
//! sources and failed writes are errors.
//!
//! ```text
//! source ──> read ──> CMYK? ──yes──> copy / re-encode
//!                       │
//!                       no
//!                       v
//!            flatten over white ──> profile found? ──yes──> lcms2 transform ──┐
//!                                       │                       │ (error)     │
//!                                       no <────────────────────┘             │
//!                                       v                                     v
//!                                  direct formula ─────────────────────> write (.jpg/.tif)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod converter;
mod direct;
mod error;

pub use converter::{profile_transform, CmykConverter, Conversion, ConversionPath};
pub use direct::direct_cmyk;
pub use error::{ColorError, ColorResult};
