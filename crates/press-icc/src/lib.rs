//! # press-icc
//!
//! ICC output profile support for print asset preparation.
//!
//! This crate wraps Little CMS 2 to convert 8-bit RGB pixels into the ink
//! space described by a CMYK output profile (press condition, paper, ink
//! set), and knows where such profiles are conventionally installed.
//!
//! # Features
//!
//! - Load ICC profiles from files or embedded data
//! - Build sRGB to CMYK transforms with a chosen rendering intent
//! - Locate an output profile on a fixed, ordered search path
//!
//! # Example
//!
//! ```rust,no_run
//! use press_icc::{CmykTransform, Intent, Profile, ProfileLookup, ProfileSearch};
//! use std::path::Path;
//!
//! let search = ProfileSearch::standard(Path::new("assets"));
//! if let ProfileLookup::Profile(path) = search.locate(None) {
//!     let press = Profile::from_file(&path).unwrap();
//!     let transform = CmykTransform::new(&Profile::srgb(), &press, Intent::Perceptual).unwrap();
//!
//!     let rgb = [[255u8, 128, 0]];
//!     let mut cmyk = [[0u8; 4]];
//!     transform.apply(&rgb, &mut cmyk);
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod profile;
mod search;
mod transform;

pub use error::{IccError, IccResult};
pub use profile::Profile;
pub use search::{ProfileLookup, ProfileSearch};
pub use transform::CmykTransform;

/// Rendering intent for color transformations.
///
/// Determines how out-of-gamut colors are handled during conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Intent {
    /// Compresses the whole source gamut into the destination gamut.
    ///
    /// Keeps relationships between colors; the usual choice for images
    /// going to press.
    #[default]
    Perceptual,

    /// Maps white to paper white and clips out-of-gamut colors.
    RelativeColorimetric,

    /// Keeps colors vivid at the expense of accuracy.
    Saturation,

    /// Like relative colorimetric but without white point adaptation.
    AbsoluteColorimetric,
}

impl From<Intent> for lcms2::Intent {
    fn from(intent: Intent) -> Self {
        match intent {
            Intent::Perceptual => lcms2::Intent::Perceptual,
            Intent::RelativeColorimetric => lcms2::Intent::RelativeColorimetric,
            Intent::Saturation => lcms2::Intent::Saturation,
            Intent::AbsoluteColorimetric => lcms2::Intent::AbsoluteColorimetric,
        }
    }
}
