//! # press-assets
//!
//! Content-addressed preparation of print assets.
//!
//! Callers describe what they need as a request value (gradient, vignette,
//! QR code, CMYK conversion, logo). The [`AssetPipeline`] derives a stable
//! SHA-256 key from the request, returns the cached file when one exists,
//! and otherwise generates the asset and stores it under the key.
//!
//! ```text
//! request ──► cache_key ──► CacheStore lookup ──hit──► path
//!                                 │
//!                                miss
//!                                 ▼
//!                  generator / CmykConverter ──► atomic write ──► path
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use press_assets::{AssetPipeline, AssetRequest, QrRequest, VignetteRequest};
//!
//! let pipeline = AssetPipeline::new("build/asset_cache")?;
//!
//! let hero = pipeline.prepare(&VignetteRequest::new("photos/hero.png").into())?;
//! let qr = pipeline.prepare(&AssetRequest::from(QrRequest::new("https://example.com")))?;
//! println!("{} {}", hero.display(), qr.display());
//! # Ok::<(), press_assets::AssetError>(())
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod key;
mod pipeline;
mod request;
mod store;

pub use config::PipelineConfig;
pub use error::{AssetError, AssetResult};
pub use key::{CacheKey, KeyBuilder};
pub use pipeline::{AssetPipeline, PipelineStats};
pub use request::{AssetRequest, CmykConversionRequest, GradientRequest, LogoRequest, QrRequest, VignetteRequest};
pub use store::{CacheStore, DEFAULT_EXTENSION};
