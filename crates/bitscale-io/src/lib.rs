//! bitscale-io - Decoder and encoder adapters for bitscale
//!
//! The resampler consumes pixels through
//! [`DecodeCallbacks`](bitscale_stream::DecodeCallbacks) and produces packed
//! output rows. This crate connects it to image files:
//!
//! - [`decode_png`] / [`decode_pbm`] - push-style decoders that report each
//!   pixel, reduced to one bit, in raster order
//! - [`write_png_1bpp`] / [`write_pbm`] - encoders that pull output rows
//!   from a row-producing function
//! - [`detect_format_from_bytes`] - magic-number format detection
//!
//! # Feature flags
//!
//! - `png-format` (default) - PNG support via the `png` crate
//! - `pnm` (default) - PBM support

mod bits;
mod error;
pub mod format;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};
#[cfg(feature = "png-format")]
pub use self::png::{decode_png, write_png_1bpp};
#[cfg(feature = "pnm")]
pub use self::pnm::{decode_pbm, write_pbm};
