//! bitscale-core - Packed 1-bit raster types
//!
//! This crate provides the bit-packed storage shared by the rest of the
//! bitscale workspace:
//!
//! - [`PackedRow`] - a single scanline, used for cached input rows and
//!   for each produced output row
//! - [`Bitmap`] - a full-frame raster, used as the output sink and as the
//!   source of the whole-image reference resize
//!
//! Both pack 8 pixels per byte, low bit first (pixel `x` is bit `x % 8` of
//! byte `x / 8`). A set bit is a white pixel.

pub mod bitmap;
pub mod error;
pub mod row;

pub use bitmap::Bitmap;
pub use error::{Error, Result};
pub use row::PackedRow;
