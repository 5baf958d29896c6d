//! bitscale-stream - Streaming bilinear downscaling of 1-bit rasters
//!
//! This crate resizes a bitonal image to a fixed target size while the
//! source arrives one pixel at a time in raster order, keeping only a few
//! source rows in memory:
//!
//! - [`RowCache`] - fixed-capacity store of recently fed scanlines
//! - [`StreamScaler`] - coordinate mapping, readiness checks and bilinear
//!   interpolation of one output row at a time
//! - [`FeedDriver`] - adapter from decoder callbacks ([`DecodeCallbacks`])
//!   to the scaler, draining finished rows into a [`RowSink`]
//! - [`scale_bitmap`] - the same resize over a fully materialized image
//!
//! Memory use is bounded by the cache capacity times the row width,
//! independent of the image height.

pub mod cache;
pub mod driver;
mod error;
pub mod kernel;
pub mod options;
pub mod reference;
pub mod scaler;

pub use cache::{CachedRow, RowCache};
pub use driver::{DecodeCallbacks, FeedDriver, RasterSink, RowSink};
pub use error::{StreamError, StreamResult};
pub use kernel::ScaleGeometry;
pub use options::{
    DEFAULT_BLACK_LEVEL, DEFAULT_CACHE_CAPACITY, DEFAULT_GRAY_THRESHOLD, MAX_BLACK_LEVEL,
    ScaleOptions, pixel_is_set,
};
pub use reference::scale_bitmap;
pub use scaler::StreamScaler;
