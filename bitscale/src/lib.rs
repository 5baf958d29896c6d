//! bitscale - Streaming bilinear downscaling of 1-bit images
//!
//! Resizes a bitonal image to a fixed target size while the decoder is
//! still producing it, holding only a handful of source rows in memory.
//! The output is bit-identical to a bilinear resize of the fully decoded
//! image.
//!
//! # Overview
//!
//! - [`raster`] - packed 1-bit rows and rasters
//! - [`stream`] - row cache, streaming resampler and decoder glue
//! - [`io`] - PNG and PBM decoders and 1-bit encoders
//! - [`scale_png`], [`scale_pbm`], [`scale_file`] - one-call pipelines
//!
//! # Example
//!
//! ```
//! use bitscale::stream::{DecodeCallbacks, FeedDriver, ScaleOptions};
//!
//! let mut driver = FeedDriver::to_bitmap(100, 50, ScaleOptions::default());
//! driver.on_begin(400, 200).unwrap();
//! for y in 0..200 {
//!     for x in 0..400 {
//!         driver.on_pixel(x, y, (x / 20 + y / 20) % 2 == 0).unwrap();
//!     }
//! }
//! driver.on_end().unwrap();
//! let out = driver.finish().unwrap().into_bitmap().unwrap();
//! assert_eq!(out.dimensions(), (100, 50));
//! ```

mod pipeline;

// Re-export the member crates as modules
pub use bitscale_core as raster;
pub use bitscale_io as io;
pub use bitscale_stream as stream;

pub use bitscale_core::{Bitmap, PackedRow};
pub use bitscale_stream::{ScaleOptions, StreamError};
pub use pipeline::{scale_file, scale_image, scale_png, scale_pbm};
