//! bitscale-test - Regression test harness for bitscale
//!
//! This crate provides a small regression-test framework in the style of
//! Leptonica's `regutils.c`, plus deterministic bitonal test patterns so
//! tests need no image files on disk.
//!
//! # Usage
//!
//! ```ignore
//! use bitscale_test::{RegParams, patterns};
//!
//! let mut rp = RegParams::new("stream_scale");
//! let src = patterns::checkerboard(64, 48, 4);
//! rp.compare_values(3072.0, src.count_ones() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "display" to print compared bitmaps
//! - `RUST_LOG`: Log filter for the library crates under test

mod params;
pub mod patterns;

pub use params::{RegParams, RegTestMode, bitmap_to_ascii};
