//! Whole-image bilinear resize
//!
//! Applies the same interpolation as [`StreamScaler`](crate::StreamScaler)
//! to a fully materialized source. It holds the entire image in memory and
//! exists as the reference the streaming path is checked against.

use crate::kernel::{ScaleGeometry, interpolate_row};
use crate::{ScaleOptions, StreamResult};
use bitscale_core::{Bitmap, PackedRow};

/// Resize `src` to `out_width x out_height`.
///
/// Only `gray_threshold` is taken from `options`.
///
/// # Example
///
/// ```
/// use bitscale_core::Bitmap;
/// use bitscale_stream::{ScaleOptions, scale_bitmap};
///
/// let src = Bitmap::from_fn(8, 8, |_, _| true).unwrap();
/// let out = scale_bitmap(&src, 3, 3, &ScaleOptions::default()).unwrap();
/// assert_eq!(out.count_ones(), 9);
/// ```
pub fn scale_bitmap(
    src: &Bitmap,
    out_width: u32,
    out_height: u32,
    options: &ScaleOptions,
) -> StreamResult<Bitmap> {
    let geometry = ScaleGeometry::new(src.width(), src.height(), out_width, out_height)?;
    let mut dst = Bitmap::new(out_width, out_height)?;
    let mut row = PackedRow::new(out_width)?;
    for r in 0..out_height {
        let y0 = geometry.first_input_row(r);
        interpolate_row(
            &geometry,
            r,
            options.gray_threshold,
            |x| src.get(x, y0),
            |x| src.get(x, y0 + 1),
            &mut row,
        )?;
        dst.write_row(r, &row)?;
    }
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StreamError;

    #[test]
    fn test_identity_ratio() {
        // 5 -> 4 has ratio 1.0, so every output pixel copies a source pixel
        let src = Bitmap::from_fn(5, 5, |x, y| (x * y) % 3 == 1).unwrap();
        let out = scale_bitmap(&src, 4, 4, &ScaleOptions::default()).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(out.get(x, y), src.get(x, y), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_blend_threshold() {
        let src = Bitmap::from_fn(4, 4, |x, y| matches!((x, y), (2, 1) | (1, 2) | (2, 2))).unwrap();
        let out = scale_bitmap(&src, 2, 2, &ScaleOptions::default()).unwrap();
        assert!(out.get(1, 1));
        assert_eq!(out.count_ones(), 1);

        // 191 is below a threshold of 192
        let strict = ScaleOptions::default().gray_threshold(192);
        let out = scale_bitmap(&src, 2, 2, &strict).unwrap();
        assert_eq!(out.count_ones(), 0);
    }

    #[test]
    fn test_zero_target() {
        let src = Bitmap::new(4, 4).unwrap();
        assert!(matches!(
            scale_bitmap(&src, 0, 2, &ScaleOptions::default()),
            Err(StreamError::InvalidDimensions { .. })
        ));
    }
}
