//! Coordinate mapping and bilinear interpolation
//!
//! Output pixel `(j, r)` samples the source at `(x_ratio * j, y_ratio * r)`
//! with
//!
//! ```text
//! x_ratio = (in_width - 1) / out_width
//! y_ratio = (in_height - 1) / out_height
//! ```
//!
//! The integer part selects the top-left of a 2x2 neighbourhood and the
//! fractional part weights it:
//!
//! ```text
//! gray = A(1-xf)(1-yf) + B(xf)(1-yf) + C(yf)(1-xf) + D(xf)(yf)
//! ```
//!
//! where A..D are 0 or 255. The output bit is `gray >= threshold`.
//! All arithmetic is `f32` and integer parts are truncated toward zero, so
//! the streaming and whole-image paths, which both go through
//! [`interpolate_row`], agree bit for bit.

use crate::{StreamError, StreamResult};
use bitscale_core::PackedRow;

/// Sample value of a set source pixel
const WHITE: f32 = 255.0;

/// Input/output dimensions and the derived scale ratios of one resize
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleGeometry {
    in_width: u32,
    in_height: u32,
    out_width: u32,
    out_height: u32,
    x_ratio: f32,
    y_ratio: f32,
}

impl ScaleGeometry {
    /// Compute the geometry for an `in_width x in_height` to
    /// `out_width x out_height` resize.
    ///
    /// Output larger than input is accepted; samples that fall past the
    /// last source column or row read as background.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::InvalidDimensions`] if any dimension is 0.
    pub fn new(in_width: u32, in_height: u32, out_width: u32, out_height: u32) -> StreamResult<Self> {
        if in_width == 0 || in_height == 0 || out_width == 0 || out_height == 0 {
            return Err(StreamError::InvalidDimensions {
                in_width,
                in_height,
                out_width,
                out_height,
            });
        }
        Ok(Self {
            in_width,
            in_height,
            out_width,
            out_height,
            x_ratio: (in_width - 1) as f32 / out_width as f32,
            y_ratio: (in_height - 1) as f32 / out_height as f32,
        })
    }

    /// Source width in pixels
    #[inline]
    pub fn in_width(&self) -> u32 {
        self.in_width
    }

    /// Source height in pixels
    #[inline]
    pub fn in_height(&self) -> u32 {
        self.in_height
    }

    /// Output width in pixels
    #[inline]
    pub fn out_width(&self) -> u32 {
        self.out_width
    }

    /// Output height in pixels
    #[inline]
    pub fn out_height(&self) -> u32 {
        self.out_height
    }

    /// Horizontal source step per output column
    #[inline]
    pub fn x_ratio(&self) -> f32 {
        self.x_ratio
    }

    /// Vertical source step per output row
    #[inline]
    pub fn y_ratio(&self) -> f32 {
        self.y_ratio
    }

    /// Source column and horizontal weight for output column `j`.
    #[inline]
    pub fn source_x(&self, j: u32) -> (u32, f32) {
        split(self.x_ratio * j as f32)
    }

    /// Source row and vertical weight for output row `r`.
    #[inline]
    pub fn source_y(&self, r: u32) -> (u32, f32) {
        split(self.y_ratio * r as f32)
    }

    /// Upper source row sampled by output row `r` (`y0`).
    #[inline]
    pub fn first_input_row(&self, r: u32) -> u32 {
        self.source_y(r).0
    }

    /// Lower source row sampled by output row `r` (`y0 + 1`).
    ///
    /// Output row `r` can be computed once this row has been fed. The value
    /// is non-decreasing in `r`.
    #[inline]
    pub fn required_input_row(&self, r: u32) -> u32 {
        self.first_input_row(r) + 1
    }
}

#[inline]
fn split(pos: f32) -> (u32, f32) {
    let whole = pos as u32;
    (whole, pos - whole as f32)
}

#[inline]
fn sample(bit: bool) -> f32 {
    if bit { WHITE } else { 0.0 }
}

/// Blend the 2x2 neighbourhood `a b / c d` with weights `xf`, `yf`.
#[inline]
pub fn interpolate(a: bool, b: bool, c: bool, d: bool, xf: f32, yf: f32) -> f32 {
    sample(a) * (1.0 - xf) * (1.0 - yf)
        + sample(b) * xf * (1.0 - yf)
        + sample(c) * yf * (1.0 - xf)
        + sample(d) * (xf * yf)
}

/// Threshold an interpolated gray value (truncated to an integer level).
#[inline]
pub fn threshold(gray: f32, level: u8) -> bool {
    gray as i32 >= level as i32
}

/// Compute output row `r` into `out` from its two source rows.
///
/// `upper(x)` reads source row `y0` and `lower(x)` reads row `y0 + 1`; both
/// must return `false` past the last column.
pub(crate) fn interpolate_row<U, L>(
    geometry: &ScaleGeometry,
    r: u32,
    level: u8,
    upper: U,
    lower: L,
    out: &mut PackedRow,
) -> StreamResult<()>
where
    U: Fn(u32) -> bool,
    L: Fn(u32) -> bool,
{
    let (_, yf) = geometry.source_y(r);
    for j in 0..geometry.out_width {
        let (x0, xf) = geometry.source_x(j);
        let x1 = x0.saturating_add(1);
        let gray = interpolate(upper(x0), upper(x1), lower(x0), lower(x1), xf, yf);
        out.set(j, threshold(gray, level))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_ratios() {
        let g = ScaleGeometry::new(4, 4, 2, 2).unwrap();
        assert_eq!(g.x_ratio(), 1.5);
        assert_eq!(g.y_ratio(), 1.5);
        assert_eq!(g.source_x(1), (1, 0.5));
        assert_eq!(g.source_y(0), (0, 0.0));

        let g = ScaleGeometry::new(10, 10, 9, 9).unwrap();
        assert_eq!(g.y_ratio(), 1.0);
        assert_eq!(g.first_input_row(8), 8);
        assert_eq!(g.required_input_row(8), 9);
    }

    #[test]
    fn test_geometry_invalid() {
        assert!(matches!(
            ScaleGeometry::new(4, 4, 0, 2),
            Err(StreamError::InvalidDimensions { out_width: 0, .. })
        ));
        assert!(ScaleGeometry::new(4, 4, 2, 0).is_err());
        assert!(ScaleGeometry::new(0, 4, 2, 2).is_err());
    }

    #[test]
    fn test_required_rows_monotonic() {
        for (in_h, out_h) in [(100, 37), (1000, 999), (7, 7), (3, 2), (50, 1)] {
            let g = ScaleGeometry::new(10, in_h, 10, out_h).unwrap();
            for r in 1..out_h {
                assert!(g.required_input_row(r - 1) <= g.required_input_row(r));
            }
            // Downscaling never samples past the last source row
            assert!(g.required_input_row(out_h - 1) <= in_h.max(2) - 1);
        }
    }

    #[test]
    fn test_interpolate_corners() {
        assert_eq!(interpolate(true, false, false, false, 0.0, 0.0), 255.0);
        assert_eq!(interpolate(false, false, false, true, 1.0, 1.0), 255.0);
        assert_eq!(interpolate(false, true, true, true, 0.5, 0.5), 191.25);
        assert_eq!(interpolate(false, false, false, true, 0.5, 0.5), 63.75);
    }

    #[test]
    fn test_interpolate_asymmetric_weights() {
        let (xf, yf) = (0.25, 0.75);
        // Each corner alone carries its own weight
        assert_eq!(interpolate(true, false, false, false, xf, yf), 255.0 * 0.75 * 0.25);
        assert_eq!(interpolate(false, true, false, false, xf, yf), 255.0 * 0.25 * 0.25);
        assert_eq!(interpolate(false, false, true, false, xf, yf), 255.0 * 0.75 * 0.75);
        assert_eq!(interpolate(false, false, false, true, xf, yf), 255.0 * 0.25 * 0.75);
        assert_eq!(interpolate(true, true, true, true, xf, yf), 255.0);

        // Right neighbour weighs by xf, lower neighbour by yf
        assert!(threshold(interpolate(false, false, true, true, 0.1, 0.8), 180));
        assert!(!threshold(interpolate(false, true, false, true, 0.1, 0.8), 180));
    }

    #[test]
    fn test_interpolate_row_weights() {
        // 5x5 -> 2x3: x_ratio 2.0, y_ratio 4/3; row 1 samples y0 = 1, yf = 1/3
        let g = ScaleGeometry::new(5, 5, 2, 3).unwrap();
        let (y0, yf) = g.source_y(1);
        assert_eq!(y0, 1);
        assert!((yf - 1.0 / 3.0).abs() < 1e-6);

        let mut out = PackedRow::new(2).unwrap();
        // Only the lower row is white: gray = 255 * yf, about 85
        interpolate_row(&g, 1, 80, |_| false, |_| true, &mut out).unwrap();
        assert_eq!(out.count_ones(), 2);
        interpolate_row(&g, 1, 90, |_| false, |_| true, &mut out).unwrap();
        assert_eq!(out.count_ones(), 0);
        // Only the upper row is white: gray = 255 * (1 - yf), about 170
        interpolate_row(&g, 1, 165, |_| true, |_| false, &mut out).unwrap();
        assert_eq!(out.count_ones(), 2);
        interpolate_row(&g, 1, 175, |_| true, |_| false, &mut out).unwrap();
        assert_eq!(out.count_ones(), 0);
    }

    #[test]
    fn test_threshold_truncates() {
        assert!(threshold(180.0, 180));
        assert!(!threshold(179.99, 180));
        assert!(threshold(191.25, 180));
        assert!(threshold(0.0, 0));
    }
}
