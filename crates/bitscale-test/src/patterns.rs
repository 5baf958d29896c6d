//! Deterministic bitonal test patterns
//!
//! Every pattern is a pure function of its arguments, so regression tests
//! can rebuild the same source image on every run.

use bitscale_core::Bitmap;

/// Alternating square cells of `cell` pixels, white in the top-left.
pub fn checkerboard(width: u32, height: u32, cell: u32) -> Bitmap {
    let cell = cell.max(1);
    build(width, height, |x, y| (x / cell + y / cell) % 2 == 0)
}

/// Diagonal stripes, `period / 2` pixels wide, running down to the right.
pub fn diagonal_stripes(width: u32, height: u32, period: u32) -> Bitmap {
    let period = period.max(2);
    build(width, height, |x, y| (x + y) % period < period / 2)
}

/// Sparse dots, roughly one pixel in eight, placed by a coordinate hash.
pub fn scattered_dots(width: u32, height: u32, seed: u32) -> Bitmap {
    build(width, height, |x, y| {
        let h = (x.wrapping_mul(0x9e37_79b1) ^ y.wrapping_mul(0x85eb_ca77) ^ seed)
            .wrapping_mul(0xc2b2_ae3d);
        h >> 29 == 0
    })
}

/// Dark strokes on a white page in 8x12 glyph cells, like scanned text.
pub fn text_like(width: u32, height: u32) -> Bitmap {
    build(width, height, |x, y| {
        let (cx, cy) = (x / 8, y / 12);
        let (gx, gy) = (x % 8, y % 12);
        // Blank line every fourth text row and a gap column in each cell
        if cy % 4 == 3 || gx == 7 || gy >= 10 {
            return true;
        }
        let glyph = cx.wrapping_mul(31) ^ cy.wrapping_mul(17);
        let stem = gx == 1 + glyph % 5;
        let bar = gy == 2 + glyph % 7 && gx < 6;
        !(stem || bar)
    })
}

fn build<F: FnMut(u32, u32) -> bool>(width: u32, height: u32, f: F) -> Bitmap {
    match Bitmap::from_fn(width, height, f) {
        Ok(bitmap) => bitmap,
        Err(e) => panic!("test pattern {width}x{height}: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkerboard() {
        let bm = checkerboard(8, 8, 2);
        assert!(bm.get(0, 0));
        assert!(bm.get(1, 1));
        assert!(!bm.get(2, 0));
        assert_eq!(bm.count_ones(), 32);
    }

    #[test]
    fn test_patterns_are_deterministic() {
        assert_eq!(scattered_dots(40, 30, 7), scattered_dots(40, 30, 7));
        assert_ne!(scattered_dots(40, 30, 7), scattered_dots(40, 30, 8));
        assert_eq!(text_like(64, 48), text_like(64, 48));
    }

    #[test]
    fn test_pattern_density() {
        let dots = scattered_dots(200, 200, 1);
        let ones = dots.count_ones();
        assert!(ones > 2_000 && ones < 8_000, "dot count {ones}");

        let text = text_like(160, 96);
        let ones = text.count_ones();
        assert!(ones > 160 * 96 / 2 && ones < 160 * 96, "text white count {ones}");
    }
}
