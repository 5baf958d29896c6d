//! Conversion between the low-bit-first row layout and the MSB-first
//! layout used by PNG and PBM scanlines.

use crate::IoResult;
use bitscale_core::PackedRow;

/// Allocate a zeroed scanline buffer of `len` bytes.
///
/// `len` comes from an untrusted file header, so allocation failure is
/// returned as [`bitscale_core::Error::AllocationFailed`].
pub(crate) fn line_buffer(len: usize) -> IoResult<Vec<u8>> {
    let mut line = Vec::new();
    line.try_reserve_exact(len)
        .map_err(|_| bitscale_core::Error::AllocationFailed { bytes: len })?;
    line.resize(len, 0);
    Ok(line)
}

/// Write `row` into `out` MSB first, inverting every pixel if `invert`.
///
/// Padding bits at the end of the last byte are always zero.
pub(crate) fn pack_msb_first(row: &PackedRow, out: &mut [u8], invert: bool) {
    for (dst, &src) in out.iter_mut().zip(row.as_bytes()) {
        let byte = src.reverse_bits();
        *dst = if invert { !byte } else { byte };
    }
    let tail = row.width() % 8;
    if tail != 0
        && let Some(last) = out.last_mut()
    {
        *last &= 0xff << (8 - tail);
    }
}

/// Read pixel `x` from an MSB-first scanline.
#[inline]
pub(crate) fn msb_bit(line: &[u8], x: u32) -> bool {
    (line[(x / 8) as usize] >> (7 - x % 8)) & 1 != 0
}
