//! PBM (portable bitmap) format support
//!
//! Reads P1 (ASCII) and P4 (binary) bitmaps and writes P4. In PBM a 1 is
//! black, so bits are inverted on the way in and out to keep the workspace
//! convention of set = white.
//!
//! # See also
//! Netpbm `pbm(5)` format description.

use crate::bits::{line_buffer, msb_bit, pack_msb_first};
use crate::{IoError, IoResult};
use bitscale_core::PackedRow;
use bitscale_stream::DecodeCallbacks;
use log::debug;
use std::io::{BufRead, Read, Write};

/// Read one byte, `None` at end of input.
fn next_byte<R: BufRead>(reader: &mut R) -> IoResult<Option<u8>> {
    let mut byte = [0u8; 1];
    match reader.read(&mut byte)? {
        0 => Ok(None),
        _ => Ok(Some(byte[0])),
    }
}

/// Skip whitespace and `#` comments, returning the next significant byte.
fn next_significant<R: BufRead>(reader: &mut R) -> IoResult<Option<u8>> {
    loop {
        match next_byte(reader)? {
            Some(b'#') => loop {
                match next_byte(reader)? {
                    Some(b'\n') | Some(b'\r') => break,
                    Some(_) => {}
                    None => return Ok(None),
                }
            },
            Some(b) if b.is_ascii_whitespace() => {}
            other => return Ok(other),
        }
    }
}

/// Read a header token. The single whitespace byte ending it is consumed.
fn read_token<R: BufRead>(reader: &mut R) -> IoResult<String> {
    let mut token = String::new();
    let mut next = next_significant(reader)?;
    while let Some(b) = next {
        if b.is_ascii_whitespace() {
            break;
        }
        token.push(b as char);
        next = next_byte(reader)?;
    }
    if token.is_empty() {
        return Err(IoError::InvalidData("truncated PBM header".to_string()));
    }
    Ok(token)
}

fn read_dimension<R: BufRead>(reader: &mut R, what: &str) -> IoResult<u32> {
    let token = read_token(reader)?;
    match token.parse::<u32>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(IoError::InvalidData(format!("invalid PBM {}: {:?}", what, token))),
    }
}

/// Decode a P1 or P4 PBM, reporting every pixel to `callbacks` in raster
/// order.
pub fn decode_pbm<R, C>(mut reader: R, callbacks: &mut C) -> IoResult<()>
where
    R: BufRead,
    C: DecodeCallbacks + ?Sized,
{
    let magic = read_token(&mut reader)?;
    let ascii = match magic.as_str() {
        "P1" => true,
        "P4" => false,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "not a PBM file (magic {:?})",
                other
            )));
        }
    };
    let width = read_dimension(&mut reader, "width")?;
    let height = read_dimension(&mut reader, "height")?;
    debug!("PBM {} {}x{}", magic, width, height);

    callbacks.on_begin(width, height)?;
    if ascii {
        for y in 0..height {
            for x in 0..width {
                let bit = match next_significant(&mut reader)? {
                    Some(b'0') => true,
                    Some(b'1') => false,
                    Some(b) => {
                        return Err(IoError::InvalidData(format!(
                            "unexpected byte {:#04x} in P1 data at ({}, {})",
                            b, x, y
                        )));
                    }
                    None => {
                        return Err(IoError::DecodeError(format!(
                            "P1 data ended at ({}, {})",
                            x, y
                        )));
                    }
                };
                callbacks.on_pixel(x, y, bit)?;
            }
        }
    } else {
        let mut line = line_buffer(PackedRow::bytes_for_width(width))?;
        for y in 0..height {
            reader.read_exact(&mut line).map_err(|e| {
                IoError::DecodeError(format!("P4 data ended at row {}: {}", y, e))
            })?;
            for x in 0..width {
                callbacks.on_pixel(x, y, !msb_bit(&line, x))?;
            }
        }
    }
    callbacks.on_end()?;
    Ok(())
}

/// Write a binary (P4) PBM.
///
/// `rows(y, row)` fills `row` with output row `y`; rows are requested in
/// order from 0 to `height - 1`. A set pixel is written as white (PBM 0).
pub fn write_pbm<W, F>(mut writer: W, width: u32, height: u32, mut rows: F) -> IoResult<()>
where
    W: Write,
    F: FnMut(u32, &mut PackedRow) -> IoResult<()>,
{
    let mut row = PackedRow::new(width)?;
    let mut line = line_buffer(row.as_bytes().len())?;

    write!(writer, "P4\n{} {}\n", width, height)?;
    for y in 0..height {
        rows(y, &mut row)?;
        pack_msb_first(&row, &mut line, true);
        writer.write_all(&line)?;
    }
    writer.flush()?;
    Ok(())
}
