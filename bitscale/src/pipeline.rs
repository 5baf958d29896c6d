//! Decode, resize and encode in one call
//!
//! The decoder pushes pixels into a [`FeedDriver`], which resizes as rows
//! arrive; the finished output raster is then handed to the encoder.

use bitscale_core::{Bitmap, PackedRow};
use bitscale_io::{
    ImageFormat, IoError, IoResult, decode_pbm, decode_png, detect_format, write_pbm,
    write_png_1bpp,
};
use bitscale_stream::{FeedDriver, ScaleOptions};
use log::info;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Seek, Write};
use std::path::Path;

/// Resize an image stream of format `input` into `output`.
///
/// # Errors
///
/// Decoder, resampler and encoder errors are all reported as [`IoError`].
pub fn scale_image<R, W>(
    reader: R,
    writer: W,
    input: ImageFormat,
    output: ImageFormat,
    out_width: u32,
    out_height: u32,
    options: &ScaleOptions,
) -> IoResult<Bitmap>
where
    R: BufRead + Seek,
    W: Write,
{
    let mut driver = FeedDriver::to_bitmap(out_width, out_height, options.clone());
    match input {
        ImageFormat::Png => decode_png(reader, &mut driver, options.black_level)?,
        ImageFormat::Pbm => decode_pbm(reader, &mut driver)?,
    }
    let bitmap = driver.finish()?.into_bitmap()?;

    let rows = |y: u32, row: &mut PackedRow| -> IoResult<()> {
        Ok(bitmap.copy_row_into(y, row)?)
    };
    match output {
        ImageFormat::Png => write_png_1bpp(writer, out_width, out_height, rows)?,
        ImageFormat::Pbm => write_pbm(writer, out_width, out_height, rows)?,
    }
    Ok(bitmap)
}

/// Resize a PNG into a 1-bit PNG.
pub fn scale_png<R, W>(
    reader: R,
    writer: W,
    out_width: u32,
    out_height: u32,
    options: &ScaleOptions,
) -> IoResult<Bitmap>
where
    R: BufRead + Seek,
    W: Write,
{
    scale_image(
        reader,
        writer,
        ImageFormat::Png,
        ImageFormat::Png,
        out_width,
        out_height,
        options,
    )
}

/// Resize a PBM into a binary PBM.
pub fn scale_pbm<R, W>(
    reader: R,
    writer: W,
    out_width: u32,
    out_height: u32,
    options: &ScaleOptions,
) -> IoResult<Bitmap>
where
    R: BufRead + Seek,
    W: Write,
{
    scale_image(
        reader,
        writer,
        ImageFormat::Pbm,
        ImageFormat::Pbm,
        out_width,
        out_height,
        options,
    )
}

/// Resize the image at `input` and write it to `output`.
///
/// The input format is detected from its magic number. The output format
/// follows the output file extension, falling back to the input format.
pub fn scale_file<P, Q>(
    input: P,
    output: Q,
    out_width: u32,
    out_height: u32,
    options: &ScaleOptions,
) -> IoResult<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let (input, output) = (input.as_ref(), output.as_ref());
    let in_format = detect_format(input)?;
    let out_format = output
        .extension()
        .and_then(|e| e.to_str())
        .and_then(ImageFormat::from_extension)
        .unwrap_or(in_format);

    let reader = BufReader::new(File::open(input)?);
    let mut writer = BufWriter::new(File::create(output)?);
    scale_image(
        reader,
        &mut writer,
        in_format,
        out_format,
        out_width,
        out_height,
        options,
    )?;
    writer.flush().map_err(IoError::Io)?;
    info!(
        "scaled {} ({:?}) to {}x{} {} ({:?})",
        input.display(),
        in_format,
        out_width,
        out_height,
        output.display(),
        out_format
    );
    Ok(())
}
