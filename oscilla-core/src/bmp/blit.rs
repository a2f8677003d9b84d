//! Raster to render sink writer
//!
//! Scanlines are stored bottom-up: the first row in the buffer is written at
//! `origin_y + height`, the last at `origin_y + 1`. Columns start at x = 0
//! unless [`BlitOptions::offset_columns`] is set. Each pixel is three bytes
//! (blue, green, red) converted to RGB565 on the way out.

use oscilla_display::{RenderSink, Rgb565};

use super::header::RasterHeader;
use super::BmpError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bytes per 24-bit pixel
pub const BYTES_PER_PIXEL: usize = 3;

/// Only 24-bit images can be blitted
pub const SUPPORTED_DEPTH: u16 = 24;

/// Scanline layout in the pixel data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RowAlignment {
    /// Rows are packed back to back with no padding
    ///
    /// Matches standard BMP files only when `width * 3` is a multiple of 4.
    #[default]
    Packed,
    /// Rows are padded to a 4-byte boundary, as standard BMP files are
    Dword,
}

impl RowAlignment {
    /// Bytes occupied by one scanline of `width` pixels
    pub fn stride(self, width: usize) -> Option<usize> {
        let packed = width.checked_mul(BYTES_PER_PIXEL)?;
        match self {
            RowAlignment::Packed => Some(packed),
            RowAlignment::Dword => packed.checked_add(3).map(|len| len & !3),
        }
    }
}

/// Blit tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlitOptions {
    /// Scanline alignment of the pixel data
    pub alignment: RowAlignment,
    /// Shift columns by `origin_x`; when unset `origin_x` is ignored
    pub offset_columns: bool,
}

/// Convert a stored (blue, green, red) sample to RGB565
pub fn pack_pixel(blue: u8, green: u8, red: u8) -> Rgb565 {
    Rgb565::from_rgb888(red, green, blue)
}

/// Blit packed-row pixel data described by `header` into `sink`
///
/// Returns the number of pixels written.
pub fn blit<S: RenderSink>(
    buf: &[u8],
    header: &RasterHeader,
    origin_x: i32,
    origin_y: i32,
    sink: &mut S,
) -> Result<u32, BmpError> {
    blit_with(buf, header, origin_x, origin_y, BlitOptions::default(), sink)
}

/// Blit pixel data with explicit options
///
/// The header and the extent of the pixel data are validated before the
/// first pixel is written; a failing check leaves the sink untouched.
pub fn blit_with<S: RenderSink>(
    buf: &[u8],
    header: &RasterHeader,
    origin_x: i32,
    origin_y: i32,
    options: BlitOptions,
    sink: &mut S,
) -> Result<u32, BmpError> {
    if header.bits_per_pixel != SUPPORTED_DEPTH {
        return Err(BmpError::InvalidFormat);
    }

    let columns = header.columns();
    let rows = header.rows();
    if columns == 0 || rows == 0 {
        return Ok(0);
    }

    let stride = options
        .alignment
        .stride(columns)
        .ok_or(BmpError::TruncatedData)?;
    let start = header.pixel_data_offset as usize;
    let end = stride
        .checked_mul(rows)
        .and_then(|span| span.checked_add(start))
        .ok_or(BmpError::TruncatedData)?;
    let pixels = buf.get(start..end).ok_or(BmpError::TruncatedData)?;

    let mut written = 0u32;
    for (scanline, row) in pixels.chunks_exact(stride).zip((1..=rows).rev()) {
        let y = origin_y.saturating_add(row as i32);
        let samples = scanline[..columns * BYTES_PER_PIXEL].chunks_exact(BYTES_PER_PIXEL);
        for (column, sample) in samples.enumerate() {
            let x = if options.offset_columns {
                origin_x.saturating_add(column as i32)
            } else {
                column as i32
            };
            sink.set_pixel(x, y, pack_pixel(sample[0], sample[1], sample[2]))?;
            written += 1;
        }
    }

    Ok(written)
}
