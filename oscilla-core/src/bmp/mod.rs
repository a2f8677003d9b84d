//! Minimal BMP decoding
//!
//! Supports the uncompressed, single-plane, 24-bit variant of the Windows
//! bitmap format, read from an in-memory buffer (typically an image embedded
//! in flash) and streamed pixel by pixel into a [`RenderSink`].
//!
//! ```text
//! offset  size  field
//!      0     2  magic "BM" (0x4D42 little-endian)
//!      2     4  file size
//!      6     4  reserved
//!     10     4  pixel data offset
//!     14     4  DIB header size
//!     18     4  width (signed)
//!     22     4  height (signed)
//!     26     2  color planes (must be 1)
//!     28     2  bits per pixel
//!     30     4  compression (must be 0)
//! ```

pub mod blit;
pub mod bytes;
pub mod header;

pub use blit::{blit, blit_with, pack_pixel, BlitOptions, RowAlignment};
pub use bytes::{read16, read32, read_i32};
pub use header::{parse_header, RasterHeader, BMP_MAGIC, HEADER_LEN};

use oscilla_display::{DisplayError, RenderSink};

/// Errors from decoding or drawing a bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BmpError {
    /// Magic, plane count, compression or bit depth not supported
    InvalidFormat,
    /// A header field or pixel span lies past the end of the buffer
    TruncatedData,
    /// The render sink rejected a pixel
    Display(DisplayError),
}

impl From<DisplayError> for BmpError {
    fn from(err: DisplayError) -> Self {
        BmpError::Display(err)
    }
}

/// A validated bitmap borrowed from a byte buffer
#[derive(Debug, Clone, Copy)]
pub struct Bitmap<'a> {
    data: &'a [u8],
    header: RasterHeader,
    options: BlitOptions,
}

impl<'a> Bitmap<'a> {
    /// Parse the header of `data`
    pub fn from_bytes(data: &'a [u8]) -> Result<Self, BmpError> {
        let header = parse_header(data)?;
        Ok(Self {
            data,
            header,
            options: BlitOptions::default(),
        })
    }

    /// Use a different scanline alignment when drawing
    pub fn with_alignment(mut self, alignment: RowAlignment) -> Self {
        self.options.alignment = alignment;
        self
    }

    /// Shift columns by `origin_x` when drawing
    pub fn with_column_offset(mut self, offset_columns: bool) -> Self {
        self.options.offset_columns = offset_columns;
        self
    }

    /// Parsed header
    pub fn header(&self) -> &RasterHeader {
        &self.header
    }

    /// Draw the image with `origin_y` as the row offset
    ///
    /// `origin_x` only moves the image when the column offset is enabled.
    ///
    /// Returns the number of pixels written.
    pub fn draw<S: RenderSink>(
        &self,
        origin_x: i32,
        origin_y: i32,
        sink: &mut S,
    ) -> Result<u32, BmpError> {
        blit_with(self.data, &self.header, origin_x, origin_y, self.options, sink)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::synthetic_bmp;
    use super::*;
    use crate::testing::{Call, RecordingSink};

    #[test]
    fn test_bitmap_parses_and_draws() {
        let data = synthetic_bmp(1, 1, &[0x00, 0x00, 0xFF]);
        let bitmap = Bitmap::from_bytes(&data).unwrap();
        assert_eq!(bitmap.header().width, 1);

        let mut sink = RecordingSink::new();
        let written = bitmap.draw(5, 10, &mut sink).unwrap();

        assert_eq!(written, 1);
        assert_eq!(sink.calls(), &[Call::Pixel(0, 11, 0xF800)]);

        sink.clear_log();
        bitmap.with_column_offset(true).draw(5, 10, &mut sink).unwrap();
        assert_eq!(sink.calls(), &[Call::Pixel(5, 11, 0xF800)]);
    }

    #[test]
    fn test_bitmap_rejects_bad_magic() {
        let mut data = synthetic_bmp(1, 1, &[0, 0, 0]);
        data[0] = b'P';
        assert_eq!(Bitmap::from_bytes(&data).err(), Some(BmpError::InvalidFormat));
    }

    #[test]
    fn test_bitmap_dword_alignment() {
        // 1 pixel wide: 3 data bytes + 1 padding byte per row
        let payload = [0x00, 0x00, 0xF8, 0xEE, 0x1F, 0x00, 0x00, 0xEE];
        let data = synthetic_bmp(1, 2, &payload);
        let bitmap = Bitmap::from_bytes(&data)
            .unwrap()
            .with_alignment(RowAlignment::Dword);

        let mut sink = RecordingSink::new();
        bitmap.draw(0, 0, &mut sink).unwrap();

        assert_eq!(
            sink.calls(),
            &[Call::Pixel(0, 2, 0xF800), Call::Pixel(0, 1, 0x0003)]
        );
    }

    #[test]
    fn test_sink_error_propagates() {
        let data = synthetic_bmp(1, 1, &[0, 0, 0]);
        let bitmap = Bitmap::from_bytes(&data).unwrap();

        let mut sink = RecordingSink::failing();
        assert_eq!(
            bitmap.draw(0, 0, &mut sink),
            Err(BmpError::Display(DisplayError::Communication))
        );
    }
}
