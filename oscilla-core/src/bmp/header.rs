//! Bitmap file header
//!
//! Fields are read strictly in storage order; any field that does not match
//! the supported subset rejects the whole header.

use super::bytes::{read16, read32, read_i32};
use super::BmpError;

/// Magic bytes `B`,`M` read as a little-endian `u16`
pub const BMP_MAGIC: u16 = 0x4D42;

/// Bytes covered by the parsed header fields
pub const HEADER_LEN: usize = 34;

/// Only single-plane images are supported
pub const REQUIRED_PLANES: u16 = 1;

/// Only uncompressed (BI_RGB) images are supported
pub const REQUIRED_COMPRESSION: u32 = 0;

/// Bytes skipped after the file size (creator/reserved fields)
const RESERVED_LEN: usize = 4;

/// Parsed bitmap header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RasterHeader {
    /// Total file size as recorded in the header
    pub file_size: u32,
    /// Byte offset of the first scanline from the start of the buffer
    pub pixel_data_offset: u32,
    /// Size of the DIB header that follows the file header
    pub header_size: u32,
    /// Image width in pixels
    pub width: i32,
    /// Image height in pixels (positive means bottom-up storage)
    pub height: i32,
    /// Number of color planes
    pub color_planes: u16,
    /// Bits per pixel
    pub bits_per_pixel: u16,
    /// Compression method
    pub compression: u32,
}

/// Sequential reader over the header bytes
struct FieldReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> FieldReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn u16(&mut self) -> Result<u16, BmpError> {
        let value = read16(self.buf, self.pos)?;
        self.pos += 2;
        Ok(value)
    }

    fn u32(&mut self) -> Result<u32, BmpError> {
        let value = read32(self.buf, self.pos)?;
        self.pos += 4;
        Ok(value)
    }

    fn i32(&mut self) -> Result<i32, BmpError> {
        let value = read_i32(self.buf, self.pos)?;
        self.pos += 4;
        Ok(value)
    }

    fn skip(&mut self, len: usize) {
        self.pos += len;
    }
}

impl RasterHeader {
    /// Parse and validate the header at the start of `buf`
    pub fn parse(buf: &[u8]) -> Result<Self, BmpError> {
        let mut reader = FieldReader::new(buf);

        if reader.u16()? != BMP_MAGIC {
            return Err(BmpError::InvalidFormat);
        }

        let file_size = reader.u32()?;
        reader.skip(RESERVED_LEN);
        let pixel_data_offset = reader.u32()?;
        let header_size = reader.u32()?;
        let width = reader.i32()?;
        let height = reader.i32()?;

        let color_planes = reader.u16()?;
        if color_planes != REQUIRED_PLANES {
            return Err(BmpError::InvalidFormat);
        }

        let bits_per_pixel = reader.u16()?;

        let compression = reader.u32()?;
        if compression != REQUIRED_COMPRESSION {
            return Err(BmpError::InvalidFormat);
        }

        Ok(Self {
            file_size,
            pixel_data_offset,
            header_size,
            width,
            height,
            color_planes,
            bits_per_pixel,
            compression,
        })
    }

    /// Width clamped to zero for negative values
    pub fn columns(&self) -> usize {
        self.width.max(0) as usize
    }

    /// Height clamped to zero for negative values
    pub fn rows(&self) -> usize {
        self.height.max(0) as usize
    }
}

/// Parse and validate a bitmap header
pub fn parse_header(buf: &[u8]) -> Result<RasterHeader, BmpError> {
    RasterHeader::parse(buf)
}
