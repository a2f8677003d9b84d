//! Little-endian field readers
//!
//! A 16-bit read combines the low byte at `offset` with the high byte at
//! `offset + 1`; a 32-bit read combines two 16-bit reads. Every read is
//! bounds checked against the buffer.

use super::BmpError;

/// Read a little-endian `u16` at `offset`
pub fn read16(buf: &[u8], offset: usize) -> Result<u16, BmpError> {
    let high_at = offset.checked_add(1).ok_or(BmpError::TruncatedData)?;
    let low = *buf.get(offset).ok_or(BmpError::TruncatedData)?;
    let high = *buf.get(high_at).ok_or(BmpError::TruncatedData)?;
    Ok((u16::from(high) << 8) | u16::from(low))
}

/// Read a little-endian `u32` at `offset`
pub fn read32(buf: &[u8], offset: usize) -> Result<u32, BmpError> {
    let high_at = offset.checked_add(2).ok_or(BmpError::TruncatedData)?;
    let low = read16(buf, offset)?;
    let high = read16(buf, high_at)?;
    Ok((u32::from(high) << 16) | u32::from(low))
}

/// Read a little-endian two's complement `i32` at `offset`
pub fn read_i32(buf: &[u8], offset: usize) -> Result<i32, BmpError> {
    read32(buf, offset).map(|raw| raw as i32)
}
