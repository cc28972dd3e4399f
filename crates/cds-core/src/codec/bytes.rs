//! Byte buffer utilities for fixed-layout binary records.
//!
//! `ByteBuffer` wraps an immutable byte slice and offers random access reads
//! at absolute offsets plus a few sequential reads with a tracked position. All
//! multi-byte values are little-endian. Every read is bounds-checked and
//! reports [`Error::Truncated`] instead of panicking, since both the save file
//! and the executable image are untrusted input.

use crate::error::{Error, Result};

/// A position-tracking byte reader for parsing binary data structures.
///
/// # Example
///
/// ```
/// use cds_core::codec::ByteBuffer;
///
/// let data = [0x78, 0x56, 0x34, 0x12, 0xFF];
/// let mut buf = ByteBuffer::new(&data);
///
/// assert_eq!(buf.read_u32().unwrap(), 0x12345678);
/// assert_eq!(buf.read_i8_at(4).unwrap(), -1);
/// assert_eq!(buf.position(), 4);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ByteBuffer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteBuffer<'a> {
    /// Creates a new `ByteBuffer` wrapping the given byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current read position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the total length of the underlying buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True if `len` bytes starting at `offset` lie inside the buffer.
    pub fn contains(&self, offset: usize, len: usize) -> bool {
        offset
            .checked_add(len)
            .is_some_and(|end| end <= self.data.len())
    }

    /// Returns a slice of bytes at the specified offset without advancing position.
    pub fn slice_at(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        if !self.contains(offset, len) {
            return Err(self.truncated(offset, len));
        }
        Ok(&self.data[offset..offset + len])
    }

    /// Reads the specified number of bytes and advances the position.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.slice_at(self.pos, count)?;
        self.pos += count;
        Ok(bytes)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Reads an unsigned byte at `offset` without advancing position.
    pub fn read_u8_at(&self, offset: usize) -> Result<u8> {
        Ok(self.slice_at(offset, 1)?[0])
    }

    /// Reads a byte at `offset` and reinterprets it as two's-complement.
    pub fn read_i8_at(&self, offset: usize) -> Result<i8> {
        Ok(self.read_u8_at(offset)? as i8)
    }

    pub fn read_u16_at(&self, offset: usize) -> Result<u16> {
        let bytes = self.slice_at(offset, 2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32_at(&self, offset: usize) -> Result<u32> {
        let bytes = self.slice_at(offset, 4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_i32_at(&self, offset: usize) -> Result<i32> {
        Ok(self.read_u32_at(offset)? as i32)
    }

    fn truncated(&self, offset: usize, len: usize) -> Error {
        Error::Truncated {
            offset,
            len,
            buffer_len: self.data.len(),
        }
    }
}

/// Overwrites `bytes.len()` bytes of `data` at `offset`.
///
/// Fails without touching `data` if the range does not fit.
pub fn write_bytes_at(data: &mut [u8], offset: usize, bytes: &[u8]) -> Result<()> {
    let end = offset
        .checked_add(bytes.len())
        .filter(|&end| end <= data.len())
        .ok_or(Error::Truncated {
            offset,
            len: bytes.len(),
            buffer_len: data.len(),
        })?;
    data[offset..end].copy_from_slice(bytes);
    Ok(())
}

/// Formats bytes as space separated upper-case hex (`"BF 00 00 00"`).
pub fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
