//! Single-field writes against files on disk.
//!
//! Every mutation in this crate is expressed as a [`FieldWrite`]: a byte
//! offset plus the encoded bytes for one field. A write opens the existing
//! file, checks that the field lies inside it, seeks and writes, then closes
//! the file again. The rest of the file is never rewritten.

use std::fs::{self, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::debug;

use crate::codec::write_bytes_at;
use crate::error::Result;

/// Encoded bytes for one field at a fixed offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldWrite {
    pub offset: usize,
    pub bytes: Vec<u8>,
}

impl FieldWrite {
    pub fn new(offset: usize, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            offset,
            bytes: bytes.into(),
        }
    }

    pub fn u8(offset: usize, value: u8) -> Self {
        Self::new(offset, [value])
    }

    /// Stores `value` as its two's-complement byte.
    pub fn i8(offset: usize, value: i8) -> Self {
        Self::new(offset, value.to_le_bytes())
    }

    pub fn u16(offset: usize, value: u16) -> Self {
        Self::new(offset, value.to_le_bytes())
    }

    pub fn u32(offset: usize, value: u32) -> Self {
        Self::new(offset, value.to_le_bytes())
    }

    pub fn i32(offset: usize, value: i32) -> Self {
        Self::new(offset, value.to_le_bytes())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Applies the write to an in-memory buffer.
    pub fn apply(&self, data: &mut [u8]) -> Result<()> {
        write_bytes_at(data, self.offset, &self.bytes)
    }

    /// Applies the write to the file at `path` with a single seek+write.
    ///
    /// # Errors
    ///
    /// Fails with an I/O error if the file is missing, cannot be opened for
    /// writing, or is too short to contain the field. In the latter case the
    /// file is not modified.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut file = OpenOptions::new().write(true).open(path)?;

        let file_len = file.metadata()?.len();
        let fits = (self.offset as u64)
            .checked_add(self.bytes.len() as u64)
            .is_some_and(|end| end <= file_len);
        if !fits {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "write of {} bytes at {:#x} exceeds file length {} ({})",
                    self.bytes.len(),
                    self.offset,
                    file_len,
                    path.display()
                ),
            )
            .into());
        }

        file.seek(SeekFrom::Start(self.offset as u64))?;
        file.write_all(&self.bytes)?;
        file.flush()?;

        debug!(
            "Wrote {} bytes at {:#x} to {}",
            self.bytes.len(),
            self.offset,
            path.display()
        );
        Ok(())
    }
}

/// Overwrites the byte at `offset` in the file at `path`.
pub fn write_byte_field<P: AsRef<Path>>(path: P, offset: usize, value: u8) -> Result<()> {
    FieldWrite::u8(offset, value).write_to(path)
}

/// Overwrites the little-endian 32-bit word at `offset` in the file at `path`.
pub fn write_u32_field<P: AsRef<Path>>(path: P, offset: usize, value: u32) -> Result<()> {
    FieldWrite::u32(offset, value).write_to(path)
}

/// Reads a whole file into memory.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    Ok(fs::read(path)?)
}
