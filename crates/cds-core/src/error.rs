use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Read of {len} bytes at {offset:#x} exceeds buffer length {buffer_len}")]
    Truncated {
        offset: usize,
        len: usize,
        buffer_len: usize,
    },

    #[error("Invalid executable image: {0}")]
    InvalidImage(String),

    #[error("Virtual address {0:#010x} does not fall inside any section")]
    UnresolvedAddress(u32),

    #[error("Patch site at {offset:#x} ({len} bytes) exceeds image length {image_len}")]
    SiteOutOfRange {
        offset: usize,
        len: usize,
        image_len: usize,
    },

    #[error("Invalid value for {field}: {value} (expected {expected})")]
    InvalidValue {
        field: &'static str,
        value: i64,
        expected: &'static str,
    },

    #[error("Backup file not found: {}", .0.display())]
    BackupMissing(PathBuf),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Config parse error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for rejecting a user-supplied value before any write happens.
    pub fn invalid_value(
        field: &'static str,
        value: impl Into<i64>,
        expected: &'static str,
    ) -> Self {
        Error::InvalidValue {
            field,
            value: value.into(),
            expected,
        }
    }

    /// True when the error originates from a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}
