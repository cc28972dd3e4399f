//! Fixed-length string slots encoded in EUC-KR (Windows code page 51949).
//!
//! Game strings are stored in null-terminated, zero-padded slots of a fixed
//! width. Decoding is best effort: a slot holding a malformed byte sequence
//! decodes to an empty string instead of failing the surrounding record.

use encoding_rs::EUC_KR;
use tracing::debug;

use crate::error::{Error, Result};

/// Decodes the string slot of `max_len` bytes at `offset`.
///
/// The slot is clamped to the end of `buffer`, so the same call serves strings
/// reached through pointers in the executable image. Bytes after the first
/// null are ignored and surrounding whitespace is trimmed.
///
/// # Example
///
/// ```
/// use cds_core::codec::decode_slot;
///
/// let data = [0xC8, 0xAB, 0xB1, 0xE6, 0xB5, 0xBF, 0x00, 0x00];
/// assert_eq!(decode_slot(&data, 0, 8), "홍길동");
/// ```
pub fn decode_slot(buffer: &[u8], offset: usize, max_len: usize) -> String {
    let Some(slot) = buffer.get(offset..) else {
        return String::new();
    };
    let slot = &slot[..slot.len().min(max_len)];
    let len = slot.iter().position(|&b| b == 0).unwrap_or(slot.len());
    decode_euc_kr(&slot[..len])
}

/// Decodes EUC-KR bytes, returning an empty string on malformed input.
pub fn decode_euc_kr(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return String::new();
    }
    match EUC_KR.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(decoded) => decoded.trim().to_string(),
        None => {
            debug!(
                "EUC-KR decoding failed for bytes: {:02X?}",
                &bytes[..bytes.len().min(20)]
            );
            String::new()
        }
    }
}

/// Encodes `text` into a slot of exactly `slot_len` bytes.
///
/// Text longer than the slot is truncated on a character boundary so that a
/// two-byte character is never split; the remainder is zero-padded.
///
/// # Errors
///
/// Returns [`Error::Encoding`] if `text` contains a character that has no
/// EUC-KR representation.
pub fn encode_slot(text: &str, slot_len: usize) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(slot_len);
    let mut char_buf = [0u8; 4];

    for ch in text.chars() {
        let (encoded, _, unmappable) = EUC_KR.encode(ch.encode_utf8(&mut char_buf));
        if unmappable {
            return Err(Error::Encoding(format!(
                "character {:?} cannot be represented in EUC-KR",
                ch
            )));
        }
        if out.len() + encoded.len() > slot_len {
            break;
        }
        out.extend_from_slice(&encoded);
    }

    out.resize(slot_len, 0);
    Ok(out)
}
