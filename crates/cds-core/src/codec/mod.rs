//! Low-level binary helpers shared by the save and image codecs.

mod bytes;
mod text;

pub use bytes::{ByteBuffer, to_hex, write_bytes_at};
pub use text::{decode_euc_kr, decode_slot, encode_slot};
