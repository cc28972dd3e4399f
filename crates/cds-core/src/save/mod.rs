//! Save file (`SAVEDATA.CDS`) decoding and editing.

mod character;
mod editor;
mod header;
mod hint;
pub mod layout;
mod location;
mod player;

use std::path::Path;

use serde::Serialize;
use tracing::debug;

pub use character::{
    CharacterRecord, HireStatus, NAME_SEPARATOR, UNKNOWN_NAME, encode_age, encode_fame,
    encode_hire_status, join_names, read_character, read_characters,
};
pub use editor::{AGE_RANGE, SaveEditor};
pub use header::{SaveHeader, read_header};
pub use hint::{HintEntry, HintStatus, read_hints};
pub use location::{FLEET_SENTINEL, Location};
pub use player::{Crew, CrewMember, CrewRole, PlayerRecord, read_player};

use crate::error::Result;
use crate::field_io::read_file;

/// Everything decoded from one save file.
#[derive(Debug, Clone, Serialize)]
pub struct SaveGameInfo {
    pub header: SaveHeader,
    pub player: Option<PlayerRecord>,
    pub characters: Vec<CharacterRecord>,
    pub hints: Vec<HintEntry>,
}

pub struct SaveFile;

impl SaveFile {
    /// Reads and decodes the save file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<SaveGameInfo> {
        let path = path.as_ref();
        let data = read_file(path)?;
        let info = Self::decode(&data);
        debug!(
            "Loaded {}: {} bytes, {} characters, {} hints",
            path.display(),
            data.len(),
            info.characters.len(),
            info.hints.len()
        );
        Ok(info)
    }

    pub fn decode(data: &[u8]) -> SaveGameInfo {
        SaveGameInfo {
            header: read_header(data),
            player: read_player(data),
            characters: read_characters(data),
            hints: read_hints(data),
        }
    }
}
