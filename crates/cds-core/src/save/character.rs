//! Character records in the save file.

use std::collections::BTreeMap;

use serde::Serialize;
use strum::{FromRepr, IntoStaticStr};

use super::layout::character as layout;
use super::location::Location;
use crate::codec::{ByteBuffer, decode_slot};
use crate::error::{Error, Result};
use crate::field_io::FieldWrite;
use crate::lookup::{SkillKind, skill_by_index};

/// Name given to records whose name slots are both empty.
pub const UNKNOWN_NAME: &str = "???";

/// Separator between the two name slots.
pub const NAME_SEPARATOR: char = '·';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, FromRepr, IntoStaticStr)]
#[repr(u8)]
pub enum HireStatus {
    #[strum(serialize = "talk only")]
    TalkOnly = 1,
    #[strum(serialize = "hirable")]
    Hirable = 2,
    #[strum(serialize = "hired")]
    Hired = 3,
}

impl HireStatus {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    pub fn label(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for HireStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One decoded character record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterRecord {
    /// Position in the character table (0-460)
    pub index: usize,
    pub name: String,
    pub hp: u8,
    pub intelligence: u8,
    pub strength: u8,
    pub charm: u8,
    pub luck: u8,
    pub available: u8,
    pub fame: u16,
    pub location: Location,
    /// Negative for characters not yet born at the current game date
    pub age: i8,
    /// Raw hire status byte, see [`HireStatus`]
    pub hire_status: u8,
    pub face: u8,
    pub constellation: String,
    /// Skill slot -> level, learned skills only
    pub skills: BTreeMap<u8, u8>,
}

impl CharacterRecord {
    pub fn hire_status(&self) -> Option<HireStatus> {
        HireStatus::from_u8(self.hire_status)
    }

    pub fn is_unknown(&self) -> bool {
        self.name == UNKNOWN_NAME
    }

    /// Hirable and not already serving in a fleet.
    pub fn is_hirable(&self) -> bool {
        self.hire_status() == Some(HireStatus::Hirable) && !self.location.is_fleet()
    }

    /// Too young or too old to be useful as crew.
    pub fn is_gray(&self) -> bool {
        self.age < 18 || self.age > 60
    }

    /// A character only joins a player at least as famous as they are.
    pub fn can_recruit(&self, player_fame: u16) -> bool {
        self.fame <= player_fame
    }

    pub fn has_skill(&self, index: u8, level: u8) -> bool {
        self.skills.get(&index) == Some(&level)
    }

    /// Compact skill listing (`"항:3 검:1"`) restricted to one kind.
    pub fn skill_summary(&self, kind: SkillKind) -> String {
        self.skills
            .iter()
            .filter_map(|(&index, &level)| {
                skill_by_index(index)
                    .filter(|skill| skill.kind == kind)
                    .map(|skill| format!("{}:{}", skill.abbrev, level))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Joins the two name slots the way the game displays them.
pub fn join_names(first: &str, second: &str) -> String {
    match (first.is_empty(), second.is_empty()) {
        (false, false) => format!("{}{}{}", first, NAME_SEPARATOR, second),
        (false, true) => first.to_string(),
        (true, false) => second.to_string(),
        (true, true) => UNKNOWN_NAME.to_string(),
    }
}

/// Decodes the character record at `index`.
///
/// Returns `None` if the record does not fit inside `data`.
pub fn read_character(data: &[u8], index: usize) -> Option<CharacterRecord> {
    let offset = index
        .checked_mul(layout::RECORD_SIZE)?
        .checked_add(layout::TABLE_BASE)?;
    let record = data.get(offset..offset.checked_add(layout::RECORD_SIZE)?)?;
    decode_record(record, index).ok()
}

/// Decodes every named character, stopping at the first record that does not
/// fit in `data`.
pub fn read_characters(data: &[u8]) -> Vec<CharacterRecord> {
    (0..layout::MAX_RECORDS)
        .map_while(|index| read_character(data, index))
        .filter(|record| !record.is_unknown())
        .collect()
}

fn decode_record(record: &[u8], index: usize) -> Result<CharacterRecord> {
    let buf = ByteBuffer::new(record);

    let first = decode_slot(record, layout::NAME_FIRST, layout::NAME_LEN);
    let second = decode_slot(record, layout::NAME_SECOND, layout::NAME_LEN);

    let mut skills = BTreeMap::new();
    for slot in 0..layout::SKILL_SLOTS {
        let level = buf.read_u8_at(layout::SKILLS + slot)?;
        if level > 0 {
            skills.insert(slot as u8, level);
        }
    }

    Ok(CharacterRecord {
        index,
        name: join_names(&first, &second),
        hp: buf.read_u8_at(layout::HP)?,
        intelligence: buf.read_u8_at(layout::INTELLIGENCE)?,
        strength: buf.read_u8_at(layout::STRENGTH)?,
        charm: buf.read_u8_at(layout::CHARM)?,
        luck: buf.read_u8_at(layout::LUCK)?,
        available: buf.read_u8_at(layout::AVAILABLE)?,
        fame: buf.read_u16_at(layout::FAME)?,
        location: Location::from_raw(buf.read_u8_at(layout::LOCATION)?),
        age: buf.read_i8_at(layout::AGE)?,
        hire_status: buf.read_u8_at(layout::HIRE_STATUS)?,
        face: buf.read_u8_at(layout::FACE)?,
        constellation: decode_slot(record, layout::CONSTELLATION, layout::CONSTELLATION_LEN),
        skills,
    })
}

fn check_index(index: usize) -> Result<()> {
    if index >= layout::MAX_RECORDS {
        return Err(Error::invalid_value(
            "character index",
            index as i64,
            "0..=460",
        ));
    }
    Ok(())
}

/// Encodes a new hire status for record `index`.
pub fn encode_hire_status(index: usize, status: HireStatus) -> Result<FieldWrite> {
    check_index(index)?;
    Ok(FieldWrite::u8(
        layout::record_offset(index) + layout::HIRE_STATUS,
        status as u8,
    ))
}

/// Encodes a new age for record `index`.
pub fn encode_age(index: usize, age: i8) -> Result<FieldWrite> {
    check_index(index)?;
    Ok(FieldWrite::i8(layout::record_offset(index) + layout::AGE, age))
}

/// Encodes a new fame value for record `index`.
pub fn encode_fame(index: usize, fame: u16) -> Result<FieldWrite> {
    check_index(index)?;
    Ok(FieldWrite::u16(layout::record_offset(index) + layout::FAME, fame))
}
