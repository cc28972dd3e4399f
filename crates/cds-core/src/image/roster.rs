//! Historical character roster compiled into the executable.

use serde::Serialize;

use super::layout::roster as layout;
use super::section::SectionTable;
use crate::codec::{ByteBuffer, decode_slot};
use crate::error::Result;
use crate::save::{HireStatus, join_names};

/// Year a roster character first appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum AppearYear {
    Year(u16),
    /// Only through a scripted event
    Event,
    /// Stored delay that is neither a year offset nor the event marker
    Raw(u32),
}

impl AppearYear {
    pub fn from_delay(delay: u32) -> Self {
        if delay == layout::EVENT_DELAY {
            Self::Event
        } else if delay < layout::MAX_PLAIN_DELAY {
            Self::Year((layout::EPOCH_YEAR as u32 + delay) as u16)
        } else {
            Self::Raw(delay)
        }
    }

    /// Stored delay word, `None` for years before the epoch.
    pub fn to_delay(self) -> Option<u32> {
        match self {
            Self::Event => Some(layout::EVENT_DELAY),
            Self::Year(year) => (year as i32 - layout::EPOCH_YEAR).try_into().ok(),
            Self::Raw(delay) => Some(delay),
        }
    }
}

impl std::fmt::Display for AppearYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Year(year) => write!(f, "{}", year),
            Self::Event => write!(f, "event"),
            Self::Raw(delay) => write!(f, "0x{:X}", delay),
        }
    }
}

impl std::str::FromStr for AppearYear {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("event") {
            return Ok(Self::Event);
        }
        s.parse::<u16>()
            .map(Self::Year)
            .map_err(|_| format!("expected a year or 'event', got '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gender {
    Male,
    Female,
    Other(u32),
}

impl Gender {
    pub fn from_type(value: u32) -> Self {
        match value {
            layout::TYPE_MALE => Self::Male,
            layout::TYPE_FEMALE => Self::Female,
            other => Self::Other(other),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
            Self::Other(value) => write!(f, "{}", value),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RosterStats {
    pub intelligence: u32,
    pub combat: u32,
    pub charisma: u32,
    pub luck: u32,
    pub navigation: u32,
    pub surveying: u32,
}

impl std::fmt::Display for RosterStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}/{}/{}",
            self.intelligence,
            self.combat,
            self.charisma,
            self.luck,
            self.navigation,
            self.surveying
        )
    }
}

/// One decoded roster record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    /// Position in the roster (0-79)
    pub index: usize,
    /// File offset of the record
    pub offset: usize,
    pub name: String,
    pub appear_year: AppearYear,
    pub gender: Gender,
    pub appear_condition: u32,
    pub hp: u32,
    pub stats: RosterStats,
    pub birth_year: i32,
    /// Raw hire status byte, see [`HireStatus`]
    pub hire_status: u8,
}

impl RosterEntry {
    pub fn hire_status(&self) -> Option<HireStatus> {
        HireStatus::from_u8(self.hire_status)
    }
}

/// Decodes roster records until one fails the hp sanity check or runs past
/// the end of `image`.
///
/// Name pointers are resolved through `sections`; without a section table
/// every name decodes as unknown.
pub fn read_roster(image: &[u8], sections: Option<&SectionTable>) -> Vec<RosterEntry> {
    (0..layout::MAX_RECORDS)
        .map_while(|index| read_roster_entry(image, sections, index).ok().flatten())
        .collect()
}

fn read_roster_entry(
    image: &[u8],
    sections: Option<&SectionTable>,
    index: usize,
) -> Result<Option<RosterEntry>> {
    let offset = layout::record_offset(index);
    let buf = ByteBuffer::new(image);
    if !buf.contains(offset, layout::RECORD_SIZE) {
        return Ok(None);
    }

    let word = |field: usize| buf.read_u32_at(offset + field);

    let hp = word(layout::HP)?;
    if !(layout::HP_MIN..=layout::HP_MAX).contains(&hp) {
        return Ok(None);
    }

    let stat = |n: usize| word(layout::STATS + n * 4);
    let stats = RosterStats {
        intelligence: stat(0)?,
        combat: stat(1)?,
        charisma: stat(2)?,
        luck: stat(3)?,
        navigation: stat(4)?,
        surveying: stat(5)?,
    };

    let first = read_pointed_name(image, sections, word(layout::NAME_POINTER_FIRST)?);
    let second = read_pointed_name(image, sections, word(layout::NAME_POINTER_SECOND)?);

    Ok(Some(RosterEntry {
        index,
        offset,
        name: join_names(&first, &second),
        appear_year: AppearYear::from_delay(word(layout::APPEAR_DELAY)?),
        gender: Gender::from_type(word(layout::TYPE)?),
        appear_condition: word(layout::APPEAR_CONDITION)?,
        hp,
        stats,
        birth_year: layout::EPOCH_YEAR
            .wrapping_sub(buf.read_i32_at(offset + layout::BIRTH_OFFSET)?),
        hire_status: buf.read_u8_at(offset + layout::HIRE_STATUS)?,
    }))
}

fn read_pointed_name(image: &[u8], sections: Option<&SectionTable>, va: u32) -> String {
    sections
        .and_then(|table| table.translate(va))
        .map(|offset| decode_slot(image, offset as usize, layout::NAME_MAX_LEN))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::section::test_image;

    const BASE: u32 = 0x0040_0000;
    /// .rdata at file offset 0x1000, mapped to RVA 0x10000
    const RDATA_RAW: u32 = 0x1000;
    const RDATA_RVA: u32 = 0x10000;

    fn va_of(file_offset: u32) -> u32 {
        BASE + RDATA_RVA + (file_offset - RDATA_RAW)
    }

    fn put_u32(image: &mut [u8], at: usize, value: u32) {
        image[at..at + 4].copy_from_slice(&value.to_le_bytes());
    }

    fn roster_image(records: usize) -> Vec<u8> {
        let len = layout::record_offset(records) + 0x10;
        let mut image = test_image::build(
            BASE,
            &[(".rdata", RDATA_RVA, 0x100, RDATA_RAW, 0x100)],
            len,
        );
        // 도냐 at 0x1000, 마리나 at 0x1010
        image[0x1000..0x1004].copy_from_slice(&[0xB5, 0xB5, 0xB3, 0xC4]);
        image[0x1010..0x1016].copy_from_slice(&[0xB8, 0xB6, 0xB8, 0xAE, 0xB3, 0xAA]);

        for i in 0..records {
            let rec = layout::record_offset(i);
            put_u32(&mut image, rec + layout::HP, 60 + i as u32);
            put_u32(&mut image, rec + layout::APPEAR_DELAY, i as u32);
            put_u32(&mut image, rec + layout::TYPE, layout::TYPE_MALE);
        }
        image
    }

    #[test]
    fn test_read_roster_entry_fields() {
        let mut image = roster_image(2);
        let rec = layout::record_offset(1);
        put_u32(&mut image, rec + layout::APPEAR_DELAY, layout::EVENT_DELAY);
        put_u32(&mut image, rec + layout::TYPE, layout::TYPE_FEMALE);
        put_u32(&mut image, rec + layout::APPEAR_CONDITION, 7);
        for n in 0..layout::STAT_COUNT {
            put_u32(&mut image, rec + layout::STATS + n * 4, 10 + n as u32);
        }
        put_u32(&mut image, rec + layout::NAME_POINTER_FIRST, va_of(0x1000));
        put_u32(&mut image, rec + layout::NAME_POINTER_SECOND, va_of(0x1010));
        put_u32(&mut image, rec + layout::BIRTH_OFFSET, (-20i32) as u32);
        image[rec + layout::HIRE_STATUS] = 1;

        let sections = SectionTable::parse(&image).unwrap();
        let roster = read_roster(&image, Some(&sections));
        assert_eq!(roster.len(), 2);

        let entry = &roster[1];
        assert_eq!(entry.index, 1);
        assert_eq!(entry.offset, rec);
        assert_eq!(entry.name, "도냐·마리나");
        assert_eq!(entry.appear_year, AppearYear::Event);
        assert_eq!(entry.gender, Gender::Female);
        assert_eq!(entry.appear_condition, 7);
        assert_eq!(entry.hp, 61);
        assert_eq!(entry.stats.to_string(), "10/11/12/13/14/15");
        assert_eq!(entry.birth_year, 1500);
        assert_eq!(entry.hire_status(), Some(HireStatus::TalkOnly));

        assert_eq!(roster[0].appear_year, AppearYear::Year(1480));
        assert_eq!(roster[0].name, "???");
    }

    #[test]
    fn test_scan_stops_on_bad_hp() {
        let mut image = roster_image(5);
        put_u32(&mut image, layout::record_offset(3) + layout::HP, 49);
        assert_eq!(read_roster(&image, None).len(), 3);

        put_u32(&mut image, layout::record_offset(0) + layout::HP, 256);
        assert!(read_roster(&image, None).is_empty());
    }

    #[test]
    fn test_scan_stops_at_buffer_end() {
        let image = roster_image(4);
        let cut = layout::record_offset(3) + layout::RECORD_SIZE - 1;
        assert_eq!(read_roster(&image[..cut], None).len(), 3);
    }

    #[test]
    fn test_unresolvable_name_pointer() {
        let mut image = roster_image(1);
        put_u32(&mut image, layout::record_offset(0) + layout::NAME_POINTER_FIRST, 0x1234);
        let sections = SectionTable::parse(&image).unwrap();
        let roster = read_roster(&image, Some(&sections));
        assert_eq!(roster[0].name, "???");
    }

    #[test]
    fn test_appear_year_conversions() {
        assert_eq!(AppearYear::from_delay(0), AppearYear::Year(1480));
        assert_eq!(AppearYear::from_delay(199), AppearYear::Year(1679));
        assert_eq!(AppearYear::from_delay(200), AppearYear::Raw(200));
        assert_eq!(AppearYear::from_delay(0xFFFF_FFFF), AppearYear::Event);

        assert_eq!(AppearYear::Year(1676).to_delay(), Some(196));
        assert_eq!(AppearYear::Year(1479).to_delay(), None);
        assert_eq!(AppearYear::Event.to_delay(), Some(0xFFFF_FFFF));

        assert_eq!("Event".parse::<AppearYear>(), Ok(AppearYear::Event));
        assert_eq!("1600".parse::<AppearYear>(), Ok(AppearYear::Year(1600)));
        assert!("soon".parse::<AppearYear>().is_err());
        assert_eq!(AppearYear::Raw(0x1234).to_string(), "0x1234");
    }
}
