//! Byte layout of `SAVEDATA.CDS`.
//!
//! All offsets are absolute file offsets unless noted otherwise. Multi-byte
//! values are little-endian. The layout is fixed to a single release of the
//! game; there is no version field to dispatch on.
//!
//! # File Overview
//!
//! ```text
//! Offset     Size          Description
//! ─────────────────────────────────────────────────────────
//! 0x00015    2             Current year
//! 0x00019    1             Current month
//! 0x0001A    1             Current day
//! 0x00038    13            Player profession skills
//! 0x00045    14            Player language skills
//! 0x00053    2             Player fame
//! 0x00055    2             Player notoriety
//! 0x00057    1             Player current city
//! 0x0005F    14            Player first name
//! 0x00072    14            Player last name
//! 0x000A5    1 (+1 pad)    Crew: adjutant, navigator, surveyor, interpreter
//! 0x0924A    461 × 0x90    Character table
//! 0x1A625    186 × 6       Hint table
//! ```

/// Save date header.
pub mod header {
    pub const YEAR: usize = 0x15;
    pub const MONTH: usize = 0x19;
    pub const DAY: usize = 0x1A;
}

/// Character table and per-record sub-offsets.
///
/// ```text
/// Offset   Field              Size    Description
/// ──────────────────────────────────────────────────────
/// 0x00     HP                 1
/// 0x01     Intelligence       1
/// 0x02     Strength           1
/// 0x03     Charm              1
/// 0x04     Luck               1
/// 0x0A     Available flag     1       Shares its byte with skill slot 0
/// 0x0A     Skills             28      One level byte per skill slot
/// 0x26     Fame               2
/// 0x2E     Location           1       City index, 255 = in a fleet
/// 0x32     Name (first)       20
/// 0x45     Name (second)      20
/// 0x5C     Age                1       Signed, negative = not yet born
/// 0x60     Face               1
/// 0x62     Hire status        1       1 = talk only, 2 = hirable, 3 = hired
/// 0x70     Constellation      20
/// ```
pub mod character {
    pub const TABLE_BASE: usize = 0x924A;
    pub const RECORD_SIZE: usize = 0x90;
    pub const MAX_RECORDS: usize = 461;

    pub const HP: usize = 0x00;
    pub const INTELLIGENCE: usize = 0x01;
    pub const STRENGTH: usize = 0x02;
    pub const CHARM: usize = 0x03;
    pub const LUCK: usize = 0x04;
    pub const AVAILABLE: usize = 0x0A;
    pub const SKILLS: usize = 0x0A;
    pub const SKILL_SLOTS: usize = 28;
    pub const FAME: usize = 0x26;
    pub const LOCATION: usize = 0x2E;
    pub const NAME_FIRST: usize = 0x32;
    pub const NAME_SECOND: usize = 0x45;
    pub const NAME_LEN: usize = 20;
    pub const AGE: usize = 0x5C;
    pub const FACE: usize = 0x60;
    pub const HIRE_STATUS: usize = 0x62;
    pub const CONSTELLATION: usize = 0x70;
    pub const CONSTELLATION_LEN: usize = 20;

    /// Absolute offset of record `index`.
    pub const fn record_offset(index: usize) -> usize {
        TABLE_BASE + index * RECORD_SIZE
    }
}

/// Player (protagonist) record.
pub mod player {
    /// Files shorter than this do not contain a complete player section.
    pub const MIN_SECTION_LEN: usize = 0xC0;

    pub const FIRST_NAME: usize = 0x5F;
    pub const LAST_NAME: usize = 0x72;
    pub const NAME_LEN: usize = 14;

    pub const PROFESSION_SKILLS: usize = 0x38;
    pub const PROFESSION_SKILL_COUNT: usize = 13;
    pub const LANGUAGE_SKILLS: usize = 0x45;
    pub const LANGUAGE_SKILL_COUNT: usize = 14;

    pub const FAME: usize = 0x53;
    pub const NOTORIETY: usize = 0x55;
    pub const CURRENT_CITY: usize = 0x57;

    pub const ADJUTANT: usize = 0xA5;
    pub const NAVIGATOR: usize = 0xA7;
    pub const SURVEYOR: usize = 0xA9;
    pub const INTERPRETER: usize = 0xAB;
}

/// Hint / discovery table.
pub mod hint {
    pub const TABLE_BASE: usize = 0x1A625;
    pub const BLOCK_SIZE: usize = 6;
    pub const STATUS: usize = 4;
    pub const COUNT: usize = 186;

    /// Absolute offset of the status byte of the zero-based block `index`.
    pub const fn status_offset(index: usize) -> usize {
        TABLE_BASE + index * BLOCK_SIZE + STATUS
    }
}
