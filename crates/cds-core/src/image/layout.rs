//! Offsets inside `cds_95.exe`.
//!
//! ```text
//! Offset      Size          Description
//! ----------  ------------  ------------------------------------------
//! 0x0003C     4             PE header offset (e_lfanew)
//! 0x30F6D     4             Appear condition 1 (patch site)
//! 0x31C23     4             Appear condition 2 (patch site)
//! 0x5FB83     1             Long-rest limit in months
//! 0xE6198     80 × 0xCC     Roster of historical characters
//! ```

/// PE/COFF header fields. Offsets are relative to the structure named.
pub mod pe {
    /// `e_lfanew` in the DOS header
    pub const PE_OFFSET_FIELD: usize = 0x3C;
    pub const SIGNATURE: &[u8; 2] = b"PE";
    /// COFF header follows the 4-byte `PE\0\0` signature
    pub const COFF_HEADER: usize = 4;
    pub const COFF_HEADER_SIZE: usize = 20;

    // COFF header
    pub const SECTION_COUNT: usize = 2;
    pub const OPTIONAL_HEADER_SIZE: usize = 16;

    // Optional header (PE32)
    pub const IMAGE_BASE: usize = 28;

    // Section header
    pub const SECTION_HEADER_SIZE: usize = 40;
    pub const SECTION_NAME_LEN: usize = 8;
    pub const SECTION_VIRTUAL_SIZE: usize = 8;
    pub const SECTION_VIRTUAL_ADDRESS: usize = 12;
    pub const SECTION_RAW_SIZE: usize = 16;
    pub const SECTION_RAW_POINTER: usize = 20;
}

/// Roster record layout. Every field is a little-endian 32-bit word unless
/// noted.
///
/// ```text
/// Offset   Field              Description
/// -------  -----------------  ----------------------------------------
/// 0x00     Appear delay       Years after 1480, 0xFFFFFFFF = event only
/// 0x04     Type               4 = male, 5 = female
/// 0x08     Appear condition
/// 0x0C     HP                 Valid records have 50..=255
/// 0x10     Stats              Six words: int, combat, charisma, luck,
///                             navigation, surveying
/// 0x9C     Name pointer 1     Virtual address
/// 0xA0     Name pointer 2     Virtual address
/// 0xAC     Birth offset       Birth year = 1480 - value
/// 0xC8     Hire status        1 byte: 1 = talk only, 2 = hirable
/// ```
pub mod roster {
    pub const TABLE_BASE: usize = 0xE6198;
    pub const RECORD_SIZE: usize = 0xCC;
    pub const MAX_RECORDS: usize = 80;

    pub const APPEAR_DELAY: usize = 0x00;
    pub const TYPE: usize = 0x04;
    pub const APPEAR_CONDITION: usize = 0x08;
    pub const HP: usize = 0x0C;
    pub const STATS: usize = 0x10;
    pub const STAT_COUNT: usize = 6;
    pub const NAME_POINTER_FIRST: usize = 0x9C;
    pub const NAME_POINTER_SECOND: usize = 0xA0;
    pub const BIRTH_OFFSET: usize = 0xAC;
    pub const HIRE_STATUS: usize = 0xC8;

    /// Longest name read through a name pointer
    pub const NAME_MAX_LEN: usize = 30;

    pub const EPOCH_YEAR: i32 = 1480;
    pub const EVENT_DELAY: u32 = 0xFFFF_FFFF;
    /// Delays below this are plain years after [`EPOCH_YEAR`]
    pub const MAX_PLAIN_DELAY: u32 = 200;

    pub const HP_MIN: u32 = 50;
    pub const HP_MAX: u32 = 255;

    pub const TYPE_MALE: u32 = 4;
    pub const TYPE_FEMALE: u32 = 5;

    pub const fn record_offset(index: usize) -> usize {
        TABLE_BASE + index * RECORD_SIZE
    }
}

/// Global settings patched in place.
pub mod settings {
    pub const LONG_REST_LIMIT: usize = 0x5FB83;
    pub const LONG_REST_LIMIT_STOCK: u8 = 12;
    pub const LONG_REST_LIMIT_MIN: u8 = 1;
    pub const LONG_REST_LIMIT_MAX: u8 = 127;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_fits_before_patch_sites() {
        // Doña Marina and Michelangelo live inside the roster table
        assert!(roster::record_offset(0) <= 0xE78B4);
        assert!(0xE7980 + 8 <= roster::record_offset(roster::MAX_RECORDS));
        assert_eq!((0xE78B4 - roster::TABLE_BASE) % roster::RECORD_SIZE, 0);
        assert_eq!((0xE7980 - roster::TABLE_BASE) % roster::RECORD_SIZE, 0);
    }

    #[test]
    fn test_hire_status_inside_record() {
        assert!(roster::HIRE_STATUS < roster::RECORD_SIZE);
        assert_eq!(roster::STATS + roster::STAT_COUNT * 4, 0x28);
    }
}
