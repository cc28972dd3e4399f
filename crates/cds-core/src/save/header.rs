use chrono::NaiveDate;
use serde::Serialize;

use super::layout::header as layout;
use crate::codec::ByteBuffer;

/// In-game date stored at the top of the save file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SaveHeader {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl SaveHeader {
    /// Calendar date, if the stored triple is one.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year as i32, self.month as u32, self.day as u32)
    }
}

impl std::fmt::Display for SaveHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Reads the save date. Buffers too short to hold the day byte yield a zeroed
/// header.
pub fn read_header(data: &[u8]) -> SaveHeader {
    if data.len() <= layout::DAY {
        return SaveHeader::default();
    }
    let buf = ByteBuffer::new(data);
    SaveHeader {
        year: buf.read_u16_at(layout::YEAR).unwrap_or_default(),
        month: buf.read_u8_at(layout::MONTH).unwrap_or_default(),
        day: buf.read_u8_at(layout::DAY).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(year: u16, month: u8, day: u8) -> Vec<u8> {
        let mut data = vec![0u8; 0x20];
        data[layout::YEAR..layout::YEAR + 2].copy_from_slice(&year.to_le_bytes());
        data[layout::MONTH] = month;
        data[layout::DAY] = day;
        data
    }

    #[test]
    fn test_read_header() {
        let header = read_header(&header_bytes(1522, 8, 15));
        assert_eq!(
            header,
            SaveHeader {
                year: 1522,
                month: 8,
                day: 15
            }
        );
        assert_eq!(header.date(), NaiveDate::from_ymd_opt(1522, 8, 15));
        assert_eq!(header.to_string(), "1522-08-15");
    }

    #[test]
    fn test_read_header_short_buffer() {
        let data = header_bytes(1522, 8, 15);
        assert_eq!(read_header(&data[..layout::DAY]), SaveHeader::default());
        assert_eq!(read_header(&data[..layout::DAY + 1]).day, 15);
    }

    #[test]
    fn test_invalid_date() {
        let header = read_header(&header_bytes(1522, 13, 40));
        assert_eq!(header.month, 13);
        assert!(header.date().is_none());
    }
}
