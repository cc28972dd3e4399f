//! Hint / discovery table.
//!
//! Each of the 186 discoveries has a 6-byte block whose fifth byte carries
//! status bits. Only two bits are interpreted; the raw byte is kept as-is.

use serde::Serialize;

use super::layout::hint as layout;

const DISCOVERED_BIT: u8 = 0x02;
const HAS_HINT_BIT: u8 = 0x04;

/// The four status bytes the game is known to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HintStatus {
    /// 0x08
    Undiscovered,
    /// 0x0B
    DiscoveredNoHint,
    /// 0x0D
    HintKnown,
    /// 0x0F
    Discovered,
    Other(u8),
}

impl HintStatus {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0x08 => Self::Undiscovered,
            0x0B => Self::DiscoveredNoHint,
            0x0D => Self::HintKnown,
            0x0F => Self::Discovered,
            other => Self::Other(other),
        }
    }
}

impl std::fmt::Display for HintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Undiscovered => write!(f, "undiscovered"),
            Self::DiscoveredNoHint => write!(f, "discovered (no hint)"),
            Self::HintKnown => write!(f, "hint known"),
            Self::Discovered => write!(f, "discovered"),
            Self::Other(value) => write!(f, "0x{:02X}", value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HintEntry {
    /// 1-based hint number
    pub index: usize,
    pub value: u8,
}

impl HintEntry {
    pub fn is_discovered(&self) -> bool {
        self.value & DISCOVERED_BIT != 0
    }

    pub fn has_hint(&self) -> bool {
        self.value & HAS_HINT_BIT != 0
    }

    pub fn status(&self) -> HintStatus {
        HintStatus::from_u8(self.value)
    }
}

/// Reads the hint table, stopping early if `data` ends inside it.
pub fn read_hints(data: &[u8]) -> Vec<HintEntry> {
    (0..layout::COUNT)
        .map_while(|i| {
            data.get(layout::status_offset(i)).map(|&value| HintEntry {
                index: i + 1,
                value,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(value: u8) -> HintEntry {
        HintEntry { index: 1, value }
    }

    #[test]
    fn test_composite_status_bytes() {
        let cases = [
            (0x08, HintStatus::Undiscovered, false, false),
            (0x0B, HintStatus::DiscoveredNoHint, true, false),
            (0x0D, HintStatus::HintKnown, false, true),
            (0x0F, HintStatus::Discovered, true, true),
        ];
        for (value, status, discovered, has_hint) in cases {
            let hint = entry(value);
            assert_eq!(hint.status(), status, "value {value:#04x}");
            assert_eq!(hint.is_discovered(), discovered, "value {value:#04x}");
            assert_eq!(hint.has_hint(), has_hint, "value {value:#04x}");
        }
    }

    #[test]
    fn test_other_values_use_plain_bits() {
        let hint = entry(0x06);
        assert_eq!(hint.status(), HintStatus::Other(0x06));
        assert!(hint.is_discovered());
        assert!(hint.has_hint());

        let hint = entry(0x00);
        assert!(!hint.is_discovered());
        assert!(!hint.has_hint());
        assert_eq!(hint.status().to_string(), "0x00");
    }

    #[test]
    fn test_read_hints_full_table() {
        let mut data = vec![0u8; layout::status_offset(layout::COUNT - 1) + 2];
        data[layout::status_offset(0)] = 0x0F;
        data[layout::status_offset(185)] = 0x0B;

        let hints = read_hints(&data);
        assert_eq!(hints.len(), 186);
        assert_eq!(hints[0].index, 1);
        assert_eq!(hints[0].value, 0x0F);
        assert_eq!(hints[185].index, 186);
        assert_eq!(hints[185].value, 0x0B);
    }

    #[test]
    fn test_read_hints_truncated() {
        // Ends right after the status byte of the tenth block
        let data = vec![0x08u8; layout::status_offset(9) + 1];
        let hints = read_hints(&data);
        assert_eq!(hints.len(), 10);

        assert!(read_hints(&[0u8; 16]).is_empty());
    }
}
