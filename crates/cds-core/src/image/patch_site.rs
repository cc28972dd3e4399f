//! Known byte patterns in the executable and how to classify them.

use serde::Serialize;
use strum::IntoStaticStr;

use super::section::SectionTable;
use crate::error::{Error, Result};

/// Where a patch site lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum PatchAddress {
    FileOffset(u32),
    /// Virtual address, resolved through the section table
    Virtual(u32),
}

impl PatchAddress {
    /// Resolves to a file offset.
    pub fn resolve(self, sections: Option<&SectionTable>) -> Result<usize> {
        match self {
            Self::FileOffset(offset) => Ok(offset as usize),
            Self::Virtual(va) => sections
                .and_then(|table| table.translate(va))
                .map(|offset| offset as usize)
                .ok_or(Error::UnresolvedAddress(va)),
        }
    }
}

/// A fixed-length byte pattern with its stock and patched contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatchSite {
    pub address: PatchAddress,
    pub original: &'static [u8],
    pub patched: &'static [u8],
    pub description: &'static str,
}

impl PatchSite {
    pub const fn len(&self) -> usize {
        self.original.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    /// Current bytes of this site within `image`.
    pub fn read<'a>(&self, image: &'a [u8], sections: Option<&SectionTable>) -> Result<&'a [u8]> {
        let offset = self.address.resolve(sections)?;
        offset
            .checked_add(self.len())
            .and_then(|end| image.get(offset..end))
            .ok_or(Error::SiteOutOfRange {
                offset,
                len: self.len(),
                image_len: image.len(),
            })
    }

    pub fn classify(&self, image: &[u8], sections: Option<&SectionTable>) -> Result<PatchState> {
        let current = self.read(image, sections)?;
        Ok(PatchState::of(current, self))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, IntoStaticStr)]
pub enum PatchState {
    #[strum(serialize = "original")]
    Original,
    #[strum(serialize = "patched")]
    Patched,
    /// Neither pattern matches
    #[strum(serialize = "other")]
    Other,
}

impl PatchState {
    pub(crate) fn of(current: &[u8], site: &PatchSite) -> Self {
        if current == site.patched {
            Self::Patched
        } else if current == site.original {
            Self::Original
        } else {
            Self::Other
        }
    }

    pub fn label(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for PatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Standard patch set, applied in this order.
///
/// The appear-condition sites move the cutoff year from 1671 (0xBF) to 1681
/// (0xC9). The two roster sites swap an event-only appearance for a fixed
/// year and clear the type word.
pub const PATCH_SITES: &[PatchSite] = &[
    PatchSite {
        address: PatchAddress::FileOffset(0x30F6D),
        original: &[0xBF, 0x00, 0x00, 0x00],
        patched: &[0xC9, 0x00, 0x00, 0x00],
        description: "appear condition 1",
    },
    PatchSite {
        address: PatchAddress::FileOffset(0x31C23),
        original: &[0xBF, 0x00, 0x00, 0x00],
        patched: &[0xC9, 0x00, 0x00, 0x00],
        description: "appear condition 2",
    },
    PatchSite {
        address: PatchAddress::FileOffset(0xE78B4),
        original: &[0xFF, 0xFF, 0xFF, 0xFF, 0x04, 0x00, 0x00, 0x00],
        patched: &[0xC4, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF],
        description: "Doña Marina (event -> 1676)",
    },
    PatchSite {
        address: PatchAddress::FileOffset(0xE7980),
        original: &[0xFF, 0xFF, 0xFF, 0xFF, 0x05, 0x00, 0x00, 0x00],
        patched: &[0xCE, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF],
        description: "Michelangelo (event -> 1686)",
    },
];
