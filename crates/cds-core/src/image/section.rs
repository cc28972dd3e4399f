//! PE section table parsing and virtual-address translation.

use serde::Serialize;
use tracing::debug;

use super::layout::pe;
use crate::codec::ByteBuffer;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionEntry {
    pub name: String,
    pub virtual_address: u32,
    pub virtual_size: u32,
    pub raw_offset: u32,
    pub raw_size: u32,
}

impl SectionEntry {
    /// True if `rva` lies inside the section's virtual range.
    pub fn contains_rva(&self, rva: u32) -> bool {
        rva >= self.virtual_address
            && (rva as u64) < self.virtual_address as u64 + self.virtual_size as u64
    }
}

/// Sections of a PE image plus its preferred load address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionTable {
    pub image_base: u32,
    pub sections: Vec<SectionEntry>,
}

impl SectionTable {
    pub fn parse(data: &[u8]) -> Result<Self> {
        let buf = ByteBuffer::new(data);
        let invalid = |what: &str| Error::InvalidImage(what.to_string());

        let pe_offset = buf
            .read_u32_at(pe::PE_OFFSET_FIELD)
            .map_err(|_| invalid("missing DOS header"))? as usize;
        if buf.slice_at(pe_offset, pe::SIGNATURE.len()).ok() != Some(pe::SIGNATURE.as_slice()) {
            return Err(Error::InvalidImage(format!(
                "no PE signature at {:#x}",
                pe_offset
            )));
        }

        let coff = pe_offset + pe::COFF_HEADER;
        let section_count = buf
            .read_u16_at(coff + pe::SECTION_COUNT)
            .map_err(|_| invalid("truncated COFF header"))? as usize;
        let optional_size = buf
            .read_u16_at(coff + pe::OPTIONAL_HEADER_SIZE)
            .map_err(|_| invalid("truncated COFF header"))? as usize;

        let optional = coff + pe::COFF_HEADER_SIZE;
        let image_base = buf
            .read_u32_at(optional + pe::IMAGE_BASE)
            .map_err(|_| invalid("truncated optional header"))?;

        let table = optional + optional_size;
        let sections = (0..section_count)
            .map(|i| read_section(&buf, table + i * pe::SECTION_HEADER_SIZE))
            .collect::<Result<Vec<_>>>()
            .map_err(|_| invalid("truncated section table"))?;

        debug!(
            "Parsed PE image: base {:#x}, {} sections",
            image_base,
            sections.len()
        );
        Ok(Self {
            image_base,
            sections,
        })
    }

    /// Maps a virtual address to a file offset.
    ///
    /// Sections are searched in table order; the first one containing the
    /// address wins.
    pub fn translate(&self, va: u32) -> Option<u32> {
        let rva = va.checked_sub(self.image_base)?;
        self.sections
            .iter()
            .find(|section| section.contains_rva(rva))
            .and_then(|section| section.raw_offset.checked_add(rva - section.virtual_address))
    }

    pub fn by_name(&self, name: &str) -> Option<&SectionEntry> {
        self.sections.iter().find(|section| section.name == name)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

fn read_section(buf: &ByteBuffer<'_>, offset: usize) -> Result<SectionEntry> {
    let mut header = ByteBuffer::new(buf.slice_at(offset, pe::SECTION_HEADER_SIZE)?);
    let raw_name = header.read_bytes(pe::SECTION_NAME_LEN)?;
    let name_len = raw_name.iter().position(|&b| b == 0).unwrap_or(raw_name.len());

    // Field order of IMAGE_SECTION_HEADER
    Ok(SectionEntry {
        name: String::from_utf8_lossy(&raw_name[..name_len]).into_owned(),
        virtual_size: header.read_u32()?,
        virtual_address: header.read_u32()?,
        raw_size: header.read_u32()?,
        raw_offset: header.read_u32()?,
    })
}
