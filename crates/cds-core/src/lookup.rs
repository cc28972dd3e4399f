//! Reference data lookups.
//!
//! City names live in an external reference database; the codecs only see
//! city indices. The [`CityLookup`] trait is the seam consumers use to turn an
//! index into a display name. Skill names are fixed by the game and are kept
//! as a static table.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use strum::IntoStaticStr;
use tracing::debug;

use crate::error::{Error, Result};

/// Resolves a city index to its display name.
pub trait CityLookup {
    fn city_name(&self, id: u8) -> Option<&str>;
}

/// Lookup that knows no cities. Every location renders as its raw index.
impl CityLookup for () {
    fn city_name(&self, _id: u8) -> Option<&str> {
        None
    }
}

/// In-memory city table loaded from a tab-separated reference file.
#[derive(Debug, Clone, Default)]
pub struct CityTable {
    names: HashMap<u8, String>,
}

impl CityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a city table from a file
    ///
    /// File format:
    /// - One `id<TAB>name` pair per line
    /// - Blank lines and lines starting with `#` are ignored
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self> {
        let mut names = HashMap::new();

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((id, name)) = line.split_once('\t') else {
                debug!("Skipping city line {} without tab separator", line_no + 1);
                continue;
            };

            let id: u8 = id.trim().parse().map_err(|e| {
                Error::Config(format!("invalid city id on line {}: {}", line_no + 1, e))
            })?;
            names.insert(id, name.trim().to_string());
        }

        Ok(Self { names })
    }

    pub fn insert(&mut self, id: u8, name: impl Into<String>) {
        self.names.insert(id, name.into());
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl CityLookup for CityTable {
    fn city_name(&self, id: u8) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, IntoStaticStr)]
pub enum SkillKind {
    Profession,
    Language,
}

/// A skill as shown in the game: slot index, one-syllable abbreviation used in
/// compact listings, and full name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Skill {
    pub index: u8,
    pub abbrev: &'static str,
    pub name: &'static str,
    pub kind: SkillKind,
}

const fn skill(index: u8, abbrev: &'static str, name: &'static str, kind: SkillKind) -> Skill {
    Skill {
        index,
        abbrev,
        name,
        kind,
    }
}

/// Skill table in slot order. Slot 0 carries no skill.
///
/// Character records store one level byte per slot; the player record stores
/// the profession skills (slots 1-13) and language skills (slots 14-27) in the
/// same order.
pub const SKILLS: [Skill; 27] = [
    skill(1, "항", "항해술", SkillKind::Profession),
    skill(2, "운", "운용술", SkillKind::Profession),
    skill(3, "검", "검술", SkillKind::Profession),
    skill(4, "포", "포술", SkillKind::Profession),
    skill(5, "사", "사격술", SkillKind::Profession),
    skill(6, "의", "의학", SkillKind::Profession),
    skill(7, "웅", "웅변술", SkillKind::Profession),
    skill(8, "측", "측량술", SkillKind::Profession),
    skill(9, "역", "역사학", SkillKind::Profession),
    skill(10, "회", "회계", SkillKind::Profession),
    skill(11, "조", "조선술", SkillKind::Profession),
    skill(12, "신", "신학", SkillKind::Profession),
    skill(13, "과", "과학", SkillKind::Profession),
    skill(14, "스", "스페인어", SkillKind::Language),
    skill(15, "갈", "포르투갈어", SkillKind::Language),
    skill(16, "로", "로망스어", SkillKind::Language),
    skill(17, "게", "게르만어", SkillKind::Language),
    skill(18, "슬", "슬라브어", SkillKind::Language),
    skill(19, "랍", "아랍어", SkillKind::Language),
    skill(20, "페", "페르시아어", SkillKind::Language),
    skill(21, "중", "중국어", SkillKind::Language),
    skill(22, "힌", "힌두어", SkillKind::Language),
    skill(23, "위", "위그르어", SkillKind::Language),
    skill(24, "아", "아프리카어", SkillKind::Language),
    skill(25, "미", "아메리카어", SkillKind::Language),
    skill(26, "남", "동남아시아어", SkillKind::Language),
    skill(27, "동", "동아시아어", SkillKind::Language),
];

/// Resolves a skill slot index. Returns `None` for slot 0 and anything past 27.
pub fn skill_by_index(index: u8) -> Option<&'static Skill> {
    SKILLS.get((index as usize).checked_sub(1)?)
}
