//! The player character section at the start of the save file.

use serde::Serialize;
use strum::{EnumIter, IntoStaticStr};

use super::character::{CharacterRecord, NAME_SEPARATOR, read_character};
use super::layout::player as layout;
use super::location::Location;
use crate::codec::{ByteBuffer, decode_slot};
use crate::lookup::{SKILLS, SkillKind};

/// Crew-slot bytes that mean the role is vacant.
const VACANT_SLOTS: [u8; 2] = [0x00, 0xFF];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, IntoStaticStr)]
pub enum CrewRole {
    #[strum(serialize = "adjutant")]
    Adjutant,
    #[strum(serialize = "navigator")]
    Navigator,
    #[strum(serialize = "surveyor")]
    Surveyor,
    #[strum(serialize = "interpreter")]
    Interpreter,
}

impl CrewRole {
    fn slot_offset(self) -> usize {
        match self {
            Self::Adjutant => layout::ADJUTANT,
            Self::Navigator => layout::NAVIGATOR,
            Self::Surveyor => layout::SURVEYOR,
            Self::Interpreter => layout::INTERPRETER,
        }
    }

    pub fn label(self) -> &'static str {
        self.into()
    }
}

/// A crew slot that points at a character record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrewMember {
    pub role: CrewRole,
    pub character: CharacterRecord,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Crew {
    pub adjutant: Option<CrewMember>,
    pub navigator: Option<CrewMember>,
    pub surveyor: Option<CrewMember>,
    pub interpreter: Option<CrewMember>,
}

impl Crew {
    pub fn get(&self, role: CrewRole) -> Option<&CrewMember> {
        match role {
            CrewRole::Adjutant => self.adjutant.as_ref(),
            CrewRole::Navigator => self.navigator.as_ref(),
            CrewRole::Surveyor => self.surveyor.as_ref(),
            CrewRole::Interpreter => self.interpreter.as_ref(),
        }
    }

    /// Occupied slots in role order.
    pub fn members(&self) -> impl Iterator<Item = &CrewMember> {
        [
            &self.adjutant,
            &self.navigator,
            &self.surveyor,
            &self.interpreter,
        ]
        .into_iter()
        .flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerRecord {
    pub first_name: String,
    pub last_name: String,
    /// Levels for skill slots 1-13
    pub profession_skills: [u8; layout::PROFESSION_SKILL_COUNT],
    /// Levels for skill slots 14-27
    pub language_skills: [u8; layout::LANGUAGE_SKILL_COUNT],
    pub fame: u16,
    pub notoriety: u16,
    pub current_city: Location,
    pub crew: Crew,
}

impl PlayerRecord {
    pub fn full_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{}{}{}", self.first_name, NAME_SEPARATOR, self.last_name)
        }
    }

    /// Named skill levels of one kind, including untrained (level 0) skills.
    pub fn skills(&self, kind: SkillKind) -> Vec<(&'static str, u8)> {
        let levels: &[u8] = match kind {
            SkillKind::Profession => &self.profession_skills,
            SkillKind::Language => &self.language_skills,
        };
        SKILLS
            .iter()
            .filter(|skill| skill.kind == kind)
            .zip(levels)
            .map(|(skill, &level)| (skill.name, level))
            .collect()
    }
}

/// Decodes the player section. `None` if `data` is shorter than the section.
pub fn read_player(data: &[u8]) -> Option<PlayerRecord> {
    if data.len() < layout::MIN_SECTION_LEN {
        return None;
    }
    let buf = ByteBuffer::new(data);

    let mut profession_skills = [0u8; layout::PROFESSION_SKILL_COUNT];
    profession_skills.copy_from_slice(
        buf.slice_at(layout::PROFESSION_SKILLS, layout::PROFESSION_SKILL_COUNT)
            .ok()?,
    );
    let mut language_skills = [0u8; layout::LANGUAGE_SKILL_COUNT];
    language_skills.copy_from_slice(
        buf.slice_at(layout::LANGUAGE_SKILLS, layout::LANGUAGE_SKILL_COUNT)
            .ok()?,
    );

    Some(PlayerRecord {
        first_name: decode_slot(data, layout::FIRST_NAME, layout::NAME_LEN),
        last_name: decode_slot(data, layout::LAST_NAME, layout::NAME_LEN),
        profession_skills,
        language_skills,
        fame: buf.read_u16_at(layout::FAME).ok()?,
        notoriety: buf.read_u16_at(layout::NOTORIETY).ok()?,
        current_city: Location::from_raw(buf.read_u8_at(layout::CURRENT_CITY).ok()?),
        crew: Crew {
            adjutant: read_crew_member(data, CrewRole::Adjutant),
            navigator: read_crew_member(data, CrewRole::Navigator),
            surveyor: read_crew_member(data, CrewRole::Surveyor),
            interpreter: read_crew_member(data, CrewRole::Interpreter),
        },
    })
}

fn read_crew_member(data: &[u8], role: CrewRole) -> Option<CrewMember> {
    let index = *data.get(role.slot_offset())?;
    if VACANT_SLOTS.contains(&index) {
        return None;
    }
    read_character(data, index as usize).map(|character| CrewMember { role, character })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::save::layout::character;
    use strum::IntoEnumIterator;

    fn player_bytes() -> Vec<u8> {
        let mut data = vec![0u8; layout::MIN_SECTION_LEN];
        // 도냐 / 마리나
        data[layout::FIRST_NAME..layout::FIRST_NAME + 4]
            .copy_from_slice(&[0xB5, 0xB5, 0xB3, 0xC4]);
        data[layout::LAST_NAME..layout::LAST_NAME + 6]
            .copy_from_slice(&[0xB8, 0xB6, 0xB8, 0xAE, 0xB3, 0xAA]);
        data[layout::PROFESSION_SKILLS] = 5;
        data[layout::PROFESSION_SKILLS + 12] = 1;
        data[layout::LANGUAGE_SKILLS + 1] = 3;
        data[layout::FAME..layout::FAME + 2].copy_from_slice(&3000u16.to_le_bytes());
        data[layout::NOTORIETY..layout::NOTORIETY + 2].copy_from_slice(&120u16.to_le_bytes());
        data[layout::CURRENT_CITY] = 12;
        data
    }

    #[test]
    fn test_read_player_basic_fields() {
        let player = read_player(&player_bytes()).unwrap();

        assert_eq!(player.first_name, "도냐");
        assert_eq!(player.last_name, "마리나");
        assert_eq!(player.full_name(), "도냐·마리나");
        assert_eq!(player.profession_skills[0], 5);
        assert_eq!(player.profession_skills[12], 1);
        assert_eq!(player.language_skills[1], 3);
        assert_eq!(player.fame, 3000);
        assert_eq!(player.notoriety, 120);
        assert_eq!(player.current_city, Location::City(12));
        assert_eq!(player.crew, Crew::default());
    }

    #[test]
    fn test_full_name_without_last_name() {
        let mut data = player_bytes();
        data[layout::LAST_NAME..layout::LAST_NAME + layout::NAME_LEN].fill(0);
        let player = read_player(&data).unwrap();
        assert_eq!(player.full_name(), "도냐");
    }

    #[test]
    fn test_read_player_too_short() {
        let data = player_bytes();
        assert!(read_player(&data[..layout::MIN_SECTION_LEN - 1]).is_none());
        assert!(read_player(&[]).is_none());
    }

    #[test]
    fn test_named_skills() {
        let player = read_player(&player_bytes()).unwrap();

        let professions = player.skills(SkillKind::Profession);
        assert_eq!(professions.len(), 13);
        assert_eq!(professions[0], ("항해술", 5));
        assert_eq!(professions[12], ("과학", 1));

        let languages = player.skills(SkillKind::Language);
        assert_eq!(languages.len(), 14);
        assert_eq!(languages[1].1, 3);
    }

    #[test]
    fn test_crew_slots_resolve_characters() {
        let mut data = player_bytes();
        data.resize(character::record_offset(3), 0);
        // Character 2 named 홍길동
        let name_at = character::record_offset(2) + character::NAME_FIRST;
        data[name_at..name_at + 6].copy_from_slice(&[0xC8, 0xAB, 0xB1, 0xE6, 0xB5, 0xBF]);

        data[layout::ADJUTANT] = 2;
        data[layout::NAVIGATOR] = 0xFF;
        data[layout::SURVEYOR] = 0;
        // Points past the end of the buffer
        data[layout::INTERPRETER] = 200;

        let player = read_player(&data).unwrap();
        let adjutant = player.crew.adjutant.as_ref().unwrap();
        assert_eq!(adjutant.role, CrewRole::Adjutant);
        assert_eq!(adjutant.character.index, 2);
        assert_eq!(adjutant.character.name, "홍길동");
        assert!(player.crew.navigator.is_none());
        assert!(player.crew.surveyor.is_none());
        assert!(player.crew.interpreter.is_none());

        let occupied: Vec<_> = CrewRole::iter()
            .filter(|role| player.crew.get(*role).is_some())
            .collect();
        assert_eq!(occupied, vec![CrewRole::Adjutant]);
        assert_eq!(player.crew.members().count(), 1);
    }
}
