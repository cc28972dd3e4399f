pub mod backup;
pub mod codec;
pub mod config;
pub mod error;
pub mod field_io;
pub mod image;
pub mod lookup;
pub mod save;

pub use backup::{BackupGuard, BackupPolicy, backup_path};
pub use config::Config;
pub use error::{Error, Result};
pub use image::{
    AppearYear, ExecutablePatcher, PATCH_SITES, PatchAddress, PatchReport, PatchSite, PatchState,
    RosterEntry, SectionTable,
};
pub use lookup::{CityLookup, CityTable, SkillKind};
pub use save::{
    CharacterRecord, HintEntry, HintStatus, HireStatus, Location, PlayerRecord, SaveEditor,
    SaveFile, SaveGameInfo, SaveHeader,
};
