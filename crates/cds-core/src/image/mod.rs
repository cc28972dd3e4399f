//! Executable image (`cds_95.exe`) inspection and patching.

pub mod layout;
mod patch_site;
mod patcher;
mod roster;
mod section;

pub use patch_site::{PATCH_SITES, PatchAddress, PatchSite, PatchState};
pub use patcher::{
    APPEAR_CONDITION_MAX, APPEAR_YEAR_MAX, APPEAR_YEAR_MIN, BIRTH_YEAR_MAX, BIRTH_YEAR_MIN,
    ExecutablePatcher, PatchReport, SiteStatus,
};
pub use roster::{AppearYear, Gender, RosterEntry, RosterStats, read_roster};
pub use section::{SectionEntry, SectionTable};
