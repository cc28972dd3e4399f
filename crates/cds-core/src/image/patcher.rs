//! In-place patching of the game executable.
//!
//! Every operation re-reads the image from disk so that the on-disk state is
//! the only source of truth. Writes go through [`FieldWrite::write_to`]; the
//! file is never rewritten as a whole except by [`ExecutablePatcher::restore_from_backup`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use super::layout::{roster, settings};
use super::patch_site::{PATCH_SITES, PatchSite, PatchState};
use super::roster::{AppearYear, RosterEntry, read_roster};
use super::section::SectionTable;
use crate::backup::{BackupGuard, BackupPolicy, backup_path};
use crate::codec::{ByteBuffer, to_hex};
use crate::error::{Error, Result};
use crate::field_io::{FieldWrite, read_file};
use crate::save::HireStatus;

pub const APPEAR_YEAR_MIN: u16 = 1480;
pub const APPEAR_YEAR_MAX: u16 = 1680;
pub const BIRTH_YEAR_MIN: i32 = 1380;
pub const BIRTH_YEAR_MAX: i32 = 1680;
pub const APPEAR_CONDITION_MAX: u32 = 255;

/// State of one patch site as found on disk.
#[derive(Debug, Clone, Serialize)]
pub struct SiteStatus {
    pub description: &'static str,
    /// Resolved file offset, if the address could be resolved
    pub offset: Option<usize>,
    pub state: Option<PatchState>,
    /// Current bytes as hex
    pub current: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatchReport {
    pub path: PathBuf,
    pub sites: Vec<SiteStatus>,
    pub patched: usize,
    pub long_rest_limit: Option<u8>,
}

impl PatchReport {
    pub fn total(&self) -> usize {
        self.sites.len()
    }

    pub fn is_fully_patched(&self) -> bool {
        self.patched == self.sites.len()
    }
}

/// Image bytes plus the section table parsed from them.
struct LoadedImage {
    data: Vec<u8>,
    sections: Option<SectionTable>,
}

impl LoadedImage {
    fn sections(&self) -> Option<&SectionTable> {
        self.sections.as_ref()
    }
}

pub struct ExecutablePatcher {
    path: PathBuf,
    sites: &'static [PatchSite],
    backup: BackupGuard,
}

impl ExecutablePatcher {
    /// Creates a patcher for an existing executable using [`PATCH_SITES`].
    pub fn new(path: impl Into<PathBuf>, policy: BackupPolicy) -> Result<Self> {
        let path = path.into();
        fs::metadata(&path)?;
        Ok(Self {
            backup: BackupGuard::new(&path, policy),
            path,
            sites: PATCH_SITES,
        })
    }

    /// Replaces the patch set.
    pub fn with_sites(mut self, sites: &'static [PatchSite]) -> Self {
        self.sites = sites;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sites(&self) -> &'static [PatchSite] {
        self.sites
    }

    fn load(&self) -> Result<LoadedImage> {
        let data = read_file(&self.path)?;
        let sections = match SectionTable::parse(&data) {
            Ok(table) => Some(table),
            Err(e) => {
                warn!("{}: {}", self.path.display(), e);
                None
            }
        };
        Ok(LoadedImage { data, sections })
    }

    /// Classifies one site against the current file contents.
    pub fn classify(&self, site: &PatchSite) -> Result<PatchState> {
        let image = self.load()?;
        site.classify(&image.data, image.sections())
    }

    pub fn report(&self) -> Result<PatchReport> {
        let image = self.load()?;

        let sites: Vec<SiteStatus> = self
            .sites
            .iter()
            .map(|site| {
                let offset = site.address.resolve(image.sections()).ok();
                match site.read(&image.data, image.sections()) {
                    Ok(current) => SiteStatus {
                        description: site.description,
                        offset,
                        state: Some(PatchState::of(current, site)),
                        current: Some(to_hex(current)),
                        error: None,
                    },
                    Err(e) => SiteStatus {
                        description: site.description,
                        offset,
                        state: None,
                        current: None,
                        error: Some(e.to_string()),
                    },
                }
            })
            .collect();

        let patched = sites
            .iter()
            .filter(|s| s.state == Some(PatchState::Patched))
            .count();

        Ok(PatchReport {
            path: self.path.clone(),
            patched,
            long_rest_limit: image.data.get(settings::LONG_REST_LIMIT).copied(),
            sites,
        })
    }

    /// Writes the patched pattern to every site that is not already patched.
    ///
    /// Sites that cannot be resolved or lie outside the image are skipped.
    /// Returns the number of sites written.
    pub fn apply_all(&mut self) -> Result<usize> {
        let image = self.load()?;
        let mut written = 0;

        for site in self.sites {
            match site.classify(&image.data, image.sections()) {
                Ok(PatchState::Patched) => {}
                Ok(state) => {
                    if state == PatchState::Other {
                        warn!("Overwriting unrecognised bytes at '{}'", site.description);
                    }
                    let offset = site.address.resolve(image.sections())?;
                    self.commit(FieldWrite::new(offset, site.patched))?;
                    info!("Patched '{}' at {:#x}", site.description, offset);
                    written += 1;
                }
                Err(e) => warn!("Skipping '{}': {}", site.description, e),
            }
        }
        Ok(written)
    }

    /// Writes the original pattern back to every patched site.
    ///
    /// Sites in any other state are left alone. Returns the number of sites
    /// written.
    pub fn restore_all(&mut self) -> Result<usize> {
        let image = self.load()?;
        let mut written = 0;

        for site in self.sites {
            match site.classify(&image.data, image.sections()) {
                Ok(PatchState::Patched) => {
                    let offset = site.address.resolve(image.sections())?;
                    FieldWrite::new(offset, site.original).write_to(&self.path)?;
                    info!("Restored '{}' at {:#x}", site.description, offset);
                    written += 1;
                }
                Ok(_) => {}
                Err(e) => warn!("Skipping '{}': {}", site.description, e),
            }
        }
        Ok(written)
    }

    /// Replaces the executable with its `.bak` copy.
    pub fn restore_from_backup(&self) -> Result<()> {
        let backup = backup_path(&self.path);
        if !backup.exists() {
            return Err(Error::BackupMissing(backup));
        }
        fs::copy(&backup, &self.path)?;
        info!("Restored {} from {}", self.path.display(), backup.display());
        Ok(())
    }

    /// Decodes the character roster.
    pub fn roster(&self) -> Result<Vec<RosterEntry>> {
        let image = self.load()?;
        Ok(read_roster(&image.data, image.sections()))
    }

    /// Only [`HireStatus::TalkOnly`] and [`HireStatus::Hirable`] are
    /// meaningful in the roster.
    pub fn set_hire_status(&mut self, record: usize, status: HireStatus) -> Result<()> {
        if status == HireStatus::Hired {
            return Err(Error::invalid_value(
                "roster hire status",
                status as u8,
                "talk only (1) or hirable (2)",
            ));
        }
        let offset = record_field(record, roster::HIRE_STATUS)?;
        self.commit(FieldWrite::u8(offset, status as u8))?;
        info!("Roster {} hire status -> {}", record, status);
        Ok(())
    }

    pub fn set_appear_year(&mut self, record: usize, year: AppearYear) -> Result<()> {
        let delay = match year {
            AppearYear::Year(y) if !(APPEAR_YEAR_MIN..=APPEAR_YEAR_MAX).contains(&y) => None,
            AppearYear::Raw(_) => None,
            _ => year.to_delay(),
        }
        .ok_or_else(|| {
            let value = match year {
                AppearYear::Year(y) => i64::from(y),
                AppearYear::Raw(raw) => i64::from(raw),
                AppearYear::Event => i64::from(roster::EVENT_DELAY),
            };
            Error::invalid_value("appear year", value, "1480..=1680 or event")
        })?;
        let offset = record_field(record, roster::APPEAR_DELAY)?;
        self.commit(FieldWrite::u32(offset, delay))?;
        info!("Roster {} appear year -> {}", record, year);
        Ok(())
    }

    pub fn set_appear_condition(&mut self, record: usize, value: u32) -> Result<()> {
        if value > APPEAR_CONDITION_MAX {
            return Err(Error::invalid_value("appear condition", value, "0..=255"));
        }
        let offset = record_field(record, roster::APPEAR_CONDITION)?;
        self.commit(FieldWrite::u32(offset, value))?;
        info!("Roster {} appear condition -> {}", record, value);
        Ok(())
    }

    pub fn set_birth_year(&mut self, record: usize, year: i32) -> Result<()> {
        if !(BIRTH_YEAR_MIN..=BIRTH_YEAR_MAX).contains(&year) {
            return Err(Error::invalid_value("birth year", year, "1380..=1680"));
        }
        let offset = record_field(record, roster::BIRTH_OFFSET)?;
        self.commit(FieldWrite::i32(offset, roster::EPOCH_YEAR - year))?;
        info!("Roster {} birth year -> {}", record, year);
        Ok(())
    }

    pub fn long_rest_limit(&self) -> Result<u8> {
        let data = read_file(&self.path)?;
        ByteBuffer::new(&data).read_u8_at(settings::LONG_REST_LIMIT)
    }

    pub fn set_long_rest_limit(&mut self, months: u8) -> Result<()> {
        if !(settings::LONG_REST_LIMIT_MIN..=settings::LONG_REST_LIMIT_MAX).contains(&months) {
            return Err(Error::invalid_value("long-rest limit", months, "1..=127"));
        }
        self.commit(FieldWrite::u8(settings::LONG_REST_LIMIT, months))?;
        info!("Long-rest limit -> {} months", months);
        Ok(())
    }

    /// Writes the stock long-rest limit back.
    pub fn restore_long_rest_limit(&mut self) -> Result<()> {
        FieldWrite::u8(settings::LONG_REST_LIMIT, settings::LONG_REST_LIMIT_STOCK)
            .write_to(&self.path)?;
        info!(
            "Long-rest limit restored to {} months",
            settings::LONG_REST_LIMIT_STOCK
        );
        Ok(())
    }

    fn commit(&mut self, write: FieldWrite) -> Result<()> {
        self.backup.ensure()?;
        write.write_to(&self.path)
    }
}

/// File offset of `field` within roster record `record`.
fn record_field(record: usize, field: usize) -> Result<usize> {
    if record >= roster::MAX_RECORDS {
        return Err(Error::invalid_value("roster index", record as i64, "0..=79"));
    }
    Ok(roster::record_offset(record) + field)
}
