//! One-time backups of files before they are modified in place.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;

/// Extension appended to the original file name.
pub const BACKUP_EXTENSION: &str = "bak";

/// What to do before the first write of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackupPolicy {
    /// Copy the file to `<path>.bak` unless a backup already exists.
    #[default]
    CreateOnce,
    /// Never create backups.
    Disabled,
}

/// `SAVEDATA.CDS` -> `SAVEDATA.CDS.bak`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(BACKUP_EXTENSION);
    PathBuf::from(name)
}

/// Applies a [`BackupPolicy`] at most once for one target file.
///
/// The first call to [`BackupGuard::ensure`] decides; later calls are no-ops
/// even if the backup has since been deleted.
#[derive(Debug)]
pub struct BackupGuard {
    target: PathBuf,
    policy: BackupPolicy,
    checked: bool,
}

impl BackupGuard {
    pub fn new(target: impl Into<PathBuf>, policy: BackupPolicy) -> Self {
        Self {
            target: target.into(),
            policy,
            checked: false,
        }
    }

    pub fn policy(&self) -> BackupPolicy {
        self.policy
    }

    pub fn backup_path(&self) -> PathBuf {
        backup_path(&self.target)
    }

    /// Creates the backup if the policy asks for one and none exists yet.
    ///
    /// Returns `true` if a backup file was written by this call.
    pub fn ensure(&mut self) -> Result<bool> {
        if self.checked {
            return Ok(false);
        }
        if self.policy == BackupPolicy::Disabled {
            self.checked = true;
            return Ok(false);
        }

        let backup = self.backup_path();
        if backup.exists() {
            debug!("Backup already present: {}", backup.display());
            self.checked = true;
            return Ok(false);
        }

        fs::copy(&self.target, &backup)?;
        self.checked = true;
        info!("Created backup {}", backup.display());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_backup_path_appends_extension() {
        assert_eq!(
            backup_path(Path::new("/games/cds/SAVEDATA.CDS")),
            PathBuf::from("/games/cds/SAVEDATA.CDS.bak")
        );
        assert_eq!(
            backup_path(Path::new("cds_95.exe")),
            PathBuf::from("cds_95.exe.bak")
        );
    }

    #[test]
    fn test_create_once_copies_then_stops() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("SAVEDATA.CDS");
        fs::write(&target, b"first").unwrap();

        let mut guard = BackupGuard::new(&target, BackupPolicy::CreateOnce);
        assert!(guard.ensure().unwrap());
        assert_eq!(fs::read(guard.backup_path()).unwrap(), b"first");

        fs::write(&target, b"second").unwrap();
        assert!(!guard.ensure().unwrap());
        assert_eq!(fs::read(guard.backup_path()).unwrap(), b"first");
    }

    #[test]
    fn test_existing_backup_never_overwritten() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("cds_95.exe");
        fs::write(&target, b"current").unwrap();
        fs::write(backup_path(&target), b"pristine").unwrap();

        let mut guard = BackupGuard::new(&target, BackupPolicy::CreateOnce);
        assert!(!guard.ensure().unwrap());
        assert_eq!(fs::read(backup_path(&target)).unwrap(), b"pristine");
    }

    #[test]
    fn test_disabled_policy() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("cds_95.exe");
        fs::write(&target, b"data").unwrap();

        let mut guard = BackupGuard::new(&target, BackupPolicy::Disabled);
        assert!(!guard.ensure().unwrap());
        assert!(!backup_path(&target).exists());
    }

    #[test]
    fn test_missing_target_is_error() {
        let dir = TempDir::new().unwrap();
        let mut guard = BackupGuard::new(dir.path().join("missing"), BackupPolicy::CreateOnce);
        assert!(guard.ensure().unwrap_err().is_not_found());
    }
}
