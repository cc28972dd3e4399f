use std::path::{Path, PathBuf};

use tracing::info;

use super::character::{HireStatus, encode_age, encode_fame, encode_hire_status};
use crate::backup::{BackupGuard, BackupPolicy};
use crate::error::{Error, Result};
use crate::field_io::FieldWrite;

/// Youngest/oldest age accepted by [`SaveEditor::set_age`].
pub const AGE_RANGE: std::ops::RangeInclusive<i8> = -100..=100;

/// Edits single character fields in a save file on disk.
#[derive(Debug)]
pub struct SaveEditor {
    path: PathBuf,
    backup: BackupGuard,
}

impl SaveEditor {
    /// Opens an editor for an existing save file.
    pub fn open(path: impl Into<PathBuf>, policy: BackupPolicy) -> Result<Self> {
        let path = path.into();
        std::fs::metadata(&path)?;
        Ok(Self {
            backup: BackupGuard::new(&path, policy),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_hire_status(&mut self, index: usize, status: HireStatus) -> Result<()> {
        let write = encode_hire_status(index, status)?;
        self.commit(write)?;
        info!("Character {} hire status -> {}", index, status);
        Ok(())
    }

    pub fn set_age(&mut self, index: usize, age: i8) -> Result<()> {
        if !AGE_RANGE.contains(&age) {
            return Err(Error::invalid_value("age", age, "-100..=100"));
        }
        let write = encode_age(index, age)?;
        self.commit(write)?;
        info!("Character {} age -> {}", index, age);
        Ok(())
    }

    pub fn set_fame(&mut self, index: usize, fame: u16) -> Result<()> {
        let write = encode_fame(index, fame)?;
        self.commit(write)?;
        info!("Character {} fame -> {}", index, fame);
        Ok(())
    }

    fn commit(&mut self, write: FieldWrite) -> Result<()> {
        self.backup.ensure()?;
        write.write_to(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::backup_path;
    use crate::save::character::read_character;
    use crate::save::layout::character;
    use std::fs;
    use tempfile::TempDir;

    fn save_file(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("SAVEDATA.CDS");
        fs::write(&path, vec![0u8; character::record_offset(10)]).unwrap();
        path
    }

    #[test]
    fn test_set_hire_status_and_age() {
        let dir = TempDir::new().unwrap();
        let path = save_file(&dir);

        let mut editor = SaveEditor::open(&path, BackupPolicy::CreateOnce).unwrap();
        editor.set_hire_status(4, HireStatus::Hirable).unwrap();
        editor.set_age(4, -7).unwrap();
        editor.set_fame(4, 4321).unwrap();

        let data = fs::read(&path).unwrap();
        let record = read_character(&data, 4).unwrap();
        assert_eq!(record.hire_status(), Some(HireStatus::Hirable));
        assert_eq!(record.age, -7);
        assert_eq!(record.fame, 4321);
    }

    #[test]
    fn test_age_out_of_range_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = save_file(&dir);
        let before = fs::read(&path).unwrap();

        let mut editor = SaveEditor::open(&path, BackupPolicy::CreateOnce).unwrap();
        let err = editor.set_age(0, 101).unwrap_err();
        assert!(matches!(err, Error::InvalidValue { field: "age", .. }));
        assert!(editor.set_age(0, -101).is_err());

        assert_eq!(fs::read(&path).unwrap(), before);
        assert!(!backup_path(&path).exists());
    }

    #[test]
    fn test_single_backup_across_edits() {
        let dir = TempDir::new().unwrap();
        let path = save_file(&dir);
        let original = fs::read(&path).unwrap();

        let mut editor = SaveEditor::open(&path, BackupPolicy::CreateOnce).unwrap();
        for age in 20..25 {
            editor.set_age(1, age).unwrap();
        }

        assert_eq!(fs::read(backup_path(&path)).unwrap(), original);
    }

    #[test]
    fn test_index_past_table_rejected() {
        let dir = TempDir::new().unwrap();
        let path = save_file(&dir);

        let mut editor = SaveEditor::open(&path, BackupPolicy::Disabled).unwrap();
        assert!(matches!(
            editor.set_hire_status(461, HireStatus::Hired),
            Err(Error::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = SaveEditor::open(dir.path().join("SAVEDATA.CDS"), BackupPolicy::CreateOnce)
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
