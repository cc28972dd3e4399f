//! Common CLI utility functions shared across commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use cds_core::{BackupPolicy, CityTable, Config};
use serde::Serialize;

/// Settings resolved from the config file and global flags.
pub struct Settings {
    pub config: Config,
    pub no_backup: bool,
}

impl Settings {
    pub fn load(config_path: Option<&Path>, no_backup: bool) -> Result<Self> {
        let config = Config::load_or_default(config_path).with_context(|| match config_path {
            Some(path) => format!("Failed to load config from {}", path.display()),
            None => "Failed to load config".to_string(),
        })?;
        Ok(Self { config, no_backup })
    }

    pub fn backup_policy(&self) -> BackupPolicy {
        if self.no_backup {
            BackupPolicy::Disabled
        } else {
            self.config.backup
        }
    }

    pub fn save_path(&self, flag: Option<PathBuf>) -> Result<PathBuf> {
        match flag.or_else(|| self.config.save_path.clone()) {
            Some(path) => Ok(path),
            None => bail!("No save file given (use --file or set save_path in the config)"),
        }
    }

    pub fn exe_path(&self, flag: Option<PathBuf>) -> Result<PathBuf> {
        match flag.or_else(|| self.config.exe_path.clone()) {
            Some(path) => Ok(path),
            None => bail!("No executable given (use --file or set exe_path in the config)"),
        }
    }

    /// City names, or an empty table when no file is configured.
    pub fn cities(&self, flag: Option<PathBuf>) -> Result<CityTable> {
        match flag.or_else(|| self.config.cities_path.clone()) {
            Some(path) => CityTable::load(&path)
                .with_context(|| format!("Failed to load city table from {}", path.display())),
            None => Ok(CityTable::new()),
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
