//! User configuration (`cds.toml`).
//!
//! ```toml
//! save_path = "C:/Games/CDS/SAVEDATA.CDS"
//! exe_path = "C:/Games/CDS/cds_95.exe"
//! cities_path = "cities.tsv"
//! backup = "create-once"   # or "disabled"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::backup::BackupPolicy;
use crate::error::{Error, Result};

pub const CONFIG_FILE_NAME: &str = "cds.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub save_path: Option<PathBuf>,
    pub exe_path: Option<PathBuf>,
    pub cities_path: Option<PathBuf>,
    pub backup: BackupPolicy,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// `<config dir>/cds/cds.toml`, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cds").join(CONFIG_FILE_NAME))
    }

    /// Loads `path` if given, otherwise the default location.
    ///
    /// A missing default file yields the default configuration; a missing
    /// explicit file is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                debug!("Loading config from {}", path.display());
                Self::load(path)
            }
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
save_path = "/games/cds/SAVEDATA.CDS"
exe_path = "/games/cds/cds_95.exe"
cities_path = "cities.tsv"
backup = "disabled"
"#,
        )
        .unwrap();

        assert_eq!(
            config.save_path.as_deref(),
            Some(Path::new("/games/cds/SAVEDATA.CDS"))
        );
        assert_eq!(
            config.exe_path.as_deref(),
            Some(Path::new("/games/cds/cds_95.exe"))
        );
        assert_eq!(config.cities_path.as_deref(), Some(Path::new("cities.tsv")));
        assert_eq!(config.backup, BackupPolicy::Disabled);
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.backup, BackupPolicy::CreateOnce);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Config::parse("backup = \"sometimes\""),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::parse("unknown_key = 1"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "backup = \"create-once\"\n").unwrap();

        let config = Config::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.backup, BackupPolicy::CreateOnce);

        let missing = dir.path().join("missing.toml");
        assert!(Config::load_or_default(Some(&missing))
            .unwrap_err()
            .is_not_found());
    }
}
