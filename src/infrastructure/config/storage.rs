//! Config file location and loading.

use super::app_config::AppConfig;
use directories::ProjectDirs;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

const APP_QUALIFIER: &str = "dev";
const APP_ORGANIZATION: &str = "dico";
const APP_NAME: &str = "dico";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Owns the path of `config.toml`.
pub struct StorageManager {
    config_path: PathBuf,
}

impl StorageManager {
    /// Uses `config.toml` in the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigDirNotFound` if the platform has no config directory.
    pub fn new() -> Result<Self, ConfigError> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| Self::at(dirs.config_dir().join(CONFIG_FILE_NAME)))
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    /// Uses an explicit config file, e.g. from `--config`.
    #[must_use]
    pub const fn at(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Loads the configuration. A missing file is created with the defaults;
    /// a malformed one is left untouched and the defaults are used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or the default cannot be written.
    pub fn load_config(&self) -> Result<AppConfig, ConfigError> {
        if !self.config_path.exists() {
            info!(path = %self.config_path.display(), "Config file not found, writing defaults");
            let config = AppConfig::default();
            write_atomic(&self.config_path, &config)?;
            return Ok(config);
        }

        let content = fs::read_to_string(&self.config_path)?;
        toml::from_str::<AppConfig>(&content).or_else(|e| {
            warn!(path = %self.config_path.display(), error = %e, "Malformed config file, using defaults");
            Ok(AppConfig::default())
        })
    }
}

// Written next to the target and renamed so readers never see a partial file.
fn write_atomic(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(config)?;

    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.persist(path).map_err(|e| e.error)?;

    debug!(path = %path.display(), "Config written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::LogLevel;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let config = StorageManager::at(path.clone()).load_config().unwrap();

        assert_eq!(config, AppConfig::default());
        let written: AppConfig = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, AppConfig::default());
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[cdn]\ndefault_size = \"big\"\n").unwrap();

        let config = StorageManager::at(path.clone()).load_config().unwrap();

        assert_eq!(config.cdn.default_size, 1024);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[cdn]\ndefault_size = \"big\"\n"
        );
    }

    #[test]
    fn test_cdn_table_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dico.toml");

        let mut config = AppConfig::default();
        config.log_level = LogLevel::Debug;
        config.log_path = Some(PathBuf::from("/var/log/dico.log"));
        config.cdn.base_url = "https://media.discordapp.net".to_string();
        config.cdn.default_extension = "png".to_string();
        config.cdn.default_size = 128;
        write_atomic(&path, &config).unwrap();

        let loaded = StorageManager::at(path).load_config().unwrap();
        assert_eq!(loaded, config);
    }
}
