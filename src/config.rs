//! Configuration file handling for cashlens.
//!
//! The configuration file is stored at `$CASHLENS_HOME/config.json` and holds the display
//! currency and the range a report uses when none is given on the command line.

use crate::model::CurrencySettings;
use crate::report::RangeSelection;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "cashlens";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$CASHLENS_HOME` and from there it loads `$CASHLENS_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the home directory and an initial `config.json` with default settings.
    ///
    /// # Errors
    /// - Returns an error if any file operations fail or if a config file already exists.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the cashlens home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!(
                "A config file already exists at '{}'",
                config_path.display()
            )
        }
        let config_file = ConfigFile::default();
        config_file.save(&config_path).await?;
        debug!("Created config at {}", config_path.display());

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    /// Validates that `home` and its config file exist, then loads the config file.
    pub async fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("Cashlens home is missing, run `cashlens init` first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn currency(&self) -> &CurrencySettings {
        &self.config_file.currency
    }

    pub fn default_range(&self) -> &RangeSelection {
        &self.config_file.default_range
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "cashlens",
///   "config_version": 1,
///   "currency": { "selected": "EUR", "position": "right" },
///   "default_range": "last-6-months"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "cashlens"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Which currency amounts are shown in and where its symbol goes
    #[serde(default)]
    currency: CurrencySettings,

    /// Range used when a command does not pass `--range`
    #[serde(default)]
    default_range: RangeSelection,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            currency: CurrencySettings::default(),
            default_range: RangeSelection::CurrentMonth,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path).await?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            config.config_version == CONFIG_VERSION,
            "Unsupported config_version {} in config file, expected {}",
            config.config_version,
            CONFIG_VERSION
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CurrencyPosition, MonthKey};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_create() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("cashlens_home");

        let config = Config::create(&home_dir).await.unwrap();

        assert!(config.config_path().is_file());
        assert_eq!(config.currency().selected(), "USD");
        assert_eq!(config.currency().position(), CurrencyPosition::Left);
        assert_eq!(config.default_range(), &RangeSelection::CurrentMonth);

        let loaded = Config::load(&home_dir).await.unwrap();
        assert_eq!(loaded.root(), config.root());
        assert_eq!(loaded.config_file, config.config_file);
    }

    #[tokio::test]
    async fn test_config_create_twice_fails() {
        let dir = TempDir::new().unwrap();
        Config::create(dir.path()).await.unwrap();
        let err = Config::create(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_config_load_missing() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(dir.path().join("nope")).await.is_err());
        assert!(Config::load(dir.path()).await.is_err());
    }

    #[test]
    fn test_config_file_default() {
        let config = ConfigFile::default();
        assert_eq!(config.app_name, "cashlens");
        assert_eq!(config.config_version, 1);
        assert_eq!(config.currency, CurrencySettings::default());
    }

    #[tokio::test]
    async fn test_config_file_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");

        let original = ConfigFile {
            currency: CurrencySettings::new("EUR", CurrencyPosition::Right),
            default_range: RangeSelection::custom(
                "2024-11".parse::<MonthKey>().unwrap(),
                "2025-01".parse::<MonthKey>().unwrap(),
            )
            .unwrap(),
            ..ConfigFile::default()
        };
        original.save(&config_path).await.unwrap();

        let loaded = ConfigFile::load(&config_path).await.unwrap();
        assert_eq!(original, loaded);
    }

    #[tokio::test]
    async fn test_config_file_load_with_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{ "app_name": "cashlens", "config_version": 1 }"#;
        utils::write(&config_path, json).await.unwrap();

        let config = ConfigFile::load(&config_path).await.unwrap();
        assert_eq!(config.currency.selected(), "USD");
        assert_eq!(config.default_range, RangeSelection::CurrentMonth);
    }

    #[tokio::test]
    async fn test_config_file_load_with_range_text() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{
            "app_name": "cashlens",
            "config_version": 1,
            "currency": { "selected": "JPY", "position": "right" },
            "default_range": "last-3-months"
        }"#;
        utils::write(&config_path, json).await.unwrap();

        let config = ConfigFile::load(&config_path).await.unwrap();
        assert_eq!(config.default_range, RangeSelection::last_three_months());
        assert_eq!(config.currency.currency().symbol(), "¥");
    }

    #[tokio::test]
    async fn test_config_file_load_invalid_app_name() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{ "app_name": "wrong_app", "config_version": 1 }"#;
        utils::write(&config_path, json).await.unwrap();

        let result = ConfigFile::load(&config_path).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }

    #[tokio::test]
    async fn test_config_file_load_bad_range() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{ "app_name": "cashlens", "config_version": 1,
            "default_range": "2025-03..2025-01" }"#;
        utils::write(&config_path, json).await.unwrap();

        assert!(ConfigFile::load(&config_path).await.is_err());
    }
}
