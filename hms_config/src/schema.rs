use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use hms_core::{OverlongPolicy, PasswordStorage};

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub records: RecordsConfig,
    #[serde(default)]
    pub patients: PatientsConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    #[serde(default = "StorageConfig::default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "StorageConfig::default_hospitals_file")]
    pub hospitals_file: String,
    #[serde(default = "StorageConfig::default_patients_file")]
    pub patients_file: String,
    #[serde(default = "StorageConfig::default_users_file")]
    pub users_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: Self::default_data_dir(),
            hospitals_file: Self::default_hospitals_file(),
            patients_file: Self::default_patients_file(),
            users_file: Self::default_users_file(),
        }
    }
}

impl StorageConfig {
    fn default_data_dir() -> PathBuf {
        PathBuf::from(".")
    }

    fn default_hospitals_file() -> String {
        "hospitals.txt".to_string()
    }

    fn default_patients_file() -> String {
        "patients.txt".to_string()
    }

    fn default_users_file() -> String {
        "users.txt".to_string()
    }

    #[must_use]
    pub fn hospitals_path(&self) -> PathBuf {
        self.data_dir.join(&self.hospitals_file)
    }

    #[must_use]
    pub fn patients_path(&self) -> PathBuf {
        self.data_dir.join(&self.patients_file)
    }

    #[must_use]
    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(&self.users_file)
    }
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct RecordsConfig {
    /// Truncate or reject text longer than its field.
    #[serde(default)]
    pub overlong: OverlongPolicy,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct PatientsConfig {
    /// Refuse patients admitted to a hospital id that does not exist.
    #[serde(default)]
    pub require_known_hospital: bool,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub password_storage: PasswordStorage,
}

const CONFIG_TEMPLATE: &str = r#"{
  "storage": {
    "data_dir": ".",
    "hospitals_file": "hospitals.txt",
    "patients_file": "patients.txt",
    "users_file": "users.txt"
  },
  "records": {
    "overlong": "truncate"
  },
  "patients": {
    "require_known_hospital": false
  },
  "credentials": {
    "password_storage": "plain"
  }
}
"#;

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("hms"))
    }

    /// Load `~/hms/config.json`, falling back to defaults when it is absent.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_dir()?.join("config.json"))
    }

    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if !config_path.exists() {
            info!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Invalid config file {}: {e}", config_path.display())
        })?;

        info!("Loaded config from {}", config_path.display());
        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<PathBuf> {
        let config_dir = Self::ensure_config_dir()?;
        Self::create_config_in(&config_dir)
    }

    /// Write the default template to `config_dir/config.json`.
    pub fn create_config_in(config_dir: &Path) -> anyhow::Result<PathBuf> {
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, CONFIG_TEMPLATE)?;
        Ok(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(
            config.storage.hospitals_path(),
            PathBuf::from("./hospitals.txt")
        );
        assert_eq!(config.records.overlong, OverlongPolicy::Truncate);
        assert_eq!(config.credentials.password_storage, PasswordStorage::Plain);
    }

    #[test]
    fn template_parses_to_defaults() {
        let config: Config = serde_json::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"storage": {"data_dir": "/srv/hms"}, "credentials": {"password_storage": "sha256"}}"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(
            config.storage.users_path(),
            PathBuf::from("/srv/hms/users.txt")
        );
        assert_eq!(config.credentials.password_storage, PasswordStorage::Sha256);
        assert!(!config.patients.require_known_hospital);
    }

    #[test]
    fn invalid_json_names_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("config.json"));
    }

    #[test]
    fn create_config_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = Config::create_config_in(dir.path()).unwrap();
        assert!(path.exists());
        assert!(Config::create_config_in(dir.path()).is_err());
    }
}
