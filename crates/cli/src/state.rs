use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use common::format::FormatKind;

pub const APP_NAME: &str = "zoonav";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const PREFS_FILE_NAME: &str = "prefs.toml";

fn default_remote() -> Url {
    Url::parse("http://localhost:9000").expect("hardcoded URL must parse")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// URL of the tree store's HTTP gateway
    #[serde(default = "default_remote")]
    pub remote: Url,
    /// Format selected when nothing is remembered for a path
    #[serde(default)]
    pub default_format: FormatKind,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            remote: default_remote(),
            default_format: FormatKind::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the zoonav directory (~/.zoonav)
    pub zoonav_dir: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Path to the per-path format memory
    pub prefs_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the zoonav directory path (custom or default ~/.zoonav)
    pub fn zoonav_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Load existing state from the zoonav directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let zoonav_dir = Self::zoonav_dir(custom_path)?;

        let config_path = zoonav_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Err(StateError::NotInitialized);
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;

        Ok(Self {
            prefs_path: zoonav_dir.join(PREFS_FILE_NAME),
            zoonav_dir,
            config_path,
            config,
        })
    }

    /// Load existing state, creating the directory and a default config
    /// on first run.
    pub fn load_or_init(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        match Self::load(custom_path.clone()) {
            Err(StateError::NotInitialized) => Self::init(custom_path, None),
            other => other,
        }
    }

    /// Initialize a new zoonav state directory
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let zoonav_dir = Self::zoonav_dir(custom_path)?;

        let config_path = zoonav_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&zoonav_dir)?;

        let config = config.unwrap_or_default();
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        Ok(Self {
            prefs_path: zoonav_dir.join(PREFS_FILE_NAME),
            zoonav_dir,
            config_path,
            config,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("zoonav directory not initialized")]
    NotInitialized,

    #[error("zoonav directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_then_load() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("state");

        let state = AppState::init(Some(dir.clone()), None).unwrap();
        assert_eq!(state.config.default_format, FormatKind::Text);
        assert!(state.config_path.exists());

        let loaded = AppState::load(Some(dir.clone())).unwrap();
        assert_eq!(loaded.config.remote, state.config.remote);

        // double init refuses
        assert!(matches!(
            AppState::init(Some(dir), None),
            Err(StateError::AlreadyInitialized)
        ));
    }

    #[test]
    fn test_load_missing_dir() {
        let temp = TempDir::new().unwrap();
        let result = AppState::load(Some(temp.path().join("nope")));
        assert!(matches!(result, Err(StateError::NotInitialized)));
    }

    #[test]
    fn test_load_or_init_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("state");

        let first = AppState::load_or_init(Some(dir.clone())).unwrap();
        let second = AppState::load_or_init(Some(dir)).unwrap();
        assert_eq!(first.config.remote, second.config.remote);
    }
}
