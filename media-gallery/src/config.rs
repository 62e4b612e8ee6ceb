use crate::picker::AndroidPickerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Error loading a [`GalleryConfig`]
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Config IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Config parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}

/// Configuration for the gallery core
///
/// Every key is optional in TOML; missing keys fall back to [`Default`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GalleryConfig {
    /// Maximum number of records requested per refresh
    pub fetch_limit: usize,
    /// chrono locale used for day labels (e.g. "en_US", "de_DE")
    pub locale: String,
    /// Directory used as media library where no host library exists
    pub library_path: String,
    pub android: AndroidPickerConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            fetch_limit: 100,
            locale: "en_US".to_string(),
            library_path: "./media".to_string(),
            android: AndroidPickerConfig::default(),
        }
    }
}

impl GalleryConfig {
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Loads the config file, or defaults if it does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => {
                log::debug!("Loading gallery config from {}", path.display());
                Self::from_toml(&content)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No gallery config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}
