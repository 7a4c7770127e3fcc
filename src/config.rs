use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::error::{Result, LingoError};

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub provider: ProviderConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Translation endpoint base URL
    pub endpoint: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Default source language code
    pub default_from: String,
    /// Default target language code
    pub default_to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the persisted history log
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig {
                endpoint: "https://api.mymemory.translated.net".to_string(),
                timeout_secs: default_timeout_secs(),
                default_from: "en".to_string(),
                default_to: "hi".to_string(),
            },
            storage: StorageConfig {
                data_dir: PathBuf::from(".lingo/history"),
            },
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| LingoError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| LingoError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| LingoError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| LingoError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}
