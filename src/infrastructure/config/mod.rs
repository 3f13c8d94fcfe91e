//! Configuration management

use crate::application::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Admin tool configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub gateway: GatewayConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct GatewayConfig {
    /// Base URL of the remote catalog service; `/products` is appended
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct StorageConfig {
    /// Directory holding the durable slots
    pub directory: PathBuf,
    pub catalog_slot: String,
    pub image_slot: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig {
                base_url: "https://fakestoreapi.com".to_string(),
            },
            storage: StorageConfig {
                directory: PathBuf::from("./data"),
                catalog_slot: "products".to_string(),
                image_slot: "uploaded-image".to_string(),
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn load_env() -> Self {
        // Load from environment variables
        let mut config = Config::default();

        if let Ok(url) = std::env::var("SHOPKEEPER_API_URL") {
            config.gateway.base_url = url;
        }
        if let Ok(dir) = std::env::var("SHOPKEEPER_DATA_DIR") {
            config.storage.directory = PathBuf::from(dir);
        }

        config
    }
}
