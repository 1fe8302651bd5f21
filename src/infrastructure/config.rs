// src/infrastructure/config.rs
use crate::application::KeyStrategy;
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_STORAGE_PREFIX,
    DEFAULT_URL_EXPIRY_SECS,
};
use crate::domain::DomainError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_API_ENDPOINT: &str = "NOTEGRID_API_ENDPOINT";
pub const ENV_API_KEY: &str = "NOTEGRID_API_KEY";
pub const ENV_BEARER_TOKEN: &str = "NOTEGRID_BEARER_TOKEN";
pub const ENV_STORAGE_ENDPOINT: &str = "NOTEGRID_STORAGE_ENDPOINT";

/// TOML configuration for the backend endpoints
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StorageConfig {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_url_expiry_secs")]
    pub url_expiry_secs: u64,
    #[serde(default)]
    pub key_strategy: KeyStrategy,
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_prefix() -> String {
    DEFAULT_STORAGE_PREFIX.to_string()
}

fn default_url_expiry_secs() -> u64 {
    DEFAULT_URL_EXPIRY_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: None,
            bearer_token: None,
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            prefix: default_prefix(),
            url_expiry_secs: default_url_expiry_secs(),
            key_strategy: KeyStrategy::default(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .context("Failed to serialize config to TOML")?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        std::fs::write(path.as_ref(), toml_string)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Create default configuration file at path
    pub fn create_default(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    /// Load from `path` (or the default location when it exists), then apply
    /// environment overrides
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::load(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Overlay values from a variable lookup such as `std::env::var`
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENV_API_ENDPOINT) {
            self.api.endpoint = endpoint;
        }
        if let Some(api_key) = lookup(ENV_API_KEY) {
            self.api.api_key = Some(api_key);
        }
        if let Some(token) = lookup(ENV_BEARER_TOKEN) {
            self.api.bearer_token = Some(token);
        }
        if let Some(endpoint) = lookup(ENV_STORAGE_ENDPOINT) {
            self.storage.endpoint = endpoint;
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.api.endpoint.trim().is_empty() {
            return Err(DomainError::Config(format!(
                "api.endpoint is not set (config file or {ENV_API_ENDPOINT})"
            )));
        }
        if self.storage.endpoint.trim().is_empty() {
            return Err(DomainError::Config(format!(
                "storage.endpoint is not set (config file or {ENV_STORAGE_ENDPOINT})"
            )));
        }
        if self.storage.url_expiry_secs == 0 {
            return Err(DomainError::Config(
                "storage.url_expiry_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// `<config dir>/notegrid/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
