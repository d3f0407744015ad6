use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::messages::{Locale, Messages};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoredeskConfig {
    pub version: u32,
    #[serde(default)]
    pub locale: Locale,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl StoredeskConfig {
    pub fn messages(&self) -> Messages {
        Messages::new(self.locale)
    }
}

impl ApiConfig {
    pub fn origin(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not resolve home directory for config path")]
    HomeDirectoryUnavailable,
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {message}")]
    Validation { message: String },
}

pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or(ConfigError::HomeDirectoryUnavailable)?;
    Ok(base_dirs
        .home_dir()
        .join(".config")
        .join("storedesk")
        .join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<StoredeskConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed: StoredeskConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_config(&parsed)?;
    Ok(parsed)
}

pub fn validate_config(config: &StoredeskConfig) -> Result<(), ConfigError> {
    if config.version != 1 {
        return Err(ConfigError::Validation {
            message: "version must be 1".to_string(),
        });
    }

    let base_url = config.api.base_url.trim();
    if base_url.is_empty() {
        return Err(ConfigError::Validation {
            message: "api.base_url must be non-empty".to_string(),
        });
    }

    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(ConfigError::Validation {
            message: format!("api.base_url must start with http:// or https://, got '{base_url}'"),
        });
    }

    if config.api.timeout_secs == Some(0) {
        return Err(ConfigError::Validation {
            message: "api.timeout_secs must be greater than zero when set".to_string(),
        });
    }

    Ok(())
}
