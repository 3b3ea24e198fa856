//! Configuration model.
//!
//! Values come from `config.toml` in the user config directory when present,
//! then environment variables override them:
//! - `STRM_MOUNT_PATH`: mount root (default: /mnt/strm)
//! - `OPENROUTER_API_KEY`: enables AI naming when set
//! - `OPENROUTER_MODEL`: model to use (default: x-ai/grok-4-fast)
//! - `OPENROUTER_ENDPOINT`: chat completion URL
//! - `OPENROUTER_TIMEOUT`: request timeout in seconds (default: 15)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_MOUNT_PATH: &str = "/mnt/strm";
pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "x-ai/grok-4-fast";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root directory under which `movies/` and `series/` are materialized.
    pub mount_path: PathBuf,
    /// OpenRouter naming configuration.
    pub openrouter: OpenRouterConfig,
}

/// OpenRouter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenRouterConfig {
    /// API key. Naming is disabled when absent.
    pub api_key: Option<String>,
    /// Model to use.
    pub model: String,
    /// Chat completion endpoint.
    pub endpoint: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Sampling temperature.
    pub temperature: f32,
    /// Response size bound.
    pub max_tokens: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mount_path: PathBuf::from(DEFAULT_MOUNT_PATH),
            openrouter: OpenRouterConfig::default(),
        }
    }
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            temperature: 0.2,
            max_tokens: 400,
        }
    }
}

impl OpenRouterConfig {
    /// Create configuration from environment variables.
    /// Falls back to defaults if not set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Whether a usable API key is configured.
    pub fn is_enabled(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(key) = var("OPENROUTER_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(model) = var("OPENROUTER_MODEL").filter(|m| !m.is_empty()) {
            self.model = model;
        }
        if let Some(endpoint) = var("OPENROUTER_ENDPOINT").filter(|e| !e.is_empty()) {
            self.endpoint = endpoint;
        }
        if let Some(timeout) = var("OPENROUTER_TIMEOUT").and_then(|s| s.parse().ok()) {
            self.timeout_secs = timeout;
        }
    }
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::InvalidConfig {
            path: path.display().to_string(),
            source,
        })
    }

    /// Apply environment overrides using the given lookup.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(mount) = var("STRM_MOUNT_PATH").filter(|m| !m.is_empty()) {
            self.mount_path = PathBuf::from(mount);
        }
        self.openrouter.apply_env(var);
    }
}

/// Get the configuration directory path.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("strm_mounter")
}

/// Load configuration from file, then apply environment overrides.
pub fn load_config() -> Result<Config> {
    let config_path = config_dir().join("config.toml");

    let mut config = if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        tracing::debug!("Loaded config from {}", config_path.display());
        Config::from_toml(&content, &config_path)?
    } else {
        Config::default()
    };

    config.apply_env(|key| std::env::var(key).ok());
    Ok(config)
}
