//! Configuration loading for expert

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ExpertError;

/// Expert configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Model used to generate the persona
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the generation API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// The chat program that receives the persona
    #[serde(default)]
    pub chat: ChatConfig,
}

fn default_model() -> String {
    "gemini-2.5-flash-lite".to_string()
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

/// External chat program settings
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// The command to run
    #[serde(default = "default_chat_command")]
    pub command: String,

    /// Flag placed before the composed message
    #[serde(default = "default_chat_flag")]
    pub flag: String,
}

fn default_chat_command() -> String {
    "gemini".to_string()
}

fn default_chat_flag() -> String {
    "-i".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            command: default_chat_command(),
            flag: default_chat_flag(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base: default_api_base(),
            api_key_env: default_api_key_env(),
            chat: ChatConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, or use defaults
    pub fn load() -> Result<Self, ExpertError> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file; a missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self, ExpertError> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            ExpertError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            ExpertError::Config(format!("failed to parse {}: {}", path.display(), e))
        })?;

        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("expert")
            .join("config.toml")
    }

    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}
