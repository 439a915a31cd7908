//! Configuration loading and management for resumo.
//!
//! Non-secret settings come from an optional `resumo.toml`. The Gemini API key
//! is only ever read from the environment.

use crate::analytics::DEFAULT_TOP_N;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable holding the Gemini API key
pub const API_KEY_VAR: &str = "GOOGLE_GEMINI_API_KEY";

/// Model used when the config file doesn't name one
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";

const CONFIG_FILE: &str = "resumo.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("A chave da API do Google Gemini não está configurada. Defina a variável de ambiente '{0}'.")]
    MissingApiKey(String),
}

/// LLM configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Gemini model identifier (e.g., "gemini-2.5-pro")
    pub model: String,
}

/// Word-frequency settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Length of the ranked frequency listing
    pub top_n: usize,
    /// Maximum number of words drawn in the word cloud
    pub max_words: usize,
}

/// Where generated artefacts are written
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

/// API keys (environment only, never serialised)
#[derive(Debug, Clone, Default)]
pub struct ApiConfig {
    pub gemini_key: Option<String>,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(skip)]
    pub api: ApiConfig,
}

impl Config {
    /// Load configuration from the default location (resumo.toml in cwd or home).
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load() -> Result<Self, ConfigError> {
        let config = match Self::find_config_file() {
            Some(path) => Self::parse_file(&path)?,
            None => Config::default(),
        };
        Ok(config.with_api_key(std::env::var(API_KEY_VAR).ok()))
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::parse_file(path)?;
        Ok(config.with_api_key(std::env::var(API_KEY_VAR).ok()))
    }

    fn parse_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let local_config = PathBuf::from(CONFIG_FILE);
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::home_dir()
            .map(|home| home.join(".config").join("resumo").join(CONFIG_FILE))
            .filter(|path| path.exists())
    }

    /// Replace the API key. Blank values count as unset.
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        self.api.gemini_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    /// Get the Gemini API key
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api
            .gemini_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingApiKey(API_KEY_VAR.to_string()))
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            max_words: 200,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}
