//! Configuration management for Chatvault
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{ChatvaultError, Result};
use crate::theme::Theme;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for Chatvault
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Provider configuration
    pub provider: ProviderConfig,
    /// Where session records live
    #[serde(default)]
    pub storage: StorageConfig,
    /// Interactive chat settings
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Provider configuration
///
/// Specifies which completion provider to use and its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Type of provider to use
    #[serde(rename = "type")]
    pub provider_type: String,

    /// OpenRouter configuration
    #[serde(default)]
    pub openrouter: OpenRouterConfig,
}

/// OpenRouter (OpenAI-compatible) provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenRouterConfig {
    /// API base URL; `/chat/completions` is appended to it
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// API key (prefer the OPENROUTER_API_KEY environment variable)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Value of the `HTTP-Referer` attribution header
    #[serde(default = "default_referer")]
    pub referer: String,

    /// Value of the `X-Title` attribution header
    #[serde(default = "default_title")]
    pub title: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_api_base() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_model() -> String {
    "openai/gpt-4o-mini".to_string()
}

fn default_referer() -> String {
    "http://localhost:8501".to_string()
}

fn default_title() -> String {
    "My ChatBot".to_string()
}

fn default_timeout_seconds() -> u64 {
    120
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            model: default_model(),
            api_key: None,
            referer: default_referer(),
            title: default_title(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Session storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Directory holding one `<id>.json` file per session
    ///
    /// When unset, a `chat_history` directory inside the platform data
    /// directory is used.
    #[serde(default)]
    pub history_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the history directory, falling back to the platform default
    pub fn resolved_history_dir(&self) -> PathBuf {
        match &self.history_dir {
            Some(dir) => dir.clone(),
            None => default_history_dir(),
        }
    }
}

fn default_history_dir() -> PathBuf {
    ProjectDirs::from("com", "chatvault", "chatvault")
        .map(|dirs| dirs.data_dir().join("chat_history"))
        .unwrap_or_else(|| PathBuf::from("chat_history"))
}

/// Chat mode configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Initial color theme: "dark" or "light"
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_theme() -> String {
    "dark".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default_config()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn default_config() -> Self {
        Self {
            provider: ProviderConfig {
                provider_type: "openrouter".to_string(),
                openrouter: OpenRouterConfig::default(),
            },
            storage: StorageConfig::default(),
            chat: ChatConfig::default(),
        }
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ChatvaultError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| ChatvaultError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(provider_type) = std::env::var("CHATVAULT_PROVIDER") {
            self.provider.provider_type = provider_type;
        }

        if let Ok(model) = std::env::var("CHATVAULT_MODEL") {
            self.provider.openrouter.model = model;
        }

        if let Ok(api_base) = std::env::var("CHATVAULT_API_BASE") {
            self.provider.openrouter.api_base = api_base;
        }

        if let Ok(api_key) = std::env::var("OPENROUTER_API_KEY") {
            if !api_key.trim().is_empty() {
                self.provider.openrouter.api_key = Some(api_key);
            }
        }

        if let Ok(dir) = std::env::var("CHATVAULT_HISTORY_DIR") {
            tracing::debug!(history_dir = %dir, "Env override: CHATVAULT_HISTORY_DIR");
            self.storage.history_dir = Some(PathBuf::from(dir));
        }

        if let Ok(theme) = std::env::var("CHATVAULT_THEME") {
            if Theme::parse_str(&theme).is_ok() {
                self.chat.theme = theme.to_lowercase();
            } else {
                tracing::warn!("Invalid CHATVAULT_THEME: {}", theme);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        if let Some(dir) = &cli.history_dir {
            self.storage.history_dir = Some(dir.clone());
        }

        if let crate::cli::Commands::Chat { model, theme, .. } = &cli.command {
            if let Some(model) = model {
                self.provider.openrouter.model = model.clone();
            }
            if let Some(theme) = theme {
                self.chat.theme = theme.clone();
            }
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.provider.provider_type.is_empty() {
            return Err(ChatvaultError::Config("Provider type cannot be empty".to_string()).into());
        }

        let valid_providers = ["openrouter"];
        if !valid_providers.contains(&self.provider.provider_type.as_str()) {
            return Err(ChatvaultError::Config(format!(
                "Invalid provider type: {}. Must be one of: {}",
                self.provider.provider_type,
                valid_providers.join(", ")
            ))
            .into());
        }

        let openrouter = &self.provider.openrouter;
        if openrouter.model.trim().is_empty() {
            return Err(
                ChatvaultError::Config("openrouter.model cannot be empty".to_string()).into(),
            );
        }

        if !openrouter.api_base.starts_with("http://") && !openrouter.api_base.starts_with("https://")
        {
            return Err(ChatvaultError::Config(format!(
                "openrouter.api_base must be an http(s) URL: {}",
                openrouter.api_base
            ))
            .into());
        }

        if openrouter.timeout_seconds == 0 {
            return Err(ChatvaultError::Config(
                "openrouter.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if let Err(e) = Theme::parse_str(&self.chat.theme) {
            return Err(ChatvaultError::Config(e).into());
        }

        Ok(())
    }

    /// The configured initial theme
    ///
    /// Falls back to the dark theme when the value does not parse; `validate`
    /// reports that case separately.
    pub fn theme(&self) -> Theme {
        Theme::parse_str(&self.chat.theme).unwrap_or_default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
