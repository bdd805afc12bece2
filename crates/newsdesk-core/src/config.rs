//! Configuration management for newsdesk.
//!
//! Loads configuration from ${NEWSDESK_HOME}/config.toml with sensible defaults,
//! then applies environment overrides for endpoints and the news API key.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// How overlapping searches are reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchOrdering {
    /// Responses of superseded searches are discarded.
    #[default]
    LatestOnly,
    /// Every response is applied; whichever resolves last wins.
    LastResolved,
}

pub mod paths {
    //! Path resolution for newsdesk configuration and data.
    //!
    //! NEWSDESK_HOME resolution order:
    //! 1. NEWSDESK_HOME environment variable (if set)
    //! 2. ~/.config/newsdesk (default)

    use std::path::PathBuf;

    /// Returns the newsdesk home directory.
    pub fn newsdesk_home() -> PathBuf {
        if let Ok(home) = std::env::var("NEWSDESK_HOME")
            && !home.is_empty()
        {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(".config")
            .join("newsdesk")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        newsdesk_home().join("config.toml")
    }

    /// Returns the path of the persisted session token.
    pub fn token_path() -> PathBuf {
        newsdesk_home().join("token")
    }

    /// Returns the directory TUI logs are written to.
    pub fn logs_dir() -> PathBuf {
        newsdesk_home().join("logs")
    }
}

/// News API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub page_size: u32,
    pub lookback_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://newsapi.org/v2".to_string(),
            api_key: None,
            page_size: 100,
            lookback_days: 7,
            language: None,
        }
    }
}

/// Auth and saved-articles backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub ordering: SearchOrdering,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds (0 disables)
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub news: NewsConfig,
    pub backend: BackendConfig,
    pub search: SearchConfig,
    pub http: HttpConfig,
    pub log: LogConfig,
}

impl Config {
    /// Loads configuration from the default config path, then applies
    /// environment overrides.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&paths::config_path())?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Applies `NEWS_API_KEY`, `NEWS_API_BASE_URL` and `NEWSDESK_BACKEND_URL`.
    ///
    /// Empty values are ignored.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(key) = get("NEWS_API_KEY") {
            self.news.api_key = Some(key);
        }
        if let Some(url) = get("NEWS_API_BASE_URL") {
            self.news.base_url = url;
        }
        if let Some(url) = get("NEWSDESK_BACKEND_URL") {
            self.backend.base_url = url;
        }
    }

    /// Creates a default config file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

/// Returns the commented default config shipped with the binary.
pub fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}
