use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, time::Duration};

use crate::{
    provider::weatherapi::DEFAULT_BASE_URL,
    session::{DEFAULT_DEBOUNCE_MS, DEFAULT_LOADING_DELAY_MS, SessionSettings},
};

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_city = "Da Nang"
/// forecast_days = 7
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// WeatherAPI.com key. Overridden by `--api-key` / `WEATHERAPI_KEY`.
    pub api_key: Option<String>,
    pub base_url: String,
    /// City shown on first launch, before anything was ever selected.
    pub default_city: String,
    /// Days requested from the forecast endpoint, today included.
    pub forecast_days: u8,
    pub debounce_ms: u64,
    /// How long the loading indicator stays up after a fetch starts.
    pub loading_delay_ms: u64,
    /// Queries must be longer than this (after trimming) to be searched.
    pub min_query_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        let session = SessionSettings::default();
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            default_city: session.default_city,
            forecast_days: session.forecast_days,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            loading_delay_ms: DEFAULT_LOADING_DELAY_MS,
            min_query_chars: session.min_query_chars,
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "citycast", "citycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// The API key to use: an explicit override wins over the stored one.
    pub fn resolve_api_key<'a>(&'a self, override_key: Option<&'a str>) -> Result<&'a str> {
        override_key
            .or(self.api_key.as_deref())
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No WeatherAPI key configured.\n\
                     Hint: run `citycast configure`, pass --api-key, or set WEATHERAPI_KEY."
                )
            })
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            default_city: self.default_city.clone(),
            forecast_days: self.forecast_days.max(1),
            min_query_chars: self.min_query_chars,
            debounce: Duration::from_millis(self.debounce_ms),
            loading_delay: Duration::from_millis(self.loading_delay_ms),
        }
    }
}
