use anyhow::{Context, Result};
use plan_items::normalize::{normalize_currency, DEFAULT_CURRENCY};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const API_URL_ENV: &str = "TRIP_TUI_API_URL";
pub const TRIP_ID_ENV: &str = "TRIP_TUI_TRIP_ID";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripConfig {
    /// Base URL of the trip planner backend, e.g. "http://localhost:3000"
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Trip opened by `run`
    #[serde(default)]
    pub trip_id: Option<String>,
    /// Currency the budget panel shows first
    #[serde(default = "default_currency")]
    pub default_currency: String,
    /// Log destination, defaults to `trip-tui.log` next to the config file
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_api_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            trip_id: None,
            default_currency: default_currency(),
            log_file: None,
        }
    }
}

impl TripConfig {
    pub fn config_dir() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("trip-tui"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from disk and apply environment overrides. Returns the
    /// default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let config = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config at {}", path.display()))?;
            Self::parse(&raw)
                .with_context(|| format!("Failed to parse config at {}", path.display()))?
        } else {
            Self::default()
        };
        Ok(config.with_overrides(
            std::env::var(API_URL_ENV).ok(),
            std::env::var(TRIP_ID_ENV).ok(),
        ))
    }

    fn parse(raw: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(raw)?;
        config.default_currency = normalize_currency(&config.default_currency);
        Ok(config)
    }

    fn with_overrides(mut self, api_url: Option<String>, trip_id: Option<String>) -> Self {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api_url = url.trim().to_string();
        }
        if let Some(id) = trip_id.filter(|id| !id.trim().is_empty()) {
            self.trip_id = Some(id.trim().to_string());
        }
        self
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        match &self.log_file {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("trip-tui.log")),
        }
    }

    pub fn require_trip_id(&self) -> Result<&str> {
        self.trip_id.as_deref().with_context(|| {
            format!(
                "No trip configured. Set trip_id in the config file or {}",
                TRIP_ID_ENV
            )
        })
    }
}
