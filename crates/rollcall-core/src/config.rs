//! Application configuration management.
//!
//! This module handles loading the application configuration, which names
//! the roster source, the cache lifetime and any extra header spellings.
//!
//! Configuration is stored at `~/.config/rollcall/config.json`. Environment
//! variables override the file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_TTL_MINUTES;
use crate::source::http::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::source::SchemaAdapter;

/// Application name used for config directory paths
const APP_NAME: &str = "rollcall";

/// Config file name
const CONFIG_FILE: &str = "config.json";

pub const ENV_SHEET_CSV_URL: &str = "ROLLCALL_SHEET_CSV_URL";
pub const ENV_CSV_PATH: &str = "ROLLCALL_CSV_PATH";
pub const ENV_CACHE_TTL_MINUTES: &str = "ROLLCALL_CACHE_TTL_MINUTES";

/// Longest accepted snapshot lifetime (one week).
pub const MAX_CACHE_TTL_MINUTES: i64 = 7 * 24 * 60;

fn default_cache_ttl_minutes() -> i64 {
    DEFAULT_TTL_MINUTES
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Published CSV export URL of the availability tab.
    #[serde(default)]
    pub sheet_csv_url: Option<String>,
    /// Local CSV export; wins over `sheet_csv_url` when both are set.
    #[serde(default)]
    pub csv_path: Option<PathBuf>,
    #[serde(default = "default_cache_ttl_minutes")]
    pub cache_ttl_minutes: i64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Canonical field key (e.g. "rank", "monday") to extra header spellings.
    #[serde(default)]
    pub header_overrides: HashMap<String, Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet_csv_url: None,
            csv_path: None,
            cache_ttl_minutes: DEFAULT_TTL_MINUTES,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            header_overrides: HashMap::new(),
        }
    }
}

impl Config {
    /// Load from the default location, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = Self::load_from(&path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Self = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config
                .validate()
                .with_context(|| format!("Invalid config file: {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply overrides from a variable lookup (the process environment in practice).
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = var(ENV_SHEET_CSV_URL).filter(|v| !v.trim().is_empty()) {
            self.sheet_csv_url = Some(url.trim().to_string());
        }
        if let Some(path) = var(ENV_CSV_PATH).filter(|v| !v.trim().is_empty()) {
            self.csv_path = Some(PathBuf::from(path.trim()));
        }
        if let Some(ttl) = var(ENV_CACHE_TTL_MINUTES).filter(|v| !v.trim().is_empty()) {
            self.cache_ttl_minutes = ttl
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of minutes", ENV_CACHE_TTL_MINUTES))?;
            self.validate().with_context(|| format!("Invalid {}", ENV_CACHE_TTL_MINUTES))?;
        }
        Ok(())
    }

    /// Reject values that cannot be used as-is.
    pub fn validate(&self) -> Result<()> {
        if !(0..=MAX_CACHE_TTL_MINUTES).contains(&self.cache_ttl_minutes) {
            anyhow::bail!(
                "cache_ttl_minutes must be between 0 and {}, got {}",
                MAX_CACHE_TTL_MINUTES,
                self.cache_ttl_minutes
            );
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        self.validate()?;
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_ttl(&self) -> chrono::Duration {
        // Clamped so a value that skipped validation cannot overflow
        chrono::Duration::minutes(self.cache_ttl_minutes.clamp(0, MAX_CACHE_TTL_MINUTES))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn schema(&self) -> SchemaAdapter {
        SchemaAdapter::default().with_overrides(&self.header_overrides)
    }
}
