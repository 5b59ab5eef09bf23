//! Run configuration.
//!
//! Loaded once at startup from a work-item file. JSON is the default format;
//! files ending in `.toml` are read as TOML. The loaded [`RunConfig`] is
//! validated and read-only for the rest of the run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::scraper::ScraperConfig;

/// Work-item location used when neither a CLI path nor `ROBOT_CONFIG` is given.
pub const DEFAULT_CONFIG_PATH: &str = "devdata/workitems/work-item.json";

/// Root directory under which each run's output directory is created.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

fn default_headless() -> bool {
    true
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

/// Settings for one scrape run.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    pub site_url: String,
    pub search_phrase: String,
    /// Category to filter by; empty leaves the page unfiltered
    pub category: String,
    /// Lookback window in months. Accepted but not applied.
    #[serde(default)]
    pub months: u32,
    #[serde(default = "default_headless")]
    pub headless: bool,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub scraper: ScraperConfig,
}

impl RunConfig {
    /// Load and validate the configuration at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let config = if is_toml {
            Self::from_toml(&content).map_err(|e| ConfigError::Toml {
                path: path.to_path_buf(),
                source: e,
            })?
        } else {
            Self::from_json(&content).map_err(|e| ConfigError::Json {
                path: path.to_path_buf(),
                source: e,
            })?
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Reject values the scraper cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.site_url)
            .map_err(|e| ConfigError::Invalid(format!("site_url '{}': {}", self.site_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "site_url must be http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.search_phrase.trim().is_empty() {
            return Err(ConfigError::Invalid("search_phrase must not be empty".into()));
        }

        if self.scraper.target_articles == 0 {
            return Err(ConfigError::Invalid(
                "scraper.target_articles must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse JSON config at {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to parse TOML config at {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
