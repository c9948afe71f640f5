//! Configuration management.
//!
//! Settings come from an optional TOML file layered under environment
//! variables. Every key has a default, so no file is required.
//!
//! # Configuration File Format
//!
//! ```toml
//! [catalog]
//! search_url = "https://openlibrary.org/search.json"
//! base_url = "https://openlibrary.org"
//! covers_url = "https://covers.openlibrary.org"
//! archive_url = "https://archive.org"
//! timeout_secs = 30
//!
//! [search]
//! limit = 20
//! panel_limit = 4
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Environment overrides use the `BOOK_FINDER_` prefix with `__` between
//! section and key, e.g. `BOOK_FINDER_CATALOG__TIMEOUT_SECS=10`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils::links::{DEFAULT_ARCHIVE_URL, DEFAULT_COVERS_URL};
use crate::utils::Links;

/// Name of the configuration file looked up in default locations
pub const CONFIG_FILE_NAME: &str = "book-finder.toml";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Catalog endpoints and transport settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Result limits
    #[serde(default)]
    pub search: SearchConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Catalog endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Search endpoint
    #[serde(default = "default_search_url")]
    pub search_url: String,

    /// Base URL that work keys are appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Cover image host
    #[serde(default = "default_covers_url")]
    pub covers_url: String,

    /// Archive host for read and download links
    #[serde(default = "default_archive_url")]
    pub archive_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            base_url: default_base_url(),
            covers_url: default_covers_url(),
            archive_url: default_archive_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl CatalogConfig {
    /// Link builder for the configured hosts
    pub fn links(&self) -> Links {
        Links::new(&self.covers_url, &self.archive_url)
    }
}

fn default_search_url() -> String {
    "https://openlibrary.org/search.json".to_string()
}

fn default_base_url() -> String {
    "https://openlibrary.org".to_string()
}

fn default_covers_url() -> String {
    DEFAULT_COVERS_URL.to_string()
}

fn default_archive_url() -> String {
    DEFAULT_ARCHIVE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Result limits for user searches and curated panels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum results for a user search
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Maximum results for each curated panel
    #[serde(default = "default_panel_limit")]
    pub panel_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            panel_limit: default_panel_limit(),
        }
    }
}

fn default_limit() -> usize {
    20
}

fn default_panel_limit() -> usize {
    4
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when neither `RUST_LOG` nor `-v` is given
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    #[error("Invalid URL for {key}: {message}")]
    InvalidUrl { key: &'static str, message: String },

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },

    #[error("Serialize error: {0}")]
    Serialize(String),
}

impl Config {
    /// Check URLs and limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        let urls = [
            ("catalog.search_url", &self.catalog.search_url),
            ("catalog.base_url", &self.catalog.base_url),
            ("catalog.covers_url", &self.catalog.covers_url),
            ("catalog.archive_url", &self.catalog.archive_url),
        ];
        for (key, value) in urls {
            url::Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
                key,
                message: format!("{} ({})", value, e),
            })?;
        }

        if self.catalog.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "catalog.timeout_secs",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.search.limit == 0 || self.search.panel_limit == 0 {
            return Err(ConfigError::InvalidValue {
                key: "search",
                message: "limits must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

/// Load configuration from an optional file plus `BOOK_FINDER_*` environment variables
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix("BOOK_FINDER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: Config = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Find a configuration file in the default locations.
///
/// Checks the platform config directory (`<config_dir>/book-finder/config.toml`)
/// and then `./book-finder.toml`.
pub fn find_config_file() -> Option<PathBuf> {
    let candidates = [
        dirs::config_dir().map(|d| d.join("book-finder").join("config.toml")),
        Some(PathBuf::from(CONFIG_FILE_NAME)),
    ];

    candidates.into_iter().flatten().find(|p| p.is_file())
}
