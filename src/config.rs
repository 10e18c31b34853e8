//! Run configuration: the category → feed URL mapping and check settings.
//!
//! Configuration is loaded once into an immutable [`Config`] value and
//! passed into the pipeline; there is no global configuration state. The
//! `IPTV_CONFIG` environment variable (a JSON document) takes precedence
//! over the config file; a missing file yields the default template, but a
//! file or environment value that fails to parse is an error.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable that overrides the config file when set.
pub const CONFIG_ENV_VAR: &str = "IPTV_CONFIG";

fn default_auto_check() -> bool {
    true
}

fn default_interval_hours() -> u64 {
    12
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// The config file path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The config document is not valid JSON for the expected shape.
    #[error("failed to parse config from {origin}: {source}")]
    Parse {
        /// Where the document came from (file path or env var name).
        origin: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// No feeds are configured; the run cannot produce anything.
    #[error("no sources configured: add a category-to-URL mapping under \"sources\"")]
    NoSources,
}

/// Immutable run configuration.
///
/// The `sources` mapping is insertion-ordered: merged-document categories
/// appear in the order they are configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Whether scheduled checks are enabled (consumed by the scheduler
    /// collaborator, carried here for config-file compatibility).
    #[serde(default = "default_auto_check")]
    pub auto_check: bool,
    /// Hours between scheduled checks.
    #[serde(default = "default_interval_hours")]
    pub interval_hours: u64,
    /// Ordered mapping of category name to feed URL.
    #[serde(default)]
    pub sources: IndexMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auto_check: default_auto_check(),
            interval_hours: default_interval_hours(),
            sources: IndexMap::new(),
        }
    }
}

impl Config {
    /// Parses a configuration document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid JSON for
    /// the expected shape. `origin` is only used for the error message.
    pub fn from_json(text: &str, origin: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            origin: origin.to_string(),
            source,
        })
    }

    /// Loads configuration, preferring the `IPTV_CONFIG` environment
    /// variable over the file at `path`.
    ///
    /// A missing file is not an error: the default template is returned,
    /// matching first-run behavior.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file exists but cannot be read,
    /// or [`ConfigError::Parse`] if the env var or file content is not
    /// valid JSON.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let env_value = std::env::var(CONFIG_ENV_VAR).ok();
        Self::load_with_env(path, env_value.as_deref())
    }

    /// Ensures at least one feed is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoSources`] if the mapping is empty.
    pub fn require_sources(&self) -> Result<(), ConfigError> {
        if self.sources.is_empty() {
            return Err(ConfigError::NoSources);
        }
        Ok(())
    }

    /// Load implementation with the env override passed explicitly.
    fn load_with_env(path: &Path, env_value: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(raw) = env_value {
            let config = Self::from_json(raw, CONFIG_ENV_VAR)?;
            info!(sources = config.sources.len(), "configuration loaded from {CONFIG_ENV_VAR}");
            return Ok(config);
        }

        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text, &path.display().to_string())?;
        info!(
            path = %path.display(),
            sources = config.sources.len(),
            "configuration loaded"
        );
        Ok(config)
    }
}
