//! Application configuration.
//!
//! Settings come from an optional TOML file; `VITRINA_*` environment
//! variables override the file.
//!
//! ```toml
//! base_url = "http://localhost:8000"
//! preview_path = "/arrow_preview"
//! target_id = "arrow-table-preview"
//! row_page_size = 10
//! timeout_secs = 30
//! log_level = "debug"
//! ```

use std::path::Path;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::options::DisplayOptions;

/// Overrides [`AppConfig::base_url`].
pub const ENV_BASE_URL: &str = "VITRINA_BASE_URL";
/// Overrides [`AppConfig::timeout_secs`].
pub const ENV_TIMEOUT_SECS: &str = "VITRINA_TIMEOUT_SECS";
/// Overrides [`AppConfig::log_level`].
pub const ENV_LOG_LEVEL: &str = "VITRINA_LOG_LEVEL";

/// Settings for an embedded preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL relative preview paths are resolved against.
    pub base_url: Option<String>,
    /// Location of the preview payload.
    pub preview_path: String,
    /// Container the preview renders into.
    pub target_id: String,
    /// Rows per page for the initial render.
    pub row_page_size: usize,
    /// HTTP request timeout; none by default.
    pub timeout_secs: Option<u64>,
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            preview_path: "/arrow_preview".to_string(),
            target_id: "arrow-table-preview".to_string(),
            row_page_size: 10,
            timeout_secs: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] on malformed TOML.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::parse(format!("config: {e}")))
    }

    /// Read a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read or [`Error::Parse`] if
    /// it is malformed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(e, path))?;
        Self::from_toml_str(&text)
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `VITRINA_TIMEOUT_SECS` is not a
    /// number.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.base_url = Some(url);
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs = secs.trim().parse().map_err(|_| {
                Error::invalid_config(format!("{ENV_TIMEOUT_SECS} must be a number, got '{secs}'"))
            })?;
            self.timeout_secs = Some(secs);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        Ok(())
    }

    /// Apply overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Same as [`apply_env_from`](Self::apply_env_from).
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Defaults, then `path` if given, then the environment; validated.
    ///
    /// # Errors
    ///
    /// Returns file, parse, override or validation errors.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Display options for the initial render.
    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions::new(self.target_id.clone()).with_row_page_size(self.row_page_size)
    }

    /// The configured log level.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for an unknown level name.
    pub fn log_level_filter(&self) -> Result<LevelFilter> {
        self.log_level
            .trim()
            .parse()
            .map_err(|_| Error::invalid_config(format!("unknown log level '{}'", self.log_level)))
    }

    /// Check that the settings can produce a working preview.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.preview_path.trim().is_empty() {
            return Err(Error::invalid_config("preview_path must not be empty"));
        }
        if self.timeout_secs == Some(0) {
            return Err(Error::invalid_config("timeout_secs must be positive"));
        }
        if let Some(base) = &self.base_url {
            if !(base.starts_with("http://") || base.starts_with("https://")) {
                return Err(Error::invalid_config(format!(
                    "base_url must be an http(s) URL, got '{base}'"
                )));
            }
        }
        self.log_level_filter()?;
        self.display_options().validate()
    }
}
