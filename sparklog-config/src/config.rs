//! The `Config` struct, YAML loading, path resolution and environment overrides.

use crate::env_vars::{self, SPARKLOG_CONFIG, SPARKLOG_LEVEL};
use crate::error::ConfigError;
use crate::types::{ClockPreference, ColorMode, Level};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Timestamp format used when none is configured or the configured one is invalid.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Logger configuration.
///
/// Every field has a default, so a partial (or empty) YAML file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum level that produces output
    pub level: Level,
    /// Color policy for log lines
    pub color: ColorMode,
    /// chrono strftime format for the leading timestamp
    pub timestamp_format: String,
    /// Draw the timing sparkline
    pub sparkline: bool,
    /// Clock source selection for the stopwatch
    pub clock: ClockPreference,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: Level::default(),
            color: ColorMode::default(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            sparkline: true,
            clock: ClockPreference::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, then apply environment
    /// overrides.
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path_with(env_vars::process_env);
        let mut config = Self::load_from(&path)?;
        config.apply_env();
        Ok(config)
    }

    /// Load configuration from `path` without applying environment overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        // serde_yaml_ng rejects an empty document, but an empty file means "all defaults"
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(contents)?)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(env_vars::process_env);
    }

    /// Apply overrides using `lookup` to read variables.
    ///
    /// - `SPARKLOG_LEVEL` replaces the threshold; an unrecognized value is
    ///   logged and ignored.
    /// - `NO_COLOR` / `SPARKLOG_NO_COLOR` force [`ColorMode::Never`].
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup(SPARKLOG_LEVEL) {
            match raw.parse::<Level>() {
                Ok(level) => self.level = level,
                Err(e) => log::warn!("Ignoring {SPARKLOG_LEVEL}: {e}"),
            }
        }

        if env_vars::no_color_requested(&lookup) {
            self.color = ColorMode::Never;
        }
    }

    /// Resolve the config file path, honoring `SPARKLOG_CONFIG`.
    pub fn config_path_with(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
        match lookup(SPARKLOG_CONFIG) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => Self::config_path(),
        }
    }

    /// Default config file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Directory holding sparklog's config file.
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("sparklog")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            // XDG convention on all Unix-likes, macOS included: ~/.config/sparklog
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("sparklog")
            } else {
                PathBuf::from(".")
            }
        }
    }
}
