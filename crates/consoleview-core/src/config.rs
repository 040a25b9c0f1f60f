//! TOML configuration for task table views.
//!
//! Searched in order: `$XDG_CONFIG_HOME/consoleview/config.toml`, then
//! `~/.config/consoleview/config.toml`. Missing keys take their defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::duration::DEFAULT_PRECISION;

/// Largest useful precision: one decimal per nanosecond digit.
pub const MAX_PRECISION: usize = 9;

/// Error loading or validating a [`ViewConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for this schema.
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is out of range.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Column a task table is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    /// Task id.
    Id,
    /// Poll count.
    Polls,
    /// Total lifetime, or time so far for running tasks.
    #[default]
    Total,
    Busy,
    Scheduled,
    Idle,
}

impl SortColumn {
    /// All sortable columns in table order.
    pub const fn all() -> &'static [Self] {
        &[
            Self::Id,
            Self::Polls,
            Self::Total,
            Self::Busy,
            Self::Scheduled,
            Self::Idle,
        ]
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Polls => "polls",
            Self::Total => "total",
            Self::Busy => "busy",
            Self::Scheduled => "scheduled",
            Self::Idle => "idle",
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortColumn {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|column| column.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::InvalidValue(format!("unknown sort column '{s}'")))
    }
}

/// Presentation settings for derived task metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Decimals on the leading unit of sub-minute durations.
    pub duration_precision: usize,
    /// Column the task table is ordered by.
    pub sort_by: SortColumn,
    /// Largest values first.
    pub descending: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            duration_precision: DEFAULT_PRECISION,
            sort_by: SortColumn::Total,
            descending: true,
        }
    }
}

impl ViewConfig {
    /// Default config file name inside the config directory.
    pub const CONFIG_FILE: &'static str = "consoleview/config.toml";

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config to a TOML string.
    #[must_use]
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    /// Load a config from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// XDG-compliant config paths to search, most specific first.
    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg_config).join(Self::CONFIG_FILE));
        }

        if let Ok(home) = std::env::var("HOME") {
            paths.push(PathBuf::from(home).join(".config").join(Self::CONFIG_FILE));
        }

        paths
    }

    /// Load the first config file that exists and parses, else defaults.
    #[must_use]
    pub fn load() -> Self {
        for path in Self::config_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "loaded view config");
                    return config;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
                }
            }
        }

        Self::default()
    }

    /// Override the duration precision, rejecting values above [`MAX_PRECISION`].
    pub fn with_precision(mut self, precision: usize) -> Result<Self, ConfigError> {
        self.duration_precision = precision;
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.duration_precision > MAX_PRECISION {
            return Err(ConfigError::InvalidValue(format!(
                "duration_precision must be at most {MAX_PRECISION}, got {}",
                self.duration_precision
            )));
        }
        Ok(())
    }
}
