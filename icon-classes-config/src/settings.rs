//! Settings file loading and validation.
//!
//! Covers:
//! - `Settings::load` (XDG path, defaults when the file is absent)
//! - `Settings::load_from` / `Settings::from_yaml`
//! - `Settings::validate`

use crate::error::ConfigError;
use crate::font::IconFontEntry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Log level configuration.
///
/// `RUST_LOG` and the `--log-level` CLI flag take precedence over this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging
    Off,
    /// Errors only
    Error,
    /// Warnings and errors
    #[default]
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Most verbose
    Trace,
}

impl LogLevel {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "off" => Ok(LogLevel::Off),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(ConfigError::Validation(format!(
                "unknown log level '{other}'"
            ))),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };
        f.write_str(name)
    }
}

/// Process-level settings for icon class resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Classes substituted when classification fails
    #[serde(default = "crate::defaults::fallback_icon")]
    pub fallback_icon: String,

    /// Whether the built-in fonts are registered before `fonts`
    #[serde(default = "crate::defaults::bool_true")]
    pub include_builtin_fonts: bool,

    /// Additional icon fonts, registered in order
    #[serde(default)]
    pub fonts: Vec<IconFontEntry>,

    /// Log verbosity
    #[serde(default = "crate::defaults::log_level")]
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fallback_icon: crate::defaults::fallback_icon(),
            include_builtin_fonts: true,
            fonts: Vec::new(),
            log_level: crate::defaults::log_level(),
        }
    }
}

impl Settings {
    /// Load settings from the default path, or defaults if the file is absent.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::settings_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            log::info!("Settings file not found at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading settings from {:?}", path);
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse and validate settings from a YAML document.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to an empty mapping.
        let settings: Settings = if contents.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml_ng::from_str(contents)?
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Check values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fallback_icon.trim().is_empty() {
            return Err(ConfigError::Validation(
                "fallback_icon must contain at least one class".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the settings file path (using XDG convention)
    pub fn settings_path() -> PathBuf {
        if let Some(home_dir) = dirs::home_dir() {
            home_dir
                .join(".config")
                .join("icon-classes")
                .join("config.yaml")
        } else {
            PathBuf::from("config.yaml")
        }
    }
}
