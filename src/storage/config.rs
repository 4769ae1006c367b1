//! Configuration handling for the inidata CLI
//!
//! Read from `config.toml` in the platform config directory, e.g.
//! `~/.config/inidata/config.toml`. Every field is optional.
//!
//! ```toml
//! default_format = "json"
//!
//! [syntax]
//! comment_indicators = "#;"
//! equal_indicators = "="
//!
//! [autocreate]
//! sections = true
//! keys = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Flags, Syntax, DEFAULT_COMMENT_INDICATORS, DEFAULT_EQUAL_INDICATORS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Indicator overrides applied to every file the CLI opens
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SyntaxConfig {
    /// Characters that start a comment line; the first one is written
    pub comment_indicators: String,

    /// Characters that separate key and value; the first one is written
    pub equal_indicators: String,
}

impl Default for SyntaxConfig {
    fn default() -> Self {
        Self {
            comment_indicators: DEFAULT_COMMENT_INDICATORS.to_string(),
            equal_indicators: DEFAULT_EQUAL_INDICATORS.to_string(),
        }
    }
}

/// Auto-creation policy for `key set`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AutocreateConfig {
    /// Create missing sections on write
    pub sections: bool,

    /// Create missing keys on write
    pub keys: bool,
}

impl Default for AutocreateConfig {
    fn default() -> Self {
        Self {
            sections: true,
            keys: true,
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Default output format (text or json)
    pub default_format: OutputFormat,

    pub syntax: SyntaxConfig,

    pub autocreate: AutocreateConfig,
}

impl Config {
    /// Loads configuration from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file; a missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Returns the config directory
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "inidata", "inidata").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Checks that the syntax section describes a usable format
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.syntax().map(|_| ())
    }

    /// Builds the per-file syntax
    pub fn syntax(&self) -> Result<Syntax, ConfigError> {
        Syntax::new(
            self.syntax.comment_indicators.as_str(),
            self.syntax.equal_indicators.as_str(),
        )
        .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Builds the per-file auto-creation policy
    pub fn flags(&self) -> Flags {
        let mut flags = Flags::empty();
        flags.set(Flags::AUTOCREATE_SECTIONS, self.autocreate.sections);
        flags.set(Flags::AUTOCREATE_KEYS, self.autocreate.keys);
        flags
    }
}
