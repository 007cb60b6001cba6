//! Application configuration loaded from a TOML file.
//!
//! Every key is optional; a missing file section falls back to defaults.
//!
//! ```toml
//! [display]
//! placeholder = "--"
//!
//! [logging]
//! level = "debug"
//! file = "rendement.log"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::format::DEFAULT_PLACEHOLDER;
use crate::utils::parse_decimal;

/// Errors that can occur while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The placeholder must be non-empty and must not read as a number.
    #[error("placeholder '{0}' could be mistaken for a value")]
    InvalidPlaceholder(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Token rendered for unavailable values.
    pub placeholder: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log filter directive; `RUST_LOG` wins when unset.
    pub level: Option<String>,
    /// Append log records to this file in addition to the console.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Parses and validates configuration text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Self::from_toml(&text)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let placeholder = self.display.placeholder.trim();
        if placeholder.is_empty() || parse_decimal(placeholder).is_ok() {
            return Err(ConfigError::InvalidPlaceholder(
                self.display.placeholder.clone(),
            ));
        }
        Ok(())
    }
}
