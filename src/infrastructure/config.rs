//! Configuration management for the symbol converter
//!
//! Loads configuration from config.toml.
//! Every section is optional; missing values fall back to defaults.

use crate::core::DexSelection;
use crate::transport::Environment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// User agent sent by the HTTP transport
pub const DEFAULT_USER_AGENT: &str = "symbol-converter/0.1";

/// Converter configuration
///
/// Loaded from config.toml. Contains transport, index and logging settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Info API settings
    #[serde(default)]
    pub transport: TransportConfig,

    /// Index build settings
    #[serde(default)]
    pub converter: ConverterConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Info API transport configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TransportConfig {
    /// Mainnet or testnet
    #[serde(default)]
    pub environment: Environment,

    /// Overrides the environment's default base URL
    #[serde(default)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Which metadata goes into the index
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConverterConfig {
    /// Builder dexes to load: `false`, `true` or a list of names
    #[serde(default)]
    pub dexs: DexSelection,

    /// Fail the whole build when one builder dex cannot be fetched.
    /// Off by default: the dex is skipped with a warning.
    #[serde(default)]
    pub fail_on_dex_error: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// EnvFilter directive, e.g. "info" or "symbol_converter=debug"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Rolling log file directory; console only when unset
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// JSON lines in the log file
    #[serde(default)]
    pub json: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            base_url: None,
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
            json: false,
        }
    }
}

impl ConverterConfig {
    pub fn with_dexs(dexs: impl Into<DexSelection>) -> Self {
        Self {
            dexs: dexs.into(),
            ..Self::default()
        }
    }
}

impl From<DexSelection> for ConverterConfig {
    fn from(dexs: DexSelection) -> Self {
        Self::with_dexs(dexs)
    }
}

impl From<bool> for ConverterConfig {
    fn from(all: bool) -> Self {
        Self::with_dexs(all)
    }
}

impl From<Vec<String>> for ConverterConfig {
    fn from(names: Vec<String>) -> Self {
        Self::with_dexs(names)
    }
}

impl<const N: usize> From<[&str; N]> for ConverterConfig {
    fn from(names: [&str; N]) -> Self {
        Self::with_dexs(names)
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from config.toml file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// # Errors
    /// Returns error if file exists but cannot be parsed or fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from(&config_path)
    }

    /// Load from an explicit path, defaults when the file is absent
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Config file {} not found, using defaults", path);
                Ok(Config::default())
            }
            Err(e) => Err(ConfigError::IoError(e)),
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transport.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "transport.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if let Some(base_url) = &self.transport.base_url {
            crate::transport::http::info_url(base_url)?;
        }
        Ok(())
    }
}

/// Configuration loading errors
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading file
    IoError(std::io::Error),
    /// Parse error (invalid TOML)
    ParseError(String),
    /// Well-formed but unusable value
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "Failed to read config file: {}", e),
            ConfigError::ParseError(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::Invalid(e) => write!(f, "Invalid config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::ParseError(_) | ConfigError::Invalid(_) => None,
        }
    }
}
