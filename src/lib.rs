//! Symbol converter for Hyperliquid markets
//!
//! Resolves human-readable symbols ("BTC", "PURR/USDC", "test:ABC") to the
//! numeric asset ids and size decimals the trading API expects.
//! The index is fetched once over a [`transport::MetadataTransport`] and
//! served synchronously until the next [`SymbolConverter::reload`].

pub mod core;
pub mod infrastructure;
pub mod transport;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use crate::core::{AssetRecord, DexSelection, SymbolConverter, SymbolSnapshot};
pub use infrastructure::config::{Config, ConfigError, ConverterConfig, LoggingConfig, TransportConfig};
pub use infrastructure::logging::init_logging;
pub use transport::{Environment, HttpTransport, MetadataTransport};

use thiserror::Error;

/// Main error type for the converter
#[derive(Error, Debug)]
pub enum ConverterError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error: {0}")]
    Http(u16),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ConverterError>;
