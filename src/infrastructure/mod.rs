//! Infrastructure - cold path only
//!
//! This module contains the ambient setup around the index:
//! - Configuration loading
//! - Logging

pub mod config;
pub mod logging;

pub use config::{Config, ConfigError, ConverterConfig, LoggingConfig, TransportConfig};
pub use logging::init_logging;
