//! HTTP metadata transport (cold path)
//!
//! Issues `POST {base}/info` requests against the Hyperliquid info API.
//! Called on construction and reload only.

use crate::infrastructure::config::{ConfigError, TransportConfig};
use crate::transport::types::InfoRequest;
use crate::transport::{Environment, MetadataTransport, PerpDex, PerpMeta, SpotMeta};
use crate::{ConverterError, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Info API client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    environment: Environment,
    info_url: String,
}

impl HttpTransport {
    /// Create transport for the given network with default settings
    pub fn new(environment: Environment) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent(crate::infrastructure::config::DEFAULT_USER_AGENT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            environment,
            info_url: format!("{}/info", environment.base_url()),
        }
    }

    pub fn mainnet() -> Self {
        Self::new(Environment::Mainnet)
    }

    pub fn testnet() -> Self {
        Self::new(Environment::Testnet)
    }

    /// Build transport from configuration
    pub fn from_config(config: &TransportConfig) -> Result<Self> {
        if config.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "transport.timeout_secs must be greater than 0".to_string(),
            )
            .into());
        }
        let base = config
            .base_url
            .as_deref()
            .unwrap_or_else(|| config.environment.base_url());
        let info_url = info_url(base)?.to_string();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ConverterError::Network(e.to_string()))?;

        Ok(Self {
            client,
            environment: config.environment,
            info_url,
        })
    }

    /// Point at a custom base URL (local node, proxy, mock server)
    pub fn with_base_url(environment: Environment, base_url: &str) -> Result<Self> {
        let mut transport = Self::new(environment);
        transport.info_url = info_url(base_url)?.to_string();
        Ok(transport)
    }

    pub fn info_url(&self) -> &str {
        &self.info_url
    }

    async fn post_info<T: DeserializeOwned>(&self, request: &InfoRequest<'_>) -> Result<T> {
        tracing::debug!(url = %self.info_url, ?request, "POST info");

        let response = self
            .client
            .post(self.info_url.as_str())
            .json(request)
            .send()
            .await
            .map_err(|e| ConverterError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ConverterError::Http(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| ConverterError::Parse(e.to_string()))
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::mainnet()
    }
}

impl MetadataTransport for HttpTransport {
    fn environment(&self) -> Environment {
        self.environment
    }

    async fn perp_meta(&self, dex: Option<&str>) -> Result<PerpMeta> {
        self.post_info(&InfoRequest::Meta { dex }).await
    }

    async fn spot_meta(&self) -> Result<SpotMeta> {
        self.post_info(&InfoRequest::SpotMeta).await
    }

    async fn perp_dexs(&self) -> Result<Vec<Option<PerpDex>>> {
        self.post_info(&InfoRequest::PerpDexs).await
    }
}

/// Resolve `{base}/info`, tolerating a trailing slash on the base
pub(crate) fn info_url(base: &str) -> std::result::Result<Url, ConfigError> {
    let mut base = Url::parse(base)
        .map_err(|e| ConfigError::Invalid(format!("invalid base_url {:?}: {}", base, e)))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("info")
        .map_err(|e| ConfigError::Invalid(format!("cannot build info url: {}", e)))
}
