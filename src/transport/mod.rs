//! Metadata transport abstraction
//!
//! The converter never talks HTTP directly. It asks a [`MetadataTransport`]
//! for the perpetual universe, the spot universe and the builder-dex
//! directory, and builds its index from whatever comes back.

pub mod http;
pub mod types;

pub use http::HttpTransport;
pub use types::{PerpAsset, PerpDex, PerpMeta, SpotMarket, SpotMeta, SpotToken};

use crate::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Exchange network the transport points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Mainnet,
    Testnet,
}

impl Environment {
    pub const MAINNET_URL: &'static str = "https://api.hyperliquid.xyz";
    pub const TESTNET_URL: &'static str = "https://api.hyperliquid-testnet.xyz";

    /// Default REST base URL for this network
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Mainnet => Self::MAINNET_URL,
            Environment::Testnet => Self::TESTNET_URL,
        }
    }

    pub fn is_testnet(&self) -> bool {
        matches!(self, Environment::Testnet)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Environment::Mainnet => "mainnet",
            Environment::Testnet => "testnet",
        }
    }
}

/// Source of exchange metadata
///
/// # Design Notes
/// - Generic seam: the converter is monomorphized over its transport
/// - Every call is a single request; retries belong to the caller
/// - `perp_dexs()` keeps the leading `null` entry (main dex) so indices
///   line up with builder-dex asset id ranges
#[allow(async_fn_in_trait)]
pub trait MetadataTransport: Send + Sync {
    /// Network selection (affects which metadata set is returned)
    fn environment(&self) -> Environment;

    /// Perpetual universe; `Some(dex)` for a builder dex
    async fn perp_meta(&self, dex: Option<&str>) -> Result<PerpMeta>;

    /// Spot universe and token table
    async fn spot_meta(&self) -> Result<SpotMeta>;

    /// Builder-dex directory, index 0 is the main dex
    async fn perp_dexs(&self) -> Result<Vec<Option<PerpDex>>>;
}

impl<T: MetadataTransport> MetadataTransport for Arc<T> {
    #[inline]
    fn environment(&self) -> Environment {
        (**self).environment()
    }

    async fn perp_meta(&self, dex: Option<&str>) -> Result<PerpMeta> {
        (**self).perp_meta(dex).await
    }

    async fn spot_meta(&self) -> Result<SpotMeta> {
        (**self).spot_meta().await
    }

    async fn perp_dexs(&self) -> Result<Vec<Option<PerpDex>>> {
        (**self).perp_dexs().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FixtureTransport;

    #[test]
    fn test_environment_urls() {
        assert_eq!(Environment::Mainnet.base_url(), "https://api.hyperliquid.xyz");
        assert_eq!(Environment::Testnet.base_url(), "https://api.hyperliquid-testnet.xyz");
        assert!(Environment::Testnet.is_testnet());
        assert!(!Environment::default().is_testnet());
    }

    #[test]
    fn test_environment_deserialize() {
        #[derive(Deserialize)]
        struct Wrapper {
            environment: Environment,
        }
        let w: Wrapper = toml::from_str(r#"environment = "testnet""#).unwrap();
        assert_eq!(w.environment, Environment::Testnet);
    }

    #[tokio::test]
    async fn test_arc_transport_delegates() {
        let fixture = Arc::new(FixtureTransport::mainnet());
        let shared = Arc::clone(&fixture);

        let meta = shared.perp_meta(None).await.unwrap();
        assert_eq!(meta.universe[0].name, "BTC");
        assert_eq!(shared.environment(), Environment::Mainnet);
        assert_eq!(fixture.calls().perp_meta, 1);
    }
}
