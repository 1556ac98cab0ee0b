//! Test utilities: in-memory metadata transport
//!
//! `FixtureTransport` serves canned mainnet/testnet metadata, counts calls,
//! and lets tests swap data or inject failures between fetches.

use crate::transport::{
    Environment, MetadataTransport, PerpAsset, PerpDex, PerpMeta, SpotMarket, SpotMeta, SpotToken,
};
use crate::{ConverterError, Result};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

/// Number of calls per endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub perp_meta: usize,
    pub spot_meta: usize,
    pub perp_dexs: usize,
}

#[derive(Debug, Default)]
struct FixtureState {
    perp_meta: PerpMeta,
    spot_meta: SpotMeta,
    perp_dexs: Vec<Option<PerpDex>>,
    dex_metas: HashMap<String, PerpMeta>,
    fail_perp_meta: bool,
    fail_spot_meta: bool,
    fail_perp_dexs: bool,
    failing_dexs: HashSet<String>,
    calls: CallCounts,
}

pub struct FixtureTransport {
    environment: Environment,
    state: Mutex<FixtureState>,
}

impl FixtureTransport {
    /// Main dex perps and spot markets, empty builder-dex directory
    pub fn mainnet() -> Self {
        Self {
            environment: Environment::Mainnet,
            state: Mutex::new(FixtureState {
                perp_meta: fixture_perp_meta(),
                spot_meta: fixture_spot_meta(),
                perp_dexs: vec![None],
                ..FixtureState::default()
            }),
        }
    }

    /// Mainnet data plus two builder dexes: "test" (index 1), "other" (index 2)
    pub fn testnet() -> Self {
        let mut dex_metas = HashMap::new();
        dex_metas.insert("test".to_string(), fixture_test_dex_meta());
        dex_metas.insert(
            "other".to_string(),
            PerpMeta {
                universe: vec![PerpAsset::new("other:XYZ", 1)],
            },
        );

        Self {
            environment: Environment::Testnet,
            state: Mutex::new(FixtureState {
                perp_meta: fixture_perp_meta(),
                spot_meta: fixture_spot_meta(),
                perp_dexs: vec![None, Some(PerpDex::named("test")), Some(PerpDex::named("other"))],
                dex_metas,
                ..FixtureState::default()
            }),
        }
    }

    pub fn calls(&self) -> CallCounts {
        self.state.lock().calls
    }

    pub fn set_perp_meta(&self, meta: PerpMeta) {
        self.state.lock().perp_meta = meta;
    }

    pub fn fail_perp_meta(&self, fail: bool) {
        self.state.lock().fail_perp_meta = fail;
    }

    pub fn fail_spot_meta(&self, fail: bool) {
        self.state.lock().fail_spot_meta = fail;
    }

    pub fn fail_perp_dexs(&self, fail: bool) {
        self.state.lock().fail_perp_dexs = fail;
    }

    pub fn fail_dex(&self, dex: &str) {
        self.state.lock().failing_dexs.insert(dex.to_string());
    }
}

impl MetadataTransport for FixtureTransport {
    fn environment(&self) -> Environment {
        self.environment
    }

    async fn perp_meta(&self, dex: Option<&str>) -> Result<PerpMeta> {
        let mut state = self.state.lock();
        state.calls.perp_meta += 1;
        match dex {
            None if state.fail_perp_meta => Err(ConverterError::Network("meta unavailable".into())),
            None => Ok(state.perp_meta.clone()),
            Some(name) if state.failing_dexs.contains(name) => Err(ConverterError::Network(
                format!("meta for dex {} unavailable", name),
            )),
            Some(name) => state
                .dex_metas
                .get(name)
                .cloned()
                .ok_or_else(|| ConverterError::Http(400)),
        }
    }

    async fn spot_meta(&self) -> Result<SpotMeta> {
        let mut state = self.state.lock();
        state.calls.spot_meta += 1;
        if state.fail_spot_meta {
            return Err(ConverterError::Network("spotMeta unavailable".into()));
        }
        Ok(state.spot_meta.clone())
    }

    async fn perp_dexs(&self) -> Result<Vec<Option<PerpDex>>> {
        let mut state = self.state.lock();
        state.calls.perp_dexs += 1;
        if state.fail_perp_dexs {
            return Err(ConverterError::Network("perpDexs unavailable".into()));
        }
        Ok(state.perp_dexs.clone())
    }
}

pub fn fixture_perp_meta() -> PerpMeta {
    PerpMeta {
        universe: vec![
            PerpAsset::new("BTC", 5),
            PerpAsset::new("ETH", 4),
            PerpAsset::new("ATOM", 2),
            PerpAsset::new("MATIC", 1),
            PerpAsset::new("DYDX", 1),
            PerpAsset::new("SOL", 2),
        ],
    }
}

/// PURR/USDC is canonical at index 0, HYPE/USDC is `@107`
pub fn fixture_spot_meta() -> SpotMeta {
    let token = |name: &str, index: u32, sz_decimals: u32| SpotToken {
        name: name.to_string(),
        sz_decimals,
        wei_decimals: 8,
        index,
        is_canonical: true,
    };
    let market = |name: &str, tokens: [u32; 2], index: u32, is_canonical: bool| SpotMarket {
        name: name.to_string(),
        tokens: tokens.to_vec(),
        index,
        is_canonical,
    };

    SpotMeta {
        universe: vec![
            market("PURR/USDC", [1, 0], 0, true),
            market("@1", [2, 0], 1, false),
            market("@107", [150, 0], 107, false),
        ],
        tokens: vec![
            token("USDC", 0, 8),
            token("PURR", 1, 0),
            token("HFUN", 2, 2),
            token("HYPE", 150, 2),
        ],
    }
}

pub fn fixture_test_dex_meta() -> PerpMeta {
    PerpMeta {
        universe: vec![PerpAsset::new("test:ABC", 0), PerpAsset::new("test:DEF", 3)],
    }
}
