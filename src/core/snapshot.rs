//! Immutable symbol index
//!
//! One snapshot is built from one round of metadata fetches and never
//! mutated afterwards. Reload builds a new snapshot and swaps it in.

use crate::transport::{PerpMeta, SpotMeta, SpotToken};
use std::collections::HashMap;

/// Spot asset ids start here (`10000 + spot market index`)
pub const SPOT_ASSET_OFFSET: u32 = 10_000;

/// Builder-dex asset ids start here
pub const BUILDER_DEX_ASSET_OFFSET: u32 = 100_000;

/// Width of each builder dex's id range (`100000 + dex_index * 10000`)
pub const BUILDER_DEX_ASSET_STRIDE: u32 = 10_000;

/// Asset id and order size precision for one symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetRecord {
    pub asset_id: u32,
    pub sz_decimals: u32,
}

/// Symbol index: every symbol to its [`AssetRecord`], spot symbols to their
/// display pair id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolSnapshot {
    assets: HashMap<String, AssetRecord>,
    spot_pair_ids: HashMap<String, String>,
}

impl SymbolSnapshot {
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::default()
    }

    #[inline]
    pub fn get(&self, symbol: &str) -> Option<AssetRecord> {
        self.assets.get(symbol).copied()
    }

    #[inline]
    pub fn asset_id(&self, symbol: &str) -> Option<u32> {
        self.assets.get(symbol).map(|r| r.asset_id)
    }

    #[inline]
    pub fn sz_decimals(&self, symbol: &str) -> Option<u32> {
        self.assets.get(symbol).map(|r| r.sz_decimals)
    }

    #[inline]
    pub fn spot_pair_id(&self, symbol: &str) -> Option<&str> {
        self.spot_pair_ids.get(symbol).map(String::as_str)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.assets.contains_key(symbol)
    }

    /// Total number of symbols (perp + spot + builder dex)
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn spot_len(&self) -> usize {
        self.spot_pair_ids.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, AssetRecord)> {
        self.assets.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Accumulates metadata into a fresh [`SymbolSnapshot`]
///
/// First insertion of a symbol wins. Feed perps, then spot, then builder
/// dexes in directory order.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    snapshot: SymbolSnapshot,
}

impl SnapshotBuilder {
    /// Main-dex perpetuals: asset id is the position in the universe
    pub fn perps(mut self, meta: &PerpMeta) -> Self {
        for (position, asset) in meta.universe.iter().enumerate() {
            self.insert(asset.name.clone(), position as u32, asset.sz_decimals);
        }
        self
    }

    /// Spot markets: `BASE/QUOTE` keyed, asset id `10000 + market.index`,
    /// size decimals of the base token
    pub fn spot(mut self, meta: &SpotMeta) -> Self {
        let tokens: HashMap<u32, &SpotToken> =
            meta.tokens.iter().map(|t| (t.index, t)).collect();

        for market in &meta.universe {
            let (base, quote) = match market.tokens.as_slice() {
                [base, quote, ..] => match (tokens.get(base), tokens.get(quote)) {
                    (Some(base), Some(quote)) => (*base, *quote),
                    _ => {
                        tracing::debug!(
                            market = %market.name,
                            "Skipping spot market with unknown token index"
                        );
                        continue;
                    }
                },
                _ => {
                    tracing::debug!(market = %market.name, "Skipping spot market without pair");
                    continue;
                }
            };

            let symbol = format!("{}/{}", base.name, quote.name);
            let pair_id = if market.is_canonical {
                symbol.clone()
            } else {
                format!("@{}", market.index)
            };

            let asset_id = match spot_asset_id(market.index) {
                Some(id) => id,
                None => {
                    tracing::debug!(
                        market = %market.name,
                        index = market.index,
                        "Skipping spot market with out-of-range index"
                    );
                    continue;
                }
            };

            if self.insert(symbol.clone(), asset_id, base.sz_decimals) {
                self.snapshot.spot_pair_ids.insert(symbol, pair_id);
            }
        }
        self
    }

    /// Builder-dex perpetuals, keyed `"<dex>:<name>"`
    ///
    /// `dex_index` is the dex's position in the `perpDexs` directory.
    /// Assets past the dex's id range are skipped.
    pub fn builder_dex(mut self, dex: &str, dex_index: usize, meta: &PerpMeta) -> Self {
        let base = match builder_dex_offset(dex_index) {
            Some(base) => base,
            None => {
                tracing::debug!(dex, dex_index, "Skipping builder dex with out-of-range index");
                return self;
            }
        };
        let prefix = format!("{}:", dex);

        for (position, asset) in meta.universe.iter().enumerate() {
            let position = match u32::try_from(position) {
                Ok(p) if p < BUILDER_DEX_ASSET_STRIDE => p,
                _ => {
                    tracing::debug!(
                        dex,
                        skipped = meta.universe.len() - position,
                        "Builder dex universe exceeds its asset id range"
                    );
                    break;
                }
            };
            let symbol = if asset.name.starts_with(&prefix) {
                asset.name.clone()
            } else {
                format!("{}{}", prefix, asset.name)
            };
            self.insert(symbol, base + position, asset.sz_decimals);
        }
        self
    }

    /// Single record, e.g. a manual override fed before the metadata
    pub fn with_asset(mut self, symbol: impl Into<String>, record: AssetRecord) -> Self {
        self.insert(symbol.into(), record.asset_id, record.sz_decimals);
        self
    }

    pub fn build(self) -> SymbolSnapshot {
        self.snapshot
    }

    /// Returns false when the symbol was already present
    fn insert(&mut self, symbol: String, asset_id: u32, sz_decimals: u32) -> bool {
        use std::collections::hash_map::Entry;

        match self.snapshot.assets.entry(symbol) {
            Entry::Vacant(slot) => {
                slot.insert(AssetRecord {
                    asset_id,
                    sz_decimals,
                });
                true
            }
            Entry::Occupied(existing) => {
                tracing::debug!(
                    symbol = %existing.key(),
                    kept = existing.get().asset_id,
                    dropped = asset_id,
                    "Duplicate symbol ignored"
                );
                false
            }
        }
    }
}

/// First asset id of the builder dex at `dex_index` in the directory,
/// `None` when the range would not fit in a `u32`
#[inline]
pub fn builder_dex_offset(dex_index: usize) -> Option<u32> {
    let base = u32::try_from(dex_index)
        .ok()?
        .checked_mul(BUILDER_DEX_ASSET_STRIDE)?
        .checked_add(BUILDER_DEX_ASSET_OFFSET)?;
    base.checked_add(BUILDER_DEX_ASSET_STRIDE - 1)?;
    Some(base)
}

/// Spot asset id, `None` unless it lands in `[10000, 100000)`
#[inline]
pub fn spot_asset_id(market_index: u32) -> Option<u32> {
    SPOT_ASSET_OFFSET
        .checked_add(market_index)
        .filter(|id| *id < BUILDER_DEX_ASSET_OFFSET)
}
