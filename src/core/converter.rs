//! Symbol converter (cold path build, hot path lookups)
//!
//! Fetches metadata once, builds a [`SymbolSnapshot`] and serves synchronous
//! lookups from it. `reload()` builds a complete new snapshot before
//! swapping it in, so readers see either the old or the new index.
//!
//! Concurrent `reload()` calls are not coordinated: the last one to finish
//! wins.

use crate::core::snapshot::SymbolSnapshot;
use crate::infrastructure::config::{Config, ConverterConfig};
use crate::transport::{HttpTransport, MetadataTransport, PerpDex, PerpMeta};
use crate::Result;
use futures_util::future::join_all;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Instant;

/// Symbol to asset id / size decimals / spot pair id resolver
pub struct SymbolConverter<T> {
    transport: T,
    config: ConverterConfig,
    snapshot: RwLock<Arc<SymbolSnapshot>>,
}

impl SymbolConverter<HttpTransport> {
    /// Build an HTTP-backed converter from configuration
    pub async fn connect(config: &Config) -> Result<Self> {
        let transport = HttpTransport::from_config(&config.transport)?;
        Self::create(transport, config.converter.clone()).await
    }
}

impl<T: MetadataTransport> SymbolConverter<T> {
    /// Fetch metadata and build the initial index
    ///
    /// # Errors
    /// Any transport failure; no converter is produced.
    pub async fn create(transport: T, config: impl Into<ConverterConfig>) -> Result<Self> {
        let config = config.into();
        let snapshot = fetch_snapshot(&transport, &config).await?;
        Ok(Self {
            transport,
            config,
            snapshot: RwLock::new(Arc::new(snapshot)),
        })
    }

    /// Re-fetch metadata with the captured configuration and replace the index
    ///
    /// # Errors
    /// Any transport failure; the previous index stays in effect.
    pub async fn reload(&self) -> Result<()> {
        let snapshot = fetch_snapshot(&self.transport, &self.config).await?;
        *self.snapshot.write() = Arc::new(snapshot);
        Ok(())
    }

    /// Asset id for a perp, spot or loaded builder-dex symbol
    #[inline]
    pub fn get_asset_id(&self, symbol: &str) -> Option<u32> {
        self.snapshot.read().asset_id(symbol)
    }

    /// Order size decimals for a perp, spot or loaded builder-dex symbol
    #[inline]
    pub fn get_sz_decimals(&self, symbol: &str) -> Option<u32> {
        self.snapshot.read().sz_decimals(symbol)
    }

    /// Display pair id for spot symbols only ("PURR/USDC" or "@107")
    #[inline]
    pub fn get_spot_pair_id(&self, symbol: &str) -> Option<String> {
        self.snapshot.read().spot_pair_id(symbol).map(str::to_owned)
    }

    /// Current index, consistent across several lookups
    pub fn snapshot(&self) -> Arc<SymbolSnapshot> {
        Arc::clone(&*self.snapshot.read())
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }
}

impl<T> std::fmt::Debug for SymbolConverter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolConverter")
            .field("config", &self.config)
            .field("symbols", &self.snapshot.read().len())
            .finish()
    }
}

/// Run every fetch and build a snapshot; nothing is installed here
async fn fetch_snapshot<T: MetadataTransport>(
    transport: &T,
    config: &ConverterConfig,
) -> Result<SymbolSnapshot> {
    let started = Instant::now();
    let want_dexs = config.dexs.is_enabled();

    tracing::debug!(
        environment = transport.environment().name(),
        dexs = ?config.dexs,
        "Fetching symbol metadata"
    );

    let (perp_meta, spot_meta, perp_dexs) = tokio::join!(
        transport.perp_meta(None),
        transport.spot_meta(),
        async {
            if want_dexs {
                transport.perp_dexs().await.map(Some)
            } else {
                Ok(None)
            }
        }
    );
    let perp_meta = perp_meta?;
    let spot_meta = spot_meta?;
    let perp_dexs = perp_dexs?.unwrap_or_default();

    let dex_metas = fetch_builder_dexs(transport, config, &perp_dexs).await?;

    let mut builder = SymbolSnapshot::builder().perps(&perp_meta).spot(&spot_meta);
    for (name, index, meta) in &dex_metas {
        builder = builder.builder_dex(name, *index, meta);
    }
    let snapshot = builder.build();

    tracing::info!(
        environment = transport.environment().name(),
        perps = perp_meta.universe.len(),
        spot = snapshot.spot_len(),
        builder_dexs = dex_metas.len(),
        symbols = snapshot.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Symbol index built"
    );

    Ok(snapshot)
}

/// Fetch the selected builder dexes' universes concurrently
///
/// Index 0 of the directory is the main dex and is never fetched here.
async fn fetch_builder_dexs<T: MetadataTransport>(
    transport: &T,
    config: &ConverterConfig,
    perp_dexs: &[Option<PerpDex>],
) -> Result<Vec<(String, usize, PerpMeta)>> {
    let selected: Vec<(usize, &str)> = perp_dexs
        .iter()
        .enumerate()
        .skip(1)
        .filter_map(|(index, dex)| dex.as_ref().map(|d| (index, d.name.as_str())))
        .filter(|(_, name)| config.dexs.includes(name))
        .collect();

    if selected.is_empty() {
        return Ok(Vec::new());
    }

    let results = join_all(
        selected
            .iter()
            .map(|(_, name)| transport.perp_meta(Some(*name))),
    )
    .await;

    let mut metas = Vec::with_capacity(selected.len());
    for ((index, name), result) in selected.into_iter().zip(results) {
        match result {
            Ok(meta) => {
                tracing::debug!(dex = name, index, assets = meta.universe.len(), "Builder dex loaded");
                metas.push((name.to_string(), index, meta));
            }
            Err(e) if !config.fail_on_dex_error => {
                tracing::warn!(dex = name, index, error = %e, "Skipping builder dex");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(metas)
}
