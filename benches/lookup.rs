//! Benchmarks for symbol lookups
//!
//! Target: <100ns per lookup

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use symbol_converter::transport::{
    PerpAsset, PerpDex, PerpMeta, SpotMarket, SpotMeta, SpotToken,
};
use symbol_converter::{Environment, MetadataTransport, Result, SymbolConverter};

/// Static transport with a realistically sized universe
struct StaticTransport {
    perps: PerpMeta,
    spot: SpotMeta,
}

impl StaticTransport {
    fn new() -> Self {
        let perps = PerpMeta {
            universe: (0..200)
                .map(|i| PerpAsset::new(format!("PERP{}", i), (i % 6) as u32))
                .collect(),
        };

        let mut tokens = vec![SpotToken {
            name: "USDC".to_string(),
            sz_decimals: 8,
            wei_decimals: 8,
            index: 0,
            is_canonical: true,
        }];
        let mut universe = Vec::new();
        for i in 1..=300u32 {
            tokens.push(SpotToken {
                name: format!("TKN{}", i),
                sz_decimals: i % 4,
                wei_decimals: 8,
                index: i,
                is_canonical: false,
            });
            universe.push(SpotMarket {
                name: format!("@{}", i - 1),
                tokens: vec![i, 0],
                index: i - 1,
                is_canonical: i == 1,
            });
        }

        Self {
            perps,
            spot: SpotMeta { universe, tokens },
        }
    }
}

impl MetadataTransport for StaticTransport {
    fn environment(&self) -> Environment {
        Environment::Mainnet
    }

    async fn perp_meta(&self, _dex: Option<&str>) -> Result<PerpMeta> {
        Ok(self.perps.clone())
    }

    async fn spot_meta(&self) -> Result<SpotMeta> {
        Ok(self.spot.clone())
    }

    async fn perp_dexs(&self) -> Result<Vec<Option<PerpDex>>> {
        Ok(vec![None])
    }
}

fn bench_lookups(c: &mut Criterion) {
    let converter = tokio_test::block_on(SymbolConverter::create(StaticTransport::new(), false))
        .expect("converter");

    c.bench_function("get_asset_id_perp", |b| {
        b.iter(|| converter.get_asset_id(black_box("PERP150")))
    });

    c.bench_function("get_asset_id_spot", |b| {
        b.iter(|| converter.get_asset_id(black_box("TKN42/USDC")))
    });

    c.bench_function("get_asset_id_miss", |b| {
        b.iter(|| converter.get_asset_id(black_box("NONE/EXISTENT")))
    });

    c.bench_function("get_spot_pair_id", |b| {
        b.iter(|| converter.get_spot_pair_id(black_box("TKN42/USDC")))
    });
}

fn bench_reload(c: &mut Criterion) {
    let converter = tokio_test::block_on(SymbolConverter::create(StaticTransport::new(), false))
        .expect("converter");

    c.bench_function("reload", |b| {
        b.iter(|| tokio_test::block_on(converter.reload()).expect("reload"))
    });
}

criterion_group!(benches, bench_lookups, bench_reload);
criterion_main!(benches);
