//! Core types for symbol resolution
//!
//! This module contains the fundamental types used throughout the crate:
//! - SymbolConverter: fetch, lookup and reload
//! - SymbolSnapshot: immutable symbol index
//! - DexSelection: which builder dexes get loaded

pub mod converter;
pub mod dex;
pub mod snapshot;

pub use converter::SymbolConverter;
pub use dex::DexSelection;
pub use snapshot::{
    builder_dex_offset, spot_asset_id, AssetRecord, SnapshotBuilder, SymbolSnapshot,
    BUILDER_DEX_ASSET_OFFSET, BUILDER_DEX_ASSET_STRIDE, SPOT_ASSET_OFFSET,
};
