//! Info API response types
//!
//! Only the fields the index needs are modelled. Unknown fields are ignored
//! so additions on the exchange side do not break decoding.

use serde::{Deserialize, Serialize};

/// `{"type":"meta"}` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PerpMeta {
    pub universe: Vec<PerpAsset>,
}

/// Entry of the perpetual universe. Position in the list is the asset id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerpAsset {
    pub name: String,
    pub sz_decimals: u32,
    #[serde(default)]
    pub max_leverage: Option<u32>,
    #[serde(default)]
    pub only_isolated: bool,
    #[serde(default)]
    pub is_delisted: bool,
}

impl PerpAsset {
    pub fn new(name: impl Into<String>, sz_decimals: u32) -> Self {
        Self {
            name: name.into(),
            sz_decimals,
            max_leverage: None,
            only_isolated: false,
            is_delisted: false,
        }
    }
}

/// `{"type":"spotMeta"}` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SpotMeta {
    pub universe: Vec<SpotMarket>,
    pub tokens: Vec<SpotToken>,
}

/// Spot market: `tokens` holds [base, quote] token indices
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotMarket {
    pub name: String,
    pub tokens: Vec<u32>,
    pub index: u32,
    #[serde(default)]
    pub is_canonical: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotToken {
    pub name: String,
    pub sz_decimals: u32,
    #[serde(default)]
    pub wei_decimals: u32,
    pub index: u32,
    #[serde(default)]
    pub is_canonical: bool,
}

/// `{"type":"perpDexs"}` entry (the first element is `null`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerpDex {
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub deployer: String,
}

impl PerpDex {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_name: String::new(),
            deployer: String::new(),
        }
    }
}

/// Request body for `POST /info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub(crate) enum InfoRequest<'a> {
    Meta {
        #[serde(skip_serializing_if = "Option::is_none")]
        dex: Option<&'a str>,
    },
    SpotMeta,
    PerpDexs,
}
