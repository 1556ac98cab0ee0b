//! Builder dex selection
//!
//! Which third-party perp dexes get their assets loaded into the index.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DexSelection {
    /// Main dex only
    #[default]
    None,
    /// Every builder dex listed by `perpDexs`
    All,
    /// Only the named builder dexes
    Only(Vec<String>),
}

impl DexSelection {
    /// Whether the builder-dex directory needs to be fetched at all
    pub fn is_enabled(&self) -> bool {
        match self {
            DexSelection::None => false,
            DexSelection::All => true,
            DexSelection::Only(names) => !names.is_empty(),
        }
    }

    pub fn includes(&self, dex: &str) -> bool {
        match self {
            DexSelection::None => false,
            DexSelection::All => true,
            DexSelection::Only(names) => names.iter().any(|n| n == dex),
        }
    }
}

impl From<bool> for DexSelection {
    fn from(all: bool) -> Self {
        if all {
            DexSelection::All
        } else {
            DexSelection::None
        }
    }
}

impl From<Vec<String>> for DexSelection {
    fn from(names: Vec<String>) -> Self {
        DexSelection::Only(names)
    }
}

impl From<&[&str]> for DexSelection {
    fn from(names: &[&str]) -> Self {
        DexSelection::Only(names.iter().map(|n| n.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for DexSelection {
    fn from(names: [&str; N]) -> Self {
        DexSelection::from(&names[..])
    }
}

/// Config form: `dexs = false | true | ["name", ...]`
#[derive(Deserialize, Serialize)]
#[serde(untagged)]
enum DexSelectionRepr {
    Flag(bool),
    Names(Vec<String>),
}

impl<'de> Deserialize<'de> for DexSelection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match DexSelectionRepr::deserialize(deserializer)? {
            DexSelectionRepr::Flag(all) => DexSelection::from(all),
            DexSelectionRepr::Names(names) => DexSelection::Only(names),
        })
    }
}

impl Serialize for DexSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let repr = match self {
            DexSelection::None => DexSelectionRepr::Flag(false),
            DexSelection::All => DexSelectionRepr::Flag(true),
            DexSelection::Only(names) => DexSelectionRepr::Names(names.clone()),
        };
        repr.serialize(serializer)
    }
}
