//! Elemental type identifiers.

use serde::{Deserialize, Serialize};

/// Default element ordering used to seed an empty chart.
///
/// Saved matrices may be indexed positionally against this list, so entries
/// must never be reordered or removed. New elements go at the end.
pub const DEFAULT_ELEMENTS: [&str; 19] = [
    "none", "normal", "fire", "water", "electric", "grass", "ice", "fighting", "poison", "ground",
    "flying", "psychic", "bug", "rock", "ghost", "dragon", "dark", "steel", "fairy",
];

/// Key of the sentinel element that every attack hits for normal damage.
pub const NONE_KEY: &str = "none";

/// An opaque element identifier. The set of valid ids is owned by the chart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Element(String);

impl Element {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The sentinel "none" element.
    pub fn none() -> Self {
        Self(NONE_KEY.to_owned())
    }

    pub fn is_none(&self) -> bool {
        self.0 == NONE_KEY
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The default ordering as owned ids.
    pub fn defaults() -> Vec<Element> {
        DEFAULT_ELEMENTS.iter().map(|key| Element::new(*key)).collect()
    }
}

impl From<&str> for Element {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
