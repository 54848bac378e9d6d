//! Concrete state payloads.

use game_rules::{Element, GridPos};
use serde::{Deserialize, Serialize};

use crate::modifier::{EffectivenessModifier, HpModifier, PriorityChain};

/// Replaces a character's defending elements while attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementOverride {
    pub elements: Vec<Element>,
}

impl ElementOverride {
    pub fn new<E: Into<Element>>(elements: impl IntoIterator<Item = E>) -> Self {
        Self {
            elements: elements.into_iter().map(Into::into).collect(),
        }
    }
}

/// Tiles a status, terrain or tile effect covers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MarkedLocations {
    pub locations: Vec<GridPos>,
}

impl MarkedLocations {
    pub fn new(locations: Vec<GridPos>) -> Self {
        Self { locations }
    }

    pub fn covers(&self, pos: GridPos) -> bool {
        self.locations.contains(&pos)
    }
}

/// Turns left before the owning effect expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub remaining: u32,
}

impl Countdown {
    pub fn new(remaining: u32) -> Self {
        Self { remaining }
    }

    /// Advance one turn. Returns true once the countdown has run out.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }
}

/// Overrides the element a skill attacks with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredElement {
    pub element: Element,
}

impl StoredElement {
    pub fn new(element: impl Into<Element>) -> Self {
        Self {
            element: element.into(),
        }
    }
}

/// Extra chains contributed while the owning skill is in use.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GrantedModifiers {
    #[serde(default)]
    pub effectiveness: PriorityChain<EffectivenessModifier>,
    #[serde(default)]
    pub hp: PriorityChain<HpModifier>,
}
