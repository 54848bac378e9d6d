//! Character and held item definitions.

use game_rules::{Element, EntityId};
use serde::{Deserialize, Serialize};

use super::StatusEffect;
use crate::modifier::{EffectivenessModifier, HpModifier, PriorityChain, Source};
use crate::state::{ElementOverride, StateSet};

fn default_transferable() -> bool {
    true
}

/// An item a character can hold. Its chains join the holder's evaluation
/// through equipment sharing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: EntityId,
    pub name: String,
    /// Default pass-through check. False marks the item non-transferable.
    #[serde(default = "default_transferable")]
    pub transferable: bool,
    #[serde(default)]
    pub effectiveness_chain: PriorityChain<EffectivenessModifier>,
    #[serde(default)]
    pub hp_chain: PriorityChain<HpModifier>,
    #[serde(skip)]
    pub states: StateSet,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            transferable: true,
            effectiveness_chain: PriorityChain::new(),
            hp_chain: PriorityChain::new(),
            states: StateSet::new(),
        }
    }

    pub fn with_effectiveness(mut self, chain: PriorityChain<EffectivenessModifier>) -> Self {
        self.effectiveness_chain = chain;
        self
    }

    pub fn with_hp(mut self, chain: PriorityChain<HpModifier>) -> Self {
        self.hp_chain = chain;
        self
    }

    pub fn non_transferable(mut self) -> Self {
        self.transferable = false;
        self
    }

    /// The default pass-through predicate.
    pub fn is_transferable(&self) -> bool {
        self.transferable
    }
}

/// A combatant with elements, an optional held item, its own chains and statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: EntityId,
    pub name: String,
    /// Species key checked by family-gated modifiers.
    pub species: String,
    /// Up to two defending elements.
    pub elements: Vec<Element>,
    pub held_item: Option<Item>,

    #[serde(default)]
    pub effectiveness_chain: PriorityChain<EffectivenessModifier>,
    #[serde(default)]
    pub hp_chain: PriorityChain<HpModifier>,
    #[serde(default)]
    pub statuses: Vec<StatusEffect>,

    #[serde(skip)]
    pub states: StateSet,
}

impl Character {
    /// Create a new character with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            species: String::new(),
            elements: Vec::new(),
            held_item: None,
            effectiveness_chain: PriorityChain::new(),
            hp_chain: PriorityChain::new(),
            statuses: Vec::new(),
            states: StateSet::new(),
        }
    }

    pub fn with_species(mut self, species: impl Into<String>) -> Self {
        self.species = species.into();
        self
    }

    pub fn with_elements<E: Into<Element>>(
        mut self,
        elements: impl IntoIterator<Item = E>,
    ) -> Self {
        self.elements = elements.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.held_item = Some(item);
        self
    }

    pub fn with_effectiveness(mut self, chain: PriorityChain<EffectivenessModifier>) -> Self {
        self.effectiveness_chain = chain;
        self
    }

    pub fn with_hp(mut self, chain: PriorityChain<HpModifier>) -> Self {
        self.hp_chain = chain;
        self
    }

    pub fn with_status(mut self, status: StatusEffect) -> Self {
        self.statuses.push(status);
        self
    }

    /// The two elements this character defends with.
    ///
    /// An [`ElementOverride`] state takes precedence over `elements`. Missing
    /// or repeated slots become `none`, which is neutral against everything.
    pub fn defending_elements(&self) -> [Element; 2] {
        let source = self
            .states
            .get::<ElementOverride>()
            .map(|o| o.elements.as_slice())
            .unwrap_or(self.elements.as_slice());

        let first = source.first().cloned().unwrap_or_else(Element::none);
        let second = source
            .get(1)
            .filter(|second| **second != first)
            .cloned()
            .unwrap_or_else(Element::none);
        [first, second]
    }

    pub fn has_status(&self, name: &str) -> bool {
        self.statuses.iter().any(|s| s.name == name)
    }

    /// Own chain first, then each status in the order it was gained.
    pub fn effectiveness_sources(&self) -> Vec<Source<'_, EffectivenessModifier>> {
        std::iter::once(&self.effectiveness_chain)
            .chain(self.statuses.iter().map(|s| &s.effectiveness_chain))
            .map(|chain| Source::new(chain, Some(self)))
            .collect()
    }

    pub fn hp_sources(&self) -> Vec<Source<'_, HpModifier>> {
        std::iter::once(&self.hp_chain)
            .chain(self.statuses.iter().map(|s| &s.hp_chain))
            .map(|chain| Source::new(chain, Some(self)))
            .collect()
    }
}
